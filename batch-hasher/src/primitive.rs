use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::Hmac;
use sha1::Sha1;

use crate::error::Error;

/// Iteration count used when none is configured.
pub const DEFAULT_ITERATIONS: u32 = 20_000;

/// Derived key length, in bits, used when none is configured.
pub const DEFAULT_KEY_LENGTH_BITS: u32 = 256;

/// Separator between the encoded salt and the encoded key in a digest string.
pub const DIGEST_SEPARATOR: char = '$';

/// A deterministic, salted password hash.
///
/// Implementations must be pure: the same password and salt always produce the
/// same digest. Failures are reserved for configuration or environment problems,
/// never for the content of a valid password string.
pub trait HashPrimitive: Send + Sync + 'static {
    fn hash(&self, password: &str, salt: &[u8]) -> Result<String, Error>;
}

/// PBKDF2 with HMAC-SHA1.
///
/// Digests are rendered as `base64(salt)$base64(key)` using the standard,
/// padded alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pbkdf2Sha1 {
    iterations: u32,
    key_length_bits: u32,
}

impl Default for Pbkdf2Sha1 {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            key_length_bits: DEFAULT_KEY_LENGTH_BITS,
        }
    }
}

impl Pbkdf2Sha1 {
    /// Creates a primitive with the given parameters.
    ///
    /// Returns [`Error::Hash`] if the iteration count is zero or the key length is
    /// zero or not a whole number of bytes.
    pub fn new(iterations: u32, key_length_bits: u32) -> Result<Self, Error> {
        let primitive = Self { iterations, key_length_bits };
        primitive.validate()?;
        Ok(primitive)
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn key_length_bits(&self) -> u32 {
        self.key_length_bits
    }

    fn validate(&self) -> Result<(), Error> {
        if self.iterations == 0 {
            return Err(Error::Hash("iteration count must be at least 1".to_string()));
        }
        if self.key_length_bits == 0 || self.key_length_bits % 8 != 0 {
            return Err(Error::Hash(format!(
                "unsupported key length of {} bits",
                self.key_length_bits
            )));
        }
        Ok(())
    }

    fn derive_key(&self, password: &str, salt: &[u8]) -> Result<Vec<u8>, Error> {
        self.validate()?;
        let mut key = vec![0u8; (self.key_length_bits / 8) as usize];
        pbkdf2::pbkdf2::<Hmac<Sha1>>(password.as_bytes(), salt, self.iterations, &mut key)
            .map_err(|e| Error::Hash(e.to_string()))?;
        Ok(key)
    }
}

impl HashPrimitive for Pbkdf2Sha1 {
    fn hash(&self, password: &str, salt: &[u8]) -> Result<String, Error> {
        let key = self.derive_key(password, salt)?;
        Ok(format!("{}{}{}", STANDARD.encode(salt), DIGEST_SEPARATOR, STANDARD.encode(key)))
    }
}

/// Checks whether `password` hashes to a stored `salt$hash` digest.
///
/// The salt is recovered from the stored value, so this works for digests
/// produced with any salt.
pub fn verify<P: HashPrimitive + ?Sized>(
    primitive: &P,
    password: &str,
    stored: &str,
) -> Result<bool, Error> {
    let mut parts = stored.split(DIGEST_SEPARATOR);
    let (Some(encoded_salt), Some(_), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(Error::MalformedDigest(
            "expected a value of the form 'salt$hash'".to_string(),
        ));
    };
    let salt = STANDARD
        .decode(encoded_salt)
        .map_err(|e| Error::MalformedDigest(format!("salt is not valid base64: {e}")))?;

    Ok(primitive.hash(password, &salt)? == stored)
}

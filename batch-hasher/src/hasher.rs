use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Error;
use crate::primitive::HashPrimitive;

/// A unit of work that populates its own result when run.
pub trait Executable {
    fn execute(&mut self) -> Result<(), Error>;
}

/// Hashes one batch of passwords with a shared salt.
///
/// The batch is copied on construction, and the resulting password to digest
/// mapping is owned by this hasher alone until it is handed back to the caller.
pub struct BatchHasher<P: ?Sized> {
    index: usize,
    passwords: Vec<String>,
    salt: Arc<[u8]>,
    primitive: Arc<P>,
    password_to_hashes: HashMap<String, String>,
    progress: Option<Arc<AtomicU64>>,
}

impl<P: HashPrimitive + ?Sized> BatchHasher<P> {
    pub fn new(index: usize, passwords: &[String], salt: Arc<[u8]>, primitive: Arc<P>) -> Self {
        Self {
            index,
            passwords: passwords.to_vec(),
            salt,
            primitive,
            password_to_hashes: HashMap::with_capacity(passwords.len()),
            progress: None,
        }
    }

    /// Increments `progress` once for every password hashed.
    pub fn with_progress(mut self, progress: Arc<AtomicU64>) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.passwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passwords.is_empty()
    }

    /// The partial mapping. Empty until [`Executable::execute`] has completed.
    pub fn password_to_hashes(&self) -> &HashMap<String, String> {
        &self.password_to_hashes
    }

    pub fn into_password_to_hashes(self) -> HashMap<String, String> {
        self.password_to_hashes
    }
}

impl<P: HashPrimitive + ?Sized> Executable for BatchHasher<P> {
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(batch = self.index, size = self.passwords.len())
    )]
    fn execute(&mut self) -> Result<(), Error> {
        for password in &self.passwords {
            let hash = self
                .primitive
                .hash(password, &self.salt)
                .map_err(|e| Error::Batch {
                    batch: self.index,
                    source: Box::new(e),
                })?;
            self.password_to_hashes.insert(password.clone(), hash);
            if let Some(progress) = &self.progress {
                progress.fetch_add(1, Ordering::Relaxed);
            }
        }

        tracing::info!(
            batch = self.index,
            "Completed hashing batch of {} passwords.",
            self.passwords.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Cheap stand-in for a key derivation function.
    struct Concat;

    impl HashPrimitive for Concat {
        fn hash(&self, password: &str, salt: &[u8]) -> Result<String, Error> {
            Ok(format!("{}:{}", String::from_utf8_lossy(salt), password))
        }
    }

    struct RejectsLong;

    impl HashPrimitive for RejectsLong {
        fn hash(&self, password: &str, _salt: &[u8]) -> Result<String, Error> {
            if password.len() > 4 {
                return Err(Error::Hash("unsupported algorithm".to_string()));
            }
            Ok(password.to_uppercase())
        }
    }

    fn passwords(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_hashes_every_password() {
        let batch = passwords(&["abc123", "password", "abc123"]);
        let mut hasher = BatchHasher::new(0, &batch, Arc::from(&b"salt"[..]), Arc::new(Concat));

        assert!(hasher.password_to_hashes().is_empty());
        hasher.execute().unwrap();

        let result = hasher.password_to_hashes();
        assert_eq!(result.len(), 2);
        assert_eq!(result["abc123"], "salt:abc123");
        assert_eq!(result["password"], "salt:password");
    }

    #[test]
    fn test_batch_is_a_snapshot() {
        let mut original = passwords(&["one", "two"]);
        let mut hasher = BatchHasher::new(0, &original, Arc::from(&b"s"[..]), Arc::new(Concat));

        original[0] = "mutated".to_string();
        original.push("three".to_string());
        hasher.execute().unwrap();

        let mut keys: Vec<_> = hasher.password_to_hashes().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["one", "two"]);
    }

    #[test]
    fn test_primitive_failure_fails_batch() {
        let batch = passwords(&["ok", "too long"]);
        let mut hasher = BatchHasher::new(3, &batch, Arc::from(&b""[..]), Arc::new(RejectsLong));

        let err = hasher.execute().unwrap_err();
        assert!(matches!(err, Error::Batch { batch: 3, .. }));
    }

    #[test]
    fn test_progress_counts_passwords() {
        let progress = Arc::new(AtomicU64::new(0));
        let batch = passwords(&["a", "b", "c"]);
        let mut hasher = BatchHasher::new(0, &batch, Arc::from(&b""[..]), Arc::new(Concat))
            .with_progress(Arc::clone(&progress));

        hasher.execute().unwrap();
        assert_eq!(progress.load(Ordering::Relaxed), 3);
        assert_eq!(hasher.len(), 3);
    }
}

//! Parallel batch computation of salted password hashes.
//!
//! A [`Coordinator`] splits a password list into contiguous batches, hashes each
//! batch on its own thread with a [`BatchHasher`], waits for every batch to
//! finish, and merges the partial results into a single password to digest
//! mapping.
//!
//! The hash itself is pluggable through [`HashPrimitive`]. The bundled
//! [`Pbkdf2Sha1`] primitive produces digests of the form
//! `base64(salt)$base64(key)`.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use batch_hasher::{Coordinator, Pbkdf2Sha1};
//!
//! # async fn run() -> Result<(), batch_hasher::Error> {
//! let passwords = vec!["123456".to_string(), "password".to_string()];
//! let coordinator = Coordinator::new(Arc::new(Pbkdf2Sha1::default()), "salt", 4);
//! let password_to_hashes = coordinator.generate_all_hashes(&passwords).await?;
//! assert_eq!(password_to_hashes.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod coordinator;
pub mod error;
pub mod hasher;
pub mod partition;
pub mod primitive;

pub use coordinator::{Coordinator, DEFAULT_CONCURRENCY, merge};
pub use error::Error;
pub use hasher::{BatchHasher, Executable};
pub use partition::partition;
pub use primitive::{
    DEFAULT_ITERATIONS, DEFAULT_KEY_LENGTH_BITS, HashPrimitive, Pbkdf2Sha1, verify,
};

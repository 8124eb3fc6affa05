//! Recovers plaintext passwords from a breached credential dump.
//!
//! A list of common passwords is hashed in parallel with
//! [`batch_hasher::Coordinator`] using the salt the dump was produced with, and
//! each resulting digest is looked up in the dump. Every user stored under a
//! matching digest is reported as cracked.

pub mod crack;
pub mod error;
pub mod io;

pub use crack::{CrackReport, CrackedPassword, cross_reference};
pub use error::Error;
pub use io::{BreachDatabase, read_breach_database, read_passwords, write_passwords_and_hashes};

/// Salt the bundled breach dumps were hashed with.
pub const DISCOVERED_SALT: &str = "salt";

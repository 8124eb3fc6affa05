use std::collections::HashMap;

use crate::io::BreachDatabase;

/// A recovered password and every user known to be using it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrackedPassword {
    pub password: String,
    pub user_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrackReport {
    /// Sorted by password.
    pub cracked: Vec<CrackedPassword>,
}

impl CrackReport {
    /// Total number of users whose password was recovered.
    pub fn user_count(&self) -> usize {
        self.cracked.iter().map(|c| c.user_ids.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cracked.is_empty()
    }
}

/// Looks up every computed digest in the breach database.
pub fn cross_reference(
    password_to_hashes: &HashMap<String, String>,
    hash_to_user_ids: &BreachDatabase,
) -> CrackReport {
    let mut cracked: Vec<CrackedPassword> = password_to_hashes
        .iter()
        .filter_map(|(password, hash)| {
            hash_to_user_ids.get(hash).map(|users| CrackedPassword {
                password: password.clone(),
                user_ids: users.iter().cloned().collect(),
            })
        })
        .collect();
    cracked.sort_unstable_by(|a, b| a.password.cmp(&b.password));

    CrackReport { cracked }
}

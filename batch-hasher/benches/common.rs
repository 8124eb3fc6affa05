use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const BASE_WORDS: &[&str] = &[
    "password", "qwerty", "dragon", "monkey", "letmein", "football", "sunshine", "princess",
    "admin", "welcome", "iloveyou", "shadow", "master", "baseball", "superman", "trustno1",
];

const SUFFIXES: &[&str] = &["", "1", "12", "123", "!", "2024", "01", "69", "007"];

/// Builds a list shaped like a common-password dump: dictionary words with
/// numeric or symbol suffixes, with roughly `duplicate_percent` of entries
/// repeating an earlier one so batches see the same password more than once.
///
/// Uses a fixed seed for reproducible benchmark results.
pub fn generate_common_passwords(count: usize, duplicate_percent: u32) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut passwords: Vec<String> = Vec::with_capacity(count);

    while passwords.len() < count {
        if !passwords.is_empty() && rng.gen_range(0..100) < duplicate_percent {
            let repeat = passwords[rng.gen_range(0..passwords.len())].clone();
            passwords.push(repeat);
            continue;
        }

        let word = BASE_WORDS.choose(&mut rng).copied().unwrap_or("password");
        let suffix = SUFFIXES.choose(&mut rng).copied().unwrap_or("");
        let password = if rng.gen_bool(0.25) {
            let mut capitalized = word.to_string();
            capitalized[..1].make_ascii_uppercase();
            format!("{capitalized}{suffix}")
        } else {
            format!("{word}{suffix}")
        };
        passwords.push(password);
    }

    passwords
}

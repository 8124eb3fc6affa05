//! Readers and writers for the comma separated files the cracker works with.
//!
//! Records are separated by newlines. Fields may be wrapped in double quotes,
//! with `""` standing for a literal quote inside a quoted field. A quoted field
//! may contain commas and line breaks.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use tokio::fs;

use crate::error::Error;

/// Digest to the ids of every user whose stored hash is that digest.
pub type BreachDatabase = HashMap<String, BTreeSet<String>>;

/// One parsed record and the line it starts on.
#[derive(Debug, PartialEq, Eq)]
struct Record {
    line: usize,
    fields: Vec<String>,
}

/// Reads plaintext passwords, one per record, taking the first field of each.
///
/// Blank lines are skipped. Order and duplicates are preserved.
pub async fn read_passwords(path: &Path) -> Result<Vec<String>, Error> {
    let contents = read_file(path).await?;
    let records = parse_records(&contents).map_err(|(line, reason)| Error::Parse {
        path: path.to_path_buf(),
        line,
        reason,
    })?;

    Ok(records.into_iter().map(|mut record| record.fields.swap_remove(0)).collect())
}

/// Reads `user_id,digest` records into a digest keyed lookup.
pub async fn read_breach_database(path: &Path) -> Result<BreachDatabase, Error> {
    let contents = read_file(path).await?;
    let parse_error = |line: usize, reason: String| Error::Parse {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let records = parse_records(&contents).map_err(|(line, reason)| parse_error(line, reason))?;
    let mut hash_to_user_ids = BreachDatabase::new();

    for record in records {
        let [user_id, hash, ..] = record.fields.as_slice() else {
            return Err(parse_error(
                record.line,
                format!("expected 'user_id,hash' but found {} field(s)", record.fields.len()),
            ));
        };
        hash_to_user_ids.entry(hash.clone()).or_default().insert(user_id.clone());
    }

    Ok(hash_to_user_ids)
}

/// Writes `password,digest` records sorted by password.
///
/// An existing file is only replaced when `force` is set.
pub async fn write_passwords_and_hashes(
    path: &Path,
    password_to_hashes: &HashMap<String, String>,
    force: bool,
) -> Result<(), Error> {
    let exists = fs::try_exists(path)
        .await
        .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    if exists && !force {
        return Err(Error::FileExists { path: path.to_path_buf() });
    }

    let mut entries: Vec<_> = password_to_hashes.iter().collect();
    entries.sort_unstable();

    let mut out = String::new();
    for (password, hash) in entries {
        push_field(&mut out, password);
        out.push(',');
        push_field(&mut out, hash);
        out.push('\n');
    }

    fs::write(path, out)
        .await
        .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;

    tracing::info!(path = %path.display(), "Wrote output of batch hashing");
    Ok(())
}

async fn read_file(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path)
        .await
        .map_err(|source| Error::Io { path: path.to_path_buf(), source })
}

/// Splits a whole file into records, skipping blank lines.
///
/// Every record has at least one field. Errors carry the line number where the
/// offending record starts.
fn parse_records(contents: &str) -> Result<Vec<Record>, (usize, String)> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = contents.chars().peekable();
    let mut line = 1;
    let mut record_line = 1;
    let mut in_quotes = false;
    let mut was_quoted = false;
    let mut blank = true;

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '\n' if in_quotes => {
                line += 1;
                field.push(c);
            }
            '"' if field.is_empty() && !was_quoted => {
                in_quotes = true;
                was_quoted = true;
                blank = false;
            }
            // CRLF line endings
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' => {
                if !blank {
                    fields.push(std::mem::take(&mut field));
                    records.push(Record {
                        line: record_line,
                        fields: std::mem::take(&mut fields),
                    });
                }
                was_quoted = false;
                blank = true;
                line += 1;
                record_line = line;
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
                was_quoted = false;
                blank = false;
            }
            _ if was_quoted && !in_quotes => {
                return Err((line, format!("unexpected '{c}' after closing quote")));
            }
            _ => {
                field.push(c);
                blank = false;
            }
        }
    }

    if in_quotes {
        return Err((record_line, "unterminated quoted field".to_string()));
    }
    if !blank {
        fields.push(field);
        records.push(Record { line: record_line, fields });
    }
    Ok(records)
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\n', '\r']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

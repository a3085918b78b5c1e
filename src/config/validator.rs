//! Config validation: SQL identifiers and program tags.

use crate::error::ConfigError;
use std::collections::HashSet;

/// Path segments already taken by fixed course routes.
const RESERVED_SEGMENTS: &[&str] = &["sorted"];

/// `[A-Za-z_][A-Za-z0-9_]*`, so the name can be interpolated into DDL unquoted.
pub fn validate_identifier(key: &'static str, value: &str) -> Result<(), ConfigError> {
    let mut chars = value.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier {
            key,
            value: value.to_string(),
        })
    }
}

pub fn validate_programs(programs: &[String]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for tag in programs {
        let path_safe = !tag.is_empty()
            && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !path_safe || RESERVED_SEGMENTS.contains(&tag.as_str()) {
            return Err(ConfigError::InvalidProgramTag(tag.clone()));
        }
        if !seen.insert(tag.as_str()) {
            return Err(ConfigError::DuplicateProgramTag(tag.clone()));
        }
    }
    Ok(())
}

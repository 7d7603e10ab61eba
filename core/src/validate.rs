//! Option specification validation.
//!
//! The engine accepts any short spec and long table, resolving oddities
//! deterministically (the first occurrence of a letter wins, a stray colon
//! is simply never matched). These checks catch such mistakes up front,
//! before they turn into confusing "unknown option" reports.
//!
//! # Examples
//!
//! ```
//! use trad_getopt_core::*;
//!
//! assert!(validate_short_spec("ab:c::").is_empty());
//! assert_eq!(
//!     validate_short_spec("aba"),
//!     vec![SpecError::DuplicateShortOption('a')]
//! );
//!
//! let table = LongOptions::new().with("--verbose", Arity::NoArgument);
//! assert_eq!(
//!     validate_long_options(&table),
//!     vec![SpecError::LongNameLeadingDash("--verbose".into())]
//! );
//! ```

use std::collections::HashSet;

use crate::error::SpecError;
use crate::options::LongOptions;

/// Validates a short spec, returning every problem found.
///
/// Reports letters declared twice and letters followed by more than two
/// colons.
pub fn validate_short_spec(spec: &str) -> Vec<SpecError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    let chars: Vec<char> = spec.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let letter = chars[i];
        i += 1;

        let mut colons = 0;
        while i < chars.len() && chars[i] == ':' {
            colons += 1;
            i += 1;
        }
        if colons > 2 {
            errors.push(SpecError::TooManyColons(letter));
        }
        if !seen.insert(letter) {
            errors.push(SpecError::DuplicateShortOption(letter));
        }
    }

    errors
}

/// Validates a long option table, returning every problem found.
///
/// Names must be non-empty, must not carry leading dashes, must not contain
/// `=` and must be unique.
pub fn validate_long_options(table: &LongOptions) -> Vec<SpecError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for name in table.names() {
        if name.is_empty() {
            errors.push(SpecError::EmptyLongName);
            continue;
        }
        if name.starts_with('-') {
            errors.push(SpecError::LongNameLeadingDash(name.to_string()));
        }
        if name.contains('=') {
            errors.push(SpecError::LongNameContainsEquals(name.to_string()));
        }
        if !seen.insert(name) {
            errors.push(SpecError::DuplicateLongOption(name.to_string()));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use crate::Arity;

    use super::*;

    #[test]
    fn test_validate_short_spec_accepts_leading_colon() {
        assert!(validate_short_spec(":ab").is_empty());
        assert!(validate_short_spec("").is_empty());
        assert!(validate_short_spec("a-").is_empty());
    }

    #[test]
    fn test_validate_short_spec_reports_every_problem() {
        let errors = validate_short_spec("a:::bb");
        assert_eq!(
            errors,
            vec![
                SpecError::TooManyColons('a'),
                SpecError::DuplicateShortOption('b'),
            ]
        );
    }

    #[test]
    fn test_validate_long_options_reports_duplicates_from_deserialized_tables() {
        let table: LongOptions = serde_json::from_value(serde_json::json!({
            "entries": [["foo", "no_argument"], ["foo", "required_argument"]]
        }))
        .unwrap();
        assert_eq!(
            validate_long_options(&table),
            vec![SpecError::DuplicateLongOption("foo".into())]
        );
    }

    #[test]
    fn test_validate_long_options_accepts_valid_table() {
        let table = LongOptions::new()
            .with("verbose", Arity::NoArgument)
            .with("output", Arity::RequiredArgument);
        assert!(validate_long_options(&table).is_empty());
    }
}

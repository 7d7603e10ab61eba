//! Error types for option parsing, specifications and configuration.
//!
//! [`GetoptError`] is what the engine raises for a rejected token.
//! [`SpecError`] reports malformed option specifications and
//! [`ConfigError`] covers loading and saving configuration files.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::DiagnosticStyle;
use crate::types::OptName;

/// A token the engine could not accept.
///
/// `Display` renders `<message> - <option>`, so a full diagnostic line is
/// `<program>: {error}`.
///
/// # Examples
///
/// ```
/// use trad_getopt_core::{GetoptError, OptName};
///
/// let err = GetoptError::UnknownOption { option: OptName::Short('x') };
/// assert_eq!(err.to_string(), "unknown option - -x");
/// assert_eq!(err.message(), "unknown option");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum GetoptError {
    /// The option is declared in neither the short spec nor the long table.
    #[error("unknown option - {option}")]
    UnknownOption { option: OptName },

    /// A required value was missing, or empty while empty values are
    /// disallowed.
    #[error("option requires an argument - {option}")]
    ArgumentRequired { option: OptName },

    /// A long option without arity received an inline `=value`.
    #[error("option doesn't take an argument - {option}")]
    ArgumentGiven { option: OptName },

    /// A long option prefix matched several names and none exactly.
    #[error("ambiguous option ({}) - {option}", candidate_list(.candidates))]
    AmbiguousOption {
        option: OptName,
        candidates: Vec<String>,
    },
}

fn candidate_list(candidates: &[String]) -> String {
    candidates
        .iter()
        .map(|c| format!("--{c}"))
        .collect::<Vec<_>>()
        .join(" ")
}

impl GetoptError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownOption { .. } => ErrorKind::UnknownOption,
            Self::ArgumentRequired { .. } => ErrorKind::ArgumentRequired,
            Self::ArgumentGiven { .. } => ErrorKind::ArgumentGiven,
            Self::AmbiguousOption { .. } => ErrorKind::AmbiguousOption,
        }
    }

    /// The offending option as the user presented it (typed prefix for
    /// unknown and ambiguous long options, resolved name otherwise).
    pub fn option(&self) -> &OptName {
        match self {
            Self::UnknownOption { option }
            | Self::ArgumentRequired { option }
            | Self::ArgumentGiven { option }
            | Self::AmbiguousOption { option, .. } => option,
        }
    }

    /// Candidate long names of an ambiguous option, empty otherwise.
    pub fn candidates(&self) -> &[String] {
        match self {
            Self::AmbiguousOption { candidates, .. } => candidates,
            _ => &[],
        }
    }

    /// The fixed message text, without the option token.
    pub fn message(&self) -> String {
        match self {
            Self::UnknownOption { .. } => "unknown option".to_string(),
            Self::ArgumentRequired { .. } => "option requires an argument".to_string(),
            Self::ArgumentGiven { .. } => "option doesn't take an argument".to_string(),
            Self::AmbiguousOption { candidates, .. } => {
                format!("ambiguous option ({})", candidate_list(candidates))
            }
        }
    }

    /// Formats the one-line diagnostic written to the error stream.
    ///
    /// # Examples
    ///
    /// ```
    /// use trad_getopt_core::{DiagnosticStyle, GetoptError, OptName};
    ///
    /// let err = GetoptError::ArgumentGiven { option: OptName::Long("foo".into()) };
    /// assert_eq!(
    ///     err.diagnostic("prog", DiagnosticStyle::Standard),
    ///     "prog: option doesn't take an argument - --foo"
    /// );
    /// assert_eq!(
    ///     err.diagnostic("prog", DiagnosticStyle::Legacy),
    ///     "prog: option doesn't take an argument - foo"
    /// );
    /// ```
    pub fn diagnostic(&self, program: &str, style: DiagnosticStyle) -> String {
        match style {
            DiagnosticStyle::Standard => format!("{program}: {self}"),
            DiagnosticStyle::Legacy => {
                format!("{program}: {} - {}", self.message(), self.option().bare())
            }
        }
    }
}

/// Discriminant of a [`GetoptError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnknownOption,
    ArgumentRequired,
    ArgumentGiven,
    AmbiguousOption,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOption => write!(f, "unknown_option"),
            Self::ArgumentRequired => write!(f, "argument_required"),
            Self::ArgumentGiven => write!(f, "argument_given"),
            Self::AmbiguousOption => write!(f, "ambiguous_option"),
        }
    }
}

/// Structural problems in a short spec or long option table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// A short option letter appears more than once.
    #[error("duplicate short option: -{0}")]
    DuplicateShortOption(char),
    /// A short option letter is followed by more than two colons.
    #[error("too many colons after short option: -{0}")]
    TooManyColons(char),
    /// A long option name is empty.
    #[error("long option name cannot be empty")]
    EmptyLongName,
    /// A long option name contains `=`, which separates inline values.
    #[error("long option name cannot contain '=': {0}")]
    LongNameContainsEquals(String),
    /// A long option name was written with its leading dashes.
    #[error("long option name must not start with '-': {0}")]
    LongNameLeadingDash(String),
    /// Two long options share the same name.
    #[error("duplicate long option: --{0}")]
    DuplicateLongOption(String),
    /// A long option entry ends in more than two colons.
    #[error("invalid arity suffix for long option: {0}")]
    InvalidArity(String),
}

/// Errors that can occur while loading or saving a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;

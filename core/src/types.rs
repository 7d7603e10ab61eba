//! Option model type definitions.
//!
//! This module defines the values the engine hands back to callers: the
//! [`Arity`] of an option, the [`OptName`] it was recognised under, the
//! lossless [`OptionKind`] tag and the [`Parsed`] unit itself. All of them
//! serialize with [`serde`] so traces can be written as JSON or YAML.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How an option takes its value.
///
/// # Examples
///
/// ```
/// use trad_getopt_core::Arity;
///
/// assert_eq!(Arity::RequiredArgument.suffix(), ":");
/// assert!(Arity::OptionalArgument.takes_value());
/// assert!(!Arity::NoArgument.takes_value());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arity {
    /// Plain flag, a value is an error.
    NoArgument,
    /// A value must follow, attached or as the next token.
    RequiredArgument,
    /// A value may be attached, it is never taken from the next token.
    OptionalArgument,
}

impl Arity {
    /// Suffix used by the compact spec syntax (`""`, `":"` or `"::"`).
    pub fn suffix(self) -> &'static str {
        match self {
            Self::NoArgument => "",
            Self::RequiredArgument => ":",
            Self::OptionalArgument => "::",
        }
    }

    /// Returns `true` unless this is [`Arity::NoArgument`].
    pub fn takes_value(self) -> bool {
        !matches!(self, Self::NoArgument)
    }
}

/// Name of an option as it was recognised.
///
/// `Display` renders the name with its leading dash(es), which is the form
/// used in diagnostics.
///
/// # Examples
///
/// ```
/// use trad_getopt_core::OptName;
///
/// assert_eq!(OptName::Short('v').to_string(), "-v");
/// assert_eq!(OptName::Long("verbose".into()).to_string(), "--verbose");
/// assert_eq!(OptName::Long("verbose".into()).bare(), "verbose");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptName {
    /// Single letter option (`-v`).
    Short(char),
    /// Named option (`--verbose`).
    Long(String),
}

impl OptName {
    /// The name without leading dashes.
    pub fn bare(&self) -> String {
        match self {
            Self::Short(c) => c.to_string(),
            Self::Long(name) => name.clone(),
        }
    }

    pub fn is_short(&self) -> bool {
        matches!(self, Self::Short(_))
    }

    pub fn is_long(&self) -> bool {
        matches!(self, Self::Long(_))
    }
}

impl fmt::Display for OptName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Short(c) => write!(f, "-{c}"),
            Self::Long(name) => write!(f, "--{name}"),
        }
    }
}

/// Lossless classification of a parsed option: short or long, crossed with
/// its [`Arity`].
///
/// Rendering layers use this tag to rebuild `-oVALUE`, `--name=VALUE` or a
/// bare flag without consulting the option specification again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    ShortNoArgument,
    ShortRequiredArgument,
    ShortOptionalArgument,
    LongNoArgument,
    LongRequiredArgument,
    LongOptionalArgument,
}

impl OptionKind {
    /// Builds the tag for an option name and arity.
    ///
    /// # Examples
    ///
    /// ```
    /// use trad_getopt_core::{Arity, OptName, OptionKind};
    ///
    /// let kind = OptionKind::new(&OptName::Short('o'), Arity::RequiredArgument);
    /// assert_eq!(kind, OptionKind::ShortRequiredArgument);
    /// assert!(!kind.is_long());
    /// ```
    pub fn new(name: &OptName, arity: Arity) -> Self {
        match (name, arity) {
            (OptName::Short(_), Arity::NoArgument) => Self::ShortNoArgument,
            (OptName::Short(_), Arity::RequiredArgument) => Self::ShortRequiredArgument,
            (OptName::Short(_), Arity::OptionalArgument) => Self::ShortOptionalArgument,
            (OptName::Long(_), Arity::NoArgument) => Self::LongNoArgument,
            (OptName::Long(_), Arity::RequiredArgument) => Self::LongRequiredArgument,
            (OptName::Long(_), Arity::OptionalArgument) => Self::LongOptionalArgument,
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Self::ShortNoArgument | Self::LongNoArgument => Arity::NoArgument,
            Self::ShortRequiredArgument | Self::LongRequiredArgument => Arity::RequiredArgument,
            Self::ShortOptionalArgument | Self::LongOptionalArgument => Arity::OptionalArgument,
        }
    }

    pub fn is_long(self) -> bool {
        matches!(
            self,
            Self::LongNoArgument | Self::LongRequiredArgument | Self::LongOptionalArgument
        )
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortNoArgument => write!(f, "short_no_argument"),
            Self::ShortRequiredArgument => write!(f, "short_required_argument"),
            Self::ShortOptionalArgument => write!(f, "short_optional_argument"),
            Self::LongNoArgument => write!(f, "long_no_argument"),
            Self::LongRequiredArgument => write!(f, "long_required_argument"),
            Self::LongOptionalArgument => write!(f, "long_optional_argument"),
        }
    }
}

/// One option removed from the argument list by a successful engine call.
///
/// # Examples
///
/// ```
/// use trad_getopt_core::{Arity, Parsed};
///
/// let out = Parsed::short('o', Arity::RequiredArgument, Some("file".into()));
/// assert!(out.is_short('o'));
/// assert_eq!(out.value(), Some("file"));
/// assert_eq!(out.render(), "-ofile");
///
/// let color = Parsed::long("color", Arity::OptionalArgument, None);
/// assert!(color.is_long("color"));
/// assert_eq!(color.render(), "--color");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parsed {
    /// Resolved option name (full long name, even when abbreviated).
    pub name: OptName,
    /// Arity the option was declared with.
    pub arity: Arity,
    /// Attached or following value, if any.
    pub value: Option<String>,
}

impl Parsed {
    pub fn new(name: OptName, arity: Arity, value: Option<String>) -> Self {
        Self { name, arity, value }
    }

    /// Creates a short option unit.
    pub fn short(letter: char, arity: Arity, value: Option<String>) -> Self {
        Self::new(OptName::Short(letter), arity, value)
    }

    /// Creates a long option unit.
    pub fn long(name: &str, arity: Arity, value: Option<String>) -> Self {
        Self::new(OptName::Long(name.to_string()), arity, value)
    }

    pub fn kind(&self) -> OptionKind {
        OptionKind::new(&self.name, self.arity)
    }

    /// Is this a specific short option?
    pub fn is_short(&self, letter: char) -> bool {
        self.name == OptName::Short(letter)
    }

    /// Is this a specific long option?
    pub fn is_long(&self, name: &str) -> bool {
        matches!(&self.name, OptName::Long(n) if n == name)
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Rebuilds the option as a single command-line token.
    ///
    /// Short values are attached directly (`-ofile`), long values with `=`
    /// (`--output=file`). Options without a value render as bare flags.
    pub fn render(&self) -> String {
        match (&self.name, &self.value) {
            (OptName::Short(c), Some(value)) => format!("-{c}{value}"),
            (OptName::Long(name), Some(value)) => format!("--{name}={value}"),
            (name, None) => name.to_string(),
        }
    }
}

impl fmt::Display for Parsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_kind_roundtrips_arity() {
        for arity in [
            Arity::NoArgument,
            Arity::RequiredArgument,
            Arity::OptionalArgument,
        ] {
            let short = OptionKind::new(&OptName::Short('a'), arity);
            let long = OptionKind::new(&OptName::Long("all".into()), arity);
            assert_eq!(short.arity(), arity);
            assert_eq!(long.arity(), arity);
            assert!(!short.is_long());
            assert!(long.is_long());
        }
    }

    #[test]
    fn test_render_forms() {
        assert_eq!(Parsed::short('a', Arity::NoArgument, None).render(), "-a");
        assert_eq!(
            Parsed::short('b', Arity::OptionalArgument, Some("x".into())).render(),
            "-bx"
        );
        assert_eq!(
            Parsed::long("foo", Arity::RequiredArgument, Some(String::new())).render(),
            "--foo="
        );
        assert_eq!(Parsed::long("foo", Arity::NoArgument, None).render(), "--foo");
    }

    #[test]
    fn test_parsed_serializes_with_snake_case_tags() {
        let parsed = Parsed::long("output", Arity::RequiredArgument, Some("a.txt".into()));
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["name"]["long"], "output");
        assert_eq!(json["arity"], "required_argument");
        assert_eq!(json["value"], "a.txt");
    }
}

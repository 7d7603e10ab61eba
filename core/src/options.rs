//! Option specifications: the compact short spec and the long option table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GetoptError, SpecError};
use crate::types::{Arity, OptName};
use crate::validate::{validate_long_options, validate_short_spec};

/// Short option specification in traditional getopt syntax.
///
/// Each character is an option letter. One trailing colon marks a required
/// value, two mark an optional one. The colon itself is an option letter
/// only at position 0.
///
/// # Examples
///
/// ```
/// use trad_getopt_core::{Arity, ShortSpec};
///
/// let spec = ShortSpec::new("ab:c::");
/// assert_eq!(spec.lookup('a', true), Some(Arity::NoArgument));
/// assert_eq!(spec.lookup('b', true), Some(Arity::RequiredArgument));
/// assert_eq!(spec.lookup('c', true), Some(Arity::OptionalArgument));
/// // `::` degrades to required when optional short values are disabled.
/// assert_eq!(spec.lookup('c', false), Some(Arity::RequiredArgument));
/// assert_eq!(spec.lookup(':', true), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortSpec(String);

impl ShortSpec {
    pub fn new(spec: &str) -> Self {
        Self(spec.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Finds the arity of `letter`, or `None` when it is not declared.
    ///
    /// The first occurrence of the letter decides.
    pub fn lookup(&self, letter: char, optional_short: bool) -> Option<Arity> {
        let pos = self.0.chars().position(|c| c == letter)?;
        if letter == ':' && pos != 0 {
            return None;
        }
        let mut rest = self.0.chars().skip(pos + 1);
        match (rest.next(), rest.next()) {
            (Some(':'), Some(':')) if optional_short => Some(Arity::OptionalArgument),
            (Some(':'), _) => Some(Arity::RequiredArgument),
            _ => Some(Arity::NoArgument),
        }
    }

    /// Declared letters with their arity, in spec order.
    pub fn letters(&self, optional_short: bool) -> Vec<(char, Arity)> {
        let chars: Vec<char> = self.0.chars().collect();
        let mut letters = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            let letter = chars[i];
            i += 1;
            while i < chars.len() && chars[i] == ':' {
                i += 1;
            }
            if let Some(arity) = self.lookup(letter, optional_short) {
                if !letters.iter().any(|(c, _)| *c == letter) {
                    letters.push((letter, arity));
                }
            }
        }
        letters
    }
}

impl From<&str> for ShortSpec {
    fn from(spec: &str) -> Self {
        Self::new(spec)
    }
}

impl From<String> for ShortSpec {
    fn from(spec: String) -> Self {
        Self(spec)
    }
}

impl fmt::Display for ShortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Long option table: names (without dashes) mapped to their [`Arity`].
///
/// Insertion order is kept; it is the order ambiguity candidates are
/// reported in.
///
/// # Examples
///
/// ```
/// use trad_getopt_core::{Arity, LongOptions};
///
/// let table: LongOptions = "verbose,output:,color::".parse().unwrap();
/// assert_eq!(table.get("output"), Some(Arity::RequiredArgument));
/// assert_eq!(table.get("color"), Some(Arity::OptionalArgument));
/// assert_eq!(table.names().collect::<Vec<_>>(), ["verbose", "output", "color"]);
///
/// let built = LongOptions::new()
///     .with("verbose", Arity::NoArgument)
///     .with("output", Arity::RequiredArgument);
/// assert_eq!(built.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongOptions {
    entries: Vec<(String, Arity)>,
}

impl LongOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an option, builder style.
    pub fn with(mut self, name: &str, arity: Arity) -> Self {
        self.insert(name, arity);
        self
    }

    /// Adds or replaces an option, returning the previous arity.
    ///
    /// A replaced option keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, arity: Arity) -> Option<Arity> {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            return Some(std::mem::replace(&mut entry.1, arity));
        }
        self.entries.push((name, arity));
        None
    }

    pub fn get(&self, name: &str) -> Option<Arity> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, arity)| *arity)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Arity)> {
        self.entries.iter().map(|(n, arity)| (n.as_str(), *arity))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Resolves a typed long option name.
    ///
    /// With `abbreviation`, any unambiguous prefix resolves; an exact name
    /// always wins over other prefix matches. Without it the name must match
    /// verbatim.
    ///
    /// # Errors
    ///
    /// [`GetoptError::UnknownOption`] when nothing matches and
    /// [`GetoptError::AmbiguousOption`] when several names share the prefix
    /// and none equals it.
    ///
    /// # Examples
    ///
    /// ```
    /// use trad_getopt_core::{Arity, GetoptError, LongOptions};
    ///
    /// let table = LongOptions::new()
    ///     .with("foo", Arity::NoArgument)
    ///     .with("foo-bar", Arity::NoArgument);
    /// assert_eq!(table.resolve("foo", true).unwrap().0, "foo");
    /// assert_eq!(table.resolve("foo-", true).unwrap().0, "foo-bar");
    /// assert!(matches!(
    ///     table.resolve("fo", true),
    ///     Err(GetoptError::AmbiguousOption { .. })
    /// ));
    /// ```
    pub fn resolve(&self, name: &str, abbreviation: bool) -> Result<(&str, Arity), GetoptError> {
        let unknown = || GetoptError::UnknownOption {
            option: OptName::Long(name.to_string()),
        };
        if !abbreviation {
            return self
                .entries
                .iter()
                .find(|(n, _)| n == name)
                .map(|(n, arity)| (n.as_str(), *arity))
                .ok_or_else(unknown);
        }

        let matches: Vec<&(String, Arity)> = self
            .entries
            .iter()
            .filter(|(n, _)| n.starts_with(name))
            .collect();
        if matches.is_empty() {
            return Err(unknown());
        }
        if let [only] = matches[..] {
            return Ok((only.0.as_str(), only.1));
        }
        match matches.iter().copied().find(|entry| entry.0 == name) {
            Some(exact) => Ok((exact.0.as_str(), exact.1)),
            None => Err(GetoptError::AmbiguousOption {
                option: OptName::Long(name.to_string()),
                candidates: matches.iter().map(|entry| entry.0.clone()).collect(),
            }),
        }
    }
}

impl<S: Into<String>> FromIterator<(S, Arity)> for LongOptions {
    fn from_iter<I: IntoIterator<Item = (S, Arity)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, arity) in iter {
            table.insert(name, arity);
        }
        table
    }
}

/// Parses the getopt(1) `--longoptions` syntax: names separated by commas
/// or whitespace, each optionally followed by `:` or `::`.
impl FromStr for LongOptions {
    type Err = SpecError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut table = Self::new();
        for entry in raw
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|entry| !entry.is_empty())
        {
            let name = entry.trim_end_matches(':');
            let arity = match entry.len() - name.len() {
                0 => Arity::NoArgument,
                1 => Arity::RequiredArgument,
                2 => Arity::OptionalArgument,
                _ => return Err(SpecError::InvalidArity(entry.to_string())),
            };
            if table.contains(name) {
                return Err(SpecError::DuplicateLongOption(name.to_string()));
            }
            table.insert(name, arity);
        }
        if let Some(err) = validate_long_options(&table).into_iter().next() {
            return Err(err);
        }
        Ok(table)
    }
}

impl FromStr for ShortSpec {
    type Err = SpecError;

    /// Parses and validates a short spec.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match validate_short_spec(raw).into_iter().next() {
            Some(err) => Err(err),
            None => Ok(Self::new(raw)),
        }
    }
}

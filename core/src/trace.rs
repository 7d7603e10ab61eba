//! Full-parse traces and their rendering.
//!
//! A [`Trace`] is the classified account of an entire command line, as
//! produced by [`Getopt::trace`](crate::Getopt::trace): every token ends up
//! as exactly one [`TraceItem`], in encounter order.

use serde::{Deserialize, Serialize};

use crate::error::GetoptError;
use crate::types::{OptionKind, Parsed};

/// One classified entry of a full parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceItem {
    /// A token that is not an option, passed through untouched.
    Plain { token: String },
    /// A recognised option.
    Option(Parsed),
    /// A rejected option.
    Error(GetoptError),
    /// The `--` that ended option parsing.
    EndOfOptions,
}

impl TraceItem {
    pub fn plain(token: String) -> Self {
        Self::Plain { token }
    }

    /// The kind tag of an option entry.
    pub fn kind(&self) -> Option<OptionKind> {
        match self {
            Self::Option(parsed) => Some(parsed.kind()),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Renders the entry as a command-line token.
    ///
    /// Options are rebuilt from their kind (`-oVALUE`, `--name=VALUE`, bare
    /// flags), rejected options show the offending option as it was
    /// presented.
    ///
    /// # Examples
    ///
    /// ```
    /// use trad_getopt_core::{Arity, Parsed, TraceItem};
    ///
    /// let item = TraceItem::Option(Parsed::long("out", Arity::RequiredArgument, Some("x".into())));
    /// assert_eq!(item.render(), "--out=x");
    /// assert_eq!(TraceItem::EndOfOptions.render(), "--");
    /// ```
    pub fn render(&self) -> String {
        match self {
            Self::Plain { token } => token.clone(),
            Self::Option(parsed) => parsed.render(),
            Self::Error(err) => err.option().to_string(),
            Self::EndOfOptions => "--".to_string(),
        }
    }
}

/// Classified trace of a whole command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    pub items: Vec<TraceItem>,
}

impl Trace {
    pub fn new(items: Vec<TraceItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TraceItem> {
        self.items.iter()
    }

    /// Parsed options, in encounter order.
    pub fn options(&self) -> impl Iterator<Item = &Parsed> {
        self.items.iter().filter_map(|item| match item {
            TraceItem::Option(parsed) => Some(parsed),
            _ => None,
        })
    }

    /// Plain tokens, including passthrough after `--`.
    pub fn plain(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            TraceItem::Plain { token } => Some(token.as_str()),
            _ => None,
        })
    }

    pub fn errors(&self) -> impl Iterator<Item = &GetoptError> {
        self.items.iter().filter_map(|item| match item {
            TraceItem::Error(err) => Some(err),
            _ => None,
        })
    }

    /// Returns `true` if no option was rejected.
    pub fn is_clean(&self) -> bool {
        !self.items.iter().any(TraceItem::is_error)
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceItem;
    type IntoIter = std::slice::Iter<'a, TraceItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Renders a trace back into command-line tokens.
///
/// Every entry yields one token, except a short option with a required
/// value that is empty: `-o ""` cannot be attached, so it is rendered as two
/// tokens (`-o` and `""`) to parse back the same way.
///
/// # Examples
///
/// ```
/// use trad_getopt_core::{Args, Getopt, render_trace};
///
/// let getopt = Getopt::new("ab:c::");
/// let mut args = Args::from(vec!["-ab", "x", "-c", "file", "--", "-a"]);
/// let trace = getopt.trace(&mut args).unwrap();
/// assert_eq!(render_trace(&trace), ["-a", "-bx", "-c", "file", "--", "-a"]);
/// ```
pub fn render_trace(trace: &Trace) -> Vec<String> {
    let mut tokens = Vec::with_capacity(trace.len());
    for item in trace {
        match item {
            TraceItem::Option(parsed)
                if parsed.kind() == OptionKind::ShortRequiredArgument
                    && parsed.value() == Some("") =>
            {
                tokens.push(parsed.name.to_string());
                tokens.push(String::new());
            }
            _ => tokens.push(item.render()),
        }
    }
    tokens
}

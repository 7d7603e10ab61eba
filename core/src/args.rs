//! The caller-owned token sequence the engine drains.

use std::collections::VecDeque;

/// One queued token.
///
/// `Cluster` marks the re-queued tail of a short option cluster (stored with
/// its leading `-`). The next engine call parses it as a continuation, so a
/// tail like `-foo` is never mistaken for a long option or `--`. Accessors
/// only ever expose the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Slot {
    Arg(String),
    Cluster(String),
}

impl Slot {
    fn as_str(&self) -> &str {
        match self {
            Self::Arg(token) | Self::Cluster(token) => token,
        }
    }

    pub(crate) fn into_string(self) -> String {
        match self {
            Self::Arg(token) | Self::Cluster(token) => token,
        }
    }
}

/// Ordered, mutable list of command-line tokens.
///
/// The caller owns it; each engine call borrows it mutably, removes what it
/// consumed from the front and leaves the rest in place.
///
/// # Examples
///
/// ```
/// use trad_getopt_core::{Args, Getopt, Outcome};
///
/// let mut args = Args::from(vec!["-ab", "file"]);
/// let getopt = Getopt::new("ab");
///
/// assert!(matches!(getopt.next(&mut args).unwrap(), Outcome::Parsed(p) if p.is_short('a')));
/// // The unconsumed part of the cluster stays visible as a normal token.
/// assert_eq!(args.to_vec(), ["-b", "file"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    slots: VecDeque<Slot>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the process arguments, skipping the program name.
    ///
    /// Arguments that are not valid unicode are converted lossily.
    pub fn from_env() -> Self {
        std::env::args_os()
            .skip(1)
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The first remaining token.
    pub fn front(&self) -> Option<&str> {
        self.slots.front().map(Slot::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(Slot::as_str)
    }

    /// Removes and returns the first token.
    pub fn pop_front(&mut self) -> Option<String> {
        self.slots.pop_front().map(Slot::into_string)
    }

    /// Puts a token back at the front.
    pub fn push_front(&mut self, token: impl Into<String>) {
        self.slots.push_front(Slot::Arg(token.into()));
    }

    pub fn push_back(&mut self, token: impl Into<String>) {
        self.slots.push_back(Slot::Arg(token.into()));
    }

    /// Removes every remaining token.
    pub fn drain(&mut self) -> impl Iterator<Item = String> + '_ {
        self.slots.drain(..).map(Slot::into_string)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(String::from).collect()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.slots.into_iter().map(Slot::into_string).collect()
    }

    pub(crate) fn take_front(&mut self) -> Option<Slot> {
        self.slots.pop_front()
    }

    pub(crate) fn restore_front(&mut self, slot: Slot) {
        self.slots.push_front(slot);
    }

    /// Queues the unconsumed tail of a short option cluster.
    pub(crate) fn requeue_cluster(&mut self, tail: &str) {
        self.slots.push_front(Slot::Cluster(format!("-{tail}")));
    }

    /// Puts previously taken slots back at the front, in their order.
    pub(crate) fn prepend(&mut self, slots: Vec<Slot>) {
        for slot in slots.into_iter().rev() {
            self.slots.push_front(slot);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Args {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().map(|s| Slot::Arg(s.into())).collect(),
        }
    }
}

impl From<Vec<String>> for Args {
    fn from(tokens: Vec<String>) -> Self {
        tokens.into_iter().collect()
    }
}

impl From<Vec<&str>> for Args {
    fn from(tokens: Vec<&str>) -> Self {
        tokens.into_iter().collect()
    }
}

impl From<Args> for Vec<String> {
    fn from(args: Args) -> Self {
        args.into_vec()
    }
}

impl IntoIterator for Args {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

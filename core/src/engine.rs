//! The option recognition state machine.
//!
//! [`Getopt`] bundles a short spec, an optional long option table and a
//! [`GetoptConfig`]. Each call to [`Getopt::next`] removes one logical unit
//! from the front of an [`Args`] and classifies it. The engine keeps no state
//! of its own between calls; the only carried state is the cluster tail it
//! re-queues into the argument list.

use std::io::{self, Write};

use tracing::debug;

use crate::args::{Args, Slot};
use crate::config::GetoptConfig;
use crate::error::GetoptError;
use crate::options::{LongOptions, ShortSpec};
use crate::trace::{Trace, TraceItem};
use crate::types::{Arity, OptName, Parsed};

/// Result of one engine call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No more options: the list is empty, `--` was consumed, or the front
    /// token is a lone `-`.
    Done,
    /// The front token is a plain argument and was left in place.
    Plain,
    /// An option was removed from the list.
    Parsed(Parsed),
    /// An option was rejected (only when errors are not raised).
    Error(GetoptError),
}

impl Outcome {
    /// Returns `true` for [`Outcome::Done`] and [`Outcome::Plain`], the two
    /// ways option parsing ends.
    pub fn is_end(&self) -> bool {
        matches!(self, Self::Done | Self::Plain)
    }
}

/// What a single pass over the front of the list found.
#[derive(Debug)]
pub(crate) enum Step {
    Exhausted,
    EndOfOptions,
    Stdin,
    Operand,
    Parsed(Parsed),
}

impl From<Step> for Outcome {
    fn from(step: Step) -> Self {
        match step {
            Step::Exhausted | Step::EndOfOptions | Step::Stdin => Self::Done,
            Step::Operand => Self::Plain,
            Step::Parsed(parsed) => Self::Parsed(parsed),
        }
    }
}

/// Traditional getopt parser.
///
/// # Examples
///
/// ```
/// use trad_getopt_core::{Args, Arity, Getopt, LongOptions, Outcome};
///
/// let getopt = Getopt::new("vo:").with_long_options(
///     LongOptions::new()
///         .with("verbose", Arity::NoArgument)
///         .with("output", Arity::RequiredArgument),
/// );
/// let mut args = Args::from(vec!["-v", "--out=a.txt", "input"]);
///
/// let mut seen = Vec::new();
/// loop {
///     match getopt.next(&mut args).unwrap() {
///         Outcome::Parsed(parsed) => seen.push(parsed.render()),
///         Outcome::Error(err) => panic!("{err}"),
///         Outcome::Done | Outcome::Plain => break,
///     }
/// }
/// assert_eq!(seen, ["-v", "--output=a.txt"]);
/// assert_eq!(args.to_vec(), ["input"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Getopt {
    short: ShortSpec,
    long: Option<LongOptions>,
    config: GetoptConfig,
}

impl Getopt {
    pub fn new(short: impl Into<ShortSpec>) -> Self {
        Self {
            short: short.into(),
            long: None,
            config: GetoptConfig::default(),
        }
    }

    /// Enables the long option path with the given table.
    pub fn with_long_options(mut self, long: LongOptions) -> Self {
        self.long = Some(long);
        self
    }

    pub fn with_config(mut self, config: GetoptConfig) -> Self {
        self.config = config;
        self
    }

    pub fn short_spec(&self) -> &ShortSpec {
        &self.short
    }

    pub fn long_options(&self) -> Option<&LongOptions> {
        self.long.as_ref()
    }

    pub fn config(&self) -> &GetoptConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut GetoptConfig {
        &mut self.config
    }

    /// Parses the next unit, writing diagnostics to standard error.
    ///
    /// # Errors
    ///
    /// Only with [`GetoptConfig::raise_on_error`]; otherwise rejected options
    /// come back as [`Outcome::Error`].
    pub fn next(&self, args: &mut Args) -> Result<Outcome, GetoptError> {
        self.next_reporting(args, &mut io::stderr().lock())
    }

    /// Like [`next`](Self::next), writing diagnostics to `diagnostics`.
    pub fn next_reporting<W: Write + ?Sized>(
        &self,
        args: &mut Args,
        diagnostics: &mut W,
    ) -> Result<Outcome, GetoptError> {
        match self.try_next(args) {
            Ok(outcome) => Ok(outcome),
            Err(err) if self.config.raise_on_error => Err(err),
            Err(err) => {
                self.report(&err, diagnostics);
                Ok(Outcome::Error(err))
            }
        }
    }

    /// Parses the next unit, always returning rejected options as `Err`.
    ///
    /// Never writes diagnostics, whatever the configuration says.
    pub fn try_next(&self, args: &mut Args) -> Result<Outcome, GetoptError> {
        let step = if self.config.permute {
            self.permute_step(args)?
        } else {
            self.step(args)?
        };
        Ok(step.into())
    }

    /// Parses the next unit as a classified trace entry.
    ///
    /// Unlike [`next`](Self::next) this never permutes: plain tokens are
    /// removed and returned as [`TraceItem::Plain`], and `None` means the
    /// list is empty.
    pub fn next_detailed(&self, args: &mut Args) -> Result<Option<TraceItem>, GetoptError> {
        self.next_detailed_reporting(args, &mut io::stderr().lock())
    }

    /// Like [`next_detailed`](Self::next_detailed), writing diagnostics to
    /// `diagnostics`.
    pub fn next_detailed_reporting<W: Write + ?Sized>(
        &self,
        args: &mut Args,
        diagnostics: &mut W,
    ) -> Result<Option<TraceItem>, GetoptError> {
        let item = match self.step(args) {
            Ok(Step::Exhausted) => None,
            Ok(Step::EndOfOptions) => Some(TraceItem::EndOfOptions),
            Ok(Step::Operand | Step::Stdin) => args.pop_front().map(TraceItem::plain),
            Ok(Step::Parsed(parsed)) => Some(TraceItem::Option(parsed)),
            Err(err) if self.config.raise_on_error => return Err(err),
            Err(err) => {
                self.report(&err, diagnostics);
                Some(TraceItem::Error(err))
            }
        };
        Ok(item)
    }

    /// Runs the parser over the whole list and returns the classified trace.
    ///
    /// Everything after a `--` that ends options is passed through as plain
    /// entries. The list is empty afterwards unless an error was raised.
    ///
    /// With [`GetoptConfig::permute`] the trace lists every option first,
    /// then the `--` that ended options (if any), then the plain arguments in
    /// their original order.
    pub fn trace(&self, args: &mut Args) -> Result<Trace, GetoptError> {
        self.trace_reporting(args, &mut io::stderr().lock())
    }

    /// Like [`trace`](Self::trace), writing diagnostics to `diagnostics`.
    pub fn trace_reporting<W: Write + ?Sized>(
        &self,
        args: &mut Args,
        diagnostics: &mut W,
    ) -> Result<Trace, GetoptError> {
        if self.config.permute {
            return self.permuted_trace(args, diagnostics);
        }
        let mut items = Vec::new();
        while let Some(item) = self.next_detailed_reporting(args, diagnostics)? {
            let end_of_options = matches!(item, TraceItem::EndOfOptions);
            items.push(item);
            if end_of_options {
                items.extend(args.drain().map(TraceItem::plain));
            }
        }
        Ok(Trace::new(items))
    }

    fn permuted_trace<W: Write + ?Sized>(
        &self,
        args: &mut Args,
        diagnostics: &mut W,
    ) -> Result<Trace, GetoptError> {
        let mut items = Vec::new();
        let mut skipped = Vec::new();
        let mut end_of_options = false;
        loop {
            match self.step(args) {
                Ok(Step::Exhausted) => break,
                Ok(Step::EndOfOptions) => {
                    end_of_options = true;
                    break;
                }
                Ok(Step::Operand | Step::Stdin) => {
                    if let Some(slot) = args.take_front() {
                        skipped.push(slot);
                    }
                }
                Ok(Step::Parsed(parsed)) => items.push(TraceItem::Option(parsed)),
                Err(err) if self.config.raise_on_error => {
                    args.prepend(skipped);
                    return Err(err);
                }
                Err(err) => {
                    self.report(&err, diagnostics);
                    items.push(TraceItem::Error(err));
                }
            }
        }

        if end_of_options {
            items.push(TraceItem::EndOfOptions);
        }
        let plain = skipped
            .into_iter()
            .map(Slot::into_string)
            .chain(args.drain());
        items.extend(plain.map(TraceItem::plain));
        Ok(Trace::new(items))
    }

    /// Iterates over options until parsing ends.
    ///
    /// Errors are yielded as `Err` items (after their diagnostic, when
    /// reporting is enabled) and iteration continues past them.
    ///
    /// # Examples
    ///
    /// ```
    /// use trad_getopt_core::{Args, Getopt};
    ///
    /// let getopt = Getopt::new("ab:");
    /// let mut args = Args::from(vec!["-a", "-bvalue", "rest"]);
    /// let options: Vec<String> = getopt
    ///     .options(&mut args)
    ///     .map(|parsed| parsed.unwrap().render())
    ///     .collect();
    /// assert_eq!(options, ["-a", "-bvalue"]);
    /// assert_eq!(args.to_vec(), ["rest"]);
    /// ```
    pub fn options<'a>(&'a self, args: &'a mut Args) -> Options<'a> {
        Options {
            getopt: self,
            args,
            finished: false,
        }
    }

    fn report<W: Write + ?Sized>(&self, err: &GetoptError, diagnostics: &mut W) {
        debug!(option = %err.option(), kind = %err.kind(), "Rejected option");
        if self.config.report_diagnostics {
            let line = err.diagnostic(&self.config.program_name(), self.config.diagnostic_style);
            // Diagnostics are best effort; a closed stream must not turn
            // into a parse failure.
            let _ = writeln!(diagnostics, "{line}");
        }
    }

    /// Repeats [`step`](Self::step), setting plain tokens aside until an
    /// option, an error or the end of options, then restores them.
    fn permute_step(&self, args: &mut Args) -> Result<Step, GetoptError> {
        let mut skipped = Vec::new();
        let result = loop {
            match self.step(args) {
                Ok(Step::Operand | Step::Stdin) => {
                    if let Some(slot) = args.take_front() {
                        skipped.push(slot);
                    }
                }
                other => break other,
            }
        };
        if !skipped.is_empty() {
            debug!(count = skipped.len(), "Restoring permuted arguments");
            args.prepend(skipped);
        }
        result
    }

    pub(crate) fn step(&self, args: &mut Args) -> Result<Step, GetoptError> {
        let token = match args.take_front() {
            None => return Ok(Step::Exhausted),
            Some(Slot::Cluster(token)) => return self.short_option(token, args),
            Some(Slot::Arg(token)) => token,
        };

        if token == "-" {
            args.restore_front(Slot::Arg(token));
            return Ok(Step::Stdin);
        }
        if self.config.stop_at_double_hyphen && token == "--" {
            debug!("End of options");
            return Ok(Step::EndOfOptions);
        }
        if let (Some(table), Some(body)) = (&self.long, token.strip_prefix("--")) {
            return self.long_option(table, body, args);
        }
        if !token.starts_with('-') {
            args.restore_front(Slot::Arg(token));
            return Ok(Step::Operand);
        }
        self.short_option(token, args)
    }

    fn long_option(
        &self,
        table: &LongOptions,
        body: &str,
        args: &mut Args,
    ) -> Result<Step, GetoptError> {
        let (typed, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };
        let (name, arity) = table.resolve(typed, self.config.abbreviation)?;
        let option = OptName::Long(name.to_string());

        let value = match arity {
            Arity::NoArgument => {
                if inline.is_some() {
                    return Err(GetoptError::ArgumentGiven { option });
                }
                None
            }
            Arity::RequiredArgument => Some(self.required_value(&option, inline, args)?),
            Arity::OptionalArgument => match inline {
                Some("") if !self.config.allow_empty_optarg => {
                    return Err(GetoptError::ArgumentRequired { option });
                }
                Some(value) => Some(value.to_string()),
                None => None,
            },
        };

        debug!(option = %option, typed, ?arity, "Parsed long option");
        Ok(Step::Parsed(Parsed::new(option, arity, value)))
    }

    /// Parses `token` (`-` followed by at least one letter) as the head of a
    /// short option cluster.
    fn short_option(&self, token: String, args: &mut Args) -> Result<Step, GetoptError> {
        let mut chars = token.chars();
        chars.next();
        let Some(letter) = chars.next() else {
            args.restore_front(Slot::Arg(token));
            return Ok(Step::Stdin);
        };
        let tail = chars.as_str();
        let option = OptName::Short(letter);

        let Some(arity) = self.short.lookup(letter, self.config.optional_short) else {
            if !tail.is_empty() {
                args.requeue_cluster(tail);
            }
            return Err(GetoptError::UnknownOption { option });
        };

        let value = match arity {
            Arity::NoArgument => {
                if !tail.is_empty() {
                    args.requeue_cluster(tail);
                }
                None
            }
            Arity::RequiredArgument => {
                let inline = (!tail.is_empty()).then_some(tail);
                Some(self.required_value(&option, inline, args)?)
            }
            Arity::OptionalArgument => (!tail.is_empty()).then(|| tail.to_string()),
        };

        debug!(option = %option, ?arity, "Parsed short option");
        Ok(Step::Parsed(Parsed::new(option, arity, value)))
    }

    /// Takes the value of a required-argument option: the inline part if
    /// present, otherwise the next token.
    ///
    /// A following token rejected for being empty is put back.
    fn required_value(
        &self,
        option: &OptName,
        inline: Option<&str>,
        args: &mut Args,
    ) -> Result<String, GetoptError> {
        let missing = || GetoptError::ArgumentRequired {
            option: option.clone(),
        };
        let value = match inline {
            Some(value) => value.to_string(),
            None => args.pop_front().ok_or_else(missing)?,
        };
        if value.is_empty() && !self.config.allow_empty_optarg {
            if inline.is_none() {
                args.push_front(value);
            }
            return Err(missing());
        }
        Ok(value)
    }
}

/// Iterator returned by [`Getopt::options`].
#[derive(Debug)]
pub struct Options<'a> {
    getopt: &'a Getopt,
    args: &'a mut Args,
    finished: bool,
}

impl Iterator for Options<'_> {
    type Item = Result<Parsed, GetoptError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.getopt.next(self.args) {
            Ok(Outcome::Parsed(parsed)) => Some(Ok(parsed)),
            Ok(Outcome::Error(err)) | Err(err) => Some(Err(err)),
            Ok(Outcome::Done | Outcome::Plain) => {
                self.finished = true;
                None
            }
        }
    }
}

impl std::iter::FusedIterator for Options<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet(short: &str) -> Getopt {
        Getopt::new(short).with_config(GetoptConfig::default().with_report_diagnostics(false))
    }

    #[test]
    fn test_cluster_tail_with_dash_is_not_a_long_option() {
        let getopt = quiet("a-").with_long_options(LongOptions::new().with("foo", Arity::NoArgument));
        let mut args = Args::from(vec!["-a-foo"]);

        assert!(matches!(getopt.step(&mut args), Ok(Step::Parsed(p)) if p.is_short('a')));
        assert_eq!(args.to_vec(), ["--foo"]);
        assert!(matches!(getopt.step(&mut args), Ok(Step::Parsed(p)) if p.is_short('-')));
        assert_eq!(args.to_vec(), ["-foo"]);
        assert!(matches!(
            getopt.step(&mut args),
            Err(GetoptError::UnknownOption { option: OptName::Short('f') })
        ));
        assert_eq!(args.to_vec(), ["-oo"]);
    }

    #[test]
    fn test_cluster_tail_double_hyphen_is_not_end_of_options() {
        let getopt = quiet("a-");
        let mut args = Args::from(vec!["-a--"]);

        assert!(matches!(getopt.step(&mut args), Ok(Step::Parsed(p)) if p.is_short('a')));
        assert!(matches!(getopt.step(&mut args), Ok(Step::Parsed(p)) if p.is_short('-')));
        assert!(matches!(getopt.step(&mut args), Ok(Step::Parsed(p)) if p.is_short('-')));
        assert!(matches!(getopt.step(&mut args), Ok(Step::Exhausted)));
    }

    #[test]
    fn test_lone_dash_is_stdin_and_stays() {
        let getopt = quiet("a");
        let mut args = Args::from(vec!["-", "-a"]);
        assert!(matches!(getopt.step(&mut args), Ok(Step::Stdin)));
        assert_eq!(args.to_vec(), ["-", "-a"]);
    }

    #[test]
    fn test_permute_restores_on_error() {
        let getopt = quiet("a").with_config(GetoptConfig::default().with_permute(true));
        let mut args = Args::from(vec!["x", "-z", "y"]);

        let err = getopt.try_next(&mut args).unwrap_err();
        assert_eq!(err.option(), &OptName::Short('z'));
        assert_eq!(args.to_vec(), ["x", "y"]);
    }

    #[test]
    fn test_permute_skips_lone_dash() {
        let getopt = quiet("a").with_config(GetoptConfig::default().with_permute(true));
        let mut args = Args::from(vec!["-", "-a"]);

        assert!(matches!(getopt.try_next(&mut args), Ok(Outcome::Parsed(_))));
        assert_eq!(args.to_vec(), ["-"]);
        assert_eq!(getopt.try_next(&mut args), Ok(Outcome::Done));
        assert_eq!(args.to_vec(), ["-"]);
    }

    #[test]
    fn test_permute_stops_at_double_hyphen() {
        let getopt = quiet("a").with_config(GetoptConfig::default().with_permute(true));
        let mut args = Args::from(vec!["x", "--", "-a"]);

        assert_eq!(getopt.try_next(&mut args), Ok(Outcome::Done));
        assert_eq!(args.to_vec(), ["x", "-a"]);
    }

    #[test]
    fn test_rejected_empty_value_is_put_back() {
        let getopt = quiet("a:").with_config(
            GetoptConfig::default()
                .with_allow_empty_optarg(false)
                .with_report_diagnostics(false),
        );
        let mut args = Args::from(vec!["-a", "", "rest"]);

        assert!(matches!(
            getopt.try_next(&mut args),
            Err(GetoptError::ArgumentRequired { .. })
        ));
        assert_eq!(args.to_vec(), ["", "rest"]);
        assert_eq!(getopt.try_next(&mut args), Ok(Outcome::Plain));
    }

    #[test]
    fn test_permuted_trace_records_end_of_options() {
        let getopt = quiet("a").with_config(
            GetoptConfig::default()
                .with_permute(true)
                .with_report_diagnostics(false),
        );
        let mut args = Args::from(vec!["x", "-a", "y", "--", "-a"]);

        let trace = getopt.trace(&mut args).unwrap();
        assert_eq!(
            trace.items,
            vec![
                TraceItem::Option(Parsed::short('a', Arity::NoArgument, None)),
                TraceItem::EndOfOptions,
                TraceItem::plain("x".into()),
                TraceItem::plain("y".into()),
                TraceItem::plain("-a".into()),
            ]
        );
        assert!(args.is_empty());
    }

    #[test]
    fn test_permuted_trace_restores_plain_arguments_when_raising() {
        let getopt = quiet("a").with_config(
            GetoptConfig::default()
                .with_permute(true)
                .with_raise_on_error(true),
        );
        let mut args = Args::from(vec!["x", "-a", "y", "-z", "w"]);

        let err = getopt.trace(&mut args).unwrap_err();
        assert_eq!(err.option(), &OptName::Short('z'));
        assert_eq!(args.to_vec(), ["x", "y", "w"]);
    }

    #[test]
    fn test_options_iterator_is_fused() {
        let getopt = quiet("a");
        let mut args = Args::from(vec!["-a", "x", "-a"]);
        let mut options = getopt.options(&mut args);
        assert!(options.next().is_some());
        assert!(options.next().is_none());
        assert!(options.next().is_none());
    }
}

//! Traditional `getopt`/`getopt_long` option parsing, one unit per call.
//!
//! This crate is built around a single stateful call: [`Getopt::next`]
//! removes the next logical unit from the front of a caller-owned [`Args`]
//! and classifies it. The caller owns the loop.
//!
//! - [`Getopt`]: the engine; a short spec, an optional [`LongOptions`] table
//!   and a [`GetoptConfig`].
//! - [`Outcome`]: `Done`, `Plain`, `Parsed(`[`Parsed`]`)` or
//!   `Error(`[`GetoptError`]`)`.
//! - [`Trace`]: full-parse result of [`Getopt::trace`], rendered back to
//!   tokens with [`render_trace`] or formatted with [`format_trace`].
//! - [`validate_short_spec`] and [`validate_long_options`] catch malformed
//!   specifications.
//!
//! Short clusters (`-abc`), attached values (`-ofile`), optional values
//! (`-c::` in the spec), long options with `=value`, unambiguous prefixes of
//! long names and GNU-style permutation are all supported. Rejected options
//! never corrupt the argument list: any partially consumed cluster is put
//! back so the next call resumes where parsing stopped.
//!
//! # Example
//!
//! ```
//! use trad_getopt_core::*;
//!
//! let getopt = Getopt::new("vo:")
//!     .with_long_options("verbose,output:".parse().unwrap())
//!     .with_config(GetoptConfig::default().with_permute(true));
//! let mut args = Args::from(vec!["input", "-vo", "out.txt", "--verb"]);
//!
//! let mut verbose = 0;
//! let mut output = None;
//! while let Outcome::Parsed(parsed) = getopt.next(&mut args).unwrap() {
//!     if parsed.is_short('v') || parsed.is_long("verbose") {
//!         verbose += 1;
//!     } else if parsed.is_short('o') {
//!         output = parsed.value;
//!     }
//! }
//!
//! assert_eq!(verbose, 2);
//! assert_eq!(output.as_deref(), Some("out.txt"));
//! assert_eq!(args.to_vec(), ["input"]);
//! ```

mod args;
mod config;
mod engine;
mod error;
mod options;
mod output;
mod trace;
mod types;
mod validate;

pub use args::Args;
pub use config::{DiagnosticStyle, GetoptConfig};
pub use engine::{Getopt, Options, Outcome};
pub use error::{ConfigError, ErrorKind, GetoptError, Result, SpecError};
pub use options::{LongOptions, ShortSpec};
pub use output::{OutputFormat, format_trace};
pub use trace::{Trace, TraceItem, render_trace};
pub use types::*;
pub use validate::{validate_long_options, validate_short_spec};

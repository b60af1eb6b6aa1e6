//! Command tree definition and dispatch for building CLIs.
//!
//! This crate turns a declarative tree of commands into a running CLI:
//!
//! - [`CommandSpec`] — one node of the tree: typed positional arguments,
//!   typed options with short aliases, subcommands, and `before_run` /
//!   `run` / `after_run` lifecycle hooks.
//! - [`define`] — structural verification; the only way to obtain a
//!   dispatchable [`VerifiedCommand`].
//! - [`dispatch`] — walks a raw argument vector to the target (sub)command,
//!   handles the reserved `--help`/`-h` and `--version`/`-v` flags, coerces
//!   and validates every argument and option, runs the hooks, and returns a
//!   four-case [`Outcome`].
//! - [`build_help`] — recursive [`CommandHelp`] generation from the tree.
//! - [`levenshtein`] — edit distance behind "did you mean" suggestions.
//!
//! Validation is pluggable: dispatch talks to a [`Validator`] and ships
//! with [`StandardValidator`] for unions of the primitive kinds.
//!
//! # Example
//!
//! ```
//! use cmdtree_core::*;
//!
//! # futures::executor::block_on(async {
//! let cmd = define(
//!     CommandSpec::new("mycmd", "this is my first command")
//!         .with_argument(ArgumentSpec::new("number", "a number", "number"))
//!         .with_option(OptionSpec::new("reverse", "reverse the number", "boolean").with_short('r'))
//!         .with_run(|ctx| async move {
//!             let number = ctx.arg("number").and_then(Value::as_number).unwrap_or(0.0);
//!             let reverse = ctx.option("reverse").and_then(Value::as_bool).unwrap_or(false);
//!             Value::Number(if reverse { -number } else { number })
//!         }),
//! )
//! .unwrap();
//!
//! let outcome = dispatch(&cmd, ["42", "--reverse"]).await;
//! assert_eq!(outcome, Outcome::Data(Some(Value::Number(-42.0))));
//! # });
//! ```
//!
//! Diagnostics are emitted as [`tracing`] events at DEBUG/TRACE level
//! (per-argument parse traces, raw token dumps); install a subscriber to
//! see them, none of them is required for correct operation.

mod coerce;
mod define;
mod dispatch;
mod distance;
mod help;
mod token;
mod types;
mod validate;

pub use coerce::coerce;
pub use define::{DefinitionError, VerifiedCommand, define, verify};
pub use dispatch::{dispatch, dispatch_with};
pub use distance::levenshtein;
pub use help::build_help;
pub use token::{RawToken, tokenize};
pub use types::*;
pub use validate::{StandardValidator, ValidationFailure, Validator};

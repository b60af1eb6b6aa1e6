//! Data model for command trees and dispatch results.
//!
//! This module defines the declarative command tree ([`CommandSpec`],
//! [`ArgumentSpec`], [`OptionSpec`]), the dynamic [`Value`] type flowing
//! through argument binding and handlers, the [`RunContext`] passed to
//! lifecycle hooks, the [`Outcome`] of a dispatch call, and the
//! [`CommandHelp`] tree produced by help generation.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// A dynamically typed value bound to an argument or option.
///
/// Raw tokens are strings; the coercion pipeline converts them into the
/// native shape their declared type asks for before validation.
/// [`Value::Undefined`] models "no token was supplied".
///
/// # Examples
///
/// ```
/// use cmdtree_core::{Value, ValueKind};
///
/// assert_eq!(Value::Number(42.0).kind(), ValueKind::Number);
/// assert!(Value::Undefined.is_undefined());
/// assert_eq!(Value::Bool(true).to_string(), "true");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value was supplied.
    Undefined,
    /// A boolean.
    Bool(bool),
    /// A double-precision number.
    Number(f64),
    /// A 128-bit integer.
    BigInt(i128),
    /// A plain string.
    String(String),
}

impl Value {
    /// Returns the kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Undefined => ValueKind::Undefined,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::BigInt(_) => ValueKind::BigInt,
            Value::String(_) => ValueKind::String,
        }
    }

    /// True when no value was supplied.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Returns the boolean payload, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the numeric payload, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the big-integer payload, if this is a bigint.
    pub fn as_bigint(&self) -> Option<i128> {
        match self {
            Value::BigInt(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::BigInt(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
        }
    }
}

/// Kind tag for [`Value`], used by the validator membership queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Absent value.
    Undefined,
    /// Boolean.
    Boolean,
    /// Double-precision number.
    Number,
    /// 128-bit integer.
    BigInt,
    /// String.
    String,
}

/// Bound arguments and options handed to the lifecycle hooks.
///
/// Keys are the declared argument/option names; values are the coerced and
/// validated [`Value`]s. A fresh context is built per dispatch call.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    /// Positional arguments, keyed by declared name.
    pub args: BTreeMap<String, Value>,
    /// Options, keyed by declared long name.
    pub options: BTreeMap<String, Value>,
}

impl RunContext {
    /// Looks up a bound argument by name.
    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }

    /// Looks up a bound option by name.
    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }
}

/// A `before_run`/`after_run` lifecycle hook.
pub type HookFn = Arc<dyn Fn(RunContext) -> BoxFuture<'static, ()> + Send + Sync>;

/// The `run` handler; its return value becomes the dispatch data payload.
pub type RunFn = Arc<dyn Fn(RunContext) -> BoxFuture<'static, Value> + Send + Sync>;

/// Declaration of one positional argument.
///
/// The position of an argument in its owning [`CommandSpec`] determines its
/// binding order: the first declared argument binds the first positional
/// token, and so on.
#[derive(Debug, Clone)]
pub struct ArgumentSpec {
    /// Name of the argument (e.g., "number").
    pub name: String,
    /// Description shown in help output.
    pub description: String,
    /// Semantic type descriptor consumed by the validator
    /// (e.g., `"number"`, `"string | undefined"`).
    pub type_spec: String,
}

impl ArgumentSpec {
    /// Creates an argument declaration.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdtree_core::ArgumentSpec;
    ///
    /// let arg = ArgumentSpec::new("count", "how many times", "number");
    /// assert_eq!(arg.name, "count");
    /// ```
    pub fn new(name: &str, description: &str, type_spec: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            type_spec: type_spec.to_string(),
        }
    }
}

/// Declaration of one option (long flag, optionally with a short alias).
///
/// Options are not positional; a token matches when its name equals the
/// declared long name or the short alias.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    /// Long name, matched as `--name` (without the dashes).
    pub name: String,
    /// Description shown in help output.
    pub description: String,
    /// Single-character short alias, matched as `-x`.
    pub short: Option<char>,
    /// Semantic type descriptor consumed by the validator.
    pub type_spec: String,
}

impl OptionSpec {
    /// Creates an option declaration.
    pub fn new(name: &str, description: &str, type_spec: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            short: None,
            type_spec: type_spec.to_string(),
        }
    }

    /// Adds a single-character short alias.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdtree_core::OptionSpec;
    ///
    /// let opt = OptionSpec::new("reverse", "reverse the number", "boolean").with_short('r');
    /// assert!(opt.matches("reverse"));
    /// assert!(opt.matches("r"));
    /// assert!(!opt.matches("v"));
    /// assert_eq!(opt.display_name(), "--reverse/-r");
    /// ```
    pub fn with_short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Checks whether a token name (without dashes) matches this option.
    pub fn matches(&self, token_name: &str) -> bool {
        if self.name == token_name {
            return true;
        }
        let mut chars = token_name.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if Some(c) == self.short)
    }

    /// Dashed display form used in error messages (`--name` or `--name/-x`).
    pub fn display_name(&self) -> String {
        match self.short {
            Some(short) => format!("--{}/-{}", self.name, short),
            None => format!("--{}", self.name),
        }
    }
}

/// One node of a declarative command tree.
///
/// A node either carries positional arguments and a `run` handler, or a set
/// of subcommands, never both; [`define`](crate::define) enforces this
/// before a tree can be dispatched.
///
/// # Examples
///
/// ```
/// use cmdtree_core::{ArgumentSpec, CommandSpec, OptionSpec, Value};
///
/// let cmd = CommandSpec::new("mycmd", "this is my first command")
///     .with_version("0.1.0")
///     .with_argument(ArgumentSpec::new("number", "a number", "number"))
///     .with_option(OptionSpec::new("reverse", "reverse the number", "boolean").with_short('r'))
///     .with_run(|ctx| async move { ctx.arg("number").cloned().unwrap_or(Value::Undefined) });
///
/// assert_eq!(cmd.name, "mycmd");
/// assert_eq!(cmd.args.len(), 1);
/// assert!(cmd.run.is_some());
/// ```
#[derive(Clone, Default)]
pub struct CommandSpec {
    /// Name of the command, unique among siblings.
    pub name: String,
    /// Short description shown in help output.
    pub description: String,
    /// Version string; only meaningful on the root command.
    pub version: Option<String>,
    /// Free-form examples text appended to help output.
    pub examples: Option<String>,
    /// Positional arguments, in binding order.
    pub args: Vec<ArgumentSpec>,
    /// Options; order carries no meaning.
    pub options: Vec<OptionSpec>,
    /// Child commands.
    pub sub_commands: Vec<CommandSpec>,
    /// Hook awaited to completion before `run`.
    pub before_run: Option<HookFn>,
    /// Handler whose return value becomes the data payload.
    pub run: Option<RunFn>,
    /// Hook awaited to completion after `run`.
    pub after_run: Option<HookFn>,
}

impl CommandSpec {
    /// Creates a command node with the given name and description.
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    /// Sets the version string (root command only).
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Sets the examples text.
    pub fn with_examples(mut self, examples: &str) -> Self {
        self.examples = Some(examples.to_string());
        self
    }

    /// Appends a positional argument; declaration order is binding order.
    pub fn with_argument(mut self, arg: ArgumentSpec) -> Self {
        self.args.push(arg);
        self
    }

    /// Appends an option.
    pub fn with_option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// Appends a subcommand.
    pub fn with_sub_command(mut self, sub: CommandSpec) -> Self {
        self.sub_commands.push(sub);
        self
    }

    /// Sets the hook awaited before the `run` handler.
    pub fn with_before_run<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(RunContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.before_run = Some(Arc::new(move |ctx| hook(ctx).boxed()));
        self
    }

    /// Sets the `run` handler.
    pub fn with_run<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(RunContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Value> + Send + 'static,
    {
        self.run = Some(Arc::new(move |ctx| handler(ctx).boxed()));
        self
    }

    /// Sets the hook awaited after the `run` handler.
    pub fn with_after_run<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(RunContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.after_run = Some(Arc::new(move |ctx| hook(ctx).boxed()));
        self
    }

    /// Finds a direct subcommand by exact name.
    pub fn find_sub_command(&self, name: &str) -> Option<&CommandSpec> {
        self.sub_commands.iter().find(|sub| sub.name == name)
    }

    /// Names of all direct subcommands, in declaration order.
    pub fn sub_command_names(&self) -> Vec<&str> {
        self.sub_commands.iter().map(|sub| sub.name.as_str()).collect()
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("version", &self.version)
            .field("examples", &self.examples)
            .field("args", &self.args)
            .field("options", &self.options)
            .field("sub_commands", &self.sub_commands)
            .field("before_run", &self.before_run.is_some())
            .field("run", &self.run.is_some())
            .field("after_run", &self.after_run.is_some())
            .finish()
    }
}

/// Help entry for one positional argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentHelp {
    /// Declared argument name.
    pub name: String,
    /// Declared description.
    pub description: String,
    /// Human-readable label of the accepted input shape (e.g., "a number").
    #[serde(rename = "type")]
    pub type_label: String,
    /// Whether the argument accepts being left out.
    pub optional: bool,
}

/// Help entry for one option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionHelp {
    /// Declared long name.
    pub name: String,
    /// Declared description.
    pub description: String,
    /// Short alias, if declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    /// Human-readable label of the accepted input shape.
    #[serde(rename = "type")]
    pub type_label: String,
}

/// Recursive help rendering of a command tree node.
///
/// `depth` is the nesting level, with the dispatch target at 0. The
/// conditional fields are present only when declared non-empty on the
/// source [`CommandSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandHelp {
    /// Command name.
    pub name: String,
    /// Command description.
    pub description: String,
    /// Nesting level, 0 for the command help was generated from.
    pub depth: usize,
    /// Positional arguments, in binding order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<ArgumentHelp>>,
    /// Declared options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<OptionHelp>>,
    /// Child command help, one level deeper.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_commands: Option<Vec<CommandHelp>>,
    /// Free-form examples text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<String>,
}

/// The result of one dispatch call.
///
/// Exactly one case is produced per invocation. Dispatch-time failures are
/// data, never panics: consumers pattern-match on the returned case.
///
/// # Examples
///
/// ```
/// use cmdtree_core::Outcome;
///
/// let outcome = Outcome::Version("0.1.0".to_string());
/// match outcome {
///     Outcome::Failure(errors) => eprintln!("{}", errors.join("\n")),
///     Outcome::Data(data) => println!("{data:?}"),
///     Outcome::Help(help) => println!("{}", help.name),
///     Outcome::Version(version) => println!("{version}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// One or more self-describing error strings, argument errors first.
    Failure(Vec<String>),
    /// The `run` handler's return value; `None` when no handler was declared.
    Data(Option<Value>),
    /// Generated help for the resolved command.
    Help(CommandHelp),
    /// The root command's declared version (empty string when undeclared).
    Version(String),
}

impl Outcome {
    /// Returns the error strings, if this is a failure.
    pub fn errors(&self) -> Option<&[String]> {
        match self {
            Outcome::Failure(errors) => Some(errors),
            _ => None,
        }
    }

    /// Returns the data payload, if this is a data outcome.
    pub fn data(&self) -> Option<&Value> {
        match self {
            Outcome::Data(data) => data.as_ref(),
            _ => None,
        }
    }

    /// Returns the generated help, if this is a help outcome.
    pub fn help(&self) -> Option<&CommandHelp> {
        match self {
            Outcome::Help(help) => Some(help),
            _ => None,
        }
    }

    /// Returns the version string, if this is a version outcome.
    pub fn version(&self) -> Option<&str> {
        match self {
            Outcome::Version(version) => Some(version),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kinds() {
        assert_eq!(Value::Undefined.kind(), ValueKind::Undefined);
        assert_eq!(Value::Bool(false).kind(), ValueKind::Boolean);
        assert_eq!(Value::Number(1.5).kind(), ValueKind::Number);
        assert_eq!(Value::BigInt(9).kind(), ValueKind::BigInt);
        assert_eq!(Value::String("x".into()).kind(), ValueKind::String);
    }

    #[test]
    fn test_option_matches_long_and_short() {
        let opt = OptionSpec::new("reverse", "reverse", "boolean").with_short('r');
        assert!(opt.matches("reverse"));
        assert!(opt.matches("r"));
        assert!(!opt.matches("rev"));
        assert!(!opt.matches("x"));
    }

    #[test]
    fn test_option_display_name() {
        let plain = OptionSpec::new("verbose", "noise", "boolean");
        assert_eq!(plain.display_name(), "--verbose");
        let aliased = plain.with_short('v');
        assert_eq!(aliased.display_name(), "--verbose/-v");
    }

    #[test]
    fn test_command_spec_builder_preserves_argument_order() {
        let cmd = CommandSpec::new("copy", "copy things")
            .with_argument(ArgumentSpec::new("source", "from", "string"))
            .with_argument(ArgumentSpec::new("dest", "to", "string"));

        let names: Vec<&str> = cmd.args.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["source", "dest"]);
    }

    #[test]
    fn test_find_sub_command_is_exact() {
        let cmd = CommandSpec::new("tool", "a tool")
            .with_sub_command(CommandSpec::new("build", "build it"))
            .with_sub_command(CommandSpec::new("test", "test it"));

        assert!(cmd.find_sub_command("build").is_some());
        assert!(cmd.find_sub_command("bild").is_none());
        assert_eq!(cmd.sub_command_names(), vec!["build", "test"]);
    }
}

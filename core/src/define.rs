//! Structural verification of command trees.
//!
//! A [`CommandSpec`] tree must pass verification exactly once, at definition
//! time, before it can be dispatched. [`define`] is the only way to obtain a
//! [`VerifiedCommand`], which makes verification a one-way gate: the
//! dispatcher never sees an unchecked tree.

use std::ops::Deref;

use thiserror::Error;

use crate::types::CommandSpec;

/// Fatal command-tree definition error.
///
/// Carries every structural violation found across the whole tree; the
/// `Display` impl prints them one per line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .errors.join("\n"))]
pub struct DefinitionError {
    /// All violations, in tree walk order.
    pub errors: Vec<String>,
}

/// Recursively checks the structural well-formedness of a command tree.
///
/// Walks every node and collects all violations without short-circuiting:
/// a node must not declare both a `run` handler and subcommands, and must
/// not declare both positional arguments and subcommands. Error wording
/// distinguishes the root ("command") from nested nodes ("subcommand").
///
/// Verification is idempotent: re-running it on a well-formed tree always
/// yields an empty list.
///
/// # Examples
///
/// ```
/// use cmdtree_core::{CommandSpec, Value, verify};
///
/// let bad = CommandSpec::new("tool", "a tool")
///     .with_sub_command(CommandSpec::new("build", "build it"))
///     .with_run(|_| async { Value::Undefined });
///
/// let errors = verify(&bad, false);
/// assert_eq!(errors.len(), 1);
/// assert!(errors[0].contains("\"tool\""));
/// ```
pub fn verify(command: &CommandSpec, is_sub_command: bool) -> Vec<String> {
    let mut errors = Vec::new();
    let scope = if is_sub_command { "subcommand" } else { "command" };

    if command.run.is_some() && !command.sub_commands.is_empty() {
        errors.push(format!(
            "{scope} \"{}\" can only have \"run\" OR \"sub_commands\" defined at the same time.",
            command.name
        ));
    }

    if !command.args.is_empty() && !command.sub_commands.is_empty() {
        errors.push(format!(
            "{scope} \"{}\" can only have \"arguments\" OR \"sub_commands\" defined at the same time.",
            command.name
        ));
    }

    for sub in &command.sub_commands {
        errors.extend(verify(sub, true));
    }

    errors
}

/// A command tree that has passed structural verification.
///
/// Only [`define`] can construct this type; the tree is immutable afterward
/// and safe to dispatch for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct VerifiedCommand(CommandSpec);

impl VerifiedCommand {
    /// Borrows the underlying command tree.
    pub fn spec(&self) -> &CommandSpec {
        &self.0
    }
}

impl Deref for VerifiedCommand {
    type Target = CommandSpec;

    fn deref(&self) -> &CommandSpec {
        &self.0
    }
}

/// Verifies a command tree and seals it for dispatch.
///
/// Fails fast when the tree has any structural violation: registration
/// aborts with a [`DefinitionError`] carrying every collected error, and no
/// partially verified tree escapes.
///
/// # Examples
///
/// ```
/// use cmdtree_core::{ArgumentSpec, CommandSpec, Value, define};
///
/// let cmd = CommandSpec::new("mycmd", "this is my first command")
///     .with_argument(ArgumentSpec::new("number", "a number", "number"))
///     .with_run(|ctx| async move { ctx.arg("number").cloned().unwrap_or(Value::Undefined) });
///
/// let verified = define(cmd).unwrap();
/// assert_eq!(verified.name, "mycmd");
/// ```
pub fn define(command: CommandSpec) -> Result<VerifiedCommand, DefinitionError> {
    let errors = verify(&command, false);

    if errors.is_empty() {
        Ok(VerifiedCommand(command))
    } else {
        Err(DefinitionError { errors })
    }
}

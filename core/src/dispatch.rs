//! Command resolution and argument binding.
//!
//! The dispatcher walks raw tokens through a fixed sequence of states:
//! version check, subcommand descent, help check, argument/option binding,
//! and finally hook execution. Every dispatch-time failure is returned as
//! an [`Outcome::Failure`]; nothing here panics on user input.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::coerce::coerce;
use crate::define::VerifiedCommand;
use crate::distance::levenshtein;
use crate::help::build_help;
use crate::token::{RawToken, tokenize};
use crate::types::{CommandSpec, Outcome, RunContext, Value};
use crate::validate::{StandardValidator, Validator};

/// Dispatches an argument vector against a verified command tree, using the
/// built-in [`StandardValidator`].
///
/// See [`dispatch_with`] for the full contract.
pub async fn dispatch<I, S>(command: &VerifiedCommand, argv: I) -> Outcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    dispatch_with(command, argv, &StandardValidator).await
}

/// Dispatches an argument vector against a verified command tree.
///
/// Resolution priority, highest first:
/// 1. `--version`/`-v` anywhere: the root's declared version (empty string
///    when undeclared), even when the rest of the vector is malformed;
/// 2. subcommand descent: positional tokens are matched against subcommand
///    names level by level; a name that matches nothing produces a
///    suggestion error ranking all sibling names by edit distance, and a
///    missing name where subcommands exist produces a missing-command
///    error (unless help was requested);
/// 3. `--help`/`-h`: generated help for the resolved command, taking
///    priority over binding errors;
/// 4. binding: remaining positional tokens bind to declared arguments in
///    order and option tokens bind by long name or short alias, each value
///    passing coercion and validation; all argument errors followed by all
///    option errors are collected into a single failure;
/// 5. execution: `before_run`, `run`, and `after_run` are awaited strictly
///    in sequence, and `run`'s return value becomes the data payload.
///
/// Reserved flags are detected but not stripped: a declared option named
/// `help` or `version` still sees its token during binding.
pub async fn dispatch_with<I, S>(
    command: &VerifiedCommand,
    argv: I,
    validator: &dyn Validator,
) -> Outcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tokens = tokenize(argv);
    trace!(?tokens, "tokenized argument vector");

    let mut positionals: Vec<&str> = Vec::new();
    let mut options: Vec<(&str, Option<&str>)> = Vec::new();
    let mut help_requested = false;
    let mut version_requested = false;

    for token in &tokens {
        match token {
            RawToken::Positional { value, .. } => positionals.push(value),
            RawToken::Option { name, value, .. } => {
                if name == "help" || name == "h" {
                    help_requested = true;
                }
                if name == "version" || name == "v" {
                    version_requested = true;
                }
                options.push((name, value.as_deref()));
            }
        }
    }

    // Version beats everything, including malformed subcommand names.
    if version_requested {
        return Outcome::Version(command.version.clone().unwrap_or_default());
    }

    // Descend the tree along the positional tokens.
    let mut current: &CommandSpec = command.spec();
    let mut consumed = 0;
    loop {
        if current.sub_commands.is_empty() {
            break;
        }
        let Some(first) = positionals.get(consumed) else {
            if help_requested {
                break;
            }
            return Outcome::Failure(vec![
                "A command must be provided, add \"--help\" or \"-h\" to get more information \
                 about the available commands."
                    .to_string(),
            ]);
        };
        match current.find_sub_command(first) {
            Some(sub) => {
                debug!(name = %sub.name, "descending into subcommand");
                current = sub;
                consumed += 1;
            }
            None => return Outcome::Failure(vec![suggestion_error(current, first)]),
        }
    }

    debug!(
        command = %current.name,
        positionals = ?&positionals[consumed.min(positionals.len())..],
        options = ?options,
        "processing command"
    );

    if help_requested {
        return Outcome::Help(build_help(current, validator));
    }

    // Bind arguments: positional tokens after the descent point, in
    // declaration order.
    let mut invalid_args = Vec::new();
    let mut bound_args = BTreeMap::new();
    for (index, arg) in current.args.iter().enumerate() {
        let raw = positionals.get(consumed + index).copied();
        match coerce(raw, false, &arg.type_spec, validator) {
            Ok(value) => {
                trace!(index, name = %arg.name, %value, "bound argument");
                bound_args.insert(arg.name.clone(), value);
            }
            Err(failure) => {
                debug!(index, name = %arg.name, error = %failure, "argument rejected");
                invalid_args.push(format!("argument \"{}\": {}", arg.name, failure.summary));
            }
        }
    }

    // Bind options: first token whose name matches the long name or short
    // alias; bare presence counts for boolean-accepting options.
    let mut invalid_options = Vec::new();
    let mut bound_options = BTreeMap::new();
    for option in &current.options {
        let token = options.iter().find(|(name, _)| option.matches(name));
        let raw = token.and_then(|(_, value)| *value);
        match coerce(raw, token.is_some(), &option.type_spec, validator) {
            Ok(value) => {
                trace!(name = %option.name, %value, "bound option");
                bound_options.insert(option.name.clone(), value);
            }
            Err(failure) => {
                debug!(name = %option.name, error = %failure, "option rejected");
                invalid_options.push(format!(
                    "option \"{}\": {}",
                    option.display_name(),
                    failure.summary
                ));
            }
        }
    }

    if !invalid_args.is_empty() || !invalid_options.is_empty() {
        invalid_args.extend(invalid_options);
        return Outcome::Failure(invalid_args);
    }

    // Hooks run in a fixed sequence, each awaited to completion, whether or
    // not a `run` handler exists.
    let context = RunContext { args: bound_args, options: bound_options };

    if let Some(before_run) = &current.before_run {
        before_run.as_ref()(context.clone()).await;
    }

    let data: Option<Value> = match &current.run {
        Some(run) => Some(run.as_ref()(context.clone()).await),
        None => None,
    };

    if let Some(after_run) = &current.after_run {
        after_run.as_ref()(context).await;
    }

    Outcome::Data(data)
}

/// Ranks every sibling subcommand name by edit distance to the given token
/// and names all candidates tied at the minimum.
fn suggestion_error(command: &CommandSpec, given: &str) -> String {
    let scores: Vec<(usize, &str)> = command
        .sub_commands
        .iter()
        .map(|sub| (levenshtein(given, &sub.name), sub.name.as_str()))
        .collect();

    // Only reached when subcommands exist, but stay defensive about it.
    let Some(best) = scores.iter().map(|(score, _)| *score).min() else {
        return format!("Command \"{given}\" does not exist.");
    };

    let similar: Vec<&str> = scores
        .iter()
        .filter(|(score, _)| *score == best)
        .map(|(_, name)| *name)
        .collect();

    format!(
        "Command \"{given}\" does not exist, did you mean \"{}\"?",
        similar.join("\" or \"")
    )
}

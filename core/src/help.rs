//! Help generation from a command tree.

use crate::types::{ArgumentHelp, CommandHelp, CommandSpec, OptionHelp};
use crate::validate::Validator;

/// Builds the recursive help description of a command tree node.
///
/// Pure transform with no side effects: argument type labels and the
/// `optional` marker come from the validator (`describe` and
/// `accepts_undefined`), subcommands are rendered one depth level deeper,
/// and args/options/subcommands/examples appear only when declared
/// non-empty on the source spec.
///
/// # Examples
///
/// ```
/// use cmdtree_core::{ArgumentSpec, CommandSpec, StandardValidator, build_help};
///
/// let cmd = CommandSpec::new("mycmd", "this is my first command")
///     .with_argument(ArgumentSpec::new("number", "your number", "number"));
///
/// let help = build_help(&cmd, &StandardValidator);
/// assert_eq!(help.depth, 0);
/// let args = help.args.unwrap();
/// assert_eq!(args[0].type_label, "a number");
/// assert!(!args[0].optional);
/// ```
pub fn build_help(command: &CommandSpec, validator: &dyn Validator) -> CommandHelp {
    help_at_depth(command, 0, validator)
}

fn help_at_depth(command: &CommandSpec, depth: usize, validator: &dyn Validator) -> CommandHelp {
    let mut help = CommandHelp {
        name: command.name.clone(),
        description: command.description.clone(),
        depth,
        args: None,
        options: None,
        sub_commands: None,
        examples: None,
    };

    if !command.args.is_empty() {
        help.args = Some(
            command
                .args
                .iter()
                .map(|arg| ArgumentHelp {
                    name: arg.name.clone(),
                    description: arg.description.clone(),
                    type_label: validator.describe(&arg.type_spec),
                    // An argument is optional when leaving it out validates.
                    optional: validator.accepts_undefined(&arg.type_spec),
                })
                .collect(),
        );
    }

    if !command.options.is_empty() {
        help.options = Some(
            command
                .options
                .iter()
                .map(|option| OptionHelp {
                    name: option.name.clone(),
                    description: option.description.clone(),
                    short: option.short,
                    type_label: validator.describe(&option.type_spec),
                })
                .collect(),
        );
    }

    if let Some(examples) = &command.examples {
        help.examples = Some(examples.clone());
    }

    if !command.sub_commands.is_empty() {
        help.sub_commands = Some(
            command
                .sub_commands
                .iter()
                .map(|sub| help_at_depth(sub, depth + 1, validator))
                .collect(),
        );
    }

    help
}

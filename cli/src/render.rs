//! Plain-text rendering of a [`CommandHelp`] tree.

use std::fmt::Write;

use cmdtree_core::CommandHelp;

/// Renders a help tree the way a terminal user expects to read it: a usage
/// line, the description, a recursive command list, an argument table, and
/// the examples text. Nested commands are indented one tab per depth level.
pub fn render_help(help: &CommandHelp) -> String {
    let mut out = String::new();
    render_into(&mut out, help);
    out.push('\n');
    out
}

fn render_into(out: &mut String, help: &CommandHelp) {
    // Usage line.
    let mut usage = String::new();
    if help.sub_commands.is_some() {
        let _ = write!(usage, "Usage: {} <command>", help.name);
    } else if help.depth == 0 {
        let _ = write!(usage, "Usage: {}", help.name);
    } else {
        usage.push_str(&help.name);
    }

    let mut longest_arg_name = 0;
    if let Some(args) = &help.args {
        for arg in args {
            longest_arg_name = longest_arg_name.max(arg.name.len());
            if arg.optional {
                let _ = write!(usage, " [{}]", arg.name);
            } else {
                let _ = write!(usage, " <{}>", arg.name);
            }
        }
    }
    print_line(out, &usage, help.depth);

    // Description.
    if help.depth > 0 {
        print_line(out, &format!("  {}", help.description), help.depth);
    } else {
        print_line(out, &format!("\n\n{}", help.description), help.depth);
    }

    // Commands.
    if let Some(sub_commands) = &help.sub_commands {
        print_line(out, "\n\nCommands:\n", help.depth);
        for sub in sub_commands {
            render_into(out, sub);
        }
    }

    // Arguments, top level only.
    if help.depth == 0 {
        if let Some(args) = &help.args {
            print_line(out, "\n\nArguments:", help.depth);
            for arg in args {
                print_line(
                    out,
                    &format!(
                        "\n   {:width$}\t{} ({})",
                        arg.name,
                        arg.description,
                        arg.type_label,
                        width = longest_arg_name
                    ),
                    help.depth,
                );
            }
        }
    }

    // Options, top level only.
    if help.depth == 0 {
        if let Some(options) = &help.options {
            let longest = options.iter().map(|o| o.name.len()).max().unwrap_or(0);
            print_line(out, "\n\nOptions:", help.depth);
            for option in options {
                let flag = match option.short {
                    Some(short) => format!("--{}/-{short}", option.name),
                    None => format!("--{}", option.name),
                };
                print_line(
                    out,
                    &format!(
                        "\n   {:width$}\t{} ({})",
                        flag,
                        option.description,
                        option.type_label,
                        width = longest + 4
                    ),
                    help.depth,
                );
            }
        }
    }

    // Examples, top level only.
    if help.depth == 0 {
        if let Some(examples) = &help.examples {
            print_line(out, &format!("\n\nExamples:\n{examples}"), help.depth);
        }
    }

    if help.depth > 0 {
        out.push('\n');
    }
}

fn print_line(out: &mut String, line: &str, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
    out.push_str(line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdtree_core::{ArgumentSpec, CommandSpec, OptionSpec, StandardValidator, build_help};

    #[test]
    fn test_leaf_command_usage_line() {
        let cmd = CommandSpec::new("mycmd", "this is my first command")
            .with_argument(ArgumentSpec::new("number", "a number", "number"))
            .with_argument(ArgumentSpec::new("label", "a label", "string | undefined"));
        let text = render_help(&build_help(&cmd, &StandardValidator));

        assert!(text.starts_with("Usage: mycmd <number> [label]"));
        assert!(text.contains("this is my first command"));
        assert!(text.contains("Arguments:"));
        assert!(text.contains("a number (a number)"));
        assert!(text.contains("a label (a string or undefined)"));
    }

    #[test]
    fn test_parent_command_lists_sub_commands() {
        let cmd = CommandSpec::new("tool", "a tool")
            .with_sub_command(CommandSpec::new("build", "build it"))
            .with_sub_command(CommandSpec::new("test", "test it"));
        let text = render_help(&build_help(&cmd, &StandardValidator));

        assert!(text.starts_with("Usage: tool <command>"));
        assert!(text.contains("Commands:"));
        // Nested commands are indented one tab.
        assert!(text.contains("\tbuild"));
        assert!(text.contains("\t  build it"));
        assert!(text.contains("\ttest"));
    }

    #[test]
    fn test_options_and_examples_sections() {
        let cmd = CommandSpec::new("mycmd", "a command")
            .with_option(OptionSpec::new("reverse", "reverse it", "boolean").with_short('r'))
            .with_examples("mycmd 42 --reverse");
        let text = render_help(&build_help(&cmd, &StandardValidator));

        assert!(text.contains("Options:"));
        assert!(text.contains("--reverse/-r"));
        assert!(text.contains("Examples:\nmycmd 42 --reverse"));
    }
}

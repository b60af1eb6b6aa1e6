//! End-to-end dispatch behavior against declared command trees.

use std::sync::{Arc, Mutex};

use cmdtree_core::{
    ArgumentHelp, ArgumentSpec, CommandSpec, Outcome, OptionSpec, Value, VerifiedCommand, define,
    dispatch,
};

/// `mycmd <number> [--reverse]`: returns the number, negated when reversed.
fn number_command() -> VerifiedCommand {
    define(
        CommandSpec::new("mycmd", "this is my first command")
            .with_version("0.1.0")
            .with_argument(ArgumentSpec::new("number", "a number", "number"))
            .with_option(
                OptionSpec::new("reverse", "reverse the provided number", "boolean | undefined")
                    .with_short('r'),
            )
            .with_run(|ctx| async move {
                let number = ctx.arg("number").and_then(Value::as_number).unwrap_or(0.0);
                let reverse = ctx.option("reverse").and_then(Value::as_bool).unwrap_or(false);
                Value::Number(if reverse { -number } else { number })
            }),
    )
    .unwrap()
}

fn tool_with_sub_commands() -> VerifiedCommand {
    define(
        CommandSpec::new("tool", "a build tool")
            .with_version("2.0.0")
            .with_sub_command(
                CommandSpec::new("build", "build the project")
                    .with_argument(ArgumentSpec::new("target", "what to build", "string"))
                    .with_run(|ctx| async move {
                        ctx.arg("target").cloned().unwrap_or(Value::Undefined)
                    }),
            )
            .with_sub_command(
                CommandSpec::new("test", "test the project")
                    .with_run(|_| async { Value::String("tested".into()) }),
            ),
    )
    .unwrap()
}

#[tokio::test]
async fn run_a_basic_command() {
    let cmd = number_command();
    let outcome = dispatch(&cmd, ["42"]).await;
    assert_eq!(outcome, Outcome::Data(Some(Value::Number(42.0))));
}

#[tokio::test]
async fn run_the_help_command() {
    let cmd = define(
        CommandSpec::new("mycmd", "this is my first command")
            .with_argument(ArgumentSpec::new("number", "your number", "number"))
            .with_run(|ctx| async move { ctx.arg("number").cloned().unwrap_or(Value::Undefined) }),
    )
    .unwrap();

    let outcome = dispatch(&cmd, ["42", "--help"]).await;
    let help = outcome.help().expect("expected a help outcome");

    assert_eq!(help.name, "mycmd");
    assert_eq!(help.description, "this is my first command");
    assert_eq!(help.depth, 0);
    assert_eq!(
        help.args,
        Some(vec![ArgumentHelp {
            name: "number".to_string(),
            description: "your number".to_string(),
            type_label: "a number".to_string(),
            optional: false,
        }])
    );
    assert!(help.sub_commands.is_none());
    assert!(help.examples.is_none());
}

#[tokio::test]
async fn run_the_version_command() {
    let cmd = number_command();
    let outcome = dispatch(&cmd, ["42", "--version"]).await;
    assert_eq!(outcome, Outcome::Version("0.1.0".to_string()));
}

#[tokio::test]
async fn version_takes_priority_over_everything() {
    let tool = tool_with_sub_commands();
    // Malformed subcommand name and help flag present; version still wins.
    let outcome = dispatch(&tool, ["nonsense", "--help", "-v"]).await;
    assert_eq!(outcome, Outcome::Version("2.0.0".to_string()));
}

#[tokio::test]
async fn version_is_empty_string_when_undeclared() {
    let cmd = define(
        CommandSpec::new("mycmd", "no version here")
            .with_run(|_| async { Value::Undefined }),
    )
    .unwrap();
    let outcome = dispatch(&cmd, ["--version"]).await;
    assert_eq!(outcome, Outcome::Version(String::new()));
}

#[tokio::test]
async fn run_a_command_with_errors() {
    let cmd = number_command();
    let outcome = dispatch(&cmd, ["a"]).await;
    assert_eq!(
        outcome.errors(),
        Some(&["argument \"number\": must be a number (was a string)".to_string()][..])
    );
}

#[tokio::test]
async fn run_a_basic_command_with_options() {
    let cmd = number_command();

    let outcome = dispatch(&cmd, ["42", "--reverse"]).await;
    assert_eq!(outcome, Outcome::Data(Some(Value::Number(-42.0))));

    let outcome = dispatch(&cmd, ["42", "--reverse=true"]).await;
    assert_eq!(outcome, Outcome::Data(Some(Value::Number(-42.0))));

    let outcome = dispatch(&cmd, ["42", "--reverse=false"]).await;
    assert_eq!(outcome, Outcome::Data(Some(Value::Number(42.0))));

    // Only "true"/"1"/"on" (case-insensitive) are truthy; anything else is
    // silently false.
    let outcome = dispatch(&cmd, ["42", "--reverse=yes"]).await;
    assert_eq!(outcome, Outcome::Data(Some(Value::Number(42.0))));

    let outcome = dispatch(&cmd, ["42", "--reverse=ON"]).await;
    assert_eq!(outcome, Outcome::Data(Some(Value::Number(-42.0))));
}

#[tokio::test]
async fn short_alias_matches_option() {
    let cmd = number_command();
    let outcome = dispatch(&cmd, ["42", "-r"]).await;
    assert_eq!(outcome, Outcome::Data(Some(Value::Number(-42.0))));
}

#[tokio::test]
async fn argument_and_option_errors_are_collected_in_order() {
    let cmd = define(
        CommandSpec::new("mycmd", "a command")
            .with_argument(ArgumentSpec::new("number", "a number", "number"))
            .with_argument(ArgumentSpec::new("count", "a count", "bigint"))
            .with_option(OptionSpec::new("limit", "a limit", "number").with_short('l'))
            .with_run(|_| async { Value::Undefined }),
    )
    .unwrap();

    let outcome = dispatch(&cmd, ["a", "b", "--limit=c"]).await;
    assert_eq!(
        outcome.errors(),
        Some(
            &[
                "argument \"number\": must be a number (was a string)".to_string(),
                "argument \"count\": must be a bigint (was a string)".to_string(),
                "option \"--limit/-l\": must be a number (was a string)".to_string(),
            ][..]
        )
    );
}

#[tokio::test]
async fn sub_command_dispatch_binds_remaining_positionals() {
    let tool = tool_with_sub_commands();
    let outcome = dispatch(&tool, ["build", "release"]).await;
    assert_eq!(outcome, Outcome::Data(Some(Value::String("release".into()))));
}

#[tokio::test]
async fn options_before_the_sub_command_name_are_forwarded() {
    let cmd = define(
        CommandSpec::new("tool", "a tool").with_sub_command(
            CommandSpec::new("count", "count things")
                .with_option(OptionSpec::new("limit", "how many", "number"))
                .with_run(|ctx| async move {
                    ctx.option("limit").cloned().unwrap_or(Value::Undefined)
                }),
        ),
    )
    .unwrap();

    let outcome = dispatch(&cmd, ["--limit=3", "count"]).await;
    assert_eq!(outcome, Outcome::Data(Some(Value::Number(3.0))));
}

#[tokio::test]
async fn nested_sub_commands_resolve_level_by_level() {
    let cmd = define(
        CommandSpec::new("tool", "a tool").with_sub_command(
            CommandSpec::new("remote", "manage remotes").with_sub_command(
                CommandSpec::new("add", "add a remote")
                    .with_argument(ArgumentSpec::new("name", "remote name", "string"))
                    .with_run(|ctx| async move {
                        ctx.arg("name").cloned().unwrap_or(Value::Undefined)
                    }),
            ),
        ),
    )
    .unwrap();

    let outcome = dispatch(&cmd, ["remote", "add", "origin"]).await;
    assert_eq!(outcome, Outcome::Data(Some(Value::String("origin".into()))));
}

#[tokio::test]
async fn unknown_sub_command_suggests_closest_match() {
    let tool = tool_with_sub_commands();
    let outcome = dispatch(&tool, ["biuld"]).await;
    assert_eq!(
        outcome.errors(),
        Some(&["Command \"biuld\" does not exist, did you mean \"build\"?".to_string()][..])
    );
}

#[tokio::test]
async fn suggestion_error_beats_help_flag() {
    let tool = tool_with_sub_commands();
    let outcome = dispatch(&tool, ["biuld", "--help"]).await;
    assert!(outcome.errors().is_some());
}

#[tokio::test]
async fn missing_sub_command_is_an_error() {
    let tool = tool_with_sub_commands();
    let outcome = dispatch(&tool, [] as [&str; 0]).await;
    assert_eq!(
        outcome.errors(),
        Some(
            &["A command must be provided, add \"--help\" or \"-h\" to get more information \
               about the available commands."
                .to_string()][..]
        )
    );
}

#[tokio::test]
async fn help_on_a_parent_covers_the_sub_tree() {
    let tool = tool_with_sub_commands();
    let outcome = dispatch(&tool, ["--help"]).await;
    let help = outcome.help().expect("expected a help outcome");

    assert_eq!(help.depth, 0);
    let subs = help.sub_commands.as_ref().unwrap();
    assert_eq!(subs.len(), 2);
    assert_eq!(subs[0].name, "build");
    assert_eq!(subs[0].depth, 1);
    let build_args = subs[0].args.as_ref().unwrap();
    assert_eq!(build_args[0].type_label, "a string");
}

#[tokio::test]
async fn help_on_a_resolved_sub_command_is_depth_zero() {
    let tool = tool_with_sub_commands();
    let outcome = dispatch(&tool, ["build", "--help"]).await;
    let help = outcome.help().expect("expected a help outcome");
    assert_eq!(help.name, "build");
    assert_eq!(help.depth, 0);
}

#[tokio::test]
async fn hooks_run_in_fixed_sequence() {
    let log: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

    let before_log = log.clone();
    let run_log = log.clone();
    let after_log = log.clone();
    let cmd = define(
        CommandSpec::new("mycmd", "hooks")
            .with_before_run(move |_| {
                let log = before_log.clone();
                async move {
                    log.lock().unwrap().push("before_run");
                }
            })
            .with_run(move |_| {
                let log = run_log.clone();
                async move {
                    log.lock().unwrap().push("run");
                    Value::Undefined
                }
            })
            .with_after_run(move |_| {
                let log = after_log.clone();
                async move {
                    log.lock().unwrap().push("after_run");
                }
            }),
    )
    .unwrap();

    let outcome = dispatch(&cmd, [] as [&str; 0]).await;
    assert_eq!(outcome, Outcome::Data(Some(Value::Undefined)));
    assert_eq!(*log.lock().unwrap(), vec!["before_run", "run", "after_run"]);
}

#[tokio::test]
async fn hooks_run_even_without_a_run_handler() {
    let log: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

    let before_log = log.clone();
    let after_log = log.clone();
    let cmd = define(
        CommandSpec::new("mycmd", "hooks only")
            .with_before_run(move |_| {
                let log = before_log.clone();
                async move {
                    log.lock().unwrap().push("before_run");
                }
            })
            .with_after_run(move |_| {
                let log = after_log.clone();
                async move {
                    log.lock().unwrap().push("after_run");
                }
            }),
    )
    .unwrap();

    let outcome = dispatch(&cmd, [] as [&str; 0]).await;
    // No handler: the data payload is absent.
    assert_eq!(outcome, Outcome::Data(None));
    assert_eq!(*log.lock().unwrap(), vec!["before_run", "after_run"]);
}

#[tokio::test]
async fn hooks_see_the_bound_context() {
    let seen: Arc<Mutex<Option<f64>>> = Arc::new(Mutex::new(None));

    let seen_in_hook = seen.clone();
    let cmd = define(
        CommandSpec::new("mycmd", "context check")
            .with_argument(ArgumentSpec::new("number", "a number", "number"))
            .with_before_run(move |ctx| {
                let seen = seen_in_hook.clone();
                async move {
                    *seen.lock().unwrap() = ctx.arg("number").and_then(Value::as_number);
                }
            })
            .with_run(|_| async { Value::Undefined }),
    )
    .unwrap();

    dispatch(&cmd, ["7"]).await;
    assert_eq!(*seen.lock().unwrap(), Some(7.0));
}

#[tokio::test]
async fn bigint_argument_binds_natively() {
    let cmd = define(
        CommandSpec::new("mycmd", "big numbers")
            .with_argument(ArgumentSpec::new("id", "an id", "bigint"))
            .with_run(|ctx| async move { ctx.arg("id").cloned().unwrap_or(Value::Undefined) }),
    )
    .unwrap();

    let outcome = dispatch(&cmd, ["123456789012345678901234567890"]).await;
    assert_eq!(
        outcome,
        Outcome::Data(Some(Value::BigInt(123456789012345678901234567890)))
    );
}

#[tokio::test]
async fn optional_argument_may_be_left_out() {
    let cmd = define(
        CommandSpec::new("mycmd", "optional arg")
            .with_argument(ArgumentSpec::new("label", "a label", "string | undefined"))
            .with_run(|ctx| async move { ctx.arg("label").cloned().unwrap_or(Value::Undefined) }),
    )
    .unwrap();

    let outcome = dispatch(&cmd, [] as [&str; 0]).await;
    assert_eq!(outcome, Outcome::Data(Some(Value::Undefined)));

    let outcome = dispatch(&cmd, ["hello"]).await;
    assert_eq!(outcome, Outcome::Data(Some(Value::String("hello".into()))));
}

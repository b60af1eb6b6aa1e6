//! `numbers` — a toy arithmetic CLI built on the cmdtree framework.
//!
//! Exists to exercise the whole dispatch surface: subcommands, typed
//! arguments and options, reserved help/version flags, and help rendering
//! (plain text, or JSON when `--json` is passed alongside `--help`).

mod render;

use std::process::ExitCode;

use cmdtree_core::{
    ArgumentSpec, CommandSpec, Outcome, OptionSpec, Value, VerifiedCommand, define, dispatch,
};
use tracing_subscriber::EnvFilter;

use crate::render::render_help;

fn negate_command() -> CommandSpec {
    CommandSpec::new("negate", "negate a number")
        .with_argument(ArgumentSpec::new("number", "the number to negate", "number"))
        .with_run(|ctx| async move {
            let number = ctx.arg("number").and_then(Value::as_number).unwrap_or(0.0);
            Value::Number(-number)
        })
}

fn add_command() -> CommandSpec {
    CommandSpec::new("add", "add two numbers")
        .with_argument(ArgumentSpec::new("a", "first addend", "number"))
        .with_argument(ArgumentSpec::new("b", "second addend", "number"))
        .with_option(
            OptionSpec::new("round", "round the sum to the nearest integer", "boolean | undefined")
                .with_short('r'),
        )
        .with_run(|ctx| async move {
            let a = ctx.arg("a").and_then(Value::as_number).unwrap_or(0.0);
            let b = ctx.arg("b").and_then(Value::as_number).unwrap_or(0.0);
            let round = ctx.option("round").and_then(Value::as_bool).unwrap_or(false);
            let sum = a + b;
            Value::Number(if round { sum.round() } else { sum })
        })
}

fn repeat_command() -> CommandSpec {
    CommandSpec::new("repeat", "repeat a piece of text")
        .with_argument(ArgumentSpec::new("text", "the text to repeat", "string"))
        .with_option(
            OptionSpec::new("times", "how many times to repeat", "number | undefined")
                .with_short('t'),
        )
        .with_run(|ctx| async move {
            let text = ctx.arg("text").and_then(Value::as_str).unwrap_or("").to_string();
            let times = ctx.option("times").and_then(Value::as_number).unwrap_or(1.0);
            Value::String(text.repeat(times.max(0.0) as usize))
        })
}

fn command_tree() -> Result<VerifiedCommand, cmdtree_core::DefinitionError> {
    define(
        CommandSpec::new("numbers", "toy arithmetic commands")
            .with_version(env!("CARGO_PKG_VERSION"))
            .with_examples("numbers negate 42\nnumbers add 1.5 2.5 --round\nnumbers repeat ha --times=3")
            .with_sub_command(negate_command())
            .with_sub_command(add_command())
            .with_sub_command(repeat_command()),
    )
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let argv: Vec<String> = std::env::args().skip(1).collect();

    let tree = match command_tree() {
        Ok(tree) => tree,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch(&tree, &argv).await {
        Outcome::Failure(errors) => {
            for error in errors {
                eprintln!("{error}");
            }
            ExitCode::FAILURE
        }
        Outcome::Data(Some(value)) => {
            println!("{value}");
            ExitCode::SUCCESS
        }
        Outcome::Data(None) => ExitCode::SUCCESS,
        Outcome::Help(help) => {
            // The framework tolerates unknown options, so `--json` reaches
            // us untouched next to `--help`.
            if argv.iter().any(|arg| arg == "--json") {
                match serde_json::to_string_pretty(&help) {
                    Ok(json) => println!("{json}"),
                    Err(error) => {
                        eprintln!("failed to encode help as JSON: {error}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print!("{}", render_help(&help));
            }
            ExitCode::SUCCESS
        }
        Outcome::Version(version) => {
            println!("{version}");
            ExitCode::SUCCESS
        }
    }
}

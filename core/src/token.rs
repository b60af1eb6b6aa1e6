//! Raw argument tokenization.
//!
//! Splits an argument vector into positional and option tokens without
//! knowing anything about the command tree. Tokenization is non-strict:
//! unrecognized option names never fail here; the binding stage decides what
//! to do with them.

/// One raw token produced from the argument vector.
///
/// Tokens are transient: created per dispatch call and consumed entirely
/// within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawToken {
    /// A bare value not introduced by `-`/`--`.
    Positional {
        /// The token text.
        value: String,
        /// Index into the original argument vector.
        index: usize,
    },
    /// A `--name`, `--name=value`, or `-x` token.
    Option {
        /// Option name without dashes (`"name"`, `"x"`).
        name: String,
        /// The dashed form as typed (`"--name"`, `"-x"`).
        raw_name: String,
        /// Inline value from the `--name=value` form.
        value: Option<String>,
        /// Index into the original argument vector.
        index: usize,
    },
}

/// Tokenizes an argument vector.
///
/// Rules:
/// - `--name` and `--name=value` produce option tokens;
/// - `-x` produces an option token, and a grouped `-abc` produces one
///   option token per character;
/// - a lone `--` terminates option parsing, everything after it is
///   positional;
/// - `-` alone and dash-digit tokens such as `-42` are positional
///   (negative numbers are values, not flags);
/// - everything else is positional.
///
/// # Examples
///
/// ```
/// use cmdtree_core::{RawToken, tokenize};
///
/// let tokens = tokenize(["42", "--reverse=true", "-v"]);
/// assert_eq!(
///     tokens,
///     vec![
///         RawToken::Positional { value: "42".into(), index: 0 },
///         RawToken::Option {
///             name: "reverse".into(),
///             raw_name: "--reverse".into(),
///             value: Some("true".into()),
///             index: 1,
///         },
///         RawToken::Option { name: "v".into(), raw_name: "-v".into(), value: None, index: 2 },
///     ]
/// );
/// ```
pub fn tokenize<I, S>(argv: I) -> Vec<RawToken>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tokens = Vec::new();
    let mut options_terminated = false;

    for (index, arg) in argv.into_iter().enumerate() {
        let arg = arg.as_ref();

        if options_terminated {
            tokens.push(RawToken::Positional { value: arg.to_string(), index });
            continue;
        }

        if arg == "--" {
            options_terminated = true;
            continue;
        }

        if let Some(rest) = arg.strip_prefix("--") {
            match rest.split_once('=') {
                Some((name, value)) => tokens.push(RawToken::Option {
                    name: name.to_string(),
                    raw_name: format!("--{name}"),
                    value: Some(value.to_string()),
                    index,
                }),
                None => tokens.push(RawToken::Option {
                    name: rest.to_string(),
                    raw_name: arg.to_string(),
                    value: None,
                    index,
                }),
            }
            continue;
        }

        if is_short_option(arg) {
            for c in arg.chars().skip(1) {
                tokens.push(RawToken::Option {
                    name: c.to_string(),
                    raw_name: format!("-{c}"),
                    value: None,
                    index,
                });
            }
            continue;
        }

        tokens.push(RawToken::Positional { value: arg.to_string(), index });
    }

    tokens
}

fn is_short_option(arg: &str) -> bool {
    let mut chars = arg.chars();
    chars.next() == Some('-')
        && match chars.next() {
            Some(c) => !c.is_ascii_digit(),
            None => false,
        }
}

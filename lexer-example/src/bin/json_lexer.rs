//! JSON 词法分析器示例
//! 展示如何用状态、求值器以及 call/ret 处理字符串转义

use clap::Parser;
use lexer_example::{init_logging, print_tokens, Input};
use lexer_framework::prelude::*;
use lexer_framework::{BuildError, EvalError};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "json-lexer")]
#[command(about = "Tokenize JSON documents")]
struct Args {
    #[command(flatten)]
    input: Input,
}

const PUNCT: &str = "{}[]:,";
const CLOSING: &str = "}],";

/// `true`, `false` and `null`.
fn literal(value: Value) -> Result<Value, EvalError> {
    let text = value.to_string();
    match text.as_str() {
        "null" => Ok(value),
        "true" | "false" => boolean(value),
        _ => Err(EvalError::Custom(format!("unknown literal `{text}`"))),
    }
}

fn json_lexer() -> Result<Lexer, BuildError> {
    let space = || when(char::is_whitespace);
    let number_start = || when(|ch| ch == '-' || ch.is_ascii_digit());
    let number_continue = || when(|ch| ch.is_ascii_digit() || "+-.eE".contains(ch));

    LexerBuilder::new()
        .evaluator("number", float)
        .evaluator("literal", literal)
        .state("value")
        .rule(space(), [])
        .rule(one_of(PUNCT), [accept(), emit("punct")])
        .rule('"', [transition("string")])
        .rule(number_start(), [accept(), transition("number")])
        .rule(when(|ch| ch.is_ascii_lowercase()), [accept(), transition("literal")])
        .fallback([abort("unexpected character")])
        .state("string")
        .rule('\\', [call("escape")])
        .rule('"', [emit("string"), transition("value")])
        .fallback([accept()])
        .on_end([abort("unterminated string")])
        .state("escape")
        .rule('n', [accept_char('\n'), ret()])
        .rule('t', [accept_char('\t'), ret()])
        .rule('r', [accept_char('\r'), ret()])
        .rule(one_of("\"\\/"), [accept(), ret()])
        .fallback([abort("invalid escape")])
        .on_end([abort("unterminated string")])
        .state("number")
        .rule(number_continue(), [accept()])
        .rule(space(), [emit("number"), transition("value")])
        .rule(
            one_of(CLOSING),
            [emit("number"), accept(), emit("punct"), transition("value")],
        )
        .fallback([abort("malformed number")])
        .on_end([emit("number")])
        .state("literal")
        .rule(when(|ch| ch.is_ascii_lowercase()), [accept()])
        .rule(space(), [emit("literal"), transition("value")])
        .rule(
            one_of(CLOSING),
            [emit("literal"), accept(), emit("punct"), transition("value")],
        )
        .fallback([abort("unexpected character")])
        .on_end([emit("literal")])
        .build()
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let lexer = json_lexer()?;
    let text = args.input.read()?;
    print_tokens(&lexer, &text, args.input.json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document() {
        let json = r#"{"name": "A\"li\nce", "age": 30, "tags": [true, null]}"#;
        let tokens = json_lexer().unwrap().tokenize(json).unwrap();
        let punct = |s: &str| Token::new("punct", s);
        assert_eq!(
            tokens,
            vec![
                punct("{"),
                Token::new("string", "name"),
                punct(":"),
                Token::new("string", "A\"li\nce"),
                punct(","),
                Token::new("string", "age"),
                punct(":"),
                Token::new("number", 30.0),
                punct(","),
                Token::new("string", "tags"),
                punct(":"),
                punct("["),
                Token::new("literal", true),
                punct(","),
                Token::new("literal", "null"),
                punct("]"),
                punct("}"),
            ]
        );
    }

    #[test]
    fn test_errors() {
        let lexer = json_lexer().unwrap();

        let err = lexer.tokenize("{\"a\": nope}").unwrap_err();
        assert_eq!(err.message(), "invalid literal token: unknown literal `nope`");

        let err = lexer.tokenize("[\"open").unwrap_err();
        assert_eq!(err.message(), "unterminated string");
        assert_eq!(err.offset(), 6);

        let err = lexer.tokenize("\"\\x\"").unwrap_err();
        assert_eq!(err.message(), "invalid escape");
        assert_eq!(err.item(), Some('x'));
    }
}

//! 计算器词法分析器示例
//! 展示数字求值器、大小写无关匹配以及嵌套括号注释

use clap::Parser;
use lexer_example::{init_logging, print_tokens, Input};
use lexer_framework::prelude::*;
use lexer_framework::BuildError;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "calc-lexer")]
#[command(about = "Tokenize arithmetic expressions")]
struct Args {
    #[command(flatten)]
    input: Input,
}

const OPERATORS: &str = "+-*/^()";

/// Numbers become `int`/`float` values, `{ ... }` comments nest and are
/// dropped, identifiers are case-insensitive function names such as `SIN`.
fn calc_lexer() -> Result<Lexer, BuildError> {
    let digit = || when(|ch| ch.is_ascii_digit());
    let space = || when(char::is_whitespace);
    let letter = || when(|ch| ch.is_ascii_alphabetic());

    LexerBuilder::new()
        .evaluator("int", integer)
        .evaluator("float", float)
        .evaluator("ident", |value: Value| {
            Ok(Value::Str(value.to_string().to_lowercase()))
        })
        .state("start")
        .rule(space(), [])
        .rule(digit(), [accept(), transition("int")])
        .rule('.', [accept(), transition("float")])
        .rule(letter(), [accept(), transition("ident")])
        .rule(one_of(OPERATORS), [accept(), emit("op")])
        .rule('{', [call("comment")])
        .fallback([abort("unexpected character")])
        .state("int")
        .rule(digit(), [accept()])
        .rule('.', [accept(), transition("float")])
        .case_insensitive(true)
        .rule('e', [accept(), transition("exponent")])
        .case_insensitive(false)
        .rule(space(), [emit("int"), transition("start")])
        .rule(
            one_of(OPERATORS),
            [emit("int"), accept(), emit("op"), transition("start")],
        )
        .fallback([abort("malformed number")])
        .on_end([emit("int")])
        .state("float")
        .rule(digit(), [accept()])
        .case_insensitive(true)
        .rule('e', [accept(), transition("exponent")])
        .case_insensitive(false)
        .rule(space(), [emit("float"), transition("start")])
        .rule(
            one_of(OPERATORS),
            [emit("float"), accept(), emit("op"), transition("start")],
        )
        .fallback([abort("malformed number")])
        .on_end([emit("float")])
        .state("exponent")
        .rule(one_of("+-"), [accept(), transition("float")])
        .rule(digit(), [accept(), transition("float")])
        .fallback([abort("malformed exponent")])
        .on_end([abort("malformed exponent")])
        .state("ident")
        .rule(letter(), [accept()])
        .rule(space(), [emit("ident"), transition("start")])
        .rule(
            one_of(OPERATORS),
            [emit("ident"), accept(), emit("op"), transition("start")],
        )
        .fallback([abort("unexpected character")])
        .on_end([emit("ident")])
        .state("comment")
        .rule('{', [call("comment")])
        .rule('}', [ret()])
        .fallback([])
        .on_end([abort("unclosed comment")])
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
    let lexer = calc_lexer()?;
    let text = args.input.read()?;
    print_tokens(&lexer, &text, args.input.json)?;
    Ok(())
}

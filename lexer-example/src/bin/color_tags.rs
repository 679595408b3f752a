//! 颜色标签词法分析器示例
//! `[name]` 切换颜色，反斜杠转义下一个字符

use clap::Parser;
use lexer_example::{init_logging, print_tokens, Input};
use lexer_framework::prelude::*;
use lexer_framework::BuildError;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "color-tags")]
#[command(about = "Split text with [color] tags into text and color tokens")]
struct Args {
    #[command(flatten)]
    input: Input,
}

fn color_tags() -> Result<Lexer, BuildError> {
    LexerBuilder::new()
        .state("text")
        .rule('\\', [transition("escaped_char")])
        .rule('[', [emit("text"), transition("color")])
        .fallback([accept()])
        .on_end([emit("text")])
        .state("color")
        .rule(']', [emit("color"), transition("text")])
        .fallback([accept()])
        .on_end([abort("Unclosed color tag")])
        .state("escaped_char")
        .fallback([accept(), transition("text")])
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
    let lexer = color_tags()?;
    let text = args.input.read()?;
    print_tokens(&lexer, &text, args.input.json)?;
    Ok(())
}

//! Color tag lexer example.
//! Splits text such as `warn [red]here[white]` into text and color tokens;
//! a backslash makes the next character literal.

use lexer_framework::prelude::*;

fn color_tags() -> Result<Lexer, lexer_framework::BuildError> {
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

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let lexer = color_tags()?;

    for input in ["a[b]c", "a\\[b]c", "a[b", ""] {
        println!("input: {input:?}");
        for result in lexer.lex(input) {
            match result {
                Ok(token) => println!("  {token}"),
                Err(err) => println!("  error at {err}"),
            }
        }
    }
    Ok(())
}

//! 示例词法分析器共用的命令行输入与输出工具

use clap::Args;
use lexer_framework::{LexError, Lexer, Token};
use std::io::{self, Read};
use std::path::PathBuf;

/// Where the text to lex comes from.
#[derive(Args, Debug, Clone)]
pub struct Input {
    /// File to lex; standard input when neither this nor `--text` is given
    #[arg(value_name = "FILE", conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Lex this text instead of a file
    #[arg(short, long, value_name = "TEXT")]
    pub text: Option<String>,

    /// Print tokens as JSON, one per line
    #[arg(long)]
    pub json: bool,
}

impl Input {
    pub fn read(&self) -> io::Result<String> {
        match (&self.text, &self.file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => std::fs::read_to_string(path),
            (None, None) => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                Ok(buf)
            }
        }
    }
}

/// Formats a token for display.
pub fn render(token: &Token, json: bool) -> String {
    if json {
        serde_json::to_string(token)
            .unwrap_or_else(|err| format!("{{\"error\":\"{err}\"}}"))
    } else {
        token.to_string()
    }
}

/// Lexes `input` and prints every token. Stops at the first error.
pub fn print_tokens(lexer: &Lexer, input: &str, json: bool) -> Result<usize, LexError> {
    let mut count = 0;
    for result in lexer.lex(input) {
        let token = result?;
        println!("{}", render(&token, json));
        count += 1;
    }
    log::info!("{} tokens", count);
    Ok(count)
}

/// Initializes logging; `RUST_LOG` overrides the default `warn` filter.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let token = Token::new("int", 42i64);
        assert_eq!(render(&token, false), "int(\"42\")");
        assert_eq!(render(&token, true), r#"{"kind":"int","value":42}"#);
    }

    #[test]
    fn test_read_prefers_text() {
        let input = Input {
            file: None,
            text: Some("abc".into()),
            json: false,
        };
        assert_eq!(input.read().unwrap(), "abc");
    }
}

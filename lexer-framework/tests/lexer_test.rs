use lexer_framework::prelude::*;
use lexer_framework::{BuildError, EvalError};

fn numbers() -> Lexer {
    let digit = || pattern("[0-9]").unwrap();
    LexerBuilder::new()
        .evaluator("int", integer)
        .evaluator("float", float)
        .state("start")
        .rule(digit(), [accept(), transition("int")])
        .rule('-', [accept(), transition("int")])
        .rule(one_of(" \t\n"), [])
        .fallback([abort("unexpected character")])
        .state("int")
        .rule(digit(), [accept()])
        .rule('.', [accept(), transition("float")])
        .rule(one_of(" \t\n"), [emit("int"), transition("start")])
        .fallback([abort("malformed number")])
        .on_end([emit("int")])
        .state("float")
        .rule(digit(), [accept()])
        .rule(one_of(" \t\n"), [emit("float"), transition("start")])
        .fallback([abort("malformed number")])
        .on_end([emit("float")])
        .build()
        .unwrap()
}

#[test]
fn test_numbers_are_evaluated() {
    let tokens = numbers().tokenize("12 3.5\n-7").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::new("int", 12i64),
            Token::new("float", 3.5),
            Token::new("int", -7i64),
        ]
    );
    assert_eq!(tokens[0].value.as_int(), Some(12));
    assert_eq!(tokens[1].value.as_float(), Some(3.5));
}

#[test]
fn test_malformed_number() {
    let err = numbers().tokenize("1.2.3").unwrap_err();
    assert_eq!(err.message(), "malformed number");
    assert_eq!(err.offset(), 3);
    assert_eq!(err.item(), Some('.'));
}

#[test]
fn test_evaluator_failure_aborts() {
    // A lone minus sign reaches the integer evaluator.
    let err = numbers().tokenize("- 1").unwrap_err();
    assert_eq!(err.message(), "invalid int token: cannot read \"-\" as integer");
    assert_eq!(err.offset(), 1);
}

#[test]
fn test_evaluator_chain_runs_in_order() {
    let lexer = LexerBuilder::new()
        .evaluator("flag", trim)
        .evaluator("flag", boolean)
        .evaluator("word", |value: Value| match value {
            Value::Str(s) => Ok(Value::Str(s.to_uppercase())),
            _ => Err(EvalError::Custom("not text".into())),
        })
        .state("s")
        .rule(';', [emit("flag")])
        .rule(',', [emit("word")])
        .fallback([accept()])
        .build()
        .unwrap();

    let tokens = lexer.tokenize(" true ;false;ab,").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::new("flag", true),
            Token::new("flag", false),
            Token::new("word", "AB"),
        ]
    );

    let err = lexer.tokenize("maybe;").unwrap_err();
    assert_eq!(
        err.message(),
        "invalid flag token: cannot read \"maybe\" as boolean"
    );
}

fn quotes() -> Lexer {
    LexerBuilder::new()
        .state("text")
        .rule(one_of("'\""), [emit("text"), push(), transition("quoted")])
        .fallback([accept()])
        .on_end([emit("text")])
        .state("quoted")
        .rule(pop(), [emit("string"), transition("text")])
        .fallback([accept()])
        .on_end([abort("unterminated string")])
        .build()
        .unwrap()
}

#[test]
fn test_quotes_close_on_matching_delimiter() {
    let tokens = quotes().tokenize("say \"it's\" or 'a \"b\"'").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::new("text", "say "),
            Token::new("string", "it's"),
            Token::new("text", " or "),
            Token::new("string", "a \"b\""),
            Token::new("text", ""),
        ]
    );
}

#[test]
fn test_unterminated_quote() {
    let err = quotes().tokenize("x 'open").unwrap_err();
    assert_eq!(err.message(), "unterminated string");
    assert_eq!(err.offset(), 7);
    assert_eq!(err.item(), None);
}

fn comments() -> Lexer {
    LexerBuilder::new()
        .state("code")
        .rule('{', [emit("code"), call("comment")])
        .rule(one_of(" \n"), [emit("code")])
        .fallback([accept()])
        .on_end([emit("code")])
        .state("comment")
        .rule('{', [call("comment")])
        .rule('}', [ret()])
        .fallback([])
        .on_end([abort("unclosed comment")])
        .build()
        .unwrap()
}

#[test]
fn test_nested_comments_return_to_caller() {
    let tokens = comments().tokenize("a{x{y}z}b").unwrap();
    assert_eq!(tokens, vec![Token::new("code", "a"), Token::new("code", "b")]);
}

#[test]
fn test_call_takes_effect_on_next_item() {
    let lexer = comments();
    let mut run = lexer.lex("a{{b}}c");
    assert_eq!(run.next(), Some(Ok(Token::new("code", "a"))));
    // The `{` that produced the token has been processed; the call is pending.
    assert_eq!(run.state(), "code");
    assert_eq!(run.next(), Some(Ok(Token::new("code", "c"))));
    assert_eq!(run.next(), None);
}

#[test]
fn test_unbalanced_comments() {
    let err = comments().tokenize("a{b{c}").unwrap_err();
    assert_eq!(err.message(), "unclosed comment");

    let stray = LexerBuilder::new()
        .state("code")
        .rule('}', [ret()])
        .fallback([accept()])
        .build()
        .unwrap();
    let err = stray.tokenize("a}").unwrap_err();
    assert!(err.message().contains("empty call stack"), "{}", err);
    assert_eq!(err.offset(), 1);
}

#[test]
fn test_skip_and_accept_char() {
    let lexer = LexerBuilder::new()
        .state("s")
        .rule('#', [skip()])
        .rule('_', [accept_char(' ')])
        .rule(';', [emit("word")])
        .fallback([accept()])
        .build()
        .unwrap();
    let tokens = lexer.tokenize("drop#keep_me;").unwrap();
    assert_eq!(tokens, vec![Token::new("word", "keep me")]);
}

#[test]
fn test_when_and_any() {
    let lexer = LexerBuilder::new()
        .state("s")
        .rule(when(|ch| ch.is_ascii_uppercase()), [accept(), emit("upper")])
        .rule(any(), [accept(), emit("other")])
        .build()
        .unwrap();
    let kinds: Vec<String> = lexer
        .tokenize("aB1")
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect();
    assert_eq!(kinds, ["other", "upper", "other"]);
}

#[test]
fn test_unknown_target_fails_at_run_time() {
    let lexer = LexerBuilder::new()
        .state("s")
        .rule('x', [transition("missing")])
        .fallback([accept()])
        .build()
        .unwrap();

    assert_eq!(
        lexer.definition().check_targets(),
        Err(BuildError::UndefinedTarget {
            state: "s".into(),
            target: "missing".into(),
        })
    );

    let mut run = lexer.lex("abxyz");
    let err = run.next().unwrap().unwrap_err();
    assert_eq!(err.offset(), 3);
    assert_eq!(err.item(), Some('y'));
    assert!(err.message().contains("missing"));
}

#[test]
fn test_definition_is_reusable() {
    let lexer = quotes();
    let first = lexer.tokenize("'a'").unwrap();
    let second = lexer.tokenize("'a'").unwrap();
    assert_eq!(first, second);
}

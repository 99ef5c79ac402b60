use anyhow::Result;
use scheme_tree::node::Node;
use scheme_tree::parser::Parser;
use scheme_tree::read::{read_all, read_str, write_all};
use scheme_tree::settings::DEFAULT_SETTINGS;
use scheme_tree::token::{Token, Tokens};

const INPUT: &[u8] = include_bytes!("t-input.scm");
const EXPECTED: &[u8] = include_bytes!("t-expected.scm");

#[test]
fn t1() -> Result<()> {
    let (vals, diagnostics) = read_all(INPUT, &DEFAULT_SETTINGS);
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    let mut out = Vec::<u8>::new();
    write_all(&mut out, &vals)?;
    assert_eq!(String::from_utf8(out)?, std::str::from_utf8(EXPECTED)?);
    Ok(())
}

#[test]
fn printing_is_idempotent() -> Result<()> {
    let (vals, _) = read_all(EXPECTED, &DEFAULT_SETTINGS);
    let mut out = Vec::<u8>::new();
    write_all(&mut out, &vals)?;
    assert_eq!(out, EXPECTED);
    Ok(())
}

#[test]
fn malformed_input_recovers() -> Result<()> {
    let (vals, diagnostics) = read_str(") 5 (. x) (1 . 2 3) 'ok", &DEFAULT_SETTINGS);
    let shown: Vec<String> = vals.iter().map(|v| v.to_string()).collect();
    assert_eq!(shown, ["5", "x", "(1 . 2)", "'ok"]);
    let messages: Vec<String> = diagnostics.iter().map(|d| d.to_string()).collect();
    assert_eq!(messages, [
        "illegal right parenthesis in expression @1.0",
        "illegal dot in expression @1.5",
        "illegal right parenthesis in expression @1.8",
        "expected ')' after dotted tail, got '3' @1.17",
        "illegal right parenthesis in expression @1.18",
    ]);
    Ok(())
}

#[test]
fn tokens_without_text() {
    // (a (b c) d)
    let tokens = vec![
        Token::LParen, Token::ident("a"),
        Token::LParen, Token::ident("b"), Token::ident("c"), Token::RParen,
        Token::ident("d"), Token::RParen,
    ];
    let mut parser = Parser::new(Tokens::new(tokens));
    let tree = parser.parse_expression();
    assert_eq!(tree.as_ref().map(|t| t.dump().to_string()).as_deref(), Some(
        "(cons (ident \"a\") (cons (ident \"b\") (ident \"c\") (nil)) \
         (ident \"d\") (nil))"));
    assert_eq!(tree, Some(Node::list([
        Node::ident("a"),
        Node::list([Node::ident("b"), Node::ident("c")]),
        Node::ident("d"),
    ])));
    assert_eq!(parser.parse_expression(), None);
}

#[test]
fn odd_identifiers_read_back() {
    let tokens = vec![
        Token::LParen, Token::ident("a b"), Token::ident("."), Token::ident("12"),
        Token::ident("x|y"), Token::ident(""), Token::Dot,
        Token::ident("("), Token::RParen,
    ];
    let tree = Parser::new(Tokens::new(tokens)).parse_expression();
    let tree = tree.expect("a dotted list");
    let text = tree.to_string();
    assert_eq!(text, r"(|a b| |.| |12| |x\|y| || . |(|)");
    let (vals, diagnostics) = read_str(&text, &DEFAULT_SETTINGS);
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    assert_eq!(vals, vec![tree]);
}

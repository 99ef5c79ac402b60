// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tokens as consumed by the [parser](../parser/index.html), and the
//! `TokenSource` trait the parser pulls them through. End of input
//! is not a token: token sources return `None` instead.

use crate::pos::Pos;
use kstring::KString;
use num::BigInt;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LParen,
    RParen,
    Dot,
    Quote,
    True,
    False,
    Integer(BigInt),
    String(KString),
    Ident(KString),
}

impl Token {
    /// Easily create an identifier token
    pub fn ident(s: &str) -> Token {
        Token::Ident(KString::from_ref(s))
    }

    /// Easily create a string token
    pub fn string(s: &str) -> Token {
        Token::String(KString::from_ref(s))
    }

    /// Easily create an integer token
    pub fn int(n: i64) -> Token {
        Token::Integer(BigInt::from(n))
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Token::LParen => f.write_char('('),
            Token::RParen => f.write_char(')'),
            Token::Dot => f.write_char('.'),
            Token::Quote => f.write_char('\''),
            Token::True => f.write_str("#t"),
            Token::False => f.write_str("#f"),
            Token::Integer(n) => f.write_fmt(format_args!("{}", n)),
            Token::String(s) => f.write_fmt(format_args!("{:?}", s.as_str())),
            Token::Ident(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithPos(pub Token, pub Pos);

impl Token {
    pub fn at(self, p: Pos) -> TokenWithPos {
        TokenWithPos(self, p)
    }
}

/// Forward-only supply of tokens. A token handed out is consumed for
/// good; there is no pushback.
pub trait TokenSource {
    /// The next token, or `None` at end of input.
    fn next_token(&mut self) -> Option<TokenWithPos>;
}

impl<S: TokenSource + ?Sized> TokenSource for &mut S {
    fn next_token(&mut self) -> Option<TokenWithPos> {
        (**self).next_token()
    }
}

/// Turns a plain sequence of tokens into a `TokenSource`. Positions
/// are the token indices.
#[derive(Debug)]
pub struct Tokens<I> {
    inner: std::iter::Fuse<I>,
    index: u32,
}

impl<I: Iterator<Item = Token>> Tokens<I> {
    pub fn new(tokens: impl IntoIterator<Item = Token, IntoIter = I>) -> Self {
        Tokens { inner: tokens.into_iter().fuse(), index: 0 }
    }
}

impl<I: Iterator<Item = Token>> TokenSource for Tokens<I> {
    fn next_token(&mut self) -> Option<TokenWithPos> {
        let t = self.inner.next()?;
        let pos = Pos { line: 0, col: self.index };
        self.index += 1;
        Some(t.at(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_numbered_by_index() {
        let mut ts = Tokens::new(vec![Token::LParen, Token::ident("a"), Token::RParen]);
        assert_eq!(ts.next_token(), Some(Token::LParen.at(Pos { line: 0, col: 0 })));
        assert_eq!(ts.next_token(), Some(Token::ident("a").at(Pos { line: 0, col: 1 })));
        assert_eq!(ts.next_token(), Some(Token::RParen.at(Pos { line: 0, col: 2 })));
        assert_eq!(ts.next_token(), None);
        assert_eq!(ts.next_token(), None);
    }

    #[test]
    fn display() {
        let shown: Vec<String> = [
            Token::LParen, Token::Quote, Token::True, Token::False,
            Token::int(-42), Token::string("a\"b"), Token::ident("foo"),
            Token::Dot, Token::RParen,
        ].iter().map(|t| t.to_string()).collect();
        assert_eq!(shown, ["(", "'", "#t", "#f", "-42", "\"a\\\"b\"", "foo", ".", ")"]);
    }
}

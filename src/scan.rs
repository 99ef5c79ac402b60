// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Translating a character stream to a token stream. The parser does
//! not depend on this module, it only needs a
//! [TokenSource](../token/trait.TokenSource.html); `Scanner` is the
//! one used for reading text.

//! Scan errors other than I/O errors are not fatal: the offending
//! input is skipped and scanning continues.

use crate::pos::Pos;
use crate::settings::{Format, R7RS_FORMAT};
use crate::token::{Token, TokenSource, TokenWithPos};
use num::BigInt;
use kstring::KString;
use thiserror::Error;
use genawaiter::rc::Gen;
use log::warn;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error ({0}) after")]
    IoError(anyhow::Error),
    #[error("unexpected EOF in string starting")]
    UnexpectedEofInString,
    #[error("unexpected EOF in |symbol| starting")]
    UnexpectedEofInSymbol,
    #[error("invalid escaped character '{0}'")]
    InvalidEscapedChar(char),
    #[error("invalid '#' token")]
    InvalidHashToken,
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
}

#[derive(Error, Debug)]
#[error("{err} {pos}")]
pub struct ScanErrorWithPos {
    pub err: ScanError,
    pub pos: Pos
}

impl ScanError {
    fn at(self, p: Pos) -> ScanErrorWithPos {
        ScanErrorWithPos {
            err: self,
            pos: p
        }
    }
}

fn char2token(c: char) -> Option<Token> {
    match c {
        '(' => Some(Token::LParen),
        ')' => Some(Token::RParen),
        '\'' => Some(Token::Quote),
        _ => None
    }
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace()
        || char2token(c).is_some()
        || c == '"'
        || c == '|'
        || c == ';'
}

// Characters without a meaning in this dialect; `[` `]` `{` `}`
// `` ` `` `,` and a stray backslash.
fn is_unsupported(c: char) -> bool {
    matches!(c, '[' | ']' | '{' | '}' | '`' | ',' | '\\')
}

fn is_word_char(c: char) -> bool {
    ! is_delimiter(c) && ! is_unsupported(c)
}

type Chars<'a> = dyn Iterator<Item = anyhow::Result<(char, Pos)>> + 'a;

// Returns the first rejected char, or None at EOF. With
// `first`, out starts with it.
fn read_while(
    first: Option<char>,
    startpos: Pos,
    cs: &mut Chars<'_>,
    accepted: fn(char) -> bool,
    out: &mut String,
) -> Result<Option<(char, Pos)>, ScanErrorWithPos> {
    out.clear();
    if let Some(c) = first {
        out.push(c);
    }
    let mut lastpos = startpos;
    loop {
        match cs.next() {
            None => return Ok(None),
            Some(Err(e)) => return Err(ScanError::IoError(e).at(lastpos)),
            Some(Ok((c, pos))) => {
                if accepted(c) {
                    out.push(c);
                    lastpos = pos;
                } else {
                    return Ok(Some((c, pos)))
                }
            }
        }
    }
}

// Reads the rest of a string or |symbol| after the opening `quote`
// into out. Invalid escapes are pushed to `problems`, the escaped char
// is kept.
fn read_delimited(
    quote: char,
    startpos: Pos,
    cs: &mut Chars<'_>,
    out: &mut String,
    problems: &mut Vec<ScanErrorWithPos>,
) -> Result<(), ScanErrorWithPos> {
    out.clear();
    let mut escaped = false;
    let mut lastpos = startpos;
    loop {
        let (c, pos) = match cs.next() {
            None => {
                let e = if quote == '"' {
                    ScanError::UnexpectedEofInString
                } else {
                    ScanError::UnexpectedEofInSymbol
                };
                return Err(e.at(startpos))
            }
            Some(Err(e)) => return Err(ScanError::IoError(e).at(lastpos)),
            Some(Ok(cp)) => cp,
        };
        lastpos = pos;
        if escaped {
            let replacement = match c {
                'a' => '\x07',
                't' => '\t',
                'n' => '\n',
                'r' => '\r',
                '0' => '\0',
                '\\' => '\\',
                c if c == quote => c,
                _ => {
                    problems.push(ScanError::InvalidEscapedChar(c).at(pos));
                    c
                }
            };
            out.push(replacement);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return Ok(());
        } else {
            out.push(c);
        }
    }
}

// `s` is what followed '#', letters only.
fn hash_token(s: &str, format: &Format) -> Option<Token> {
    match s.to_ascii_lowercase().as_str() {
        "t" => Some(Token::True),
        "f" => Some(Token::False),
        "true" if format.accept_long_false_true => Some(Token::True),
        "false" if format.accept_long_false_true => Some(Token::False),
        _ => None
    }
}

fn read_integer(s: &str, format: &Format) -> Option<BigInt> {
    let (is_neg, digits) =
        match s.strip_prefix('-') {
            Some(rest) if format.signed_integers => (true, rest),
            Some(_) => return None,
            None => match s.strip_prefix('+') {
                Some(rest) if format.signed_integers => (false, rest),
                Some(_) => return None,
                None => (false, s)
            }
        };
    if digits.is_empty() || ! digits.bytes().all(|b| b.is_ascii_digit()) {
        return None
    }
    let n: BigInt = digits.parse().ok()?;
    Some(if is_neg { -n } else { n })
}

/// Whether `s` printed as is reads back as the identifier `s`, with
/// any format; if not it has to be put in bars.
pub fn is_plain_identifier(s: &str) -> bool {
    ! s.is_empty()
        && s != "."
        && ! s.starts_with('#')
        && s.chars().all(is_word_char)
        && read_integer(s, &R7RS_FORMAT).is_none()
}

// A run of word characters: the dot, an integer or an identifier.
fn word_token(s: &str, format: &Format) -> Token {
    if s == "." {
        Token::Dot
    } else if let Some(n) = read_integer(s, format) {
        Token::Integer(n)
    } else if format.fold_case {
        Token::Ident(KString::from_string(s.to_lowercase()))
    } else {
        Token::Ident(KString::from_ref(s))
    }
}

pub fn scan<'s>(
    cs: impl Iterator<Item = anyhow::Result<(char, Pos)>> + 's,
    format: &'s Format,
)
    -> impl Iterator<Item = Result<TokenWithPos, ScanErrorWithPos>> + 's
{
    Gen::new(|co| async move {
        // The char source must not be pulled again after EOF.
        let mut cs = cs.fuse();
        let mut tmp = String::new();
        let mut problems: Vec<ScanErrorWithPos> = Vec::new();
        let mut maybe_next_c_pos: Option<(char, Pos)> = None;
        let mut lastpos = Pos::START;
        loop {
            let (c, pos) =
                if let Some(cp) = maybe_next_c_pos.take() {
                    cp
                } else {
                    match cs.next() {
                        None => return,
                        Some(Err(e)) => {
                            co.yield_(Err(ScanError::IoError(e).at(lastpos))).await;
                            return;
                        }
                        Some(Ok(cp)) => cp,
                    }
                };
            lastpos = pos;

            if c.is_whitespace() {
                continue;
            }
            if let Some(t) = char2token(c) {
                co.yield_(Ok(t.at(pos))).await;
            } else if c == ';' {
                // line comment; the newline is whitespace
                match read_while(None, pos, &mut cs, |c| c != '\n', &mut tmp) {
                    Err(e) => {
                        co.yield_(Err(e)).await;
                        return;
                    }
                    Ok(mcp) => maybe_next_c_pos = mcp,
                }
            } else if c == '"' || c == '|' {
                let r = read_delimited(c, pos, &mut cs, &mut tmp, &mut problems);
                for p in std::mem::take(&mut problems) {
                    co.yield_(Err(p)).await;
                }
                match r {
                    Err(e) => {
                        co.yield_(Err(e)).await;
                        return;
                    }
                    Ok(()) => {
                        let s = KString::from_ref(&tmp);
                        let t = if c == '"' { Token::String(s) } else { Token::Ident(s) };
                        co.yield_(Ok(t.at(pos))).await;
                    }
                }
            } else if c == '#' {
                match read_while(None, pos, &mut cs, |c| c.is_ascii_alphabetic(), &mut tmp) {
                    Err(e) => {
                        co.yield_(Err(e)).await;
                        return;
                    }
                    Ok(mcp) => {
                        maybe_next_c_pos = mcp;
                        let r = match hash_token(&tmp, format) {
                            Some(t) => Ok(t.at(pos)),
                            None => Err(ScanError::InvalidHashToken.at(pos)),
                        };
                        co.yield_(r).await;
                    }
                }
            } else if is_word_char(c) {
                match read_while(Some(c), pos, &mut cs, is_word_char, &mut tmp) {
                    Err(e) => {
                        co.yield_(Err(e)).await;
                        return;
                    }
                    Ok(mcp) => {
                        maybe_next_c_pos = mcp;
                        co.yield_(Ok(word_token(&tmp, format).at(pos))).await;
                    }
                }
            } else {
                co.yield_(Err(ScanError::UnexpectedChar(c).at(pos))).await;
            }
        }
    }).into_iter()
}

/// `TokenSource` over [scan](fn.scan.html). Scan errors are logged,
/// kept in `errors()`, and left out of the token stream.
pub struct Scanner<'s> {
    tokens: Box<dyn Iterator<Item = Result<TokenWithPos, ScanErrorWithPos>> + 's>,
    errors: Vec<ScanErrorWithPos>,
}

impl<'s> Scanner<'s> {
    pub fn new(
        cs: impl Iterator<Item = anyhow::Result<(char, Pos)>> + 's,
        format: &'s Format,
    ) -> Scanner<'s> {
        Scanner {
            tokens: Box::new(scan(cs, format).fuse()),
            errors: Vec::new(),
        }
    }

    pub fn errors(&self) -> &[ScanErrorWithPos] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<ScanErrorWithPos> {
        std::mem::take(&mut self.errors)
    }
}

impl std::fmt::Debug for Scanner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        f.debug_struct("Scanner")
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl TokenSource for Scanner<'_> {
    fn next_token(&mut self) -> Option<TokenWithPos> {
        loop {
            match self.tokens.next()? {
                Ok(t) => return Some(t),
                Err(e) => {
                    warn!("scan error: {}", e);
                    self.errors.push(e);
                }
            }
        }
    }
}

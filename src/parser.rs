// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Recursive descent parser from tokens to [Node](../node/enum.Node.html)
//! trees, for the grammar
//!
//! ```text
//!   exp  ->  ( rest  |  #f  |  #t  |  ' exp
//!         |  integer  |  string  |  identifier
//!   rest ->  )  |  exp+ [. exp] )
//! ```
//!
//! `parse_expression` expects that the first token of an expression
//! has not been pulled yet; the `_with` variants take that token from
//! the caller instead, since the token source has no pushback.
//!
//! Syntax errors never abort parsing: they are logged and collected
//! (see `diagnostics`), the offending token is dropped and parsing
//! goes on with a fresh expression. End of input is `None`, also
//! when it is hit within an unfinished expression.
//!
//! Nesting is limited by `Modes::max_depth`: a list or quote nested
//! deeper is reported as `NestingTooDeep`, its tokens are skipped
//! without recursing and it is read as `()`.

use crate::node::Node;
use crate::pos::Pos;
use crate::settings::{Modes, DEFAULT_MODES};
use crate::token::{Token, TokenSource, TokenWithPos};
use log::{debug, trace, warn};
use thiserror::Error;

fn describe(t: &Option<Token>) -> String {
    match t {
        Some(t) => format!("'{}'", t),
        None => "end of input".into(),
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    #[error("illegal dot in expression")]
    IllegalDot,
    #[error("illegal right parenthesis in expression")]
    IllegalRightParen,
    #[error("expected ')' after dotted tail, got {}", describe(.0))]
    ExpectedCloseAfterDottedTail(Option<Token>),
    #[error("nesting too deep")]
    NestingTooDeep,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{err} {pos}")]
pub struct SyntaxErrorWithPos {
    pub err: SyntaxError,
    pub pos: Pos
}

impl SyntaxError {
    fn at(self, p: Pos) -> SyntaxErrorWithPos {
        SyntaxErrorWithPos {
            err: self,
            pos: p
        }
    }
}

#[derive(Debug)]
pub struct Parser<S> {
    source: S,
    modes: Modes,
    diagnostics: Vec<SyntaxErrorWithPos>,
    lastpos: Pos,
    depth: u32,
}

impl<S: TokenSource> Parser<S> {
    pub fn new(source: S) -> Parser<S> {
        Parser::with_modes(source, DEFAULT_MODES)
    }

    pub fn with_modes(source: S, modes: Modes) -> Parser<S> {
        Parser {
            source,
            modes,
            diagnostics: Vec::new(),
            lastpos: Pos::START,
            depth: 0,
        }
    }

    /// Syntax errors reported so far, oldest first.
    pub fn diagnostics(&self) -> &[SyntaxErrorWithPos] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<SyntaxErrorWithPos> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn into_source(self) -> S {
        self.source
    }

    fn pull(&mut self) -> Option<TokenWithPos> {
        let t = self.source.next_token();
        trace!("pulled {:?}", t);
        if let Some(TokenWithPos(_, pos)) = &t {
            self.lastpos = *pos;
        }
        t
    }

    fn report(&mut self, err: SyntaxError, pos: Pos) {
        let e = err.at(pos);
        warn!("syntax error: {}", e);
        self.diagnostics.push(e);
    }

    fn too_deep(&mut self, pos: Pos) -> bool {
        if self.depth < self.modes.max_depth {
            return false
        }
        self.report(SyntaxError::NestingTooDeep, pos);
        true
    }

    // Drop the expression starting with `first` by counting parens,
    // and stand in `()` for it. `None` at end of input.
    fn skip_expression(&mut self, first: TokenWithPos) -> Option<Node> {
        let mut open: usize = 0;
        let mut current = Some(first);
        loop {
            let TokenWithPos(t, _) = current?;
            match t {
                Token::LParen => open += 1,
                Token::RParen => open = open.saturating_sub(1),
                Token::Quote => {
                    current = self.pull();
                    continue;
                }
                _ => {}
            }
            if open == 0 {
                return Some(Node::Nil)
            }
            current = self.pull();
        }
    }

    /// Parse the next top-level expression; `None` at end of input.
    pub fn parse_expression(&mut self) -> Option<Node> {
        let t = self.pull();
        self.parse_expression_with(t)
    }

    /// Parse an expression whose first token, `current`, was already
    /// pulled by the caller.
    pub fn parse_expression_with(&mut self, current: Option<TokenWithPos>)
                                 -> Option<Node> {
        let mut current = current;
        loop {
            let TokenWithPos(token, pos) = current?;
            match token {
                Token::LParen => {
                    if self.too_deep(pos) {
                        return self.skip_expression(Token::LParen.at(pos))
                    }
                    let next = self.pull();
                    if let Some(TokenWithPos(Token::Dot, dotpos)) = next {
                        // The open list is abandoned.
                        self.report(SyntaxError::IllegalDot, dotpos);
                        current = self.pull();
                    } else {
                        self.depth += 1;
                        let list = self.parse_list_tail_with(next);
                        self.depth -= 1;
                        return list;
                    }
                }
                Token::True => return Some(Node::BoolLit(true)),
                Token::False => return Some(Node::BoolLit(false)),
                Token::Quote => {
                    if self.too_deep(pos) {
                        return self.skip_expression(Token::Quote.at(pos))
                    }
                    self.depth += 1;
                    let quoted = self.parse_expression();
                    self.depth -= 1;
                    return Some(Node::quote(quoted?));
                }
                Token::Integer(n) => return Some(Node::IntLit(n)),
                Token::String(s) => return Some(Node::StringLit(s)),
                Token::Ident(s) => return Some(Node::Ident(s)),
                Token::RParen => {
                    self.report(SyntaxError::IllegalRightParen, pos);
                    current = self.pull();
                }
                Token::Dot => {
                    self.report(SyntaxError::IllegalDot, pos);
                    current = self.pull();
                }
            }
        }
    }

    /// Parse what follows an opening paren or a list element: the
    /// remaining elements, the optional dotted tail and the closing
    /// paren.
    pub fn parse_list_tail(&mut self) -> Option<Node> {
        let t = self.pull();
        self.parse_list_tail_with(t)
    }

    /// As `parse_list_tail`, with the first token already pulled.
    /// Looks one more token ahead to tell the last element, dotted
    /// tails and nested lists apart. Elements are collected in a loop
    /// so that only nesting, not list length, costs stack.
    pub fn parse_list_tail_with(&mut self, current: Option<TokenWithPos>)
                                -> Option<Node> {
        let mut items = Vec::new();
        let mut current = current;
        let tail = loop {
            let TokenWithPos(cur, curpos) = match current {
                Some(t) => t,
                None => {
                    debug!("end of input within a list");
                    return None;
                }
            };
            match cur {
                Token::RParen => break Node::Nil,
                Token::Quote => {
                    // The quoted expression starts right after; no
                    // lookahead must be taken from it.
                    items.push(self.parse_expression_with(Some(cur.at(curpos)))?);
                    current = self.pull();
                    continue;
                }
                Token::LParen if self.too_deep(curpos) => {
                    items.push(self.skip_expression(Token::LParen.at(curpos))?);
                    current = self.pull();
                    continue;
                }
                _ => {}
            }
            let next = self.pull();
            if cur == Token::LParen {
                let TokenWithPos(nt, npos) = match next {
                    Some(t) => t,
                    None => {
                        debug!("end of input within a list");
                        return None;
                    }
                };
                match nt {
                    Token::RParen => {
                        items.push(Node::Nil);
                        current = self.pull();
                    }
                    Token::Dot => {
                        self.report(SyntaxError::IllegalDot, npos);
                        break self.parse_expression()?;
                    }
                    _ => {
                        self.depth += 1;
                        let nested = self.parse_nested_list(nt.at(npos));
                        self.depth -= 1;
                        items.push(nested?);
                        current = self.pull();
                    }
                }
            } else if matches!(next, Some(TokenWithPos(Token::RParen, _))) {
                items.push(self.parse_expression_with(Some(cur.at(curpos)))?);
                break Node::Nil;
            } else if cur == Token::Dot {
                let cdr = self.parse_expression_with(next)?;
                self.skip_close();
                break cdr;
            } else if matches!(next, Some(TokenWithPos(Token::Dot, _))) {
                items.push(self.parse_expression_with(Some(cur.at(curpos)))?);
                let cdr = self.parse_expression()?;
                self.skip_close();
                break cdr;
            } else {
                items.push(self.parse_expression_with(Some(cur.at(curpos)))?);
                items.push(self.parse_expression_with(next)?);
                current = self.pull();
            }
        };
        Some(Node::list_with_tail(items, tail))
    }

    // A list whose '(' and first token were pulled already.
    fn parse_nested_list(&mut self, first: TokenWithPos) -> Option<Node> {
        let car = self.parse_expression_with(Some(first))?;
        let cdr = self.parse_list_tail()?;
        Some(Node::cons(car, cdr))
    }

    // Drop the token after a dotted tail, which should be ')'.
    fn skip_close(&mut self) {
        let t = self.pull();
        if self.modes.strict_dotted_close {
            match t {
                Some(TokenWithPos(Token::RParen, _)) => {}
                Some(TokenWithPos(t, pos)) =>
                    self.report(SyntaxError::ExpectedCloseAfterDottedTail(Some(t)), pos),
                None => {
                    let pos = self.lastpos;
                    self.report(SyntaxError::ExpectedCloseAfterDottedTail(None), pos)
                }
            }
        }
    }
}

impl<S: TokenSource> Iterator for Parser<S> {
    type Item = Node;
    fn next(&mut self) -> Option<Node> {
        self.parse_expression()
    }
}

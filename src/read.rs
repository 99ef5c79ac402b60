// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reading all expressions from text, and writing them back.

use crate::chars::{buffered_chars, str_chars};
use crate::node::Node;
use crate::parser::{Parser, SyntaxErrorWithPos};
use crate::pos::Pos;
use crate::scan::{ScanErrorWithPos, Scanner};
use crate::settings::Settings;
use std::io::{Read, Write};
use thiserror::Error;

/// Anything reported while reading; none of it stops reading.
#[derive(Error, Debug)]
pub enum Diagnostic {
    #[error("{0}")]
    Scan(ScanErrorWithPos),
    #[error("{0}")]
    Syntax(SyntaxErrorWithPos),
}

impl Diagnostic {
    pub fn pos(&self) -> Pos {
        match self {
            Diagnostic::Scan(e) => e.pos,
            Diagnostic::Syntax(e) => e.pos,
        }
    }
}

fn read_chars<'s>(
    cs: impl Iterator<Item = anyhow::Result<(char, Pos)>> + 's,
    settings: &'s Settings,
) -> (Vec<Node>, Vec<Diagnostic>)
{
    let mut parser = Parser::with_modes(Scanner::new(cs, settings.format),
                                        *settings.modes);
    let nodes: Vec<Node> = parser.by_ref().collect();
    let syntax_errors = parser.take_diagnostics();
    let scan_errors = parser.into_source().take_errors();
    let mut diagnostics: Vec<Diagnostic> =
        scan_errors.into_iter().map(Diagnostic::Scan)
        .chain(syntax_errors.into_iter().map(Diagnostic::Syntax))
        .collect();
    // stable: at equal positions scan errors come first
    diagnostics.sort_by_key(|d| d.pos());
    (nodes, diagnostics)
}

/// Parse all expressions in `fh`, and return them together with the
/// diagnostics from scanning and parsing, ordered by position.
pub fn read_all(
    fh: impl Read,
    settings: &Settings,
) -> (Vec<Node>, Vec<Diagnostic>)
{
    read_chars(buffered_chars(fh), settings)
}

/// Same as `read_all`, from a string.
pub fn read_str(
    s: &str,
    settings: &Settings,
) -> (Vec<Node>, Vec<Diagnostic>)
{
    read_chars(str_chars(s), settings)
}

/// Print each value on a line of its own.
pub fn write_all<'t>(
    out: impl Write,
    vals: impl IntoIterator<Item = &'t Node>
) -> Result<(), std::io::Error> {
    let mut out = out; // for `File`
    for v in vals.into_iter() {
        writeln!(out, "{}", v)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{DEFAULT_SETTINGS, R5RS_FORMAT, DEFAULT_MODES};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn reprint(s: &str) -> String {
        let (nodes, _) = read_str(s, &DEFAULT_SETTINGS);
        let mut out = Vec::new();
        write_all(&mut out, &nodes).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn reads_and_writes() {
        init_logger();
        assert_eq!(reprint("(a   b\n c)  'x ()  (1 . 2) (1 2 . 3)"),
                   "(a b c)\n'x\n()\n(1 . 2)\n(1 2 . 3)\n");
    }

    #[test]
    fn idempotent() {
        init_logger();
        let once = reprint(
            "(define (f x) (cons 'a '(b . c)))  ('a 'b) (a . 'b) \"s\\\"t\" #t #f -3 (() ())");
        assert_eq!(reprint(&once), once);
    }

    #[test]
    fn stray_paren() {
        init_logger();
        let (nodes, diags) = read_str(") 5", &DEFAULT_SETTINGS);
        assert_eq!(nodes, vec![Node::int(5)]);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].to_string(), "illegal right parenthesis in expression @1.0");
        assert!(matches!(diags[0], Diagnostic::Syntax(_)));
    }

    #[test]
    fn empty() {
        let (nodes, diags) = read_str("", &DEFAULT_SETTINGS);
        assert!(nodes.is_empty());
        assert!(diags.is_empty());
        let (nodes, diags) = read_all("  ; nothing\n".as_bytes(), &DEFAULT_SETTINGS);
        assert!(nodes.is_empty());
        assert!(diags.is_empty());
    }

    #[test]
    fn diagnostics_are_ordered_by_position() {
        init_logger();
        let (nodes, diags) = read_str("(a .)\n[b] )", &DEFAULT_SETTINGS);
        // the `)` after the dot is dropped, `b` becomes the tail and
        // the last `)` closes the pair
        assert_eq!(nodes, vec![Node::cons(Node::ident("a"), Node::ident("b"))]);
        let shown: Vec<String> = diags.iter().map(|d| d.to_string()).collect();
        assert_eq!(shown, [
            "illegal right parenthesis in expression @1.4",
            "unexpected character '[' @2.0",
            "unexpected character ']' @2.2",
        ]);
    }

    #[test]
    fn settings_reach_scanner_and_parser() {
        let settings = Settings { format: &R5RS_FORMAT, modes: &DEFAULT_MODES };
        let (nodes, diags) = read_str("(Foo . BAR baz)", &settings);
        assert_eq!(nodes, vec![Node::cons(Node::ident("foo"), Node::ident("bar"))]);
        assert_eq!(diags[0].to_string(), "expected ')' after dotted tail, got 'baz' @1.11");
    }
}

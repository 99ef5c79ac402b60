// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The parse tree. Lists are chains of `Cons` pairs ending in `Nil`
//! (proper) or in some atom (improper). A quoted expression `'x` is
//! the pair `(' . x)`, i.e. `Cons(Ident("'"), x)`.

//! Printing is done via `print`, which knows whether a node sits in
//! the cdr of a pair; `Display` prints a node at the top level.

use crate::scan::is_plain_identifier;
use crate::special::SpecialForm;
use kstring::KString;
use num::BigInt;
use std::fmt::Write;

/// The synthetic identifier in car position marking a quoted form.
pub const QUOTE_MARKER: &str = "'";

pub enum Node {
    Nil,
    BoolLit(bool),
    IntLit(BigInt),
    StringLit(KString),
    Ident(KString),
    Cons(Box<Node>, Box<Node>),
}

// Drop along the cdr iteratively, long lists would otherwise use
// one stack frame per element.
impl Drop for Node {
    fn drop(&mut self) {
        let mut rest = match self {
            Node::Cons(_, cdr) => std::mem::replace(&mut **cdr, Node::Nil),
            _ => return,
        };
        loop {
            let next = match &mut rest {
                Node::Cons(_, cdr) => std::mem::replace(&mut **cdr, Node::Nil),
                _ => break,
            };
            rest = next;
        }
    }
}

// Comparison and `Debug` walk the cdr chain in a loop for the same
// reason; only the car recurses.
impl PartialEq for Node {
    fn eq(&self, other: &Node) -> bool {
        let (mut a, mut b) = (self, other);
        loop {
            match (a, b) {
                (Node::Cons(acar, acdr), Node::Cons(bcar, bcdr)) => {
                    if acar != bcar {
                        return false
                    }
                    a = &**acdr;
                    b = &**bcdr;
                }
                (Node::Nil, Node::Nil) => return true,
                (Node::BoolLit(x), Node::BoolLit(y)) => return x == y,
                (Node::IntLit(x), Node::IntLit(y)) => return x == y,
                (Node::StringLit(x), Node::StringLit(y)) => return x == y,
                (Node::Ident(x), Node::Ident(y)) => return x == y,
                _ => return false,
            }
        }
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        let mut node = self;
        let mut open = 0;
        while let Node::Cons(car, cdr) = node {
            f.write_str("Cons(")?;
            std::fmt::Debug::fmt(&**car, f)?;
            f.write_str(", ")?;
            open += 1;
            node = &**cdr;
        }
        match node {
            Node::Nil => f.write_str("Nil")?,
            Node::BoolLit(b) => f.debug_tuple("BoolLit").field(b).finish()?,
            Node::IntLit(n) => f.debug_tuple("IntLit").field(n).finish()?,
            Node::StringLit(s) => f.debug_tuple("StringLit").field(s).finish()?,
            Node::Ident(s) => f.debug_tuple("Ident").field(s).finish()?,
            Node::Cons(..) => {}
        }
        for _ in 0..open {
            f.write_char(')')?;
        }
        Ok(())
    }
}

impl Node {
    pub fn cons(car: Node, cdr: Node) -> Node {
        Node::Cons(Box::new(car), Box::new(cdr))
    }

    /// Easily create an identifier
    pub fn ident(s: &str) -> Node {
        Node::Ident(KString::from_ref(s))
    }

    /// Easily create a string literal
    pub fn string(s: &str) -> Node {
        Node::StringLit(KString::from_ref(s))
    }

    /// Easily create an integer literal
    pub fn int(n: i64) -> Node {
        Node::IntLit(BigInt::from(n))
    }

    /// `'x`, represented as `Cons(Ident("'"), x)`.
    pub fn quote(x: Node) -> Node {
        Node::cons(Node::ident(QUOTE_MARKER), x)
    }

    /// Build a proper list from the given items.
    pub fn list(items: impl IntoIterator<Item = Node>) -> Node {
        Node::list_with_tail(items, Node::Nil)
    }

    /// Build a list from the given items ending in `tail`; improper
    /// unless `tail` is `Nil` or itself a proper list.
    pub fn list_with_tail(items: impl IntoIterator<Item = Node>, tail: Node) -> Node {
        let items: Vec<Node> = items.into_iter().collect();
        items.into_iter().rev().fold(tail, |cdr, car| Node::cons(car, cdr))
    }

    pub fn car(&self) -> Option<&Node> {
        match self {
            Node::Cons(car, _) => Some(&**car),
            _ => None,
        }
    }

    pub fn cdr(&self) -> Option<&Node> {
        match self {
            Node::Cons(_, cdr) => Some(&**cdr),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Node::Nil)
    }

    /// True for `Nil` and for Cons chains ending in `Nil`.
    pub fn is_proper_list(&self) -> bool {
        let mut node = self;
        loop {
            match node {
                Node::Nil => return true,
                Node::Cons(_, cdr) => node = &**cdr,
                _ => return false,
            }
        }
    }

    /// The special printing form for this node, if its car is an
    /// identifier recognized as one.
    pub fn special_form(&self) -> Option<SpecialForm> {
        match self {
            Node::Cons(car, _) => match &**car {
                Node::Ident(name) => SpecialForm::try_from(name.as_str()).ok(),
                _ => None,
            },
            _ => None,
        }
    }

    /// Print the node, with `indent` leading spaces unless it sits in
    /// cdr position. The pair holding a node in its cdr has written
    /// the separator before it and writes the closing paren, so in cdr
    /// position `Nil` prints nothing, a pair prints just its elements
    /// and any other node its plain text.
    pub fn print(&self, out: &mut dyn Write, indent: usize, in_cdr: bool)
                 -> Result<(), std::fmt::Error> {
        match self {
            Node::Cons(..) => {
                if let Some(special) = self.special_form() {
                    return special.print(self, out, indent, in_cdr);
                }
                if in_cdr {
                    return self.print_elements(out);
                }
                pad(out, indent)?;
                out.write_char('(')?;
                self.print_elements(out)?;
                out.write_char(')')
            }
            Node::Nil => {
                if in_cdr {
                    return Ok(())
                }
                pad(out, indent)?;
                out.write_str("()")
            }
            _ => {
                if !in_cdr {
                    pad(out, indent)?;
                }
                self.print_atom(out)
            }
        }
    }

    // The cars along the cdr chain separated by spaces, then
    // ` . tail` unless the chain ends in `Nil`. No parens.
    fn print_elements(&self, out: &mut dyn Write) -> Result<(), std::fmt::Error> {
        let mut node = self;
        while let Node::Cons(car, cdr) = node {
            car.print(out, 0, false)?;
            match &**cdr {
                Node::Nil => return Ok(()),
                Node::Cons(..) if cdr.special_form().is_none() =>
                    out.write_char(' ')?,
                tail => {
                    out.write_str(" . ")?;
                    return tail.print(out, 0, true)
                }
            }
            node = &**cdr;
        }
        Ok(())
    }

    fn print_atom(&self, out: &mut dyn Write) -> Result<(), std::fmt::Error> {
        match self {
            Node::BoolLit(b) => out.write_str(if *b { "#t" } else { "#f" }),
            Node::IntLit(n) => out.write_fmt(format_args!("{}", n)),
            Node::StringLit(s) => fmt_delimited(out, '"', s),
            Node::Ident(s) =>
                if is_plain_identifier(s) {
                    out.write_str(s)
                } else {
                    fmt_delimited(out, '|', s)
                },
            Node::Nil | Node::Cons(..) => self.print(out, 0, false),
        }
    }
}

pub(crate) fn pad(out: &mut dyn Write, indent: usize) -> Result<(), std::fmt::Error> {
    for _ in 0..indent {
        out.write_char(' ')?;
    }
    Ok(())
}

// Strings in double quotes, identifiers that would not read back as
// such in bars.
fn fmt_delimited(out: &mut dyn Write, quote: char, s: &str)
                 -> Result<(), std::fmt::Error> {
    out.write_char(quote)?;
    for c in s.chars() {
        match c {
            c if c == quote => {
                out.write_char('\\')?;
                out.write_char(c)?
            }
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\t' => out.write_str("\\t")?,
            '\r' => out.write_str("\\r")?,
            _ => out.write_char(c)?,
        }
    }
    out.write_char(quote)
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        self.print(f, 0, false)
    }
}

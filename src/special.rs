// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Printing overrides for pairs whose car is a recognized identifier.

use crate::node::{Node, QUOTE_MARKER, pad};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialForm {
    Quote,
}

impl TryFrom<&str> for SpecialForm {
    type Error = ();
    fn try_from(s: &str) -> Result<SpecialForm, Self::Error> {
        if s == QUOTE_MARKER { Ok(SpecialForm::Quote) }
        else { Err(()) }
    }
}

impl SpecialForm {
    /// Print `node`, a pair whose car selected this form. Same
    /// contract as [Node::print](crate::node::Node::print).
    pub fn print(self, node: &Node, out: &mut dyn Write, indent: usize, in_cdr: bool)
                 -> Result<(), std::fmt::Error> {
        match self {
            SpecialForm::Quote => {
                // In cdr position, `(a . 'b)`, the pair holding it
                // has written the dot.
                if !in_cdr {
                    pad(out, indent)?;
                }
                out.write_char('\'')?;
                if let Some(quoted) = node.cdr() {
                    quoted.print(out, 0, false)?;
                }
                Ok(())
            }
        }
    }
}

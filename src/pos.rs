// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::cmp::Eq;

/// Location of a token. Both line and col are zero based; line is
/// shown 1-based in Display, Emacs style. Token sources without
/// text behind them (see [Tokens](crate::token::Tokens)) use line 0
/// and the token index as col.

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Pos {
    pub line: u32,
    pub col: u32,
}

impl Pos {
    pub const START: Pos = Pos { line: 0, col: 0 };

    /// The position right after `c` when `c` sits at `self`.
    pub fn after(self, c: char) -> Pos {
        if c == '\n' {
            Pos { line: self.line + 1, col: 0 }
        } else {
            Pos { line: self.line, col: self.col + 1 }
        }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        f.write_fmt(format_args!("@{}.{}", self.line + 1, self.col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_one_based_in_lines() {
        assert_eq!(Pos { line: 0, col: 4 }.to_string(), "@1.4");
        assert_eq!(Pos { line: 2, col: 0 }.to_string(), "@3.0");
    }

    #[test]
    fn after_newline_starts_next_line() {
        let p = Pos { line: 1, col: 7 };
        assert_eq!(p.after('x'), Pos { line: 1, col: 8 });
        assert_eq!(p.after('\n'), Pos { line: 2, col: 0 });
    }

    #[test]
    fn orders_by_line_then_col() {
        assert!(Pos { line: 0, col: 9 } < Pos { line: 1, col: 0 });
        assert!(Pos { line: 1, col: 2 } < Pos { line: 1, col: 3 });
    }
}

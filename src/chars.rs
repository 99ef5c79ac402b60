// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Characters and their positions, from anything implementing
//! `Read` or from a string, as input for the [scanner](../scan/index.html).

use crate::pos::Pos;
use std::io::{self, Read};
use anyhow::{Result, anyhow};
use utf8::BufReadDecoder;
use genawaiter::rc::Gen;


/// Decode `fh` as UTF-8, lazily. Invalid UTF-8 or a failing read
/// yields one error and ends the stream.
pub fn buffered_chars<R>(
    fh: R
) -> impl Iterator<Item=Result<(char, Pos)>>
    where R: Read
{
    Gen::new(|co| async move {
        let mut inp = BufReadDecoder::new(io::BufReader::new(fh));
        let mut pos = Pos::START;
        while let Some(r) = inp.next_strict() {
            match r {
                Ok(x) => {
                    for c in x.chars() {
                        co.yield_(Ok((c, pos))).await;
                        pos = pos.after(c);
                    }
                },
                Err(e) => {
                    co.yield_(Err(anyhow!("buffered_chars: {}", e))).await;
                    return;
                }
            }
        }
    }).into_iter()
}

/// The characters of `s`; never fails.
pub fn str_chars(
    s: &str
) -> impl Iterator<Item=Result<(char, Pos)>> + '_
{
    s.chars().scan(Pos::START, |pos, c| {
        let here = *pos;
        *pos = here.after(c);
        Some(Ok((c, here)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(it: impl Iterator<Item=Result<(char, Pos)>>) -> Vec<(char, Pos)> {
        it.map(|r| r.unwrap()).collect()
    }

    #[test]
    fn positions_follow_lines() {
        let expected = vec![
            ('a', Pos { line: 0, col: 0 }),
            ('\n', Pos { line: 0, col: 1 }),
            ('b', Pos { line: 1, col: 0 }),
            ('c', Pos { line: 1, col: 1 }),
        ];
        assert_eq!(collect(str_chars("a\nbc")), expected);
        assert_eq!(collect(buffered_chars("a\nbc".as_bytes())), expected);
    }

    #[test]
    fn multibyte() {
        let cs = collect(buffered_chars("λ(x)".as_bytes()));
        assert_eq!(cs.iter().map(|(c, _)| *c).collect::<String>(), "λ(x)");
        assert_eq!(cs[1].1, Pos { line: 0, col: 1 });
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let mut cs = buffered_chars(&b"a\xff"[..]);
        assert_eq!(cs.next().unwrap().unwrap().0, 'a');
        assert!(cs.next().unwrap().is_err());
        assert!(cs.next().is_none());
    }
}

// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parse tree construction and printing for a small Scheme subset.
//! 
//! * `scheme_tree::parser` turns a stream of tokens into trees of
//!   `Cons` pairs, one top-level expression per call, with one token
//!   of lookahead. Malformed input is reported and skipped, never
//!   fatal.
//! 
//! * `scheme_tree::node` is the tree, printing itself back as
//!   S-expression text (dotted pairs, `'` quote sugar via
//!   `scheme_tree::special`).
//! 
//! * The parser only needs a `token::TokenSource`. `scan` provides one
//!   for text, `read` wraps scanning, parsing and printing of whole
//!   inputs.
//! 
//! Booleans, integers (arbitrary size), strings and identifiers are
//! the only atoms; there are no vectors, characters, or other quoting
//! forms.

pub mod chars;
pub mod debug;
pub mod node;
pub mod parser;
pub mod pos;
pub mod read;
pub mod scan;
pub mod settings;
pub mod special;
pub mod token;

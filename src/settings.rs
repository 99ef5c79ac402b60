// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Settings for scanning (surface syntax) and parsing.

#[derive(Debug, Clone, Copy)]
pub struct Format {
    pub accept_long_false_true: bool, // #true #false
    pub fold_case: bool, // identifiers are lowercased
    pub signed_integers: bool, // -12 is an integer, not an identifier
}

pub const R5RS_FORMAT : Format = Format {
    accept_long_false_true: false,
    fold_case: true,
    signed_integers: true,
};

pub const R7RS_FORMAT : Format = Format {
    accept_long_false_true: true,
    fold_case: false,
    signed_integers: true,
};


#[derive(Debug, Clone, Copy)]
pub struct Modes {
    /// Report a syntax error if the token after the tail of a dotted
    /// list is not `)`. The token is dropped either way.
    pub strict_dotted_close: bool,
    /// How deeply lists and quotes may nest. A deeper one is reported,
    /// skipped and read as `()`.
    pub max_depth: u32,
}

pub const DEFAULT_MODES : Modes = Modes {
    strict_dotted_close: true,
    max_depth: 256,
    // ^ parsing takes a few stack frames per level, keep well below
    // what a 2 MB thread stack holds in debug builds
};

pub const LENIENT_MODES : Modes = Modes {
    strict_dotted_close: false,
    max_depth: 256,
};

#[derive(Debug)]
pub struct Settings<'t> {
    pub format: &'t Format,
    pub modes: &'t Modes,
}

pub const DEFAULT_SETTINGS : Settings<'static> = Settings {
    format: &R7RS_FORMAT,
    modes: &DEFAULT_MODES,
};

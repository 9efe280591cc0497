// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message parsing.

pub mod header;
pub mod message;

pub use header::{
    normalize_keyword, parse_header, HeaderField, HeaderParser, ParsedHeader,
    DEFAULT_HEADER_PATTERN,
};
pub use message::{clean_message, Commit};

#![warn(rust_2018_idioms)]
#![allow(dead_code)]

//! C4: an RFC 4566 SDP tokenizer and the session model it produces.
//!
//! There is no separate `free` entry point: the parsed [`SessionDescription`]
//! is an ordinary owned value released by `Drop` when it goes out of scope,
//! the idiomatic Rust replacement for the source's scoped parser-handle
//! lifecycle. [`preparse`] still exists as its own entry point because
//! callers (the extractor) want the audio/video m-line counts without
//! committing to walking the whole model themselves.

pub mod model;
pub mod parser;
pub mod writer;

pub use model::{
    Attribute, Bandwidth, Connection, Direction, MediaDescription, MediaType, Origin,
    PayloadType, SessionDescription, Timing,
};
pub use parser::{parse, preparse};

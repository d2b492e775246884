// File: crates/figwire-core/src/error.rs
// Summary: Error types for decoding, encoding, and render driving.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a decode. No partial figure escapes a failed decode.
///
/// `offset` is the count of bytes consumed from the stream when the problem
/// was detected; for tag errors it is the position of the offending byte.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("expected {expected} tag at offset {offset}, found byte 0x{found:02x}")]
    UnexpectedTag {
        expected: &'static str,
        found: u8,
        offset: u64,
    },

    #[error("unknown tag 0x{tag:02x} at offset {offset}")]
    UnknownTag { tag: u8, offset: u64 },

    #[error("unknown option type 0x{tag:02x} for option \"{name}\" at offset {offset}")]
    UnknownOptionType { name: String, tag: u8, offset: u64 },

    #[error("stream ended at offset {offset} while reading {what}")]
    UnexpectedEnd { what: &'static str, offset: u64 },

    #[error("{what} starting at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { what: &'static str, offset: u64 },

    #[error("read failed at offset {offset}")]
    Io {
        offset: u64,
        #[source]
        source: io::Error,
    },
}

/// Producer-side validation errors.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("x and y must be the same length (x: {x}, y: {y})")]
    LengthMismatch { x: usize, y: usize },

    #[error("y_err must match the data length (data: {data}, y_err: {y_err})")]
    ErrLengthMismatch { data: usize, y_err: usize },

    /// NUL-terminated framing cannot carry a NUL payload byte.
    #[error("{what} contains an interior NUL byte")]
    InteriorNul { what: &'static str },

    #[error("could not write figure data")]
    Io {
        #[from]
        source: io::Error,
    },
}

/// Errors from driving a decoded figure through a backend. The first failure
/// aborts the render; there is no partial-success mode.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("could not create output directory {path}")]
    CreateDirs {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not save figure to {path}")]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#![allow(dead_code)]

use std::io;
use std::num::ParseIntError;
use std::string::FromUtf8Error;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the RTCP codec/rewriter and the SDP extractor/anonymizer/merger.
///
/// The RTCP variants below correspond to `malformed_rtcp` in the design: any
/// of them means the compound buffer failed a bounds or version check and
/// must not be forwarded. `BufferTooSmall` is distinct: it is raised only by
/// the fixed-size synthesis operations (`emit_remb`/`emit_fir`/`emit_pli`)
/// when the caller's output buffer doesn't fit the packet.
#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    // RTCP errors
    /// Invalid packet version (RTCP requires version == 2).
    #[error("Invalid packet version")]
    BadVersion,
    /// Header length is too small to hold a common RTCP header.
    #[error("Header length is too small")]
    HeaderTooSmall,
    /// Sub-packet's declared length does not fit in the remaining buffer.
    #[error("Buffer too short to be read")]
    BufferTooShort,
    /// Sub-packet recognized but has an unexpected FMT for the requested operation.
    #[error("Wrong feedback message type")]
    WrongFeedbackType,
    /// Missing REMB identifier ("REMB") in a PSFB/FMT=15 FCI.
    #[error("Missing REMB identifier")]
    MissingRembIdentifier,
    /// `num_ssrc` in a REMB FCI does not match the number of SSRC slots present.
    #[error("SSRC num and length do not match")]
    SsrcNumAndLengthMismatch,
    /// Media SSRC field was expected to be zero.
    #[error("Media SSRC must be 0")]
    SsrcMustBeZero,
    /// Requested bitrate cannot be represented in the REMB exponent/mantissa encoding.
    #[error("Invalid bitrate")]
    InvalidBitrate,
    /// Caller-provided output buffer is smaller than the fixed packet size.
    #[error("buffer too small for packet")]
    BufferTooSmall,

    // SDP / gateway errors
    /// The SDP tokenizer rejected the input text.
    #[error("invalid SDP: {0}")]
    InvalidSdp(String),
    /// SDP parsed but lacked ufrag, pwd, or fingerprint hash/hex after extraction.
    #[error("SDP is missing transport credentials")]
    MissingTransport,
    /// SDP referenced a media section with no corresponding ICE stream.
    #[error("no such ICE stream for this media section")]
    NoSuchStream,

    // Generic
    #[error("parse int: {0}")]
    ParseInt(#[from] ParseIntError),
    #[error("utf8: {0}")]
    Utf8(#[from] FromUtf8Error),
    #[error("{0}")]
    Io(#[source] IoError),
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
#[error("io error: {0}")]
pub struct IoError(#[from] pub io::Error);

impl PartialEq for IoError {
    fn eq(&self, other: &Self) -> bool {
        self.0.kind() == other.0.kind()
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(IoError(e))
    }
}

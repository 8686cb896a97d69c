#![warn(rust_2018_idioms)]
#![allow(dead_code)]

//! Byte-exact codec and B2BUA rewriter for compound RTCP packets
//! (RFC 3550, RFC 4585, RFC 5104, draft-alvestrand-rmcat-remb-03,
//! draft-ietf-straw-b2bua-rtcp-00).
//!
//! Every operation here works directly on caller-owned buffers: there is no
//! struct-based packet model to marshal/unmarshal, only bounded reads and
//! in-place writes over big-endian fields. This mirrors the wire layout the
//! rewriter must preserve byte-for-byte.

pub mod header;
pub mod iter;
pub mod nack;
pub mod remb;
pub mod rewriter;
pub mod synth;

pub use header::{Header, PacketType};
pub use iter::{SubPacket, SubPackets};
pub use nack::get_nacks;
pub use remb::cap_remb;
pub use rewriter::fix_ssrc;
pub use synth::{emit_fir, emit_pli, emit_remb};

use shared::error::{Error, Result};

/// Validates that `buf` is a well-formed compound RTCP packet: every
/// sub-packet header parses, declares version 2, and its declared length
/// fits within the remaining buffer. Unknown sub-packet types are tolerated.
pub fn parse(buf: &[u8]) -> Result<()> {
    for sp in SubPackets::new(buf) {
        sp?;
    }
    Ok(())
}

/// Minimum size of a sub-packet's common header.
pub(crate) const HEADER_LEN: usize = 4;

pub(crate) fn read_u16(buf: &[u8], off: usize) -> Result<u16> {
    let b = buf
        .get(off..off + 2)
        .ok_or(Error::BufferTooShort)?;
    Ok(u16::from_be_bytes([b[0], b[1]]))
}

pub(crate) fn read_u32(buf: &[u8], off: usize) -> Result<u32> {
    let b = buf
        .get(off..off + 4)
        .ok_or(Error::BufferTooShort)?;
    Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

pub(crate) fn write_u32(buf: &mut [u8], off: usize, v: u32) -> Result<()> {
    let b = buf
        .get_mut(off..off + 4)
        .ok_or(Error::BufferTooShort)?;
    b.copy_from_slice(&v.to_be_bytes());
    Ok(())
}

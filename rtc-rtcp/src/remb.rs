//! C3 §4.2.3: REMB (draft-alvestrand-rmcat-remb-03) bitrate capping.
//!
//! FCI layout: ASCII `"REMB"`, `num_ssrc` (8 bits), `exp` (6 bits),
//! `mantissa` (18 bits, big-endian), then `num_ssrc` feedback SSRCs.

use crate::header::PacketType;
use crate::iter::SubPackets;
use shared::error::{Error, Result};

const REMB_FMT: u8 = 15;
const REMB_IDENT: &[u8; 4] = b"REMB";

/// Decodes `mantissa * 2^exp`.
pub(crate) fn decode_bitrate(exp: u8, mantissa: u32) -> u64 {
    (mantissa as u64) << exp
}

/// Chooses the smallest `exp` such that `bitrate >> exp` fits in 18 bits,
/// returning `(exp, mantissa)`.
pub(crate) fn encode_bitrate(bitrate: u64) -> Result<(u8, u32)> {
    for exp in 0u8..64 {
        let mantissa = bitrate >> exp;
        if mantissa <= 0x3FFFF {
            return Ok((exp, mantissa as u32));
        }
    }
    Err(Error::InvalidBitrate)
}

fn find_remb(buf: &[u8]) -> Result<(usize, usize)> {
    for sp in SubPackets::new(buf) {
        let sp = sp?;
        if sp.header.packet_type == PacketType::PayloadFeedback && sp.header.rc == REMB_FMT {
            let fci_off = sp.offset + 4 + 8; // header(4) + sender ssrc(4) + media ssrc(4)
            return Ok((fci_off, sp.offset + sp.header.byte_len()));
        }
    }
    Err(Error::WrongFeedbackType)
}

/// Locates the PSFB/REMB sub-packet in `buf` and, if its decoded bitrate
/// exceeds `max_bitrate`, re-encodes it down to `max_bitrate`, preserving
/// the `"REMB"` identifier, `num_ssrc`, and the feedback SSRC list.
pub fn cap_remb(buf: &mut [u8], max_bitrate: u64) -> Result<()> {
    let (fci_off, end) = find_remb(buf)?;
    if end < fci_off + 8 || &buf[fci_off..fci_off + 4] != REMB_IDENT {
        return Err(Error::MissingRembIdentifier);
    }
    let num_ssrc = buf[fci_off + 4];
    let exp = buf[fci_off + 5] >> 2;
    let mantissa = (((buf[fci_off + 5] & 0x03) as u32) << 16)
        | ((buf[fci_off + 6] as u32) << 8)
        | buf[fci_off + 7] as u32;
    let current = decode_bitrate(exp, mantissa);
    if current <= max_bitrate {
        return Ok(());
    }
    let (new_exp, new_mantissa) = encode_bitrate(max_bitrate)?;
    buf[fci_off + 5] = (new_exp << 2) | ((new_mantissa >> 16) as u8 & 0x03);
    buf[fci_off + 6] = ((new_mantissa >> 8) & 0xFF) as u8;
    buf[fci_off + 7] = (new_mantissa & 0xFF) as u8;
    buf[fci_off + 4] = num_ssrc;
    Ok(())
}

/// Decodes the current reported bitrate of the PSFB/REMB sub-packet in
/// `buf`, for test/caller introspection.
pub fn decode_remb(buf: &[u8]) -> Result<u64> {
    let (fci_off, _) = find_remb(buf)?;
    let exp = buf[fci_off + 5] >> 2;
    let mantissa = (((buf[fci_off + 5] & 0x03) as u32) << 16)
        | ((buf[fci_off + 6] as u32) << 8)
        | buf[fci_off + 7] as u32;
    Ok(decode_bitrate(exp, mantissa))
}

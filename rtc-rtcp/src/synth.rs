//! C3 §4.2.4: synthesis of REMB, FIR, and PLI feedback sub-packets into
//! caller-provided fixed-size buffers.

use crate::header::{Header, PacketType};
use crate::remb::encode_bitrate;
use shared::error::{Error, Result};

const REMB_LEN: usize = 24;
const FIR_LEN: usize = 20;
const PLI_LEN: usize = 8;

/// Writes a 24-byte PSFB/REMB sub-packet reporting `bitrate` into `out`.
/// Sender and media SSRC are left 0 for the caller to fill in downstream.
pub fn emit_remb(out: &mut [u8], bitrate: u64) -> Result<()> {
    if out.len() < REMB_LEN {
        return Err(Error::BufferTooSmall);
    }
    let header = Header {
        version: 2,
        padding: false,
        rc: 15,
        packet_type: PacketType::PayloadFeedback,
        length: 5,
    };
    header.encode(out)?;
    out[4..8].fill(0); // sender ssrc
    out[8..12].fill(0); // media ssrc
    out[12..16].copy_from_slice(b"REMB");
    let (exp, mantissa) = encode_bitrate(bitrate)?;
    out[16] = 1; // num_ssrc
    out[17] = (exp << 2) | ((mantissa >> 16) as u8 & 0x03);
    out[18] = ((mantissa >> 8) & 0xFF) as u8;
    out[19] = (mantissa & 0xFF) as u8;
    out[20..24].fill(0); // feedback ssrc slot
    Ok(())
}

/// Writes a 20-byte PSFB/FIR sub-packet into `out`, using `*seqnr` as the
/// FIR command sequence number, then post-increments `*seqnr` modulo 256.
pub fn emit_fir(out: &mut [u8], seqnr: &mut u8) -> Result<()> {
    if out.len() < FIR_LEN {
        return Err(Error::BufferTooSmall);
    }
    let header = Header {
        version: 2,
        padding: false,
        rc: 4,
        packet_type: PacketType::PayloadFeedback,
        length: 4,
    };
    header.encode(out)?;
    out[4..8].fill(0); // sender ssrc
    out[8..12].fill(0); // media ssrc
    out[12..16].fill(0); // FCI media ssrc
    out[16] = *seqnr;
    out[17..20].fill(0); // 24 reserved bits
    *seqnr = seqnr.wrapping_add(1);
    Ok(())
}

/// Writes an 8-byte PSFB/PLI sub-packet into `out`.
pub fn emit_pli(out: &mut [u8]) -> Result<()> {
    if out.len() < PLI_LEN {
        return Err(Error::BufferTooSmall);
    }
    let header = Header {
        version: 2,
        padding: false,
        rc: 1,
        packet_type: PacketType::PayloadFeedback,
        length: 2,
    };
    header.encode(out)?;
    out[4..8].fill(0); // sender ssrc
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remb::decode_remb;

    #[test]
    fn fir_bytes_match_spec_scenario() {
        let mut buf = [0u8; FIR_LEN];
        let mut seq = 7u8;
        emit_fir(&mut buf, &mut seq).unwrap();
        assert_eq!(&buf[0..4], &[0x84, 0xCE, 0x00, 0x04]);
        assert_eq!(seq, 8);
        assert_eq!(buf[16], 7);
    }

    #[test]
    fn fir_seq_wraps_modulo_256() {
        let mut buf = [0u8; FIR_LEN];
        let mut seq = 255u8;
        emit_fir(&mut buf, &mut seq).unwrap();
        assert_eq!(seq, 0);
        assert_eq!(buf[16], 255);
    }

    #[test]
    fn pli_header_bytes() {
        let mut buf = [0u8; PLI_LEN];
        emit_pli(&mut buf).unwrap();
        assert_eq!(&buf[0..4], &[0x81, 0xCE, 0x00, 0x02]);
    }

    #[test]
    fn remb_round_trips_through_decode() {
        let mut buf = [0u8; REMB_LEN];
        emit_remb(&mut buf, 500_000).unwrap();
        assert!(decode_remb(&buf).unwrap() <= 500_000);
        assert_eq!(&buf[12..16], b"REMB");
    }

    #[test]
    fn rejects_undersized_buffers() {
        let mut buf = [0u8; 4];
        assert_eq!(emit_pli(&mut buf).unwrap_err(), Error::BufferTooSmall);
    }
}

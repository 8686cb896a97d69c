//! C3 §4.2.1: B2BUA SSRC substitution.
//!
//! Per the straw-b2bua-rtcp draft (applied here per the redesign flag in
//! spec §9's open questions), both the sender SSRC and the report/media
//! SSRC are rewritten on RTPFB/PSFB sub-packets, not just on SR/RR as the
//! original janus-gateway `janus_rtcp_fix_ssrc` did.

use crate::header::PacketType;
use crate::{read_u32, write_u32, HEADER_LEN};
use shared::error::{Error, Result};

const REPORT_BLOCK_LEN: usize = 24;

/// Walks `buf` as a compound RTCP packet. When `fix` is `false`, only
/// validates that the buffer parses (equivalent to [`crate::parse`]). When
/// `fix` is `true`, rewrites SSRC fields sub-packet by sub-packet as
/// described in the module docs.
///
/// On a bounds failure mid-rewrite, returns `Err` — the buffer may have been
/// partially mutated and the caller must not forward it.
pub fn fix_ssrc(buf: &mut [u8], fix: bool, new_local: u32, new_remote: u32) -> Result<()> {
    let mut pos = 0usize;
    while pos < buf.len() {
        let header = crate::header::Header::decode(&buf[pos..])?;
        let total = header.byte_len();
        if pos + total > buf.len() {
            return Err(Error::BufferTooShort);
        }
        if fix {
            match header.packet_type {
                PacketType::SenderReport => {
                    write_u32(buf, pos + 4, new_local)?;
                    // header(4) + sender ssrc(4) + sender_info(20) = 28
                    rewrite_report_blocks(buf, pos + HEADER_LEN + 4 + 20, header.rc, new_remote)?;
                }
                PacketType::ReceiverReport => {
                    write_u32(buf, pos + 4, new_local)?;
                    rewrite_report_blocks(buf, pos + HEADER_LEN + 4, header.rc, new_remote)?;
                }
                PacketType::TransportFeedback | PacketType::PayloadFeedback => {
                    write_u32(buf, pos + 4, new_local)?;
                    write_u32(buf, pos + 8, new_remote)?;
                }
                PacketType::SourceDescription
                | PacketType::Goodbye
                | PacketType::App
                | PacketType::FirLegacy
                | PacketType::Unknown(_) => {}
            }
        }
        pos += total;
    }
    Ok(())
}

/// Overwrites the SSRC_1 field (the first word) of each of `rc` consecutive
/// 24-byte report blocks starting at absolute offset `start`.
fn rewrite_report_blocks(buf: &mut [u8], start: usize, rc: u8, new_remote: u32) -> Result<()> {
    for i in 0..rc as usize {
        let block_off = start + i * REPORT_BLOCK_LEN;
        write_u32(buf, block_off, new_remote)?;
    }
    Ok(())
}

/// Reads back the sender/reporter SSRC of an SR or RR sub-packet at byte
/// offset `pos` within `buf`, for test assertions.
#[cfg(test)]
fn sender_ssrc(buf: &[u8], pos: usize) -> u32 {
    read_u32(buf, pos + 4).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{Header, PacketType};

    fn encode_rr(reporter: u32, block_ssrc: u32) -> Vec<u8> {
        let mut buf = vec![0u8; 32];
        let header = Header {
            version: 2,
            padding: false,
            rc: 1,
            packet_type: PacketType::ReceiverReport,
            length: 7,
        };
        header.encode(&mut buf).unwrap();
        write_u32(&mut buf, 4, reporter).unwrap();
        write_u32(&mut buf, 8, block_ssrc).unwrap();
        buf
    }

    #[test]
    fn fixes_rr_reporter_and_block_ssrc() {
        let mut buf = encode_rr(0xAAAAAAAA, 0xBBBBBBBB);
        fix_ssrc(&mut buf, true, 0x11111111, 0x22222222).unwrap();
        assert_eq!(sender_ssrc(&buf, 0), 0x11111111);
        assert_eq!(read_u32(&buf, 8).unwrap(), 0x22222222);
    }

    #[test]
    fn validate_only_leaves_buffer_untouched() {
        let original = encode_rr(0xAAAAAAAA, 0xBBBBBBBB);
        let mut buf = original.clone();
        fix_ssrc(&mut buf, false, 0x11111111, 0x22222222).unwrap();
        assert_eq!(buf, original);
    }

    #[test]
    fn fixes_both_ssrc_fields_on_rtpfb() {
        let mut buf = vec![0u8; 16];
        let header = Header {
            version: 2,
            padding: false,
            rc: 1,
            packet_type: PacketType::TransportFeedback,
            length: 3,
        };
        header.encode(&mut buf).unwrap();
        write_u32(&mut buf, 4, 0x01020304).unwrap();
        write_u32(&mut buf, 8, 0x05060708).unwrap();
        fix_ssrc(&mut buf, true, 0x11111111, 0x22222222).unwrap();
        assert_eq!(read_u32(&buf, 4).unwrap(), 0x11111111);
        assert_eq!(read_u32(&buf, 8).unwrap(), 0x22222222);
    }

    #[test]
    fn sdes_is_not_rewritten() {
        let mut buf = vec![0u8; 8];
        let header = Header {
            version: 2,
            padding: false,
            rc: 1,
            packet_type: PacketType::SourceDescription,
            length: 1,
        };
        header.encode(&mut buf).unwrap();
        buf[4..8].copy_from_slice(&0xCAFEBABEu32.to_be_bytes());
        let original = buf.clone();
        fix_ssrc(&mut buf, true, 0x11111111, 0x22222222).unwrap();
        assert_eq!(buf, original);
    }
}

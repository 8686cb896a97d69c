//! C3 §4.2.2: Generic NACK (RFC 4585 §6.2.1) sequence number extraction.

use crate::header::PacketType;
use crate::iter::SubPackets;
use shared::error::Result;

const NACK_FMT: u8 = 1;
const NACK_ENTRY_LEN: usize = 4;
/// FCI entries start after the 4-byte packet-sender SSRC and 4-byte
/// media-source SSRC that lead every RTPFB body (RFC 4585 §6.1).
const FCI_OFFSET: usize = 8;

/// Walks `buf`'s RTPFB/FMT=1 sub-packets and expands every `(pid, blp)` FCI
/// entry into the sequence numbers it covers: `pid`, then `pid + 1 + i` for
/// each set bit `i` of `blp`, low to high. Order-preserving, not
/// deduplicated, across sub-packets then entries then bits.
pub fn get_nacks(buf: &[u8]) -> Result<Vec<u16>> {
    let mut out = Vec::new();
    for sp in SubPackets::new(buf) {
        let sp = sp?;
        if sp.header.packet_type != PacketType::TransportFeedback || sp.header.rc != NACK_FMT {
            continue;
        }
        // Body is sender ssrc(4) + media ssrc(4) + FCI; the (pid, blp)
        // entries start 8 bytes in, per RFC 4585 §6.1.
        let Some(fci) = sp.body.get(FCI_OFFSET..) else {
            continue;
        };
        for entry in fci.chunks_exact(NACK_ENTRY_LEN) {
            let pid = u16::from_be_bytes([entry[0], entry[1]]);
            let blp = u16::from_be_bytes([entry[2], entry[3]]);
            out.push(pid);
            for i in 0..16u16 {
                if blp & (1 << i) != 0 {
                    out.push(pid.wrapping_add(1 + i));
                }
            }
        }
    }
    Ok(out)
}

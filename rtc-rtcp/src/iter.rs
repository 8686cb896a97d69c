//! C2: lazy, non-restartable iteration over the sub-packets of a compound
//! RTCP buffer.

use crate::header::Header;
use crate::HEADER_LEN;
use shared::error::{Error, Result};

/// One sub-packet of a compound buffer: its decoded header and the body
/// slice following the 4-byte header, up to its declared extent.
pub struct SubPacket<'a> {
    pub header: Header,
    pub body: &'a [u8],
    /// Offset of this sub-packet's header within the original buffer.
    pub offset: usize,
}

/// Walks `buf` yielding one [`SubPacket`] per iteration. Stops at end of
/// buffer or at the first malformed header, in which case the final item
/// yielded is `Err(_)` and no further items follow.
pub struct SubPackets<'a> {
    buf: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> SubPackets<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        SubPackets {
            buf,
            pos: 0,
            done: false,
        }
    }
}

impl<'a> Iterator for SubPackets<'a> {
    type Item = Result<SubPacket<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.pos >= self.buf.len() {
            return None;
        }
        let rest = &self.buf[self.pos..];
        let header = match Header::decode(rest) {
            Ok(h) => h,
            Err(e) => {
                log::trace!("sub-packet walk stopped at offset {}: {e}", self.pos);
                self.done = true;
                return Some(Err(e));
            }
        };
        let total = header.byte_len();
        if total > rest.len() {
            log::trace!(
                "sub-packet at offset {} declares {total} bytes, only {} remain",
                self.pos,
                rest.len()
            );
            self.done = true;
            return Some(Err(Error::BufferTooShort));
        }
        if matches!(header.packet_type, crate::header::PacketType::Unknown(_)) {
            log::trace!(
                "tolerating unknown sub-packet type at offset {}: {:?}",
                self.pos,
                header.packet_type
            );
        }
        let body = &rest[HEADER_LEN..total];
        let offset = self.pos;
        self.pos += total;
        Some(Ok(SubPacket {
            header,
            body,
            offset,
        }))
    }
}

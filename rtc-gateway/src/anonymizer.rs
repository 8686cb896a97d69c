//! C6: strips transport-layer attributes from an SDP offer/answer before
//! forwarding it to a session plugin.

use sdp::{Connection, MediaType, SessionDescription};
use shared::error::Result;

const SESSION_ATTRS_REMOVED: &[&str] = &["ice-ufrag", "ice-pwd", "ice-options", "fingerprint", "group", "msid-semantic"];
const MEDIA_ATTRS_REMOVED: &[&str] = &[
    "ice-ufrag",
    "ice-pwd",
    "ice-options",
    "crypto",
    "fingerprint",
    "setup",
    "connection",
    "group",
    "msid-semantic",
    "rtcp",
    "rtcp-mux",
    "candidate",
    "ssrc",
    "extmap",
];

const ANONYMIZED_ADDRESS: &str = "1.1.1.1";

/// Parses `text`, strips transport-layer attributes, and returns the
/// re-serialized anonymized SDP. Fails `invalid_sdp` if `text` does not
/// parse.
pub fn anonymize(text: &str) -> Result<String> {
    let mut sdp = sdp::parse(text)?;

    if sdp.connection.is_some() {
        sdp.connection = Some(anonymized_connection());
    }
    sdp.attributes
        .retain(|a| !SESSION_ATTRS_REMOVED.contains(&a.name.as_str()));

    let mut audio_seen = 0u32;
    let mut video_seen = 0u32;
    for m in &mut sdp.media {
        match m.media_type {
            MediaType::Audio => {
                audio_seen += 1;
                m.port = if audio_seen == 1 { 1 } else { 0 };
            }
            MediaType::Video => {
                video_seen += 1;
                m.port = if video_seen == 1 { 1 } else { 0 };
            }
            MediaType::Other => m.port = 0,
        }
        if m.connection.is_some() {
            m.connection = Some(anonymized_connection());
        }
        m.attributes
            .retain(|a| !MEDIA_ATTRS_REMOVED.contains(&a.name.as_str()));

        // The upstream printer's "emit inactive then text-replace" trick
        // for forcing an explicit a=sendrecv isn't needed here: the writer
        // (rtc-sdp's marshal) always emits the direction attribute
        // unconditionally, sendrecv included.
    }

    Ok(sdp.marshal())
}

fn anonymized_connection() -> Connection {
    Connection {
        network_type: "IN".to_string(),
        address_type: "IP4".to_string(),
        address: ANONYMIZED_ADDRESS.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFER: &str = "\
v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\na=group:BUNDLE 0 1\r\na=ice-ufrag:U\r\na=ice-pwd:P\r\na=fingerprint:sha-256 AB:CD\r\nm=audio 9 UDP/TLS/RTP/SAVPF 111\r\nc=IN IP4 10.0.0.1\r\na=ice-ufrag:U\r\na=candidate:1 1 udp 2130706431 10.0.0.1 5000 typ host\r\na=ssrc:1 cname:x\r\na=sendrecv\r\nm=video 9 UDP/TLS/RTP/SAVPF 96\r\na=sendrecv\r\nm=audio 9 UDP/TLS/RTP/SAVPF 0\r\na=sendrecv\r\n";

    #[test]
    fn strips_transport_attributes_and_ports() {
        let out = anonymize(OFFER).unwrap();
        for forbidden in [
            "ice-ufrag", "ice-pwd", "fingerprint", "candidate", "ssrc", "group",
        ] {
            assert!(
                !out.lines().any(|l| l.starts_with(&format!("a={forbidden}"))),
                "found forbidden attribute {forbidden} in:\n{out}"
            );
        }
        let reparsed = sdp::parse(&out).unwrap();
        assert_eq!(reparsed.media[0].port, 1); // first audio
        assert_eq!(reparsed.media[2].port, 0); // second audio
    }

    #[test]
    fn sendrecv_direction_is_preserved_explicitly() {
        let out = anonymize(OFFER).unwrap();
        assert!(out.contains("a=sendrecv"));
        let reparsed = sdp::parse(&out).unwrap();
        assert_eq!(reparsed.media[0].direction, Some(sdp::Direction::SendRecv));
    }

    #[test]
    fn is_idempotent_on_the_removed_attribute_set() {
        let once = anonymize(OFFER).unwrap();
        let twice = anonymize(&once).unwrap();
        assert_eq!(once, twice);
    }
}

//! C7: combines an anonymized/plugin SDP with locally chosen transport
//! parameters into the SDP sent back to the peer.

use crate::collaborators::{DtlsContext, IceAgent, TransportContext};
use crate::ice::IceHandle;
use sdp::{Attribute, MediaType, SessionDescription};
use shared::error::Result;
use std::fmt::Write as _;

/// Output buffer size the source bounds `merge` output to (`BUFSIZE`).
pub const MERGE_BUFFER_CAPACITY: usize = 8192;

/// Parses `anonymized_text`, then emits a full SDP combining it with local
/// transport state queried from `ice`/`dtls`/`transport`.
pub fn merge(
    ice: &IceHandle,
    anonymized_text: &str,
    dtls: &dyn DtlsContext,
    transport: &dyn TransportContext,
    ice_agent: &dyn IceAgent,
) -> Result<String> {
    let input = sdp::parse(anonymized_text)?;
    let mut out = String::with_capacity(MERGE_BUFFER_CAPACITY);

    let _ = writeln!(out, "v=0\r");
    write_origin(&mut out, &input);
    let _ = writeln!(out, "s={}\r", input.subject.as_deref().unwrap_or("Meetecho Janus"));
    let _ = writeln!(out, "t={} {}\r", input.timing.start, input.timing.stop);
    let _ = writeln!(out, "a=msid-semantic: WMS janus\r");
    let _ = writeln!(out, "a=fingerprint:sha-256 {}\r", dtls.get_local_fingerprint());
    for a in &input.attributes {
        write_attribute(&mut out, a);
    }

    let local_ip = transport.get_local_ip();
    let mut audio_seen = 0u32;
    let mut video_seen = 0u32;
    for m in &input.media {
        let (media_name, stream_id) = match m.media_type {
            MediaType::Audio => {
                audio_seen += 1;
                if audio_seen > 1 {
                    let _ = writeln!(out, "m=audio 0 RTP/SAVPF 0\r");
                    continue;
                }
                ("audio", ice.audio_id)
            }
            MediaType::Video => {
                video_seen += 1;
                if video_seen > 1 {
                    let _ = writeln!(out, "m=video 0 RTP/SAVPF 0\r");
                    continue;
                }
                ("video", ice.video_id)
            }
            MediaType::Other => {
                let _ = writeln!(out, "m={} 0 {} 0\r", m.media_type_raw, m.proto);
                continue;
            }
        };

        let Some(stream) = stream_id.and_then(|id| ice.streams.get(&id)) else {
            log::debug!("no usable ICE stream for {media_name} m-line, emitting disabled placeholder");
            let _ = writeln!(out, "m={media_name} 0 RTP/SAVPF 0\r");
            continue;
        };

        let port_placeholder = if media_name == "audio" { "ARTPP" } else { "VRTPP" };
        let fmts: Vec<&str> = if m.payload_types.is_empty() {
            vec!["0"]
        } else {
            m.payload_types.iter().map(|p| p.pt.as_str()).collect()
        };
        let _ = writeln!(out, "m={media_name} {port_placeholder} RTP/SAVPF {}\r", fmts.join(" "));

        if let Some(b) = &m.bandwidth {
            let _ = writeln!(out, "b={}:{}\r", b.bwtype, b.bandwidth);
        }
        let _ = writeln!(out, "c=IN IP4 {local_ip}\r");

        let direction = m.direction.unwrap_or(sdp::Direction::SendRecv);
        let _ = writeln!(out, "a={}\r", direction.as_str());

        let rtcp_placeholder = if media_name == "audio" { "ARTCP" } else { "VRTCP" };
        let _ = writeln!(out, "a=rtcp:{rtcp_placeholder} IN IP4 {local_ip}\r");

        for pt in &m.payload_types {
            if let Some(rtpmap) = &pt.rtpmap {
                let _ = writeln!(out, "a=rtpmap:{} {}\r", pt.pt, rtpmap);
            }
        }
        for pt in &m.payload_types {
            if let Some(fmtp) = &pt.fmtp {
                let _ = writeln!(out, "a=fmtp:{} {}\r", pt.pt, fmtp);
            }
        }

        let (ufrag, pwd) = ice_agent.get_local_credentials(stream.stream_id);
        let _ = writeln!(
            out,
            "a=ice-ufrag:{}\r\na=ice-pwd:{}\r\na=setup:{}\r\na=connection:new\r",
            ufrag,
            pwd,
            dtls.role_text(stream.dtls_role)
        );

        for a in &m.attributes {
            write_attribute(&mut out, a);
        }

        if media_name == "audio" {
            let _ = writeln!(
                out,
                "a=ssrc:{ssrc} cname:janusaudio\r\na=ssrc:{ssrc} msid:janus janusa0\r\na=ssrc:{ssrc} mslabel:janus\r\na=ssrc:{ssrc} label:janusa0\r",
                ssrc = stream.ssrc
            );
        } else {
            let _ = writeln!(
                out,
                "a=ssrc:{ssrc} cname:janusvideo\r\na=ssrc:{ssrc} msid:janus janusv0\r\na=ssrc:{ssrc} mslabel:janus\r\na=ssrc:{ssrc} label:janusv0\r",
                ssrc = stream.ssrc
            );
        }

        out.push_str(&ice_agent.setup_candidates(stream.stream_id, 1));
        out.push_str(&ice_agent.setup_candidates(stream.stream_id, 2));
    }

    Ok(out)
}

fn write_origin(out: &mut String, input: &SessionDescription) {
    // The address is hardcoded to 127.0.0.1 regardless of what the input
    // offered; only the per-media c= line uses the real local IP.
    let _ = writeln!(
        out,
        "o={} {} {} IN IP4 127.0.0.1\r",
        input.origin.username, input.origin.session_id, input.origin.session_version
    );
}

fn write_attribute(out: &mut String, attr: &Attribute) {
    match &attr.value {
        Some(v) => {
            let _ = writeln!(out, "a={}:{}\r", attr.name, v);
        }
        None => {
            let _ = writeln!(out, "a={}\r", attr.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ice::{DtlsRole, IceStream};

    struct FakeDtls;
    impl DtlsContext for FakeDtls {
        fn get_local_fingerprint(&self) -> String {
            "AA:BB:CC".to_string()
        }
    }

    struct FakeTransport;
    impl TransportContext for FakeTransport {
        fn get_local_ip(&self) -> String {
            "203.0.113.9".to_string()
        }
    }

    struct FakeIceAgent;
    impl IceAgent for FakeIceAgent {
        fn get_local_credentials(&self, _stream_id: u64) -> (String, String) {
            ("localufrag".to_string(), "localpwd".to_string())
        }
        fn setup_candidates(&self, stream_id: u64, component_id: u32) -> String {
            format!("a=candidate:1 {component_id} udp 2130706431 203.0.113.9 5000{stream_id} typ host\r\n")
        }
    }

    fn handle_with_audio() -> IceHandle {
        let mut ice = IceHandle::new(1);
        ice.audio_id = Some(10);
        ice.streams.insert(10, IceStream::new(10, 0xAABBCCDD, DtlsRole::Server));
        ice
    }

    const ANONYMIZED: &str = "\
v=0\r\no=- 1 1 IN IP4 1.1.1.1\r\ns=-\r\nt=0 0\r\nm=audio 1 RTP/SAVPF 111\r\nc=IN IP4 1.1.1.1\r\na=rtpmap:111 opus/48000/2\r\na=sendrecv\r\n";

    #[test]
    fn merge_contains_exactly_one_of_each_required_line() {
        let ice = handle_with_audio();
        let out = merge(&ice, ANONYMIZED, &FakeDtls, &FakeTransport, &FakeIceAgent).unwrap();
        assert_eq!(out.matches("a=fingerprint:sha-256 ").count(), 1);
        assert_eq!(out.matches("a=ice-ufrag:").count(), 1);
        assert_eq!(out.matches("a=ice-pwd:").count(), 1);
        assert_eq!(out.matches("a=setup:").count(), 1);
        assert!(out.contains("a=sendrecv"));
        assert!(!out.contains("a=inactive"));
    }

    #[test]
    fn missing_stream_emits_disabled_placeholder() {
        let ice = IceHandle::new(1); // no audio_id configured
        let out = merge(&ice, ANONYMIZED, &FakeDtls, &FakeTransport, &FakeIceAgent).unwrap();
        assert!(out.contains("m=audio 0 RTP/SAVPF 0"));
    }

    #[test]
    fn second_audio_line_is_disabled_placeholder() {
        let ice = handle_with_audio();
        let two_audio = "\
v=0\r\no=- 1 1 IN IP4 1.1.1.1\r\ns=-\r\nt=0 0\r\nm=audio 1 RTP/SAVPF 111\r\nc=IN IP4 1.1.1.1\r\na=sendrecv\r\nm=audio 0 RTP/SAVPF 0\r\na=sendrecv\r\n";
        let out = merge(&ice, two_audio, &FakeDtls, &FakeTransport, &FakeIceAgent).unwrap();
        assert_eq!(out.matches("m=audio").count(), 2);
        assert!(out.contains("m=audio 0 RTP/SAVPF 0"));
    }
}

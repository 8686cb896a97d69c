use rtc_gateway::{anonymize, extract, ice::DtlsRole, merge, DtlsContext, IceAgent, IceHandle, IceStream, TransportContext};

struct FakeDtls;
impl DtlsContext for FakeDtls {
    fn get_local_fingerprint(&self) -> String {
        "11:22:33:44".to_string()
    }
}

struct FakeTransport;
impl TransportContext for FakeTransport {
    fn get_local_ip(&self) -> String {
        "198.51.100.7".to_string()
    }
}

struct FakeIceAgent;
impl IceAgent for FakeIceAgent {
    fn get_local_credentials(&self, _stream_id: u64) -> (String, String) {
        ("localUfrag".to_string(), "localPwd".to_string())
    }
    fn setup_candidates(&self, stream_id: u64, component_id: u32) -> String {
        format!("a=candidate:1 {component_id} udp 2130706431 198.51.100.7 600{stream_id} typ host\r\n")
    }
}

const OFFER: &str = "\
v=0\r
o=- 4611731400430051336 2 IN IP4 127.0.0.1\r
s=-\r
t=0 0\r
a=group:BUNDLE 0\r
a=ice-ufrag:abcd\r
a=ice-pwd:efghijklmnopqrstuvwxyz012345\r
a=fingerprint:sha-256 AB:CD:EF\r
m=audio 9 UDP/TLS/RTP/SAVPF 111\r
c=IN IP4 10.0.0.5\r
a=setup:actpass\r
a=rtpmap:111 opus/48000/2\r
a=sendrecv\r
a=candidate:1 1 udp 2130706431 10.0.0.5 54400 typ host\r
a=candidate:1 2 udp 2130706431 10.0.0.5 54401 typ host\r
";

#[test]
fn offer_flows_through_extract_anonymize_and_merge() {
    let mut ice = IceHandle::new(42);
    ice.audio_id = Some(1);
    ice.streams.insert(1, IceStream::new(1, 0xDEADBEEF, DtlsRole::Server));
    ice.streams.get_mut(&1).unwrap().components.insert(1, Default::default());
    ice.streams.get_mut(&1).unwrap().components.insert(2, Default::default());

    let parsed = sdp::parse(OFFER).unwrap();
    extract(&parsed, &mut ice).expect("extract should populate the ICE handle");

    let stream = &ice.streams[&1];
    assert_eq!(stream.components[&1].remote_candidates.len(), 1);
    assert_eq!(stream.components[&2].remote_candidates.len(), 1);
    assert_eq!(stream.dtls_role, DtlsRole::Client); // actpass => CLIENT
    assert_eq!(ice.remote_fingerprint.as_deref(), Some("AB:CD:EF"));

    let anonymized = anonymize(OFFER).expect("anonymize should strip transport attrs");
    assert!(!anonymized.contains("a=ice-ufrag"));
    assert!(!anonymized.contains("a=candidate"));
    assert!(anonymized.contains("a=sendrecv"));

    let merged = merge(&ice, &anonymized, &FakeDtls, &FakeTransport, &FakeIceAgent).unwrap();
    assert!(merged.contains("a=fingerprint:sha-256 11:22:33:44"));
    assert!(merged.contains("m=audio ARTPP RTP/SAVPF 111"));
    assert!(merged.contains("a=rtcp:ARTCP IN IP4 198.51.100.7"));
    assert!(merged.contains("a=ssrc:3735928559 cname:janusaudio"));
    assert_eq!(merged.matches("a=candidate:").count(), 2);
}

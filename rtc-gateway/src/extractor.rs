//! C5: walks a parsed SDP session description and fills in an
//! [`IceHandle`]'s remote transport state.

use crate::ice::{CandidateTransport, CandidateType, DtlsRole, IceHandle, RemoteCandidate};
use sdp::{MediaType, SessionDescription};
use shared::error::{Error, Result};

struct Credentials {
    ufrag: Option<String>,
    pwd: Option<String>,
    hashing: Option<String>,
    fingerprint: Option<String>,
}

impl Credentials {
    fn empty() -> Self {
        Credentials {
            ufrag: None,
            pwd: None,
            hashing: None,
            fingerprint: None,
        }
    }

    fn overlay(&mut self, other: Credentials) {
        if other.ufrag.is_some() {
            self.ufrag = other.ufrag;
        }
        if other.pwd.is_some() {
            self.pwd = other.pwd;
        }
        if other.hashing.is_some() {
            self.hashing = other.hashing;
            self.fingerprint = other.fingerprint;
        }
    }
}

fn scan_credentials(attrs: &[sdp::Attribute]) -> Credentials {
    let mut c = Credentials::empty();
    for a in attrs {
        match a.name.as_str() {
            "ice-ufrag" => c.ufrag = a.value.clone(),
            "ice-pwd" => c.pwd = a.value.clone(),
            "fingerprint" => {
                if let Some((alg, hex)) = a.value.as_deref().and_then(|v| v.split_once(' ')) {
                    match alg {
                        "sha-256" => {
                            c.hashing = Some(alg.to_string());
                            c.fingerprint = Some(hex.to_string());
                        }
                        "sha-1" => {
                            log::warn!("SDP fingerprint uses sha-1, accepting but not preferred");
                            c.hashing = Some(alg.to_string());
                            c.fingerprint = Some(hex.to_string());
                        }
                        other => {
                            log::warn!("unknown fingerprint algorithm '{other}', treating as absent");
                        }
                    }
                }
            }
            _ => {}
        }
    }
    c
}

/// Walks `parsed` and fills in `ice`'s remote transport state: session-level
/// credentials/fingerprint, per-media overrides and DTLS role, and remote
/// candidates for the first audio and first video m-line.
///
/// Fails `missing_transport` if, after both scans, any media section lacks
/// ufrag/pwd/fingerprint; fails `no_such_stream` only if no media section
/// could be matched to a stream at all.
pub fn extract(parsed: &SessionDescription, ice: &mut IceHandle) -> Result<()> {
    let session_creds = scan_credentials(&parsed.attributes);

    let mut audio_done = false;
    let mut video_done = false;
    let mut matched_any = false;

    for m in &parsed.media {
        let stream_id = match m.media_type {
            MediaType::Audio if !audio_done => {
                audio_done = true;
                ice.audio_id
            }
            MediaType::Audio => {
                log::debug!("skipping extra audio m-line");
                continue;
            }
            MediaType::Video if !video_done => {
                video_done = true;
                ice.video_id
            }
            MediaType::Video => {
                log::debug!("skipping extra video m-line");
                continue;
            }
            MediaType::Other => {
                log::debug!("skipping unsupported media type '{}'", m.media_type_raw);
                continue;
            }
        };

        let Some(stream_id) = stream_id else {
            log::warn!("no ICE stream id configured for this media type");
            continue;
        };

        let mut creds = Credentials::empty();
        creds.overlay(Credentials {
            ufrag: session_creds.ufrag.clone(),
            pwd: session_creds.pwd.clone(),
            hashing: session_creds.hashing.clone(),
            fingerprint: session_creds.fingerprint.clone(),
        });
        creds.overlay(scan_credentials(&m.attributes));

        let mut dtls_role_override = None;
        for a in &m.attributes {
            if a.name == "setup" {
                match a.value.as_deref() {
                    Some("actpass") | Some("passive") => dtls_role_override = Some(DtlsRole::Client),
                    Some("active") => dtls_role_override = Some(DtlsRole::Server),
                    Some("holdconn") => {}
                    other => log::debug!("unrecognized a=setup value {other:?}"),
                }
            }
        }

        if creds.ufrag.is_none() || creds.pwd.is_none() || creds.hashing.is_none() || creds.fingerprint.is_none() {
            return Err(Error::MissingTransport);
        }

        let Some(stream) = ice.streams.get_mut(&stream_id) else {
            log::warn!("ICE handle has no stream record for stream_id {stream_id}");
            continue;
        };
        if let Some(role) = dtls_role_override {
            stream.dtls_role = role;
        }

        for a in &m.attributes {
            if a.name != "candidate" {
                continue;
            }
            let Some(value) = a.value.as_deref() else {
                continue;
            };
            let Some(candidate) = parse_candidate(value, stream_id, &creds) else {
                log::debug!("skipping unparsable/unsupported candidate line: {value}");
                continue;
            };
            let Some(component) = stream.components.get_mut(&candidate.component_id) else {
                log::debug!("skipping candidate for unknown component {}", candidate.component_id);
                continue;
            };
            component.remote_candidates.push(candidate);
        }

        matched_any = true;
        ice.remote_hashing = creds.hashing;
        ice.remote_fingerprint = creds.fingerprint;
    }

    if !matched_any {
        return Err(Error::NoSuchStream);
    }
    Ok(())
}

/// Parses `foundation component transport priority ip port typ type [raddr
/// ip rport port]`; returns `None` if fewer than 7 tokens match or the
/// transport/type combination is rejected.
fn parse_candidate(value: &str, stream_id: u64, creds: &Credentials) -> Option<RemoteCandidate> {
    let tok: Vec<&str> = value.split_whitespace().collect();
    if tok.len() < 8 || tok[6] != "typ" {
        return None;
    }
    let foundation = tok[0].to_string();
    let component_id: u32 = tok[1].parse().ok()?;
    let transport = CandidateTransport::parse(tok[2])?;
    let priority: u32 = tok[3].parse().ok()?;
    let address = tok[4].to_string();
    let port: u16 = tok[5].parse().ok()?;
    let candidate_type = CandidateType::parse(tok[7])?;
    if !transport.allowed_for(candidate_type) {
        return None;
    }

    let mut base_address = None;
    let mut base_port = None;
    if tok.len() >= 12 && tok[8] == "raddr" && tok[10] == "rport" {
        base_address = Some(tok[9].to_string());
        base_port = tok[11].parse().ok();
    }

    Some(RemoteCandidate {
        foundation,
        component_id,
        stream_id,
        transport,
        priority,
        address,
        port,
        base_address,
        base_port,
        candidate_type,
        ufrag: creds.ufrag.clone().unwrap_or_default(),
        pwd: creds.pwd.clone().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ice::{IceStream, IceComponent};
    use std::collections::HashMap;

    fn handle_with_audio(stream_id: u64) -> IceHandle {
        let mut ice = IceHandle::new(1);
        ice.audio_id = Some(stream_id);
        let mut stream = IceStream::new(stream_id, 0x1000, DtlsRole::Server);
        stream.components.insert(1, IceComponent { component_id: 1, remote_candidates: Vec::new() });
        stream.components.insert(2, IceComponent { component_id: 2, remote_candidates: Vec::new() });
        ice.streams.insert(stream_id, stream);
        ice
    }

    const OFFER: &str = "\
v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\na=ice-ufrag:U\r\na=ice-pwd:P\r\na=fingerprint:sha-256 AB:CD\r\nm=audio 9 UDP/TLS/RTP/SAVPF 111\r\na=setup:actpass\r\na=candidate:1 1 udp 2130706431 10.0.0.1 5000 typ host\r\n";

    #[test]
    fn scenario_from_spec_extracts_host_candidate() {
        let mut ice = handle_with_audio(7);
        let parsed = sdp::parse(OFFER).unwrap();
        extract(&parsed, &mut ice).unwrap();
        assert_eq!(ice.remote_hashing.as_deref(), Some("sha-256"));
        let stream = &ice.streams[&7];
        let cand = &stream.components[&1].remote_candidates[0];
        assert_eq!(cand.address, "10.0.0.1");
        assert_eq!(cand.port, 5000);
        assert_eq!(cand.ufrag, "U");
        assert_eq!(cand.pwd, "P");
        assert_eq!(stream.dtls_role, DtlsRole::Client);
    }

    #[test]
    fn missing_transport_when_fingerprint_absent() {
        let mut ice = handle_with_audio(7);
        let text = "v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\na=ice-ufrag:U\r\na=ice-pwd:P\r\nm=audio 9 UDP/TLS/RTP/SAVPF 111\r\n";
        let parsed = sdp::parse(text).unwrap();
        assert_eq!(extract(&parsed, &mut ice).unwrap_err(), Error::MissingTransport);
    }

    #[test]
    fn bad_candidate_line_is_skipped_not_fatal() {
        let mut ice = handle_with_audio(7);
        let text = "v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\na=ice-ufrag:U\r\na=ice-pwd:P\r\na=fingerprint:sha-256 AB:CD\r\nm=audio 9 UDP/TLS/RTP/SAVPF 111\r\na=candidate:bad\r\n";
        let parsed = sdp::parse(text).unwrap();
        extract(&parsed, &mut ice).unwrap();
        assert!(ice.streams[&7].components[&1].remote_candidates.is_empty());
    }
}

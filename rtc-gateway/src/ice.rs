//! The ICE handle data model of spec §3: an external collaborator's state
//! that the extractor/merger consume and mutate through a narrow interface.
//! Opaque to the RTCP/SDP codecs, owned by the caller (typically the ICE
//! agent itself), and passed in by reference here.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtlsRole {
    Client,
    Server,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateType {
    Host,
    Srflx,
    Prflx,
    Relay,
}

impl CandidateType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "host" => Some(CandidateType::Host),
            "srflx" => Some(CandidateType::Srflx),
            "prflx" => Some(CandidateType::Prflx),
            "relay" => Some(CandidateType::Relay),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateTransport {
    Udp,
    Tcp,
    Tls,
}

impl CandidateTransport {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "udp" => Some(CandidateTransport::Udp),
            "tcp" => Some(CandidateTransport::Tcp),
            "tls" => Some(CandidateTransport::Tls),
            _ => None,
        }
    }

    /// Host/srflx/prflx only ever accept UDP; relay additionally accepts
    /// TCP/TLS, per spec §4.4's transport policy.
    pub fn allowed_for(self, candidate_type: CandidateType) -> bool {
        match candidate_type {
            CandidateType::Relay => true,
            _ => self == CandidateTransport::Udp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCandidate {
    pub foundation: String,
    pub component_id: u32,
    pub stream_id: u64,
    pub transport: CandidateTransport,
    pub priority: u32,
    pub address: String,
    pub port: u16,
    pub base_address: Option<String>,
    pub base_port: Option<u16>,
    pub candidate_type: CandidateType,
    pub ufrag: String,
    pub pwd: String,
}

#[derive(Debug, Clone, Default)]
pub struct IceComponent {
    pub component_id: u32,
    pub remote_candidates: Vec<RemoteCandidate>,
}

#[derive(Debug, Clone)]
pub struct IceStream {
    pub stream_id: u64,
    pub ssrc: u32,
    pub dtls_role: DtlsRole,
    pub components: HashMap<u32, IceComponent>,
}

impl IceStream {
    pub fn new(stream_id: u64, ssrc: u32, dtls_role: DtlsRole) -> Self {
        IceStream {
            stream_id,
            ssrc,
            dtls_role,
            components: HashMap::new(),
        }
    }
}

/// The full ICE handle for a session: both audio and video streams (by id,
/// keyed into `streams`), plus the session-wide remote DTLS fingerprint.
#[derive(Debug, Clone, Default)]
pub struct IceHandle {
    pub id: u64,
    pub audio_id: Option<u64>,
    pub video_id: Option<u64>,
    pub streams: HashMap<u64, IceStream>,
    pub remote_hashing: Option<String>,
    pub remote_fingerprint: Option<String>,
}

impl IceHandle {
    pub fn new(id: u64) -> Self {
        IceHandle {
            id,
            audio_id: None,
            video_id: None,
            streams: HashMap::new(),
            remote_hashing: None,
            remote_fingerprint: None,
        }
    }
}

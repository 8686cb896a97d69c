//! The SDP session model consumed and produced by the core (spec §3): an
//! origin line, optional session connection, global attributes, and an
//! ordered list of media descriptions.

/// A generic `a=name[:value]` attribute line, kept in the order it was
/// parsed so the extractor/anonymizer/merger can scan, strip, or copy it
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Attribute {
            name: name.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub username: String,
    pub session_id: String,
    pub session_version: String,
    pub network_type: String,
    pub address_type: String,
    pub address: String,
}

impl Default for Origin {
    fn default() -> Self {
        Origin {
            username: "-".to_string(),
            session_id: "0".to_string(),
            session_version: "0".to_string(),
            network_type: "IN".to_string(),
            address_type: "IP4".to_string(),
            address: "0.0.0.0".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub network_type: String,
    pub address_type: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bandwidth {
    pub bwtype: String,
    pub bandwidth: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub start: u64,
    pub stop: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Timing { start: 0, stop: 0 }
    }
}

/// `a=sendrecv` / `a=sendonly` / `a=recvonly` / `a=inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    SendRecv,
    SendOnly,
    RecvOnly,
    Inactive,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::SendRecv => "sendrecv",
            Direction::SendOnly => "sendonly",
            Direction::RecvOnly => "recvonly",
            Direction::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sendrecv" => Some(Direction::SendRecv),
            "sendonly" => Some(Direction::SendOnly),
            "recvonly" => Some(Direction::RecvOnly),
            "inactive" => Some(Direction::Inactive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Audio,
    Video,
    Other,
}

impl MediaType {
    pub fn parse(s: &str) -> Self {
        match s {
            "audio" => MediaType::Audio,
            "video" => MediaType::Video,
            _ => MediaType::Other,
        }
    }

    pub fn as_str(&self, raw: &str) -> String {
        match self {
            MediaType::Audio => "audio".to_string(),
            MediaType::Video => "video".to_string(),
            MediaType::Other => raw.to_string(),
        }
    }
}

/// One `m=` format number, enriched by a later `a=rtpmap`/`a=fmtp` line
/// naming the same payload type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadType {
    pub pt: String,
    pub rtpmap: Option<String>,
    pub fmtp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDescription {
    pub media_type: MediaType,
    /// Raw media token from the `m=` line (`"audio"`, `"video"`, or
    /// whatever the original text carried for `Other`).
    pub media_type_raw: String,
    pub port: u16,
    pub proto: String,
    pub payload_types: Vec<PayloadType>,
    pub direction: Option<Direction>,
    pub connection: Option<Connection>,
    pub bandwidth: Option<Bandwidth>,
    pub attributes: Vec<Attribute>,
}

impl MediaDescription {
    pub fn attr(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn attrs(&self, name: &str) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(move |a| a.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDescription {
    pub origin: Origin,
    /// `None` when the input had no `s=` line at all, distinct from an
    /// explicit `s=-` (the RFC 4566 "no subject" placeholder).
    pub subject: Option<String>,
    pub timing: Timing,
    pub connection: Option<Connection>,
    pub bandwidth: Option<Bandwidth>,
    pub attributes: Vec<Attribute>,
    pub media: Vec<MediaDescription>,
}

impl SessionDescription {
    pub fn attr(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

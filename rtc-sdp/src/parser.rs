//! C4: a thin internal tokenizer for RFC 4566 grammar, built directly over
//! `&str` rather than binding an external parsing library — the grammar
//! this core needs (session/media line types, `a=name[:value]` attributes)
//! is small enough that a hand-rolled line-oriented reader is the more
//! idiomatic choice than a dependency.

use crate::model::{
    Attribute, Bandwidth, Connection, Direction, MediaDescription, MediaType, Origin,
    PayloadType, SessionDescription, Timing,
};
use shared::error::{Error, Result};

/// Parses `text` into a [`SessionDescription`]. Returns `invalid_sdp`
/// (`Error::InvalidSdp`) if a mandatory line is malformed.
pub fn parse(text: &str) -> Result<SessionDescription> {
    let mut origin = None;
    let mut subject = None;
    let mut timing = Timing::default();
    let mut session_connection = None;
    let mut session_bandwidth = None;
    let mut session_attrs = Vec::new();
    let mut media = Vec::new();

    let mut current: Option<MediaDescription> = None;

    for raw_line in text.lines() {
        let line = raw_line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        let mut parts = line.splitn(2, '=');
        let kind = parts
            .next()
            .ok_or_else(|| Error::InvalidSdp(line.to_string()))?;
        let value = parts
            .next()
            .ok_or_else(|| Error::InvalidSdp(line.to_string()))?;

        match kind {
            "v" => { /* version, always 0, not modeled */ }
            "o" => origin = Some(parse_origin(value)?),
            "s" => subject = Some(value.to_string()),
            "t" => timing = parse_timing(value)?,
            "c" => {
                let c = parse_connection(value)?;
                match current.as_mut() {
                    Some(m) => m.connection = Some(c),
                    None => session_connection = Some(c),
                }
            }
            "b" => {
                let b = parse_bandwidth(value)?;
                match current.as_mut() {
                    Some(m) => m.bandwidth = Some(b),
                    None => session_bandwidth = Some(b),
                }
            }
            "m" => {
                if let Some(m) = current.take() {
                    media.push(m);
                }
                current = Some(parse_media(value)?);
            }
            "a" => {
                let attr = parse_attribute(value);
                apply_attribute(&mut current, &mut session_attrs, attr);
            }
            _ => {
                // Unmodeled line types (i=, u=, e=, p=, k=, z=, r=) are
                // tolerated and dropped; they carry no semantics this core
                // needs and the original tokenizer accepts them too.
                log::trace!("ignoring unmodeled SDP line type '{kind}'");
            }
        }
    }
    if let Some(m) = current.take() {
        media.push(m);
    }

    Ok(SessionDescription {
        origin: origin.unwrap_or_default(),
        subject,
        timing,
        connection: session_connection,
        bandwidth: session_bandwidth,
        attributes: session_attrs,
        media,
    })
}

/// Validates `text` and counts audio/video m-lines without building the
/// full model, matching the C4 `preparse` contract.
pub fn preparse(text: &str) -> Result<(usize, usize)> {
    let sdp = parse(text)?;
    let audio = sdp
        .media
        .iter()
        .filter(|m| m.media_type == MediaType::Audio)
        .count();
    let video = sdp
        .media
        .iter()
        .filter(|m| m.media_type == MediaType::Video)
        .count();
    Ok((audio, video))
}

fn apply_attribute(
    current: &mut Option<MediaDescription>,
    session_attrs: &mut Vec<Attribute>,
    attr: Attribute,
) {
    if let Some(dir) = Direction::parse(&attr.name) {
        if let Some(m) = current.as_mut() {
            m.direction = Some(dir);
        }
        return;
    }
    if attr.name == "rtpmap" {
        if let Some(m) = current.as_mut() {
            if let Some((pt, rest)) = attr.value.as_deref().and_then(|v| v.split_once(' ')) {
                assign_payload(m, pt, |p| p.rtpmap = Some(rest.to_string()));
            }
        }
        return;
    }
    if attr.name == "fmtp" {
        if let Some(m) = current.as_mut() {
            if let Some((pt, rest)) = attr.value.as_deref().and_then(|v| v.split_once(' ')) {
                assign_payload(m, pt, |p| p.fmtp = Some(rest.to_string()));
            }
        }
        return;
    }
    match current.as_mut() {
        Some(m) => m.attributes.push(attr),
        None => session_attrs.push(attr),
    }
}

fn assign_payload(m: &mut MediaDescription, pt: &str, f: impl FnOnce(&mut PayloadType)) {
    if let Some(p) = m.payload_types.iter_mut().find(|p| p.pt == pt) {
        f(p);
    }
}

fn parse_attribute(value: &str) -> Attribute {
    match value.split_once(':') {
        Some((name, v)) => Attribute::new(name, Some(v.to_string())),
        None => Attribute::new(value, None),
    }
}

fn parse_origin(value: &str) -> Result<Origin> {
    let tok: Vec<&str> = value.split_whitespace().collect();
    if tok.len() < 6 {
        return Err(Error::InvalidSdp(format!("o= line: {value}")));
    }
    Ok(Origin {
        username: tok[0].to_string(),
        session_id: tok[1].to_string(),
        session_version: tok[2].to_string(),
        network_type: tok[3].to_string(),
        address_type: tok[4].to_string(),
        address: tok[5].to_string(),
    })
}

fn parse_timing(value: &str) -> Result<Timing> {
    let tok: Vec<&str> = value.split_whitespace().collect();
    if tok.len() < 2 {
        return Err(Error::InvalidSdp(format!("t= line: {value}")));
    }
    Ok(Timing {
        start: tok[0].parse()?,
        stop: tok[1].parse()?,
    })
}

fn parse_connection(value: &str) -> Result<Connection> {
    let tok: Vec<&str> = value.split_whitespace().collect();
    if tok.len() < 3 {
        return Err(Error::InvalidSdp(format!("c= line: {value}")));
    }
    Ok(Connection {
        network_type: tok[0].to_string(),
        address_type: tok[1].to_string(),
        address: tok[2].to_string(),
    })
}

fn parse_bandwidth(value: &str) -> Result<Bandwidth> {
    let (bwtype, bw) = value
        .split_once(':')
        .ok_or_else(|| Error::InvalidSdp(format!("b= line: {value}")))?;
    Ok(Bandwidth {
        bwtype: bwtype.to_string(),
        bandwidth: bw.parse()?,
    })
}

fn parse_media(value: &str) -> Result<MediaDescription> {
    let tok: Vec<&str> = value.split_whitespace().collect();
    if tok.len() < 3 {
        return Err(Error::InvalidSdp(format!("m= line: {value}")));
    }
    let media_type_raw = tok[0].to_string();
    let media_type = MediaType::parse(tok[0]);
    let port: u16 = tok[1]
        .split('/')
        .next()
        .unwrap_or(tok[1])
        .parse()
        .map_err(|_| Error::InvalidSdp(format!("m= port: {value}")))?;
    let proto = tok[2].to_string();
    let payload_types = tok[3..]
        .iter()
        .map(|pt| PayloadType {
            pt: pt.to_string(),
            rtpmap: None,
            fmtp: None,
        })
        .collect();
    Ok(MediaDescription {
        media_type,
        media_type_raw,
        port,
        proto,
        payload_types,
        direction: None,
        connection: None,
        bandwidth: None,
        attributes: Vec::new(),
    })
}

//! Renders a [`SessionDescription`] back to RFC 4566 text. The inverse of
//! [`crate::parser::parse`].

use crate::model::{Attribute, MediaDescription, SessionDescription};
use std::fmt::Write as _;

impl SessionDescription {
    /// Serializes this session description to SDP text, CRLF-terminated
    /// per RFC 4566, preserving line ordering of preserved attributes.
    pub fn marshal(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "v=0\r");
        let _ = writeln!(
            out,
            "o={} {} {} {} {} {}\r",
            self.origin.username,
            self.origin.session_id,
            self.origin.session_version,
            self.origin.network_type,
            self.origin.address_type,
            self.origin.address
        );
        let _ = writeln!(out, "s={}\r", self.subject.as_deref().unwrap_or("-"));
        if let Some(c) = &self.connection {
            let _ = writeln!(out, "c={} {} {}\r", c.network_type, c.address_type, c.address);
        }
        if let Some(b) = &self.bandwidth {
            let _ = writeln!(out, "b={}:{}\r", b.bwtype, b.bandwidth);
        }
        let _ = writeln!(out, "t={} {}\r", self.timing.start, self.timing.stop);
        for attr in &self.attributes {
            write_attribute(&mut out, attr);
        }
        for m in &self.media {
            write_media(&mut out, m);
        }
        out
    }
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

fn write_media(out: &mut String, m: &MediaDescription) {
    let fmts = m
        .payload_types
        .iter()
        .map(|p| p.pt.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(
        out,
        "m={} {} {} {}\r",
        m.media_type.as_str(&m.media_type_raw),
        m.port,
        m.proto,
        fmts
    );
    if let Some(c) = &m.connection {
        let _ = writeln!(out, "c={} {} {}\r", c.network_type, c.address_type, c.address);
    }
    if let Some(b) = &m.bandwidth {
        let _ = writeln!(out, "b={}:{}\r", b.bwtype, b.bandwidth);
    }
    if let Some(dir) = m.direction {
        let _ = writeln!(out, "a={}\r", dir.as_str());
    }
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
    for attr in &m.attributes {
        write_attribute(out, attr);
    }
}

//! The external collaborator interfaces of spec §6: the ICE agent, the
//! DTLS context, and the transport layer. The core depends only on these
//! narrow traits — it never owns STUN/DTLS/socket state itself.

use crate::ice::DtlsRole;

/// ICE agent collaborator: local credentials and candidate lines for a
/// stream, keyed by the stream/component ids the core already tracks in
/// [`crate::ice::IceHandle`].
pub trait IceAgent {
    /// Returns `(ufrag, pwd)` for the local side of `stream_id`.
    fn get_local_credentials(&self, stream_id: u64) -> (String, String);

    /// Returns the `a=candidate:...` lines (already CRLF-terminated) to
    /// append for `(stream_id, component_id)`.
    fn setup_candidates(&self, stream_id: u64, component_id: u32) -> String;
}

/// DTLS collaborator: the local fingerprint and the setup-role vocabulary.
pub trait DtlsContext {
    fn get_local_fingerprint(&self) -> String;

    fn role_text(&self, role: DtlsRole) -> &'static str {
        match role {
            DtlsRole::Client => "active",
            DtlsRole::Server => "passive",
        }
    }
}

/// Transport collaborator: the local IP address used in `c=`/`a=rtcp:` lines.
pub trait TransportContext {
    fn get_local_ip(&self) -> String;
}

#![warn(rust_2018_idioms)]
#![allow(dead_code)]

//! C5–C7: the SDP extractor, anonymizer, and merger, plus the ICE handle
//! data model and external collaborator traits of spec §6. Built on top of
//! the generic parser/model/writer in `rtc-sdp`.

pub mod anonymizer;
pub mod collaborators;
pub mod extractor;
pub mod ice;
pub mod merger;

pub use anonymizer::anonymize;
pub use collaborators::{DtlsContext, IceAgent, TransportContext};
pub use extractor::extract;
pub use ice::{
    CandidateTransport, CandidateType, DtlsRole, IceComponent, IceHandle, IceStream,
    RemoteCandidate,
};
pub use merger::merge;

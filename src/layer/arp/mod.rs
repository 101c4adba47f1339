//! Receiving, answering and sending ARP messages.
//!
//! The engine keeps the translation cache of RFC 826 and follows its merge
//! flag algorithm on receipt: update an existing entry first, then insert a
//! new one only when the frame was destined for a local address. Requests
//! are answered in place, reusing the inbound buffer.

mod cache;
mod endpoint;

pub use cache::{Cache, Entry, State};
pub use endpoint::Endpoint;

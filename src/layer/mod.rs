//! The protocol engines.
//!
//! Both engines consume inbound buffers fire-and-forget: every parse or
//! dispatch failure is logged and the buffer released, never propagated to
//! the caller. The single operation reporting a result is the outbound
//! [`arp::Endpoint::request`].

use core::fmt;

use crate::wire;

pub mod arp;
pub mod icmp;

/// The reason an engine dropped a packet or refused an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The resolution frame announced a hardware type other than Ethernet.
    UnsupportedHardware,
    /// The resolution frame announced a protocol type other than IPv4.
    UnsupportedProtocol,
    /// No local device owns the target protocol address.
    NotLocal,
    /// The resolution cache reached its capacity bound.
    Exhausted,
    /// The resolution operation is neither request nor reply handling.
    UnsupportedOperation,
    /// The diagnostic message type has no handler.
    UnsupportedMessage,
    /// A buffer could not be allocated or sized for transmission.
    Allocation,
    /// The device refused or failed to transmit.
    Transmit,
    /// The packet did not parse.
    Wire(wire::Error),
}

/// The result type for engine operations.
pub type Result<T> = core::result::Result<T, Error>;

impl From<wire::Error> for Error {
    fn from(err: wire::Error) -> Error {
        Error::Wire(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnsupportedHardware => write!(f, "unsupported hardware type"),
            Error::UnsupportedProtocol => write!(f, "unsupported protocol type"),
            Error::NotLocal => write!(f, "not destined for a local address"),
            Error::Exhausted => write!(f, "no free space in the resolution cache"),
            Error::UnsupportedOperation => write!(f, "unsupported operation"),
            Error::UnsupportedMessage => write!(f, "unsupported message type"),
            Error::Allocation => write!(f, "buffer allocation failed"),
            Error::Transmit => write!(f, "transmit failed"),
            Error::Wire(err) => write!(f, "{}", err),
        }
    }
}

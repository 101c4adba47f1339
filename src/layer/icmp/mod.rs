//! Receiving and answering ICMP messages.
//!
//! Echo requests are answered in place without consulting an upper layer;
//! error notifications are surfaced through the log and dropped. The engine
//! does not construct IP packets itself: replies are handed to the
//! [`IpOutput`] collaborator together with a minimal route descriptor.

mod endpoint;
#[cfg(test)]
mod tests;

pub use endpoint::Endpoint;

use crate::layer::Result;
use crate::storage::Buffer;
use crate::wire::ip;

/// Where a reply should go. Only the destination is ever populated by this
/// engine; everything else about the outbound IP packet is the collaborator's
/// business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// The destination protocol address.
    pub dst_addr: ip::v4::Address,
}

/// The IP output path.
pub trait IpOutput {
    /// Wrap the buffer's payload in an IP packet and send it along `route`.
    ///
    /// The buffer is borrowed only for the duration of the call; the
    /// implementation must not retain any reference to it beyond the call.
    fn send(&mut self, route: &Route, buffer: &mut Buffer) -> Result<()>;
}

impl<O: IpOutput> IpOutput for &'_ mut O {
    fn send(&mut self, route: &Route, buffer: &mut Buffer) -> Result<()> {
        (**self).send(route, buffer)
    }
}

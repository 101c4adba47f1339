use crate::layer::{Error, Result};
use crate::storage::Buffer;
use crate::wire::icmpv4::{self, Message};
use crate::wire::{ethernet, ip, ipv4};

use super::{IpOutput, Route};

/// The diagnostic message engine.
///
/// Stateless: each call parses, dispatches and, for echo requests, rewrites
/// the inbound buffer into the reply.
#[derive(Debug, Default)]
pub struct Endpoint {
    _private: (),
}

impl Endpoint {
    /// Create the engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one inbound diagnostic message.
    ///
    /// The buffer holds a complete Ethernet frame carrying an IPv4 packet
    /// whose protocol is ICMP; the IP demultiplexer upstream made that
    /// decision. The buffer is consumed on every path.
    ///
    /// Checksums are not validated on receipt; a corrupted echo request is
    /// answered like any other.
    pub fn receive<O: IpOutput>(&self, mut buffer: Buffer, output: &mut O) {
        if let Err(err) = self.receive_inner(&mut buffer, output) {
            net_debug!("icmp: drop: {}", err);
        }
    }

    fn receive_inner<O: IpOutput>(&self, buffer: &mut Buffer, output: &mut O) -> Result<()> {
        let (msg_type, msg_code) = {
            let frame = ethernet::frame::new_checked(buffer.payload())?;
            let packet = ipv4::packet::new_checked(frame.payload_slice())?;
            let message = icmpv4::message::new_checked(packet.payload_slice())?;
            (message.msg_type(), message.msg_code())
        };

        match msg_type {
            Message::EchoRequest => {
                self.reply(buffer, output);
                Ok(())
            }
            Message::DstUnreachable => {
                // Informational only. Something we sent was refused;
                // worth a line in the log, nothing to transmit.
                net_debug!(
                    "icmp: destination unreachable, code {}, \
                     check routes and firewall rules",
                    msg_code
                );
                Ok(())
            }
            _ => Err(Error::UnsupportedMessage),
        }
    }

    /// Turn the inbound echo request into the reply, in place, and hand it
    /// to the output path.
    fn reply<O: IpOutput>(&self, buffer: &mut Buffer, output: &mut O) {
        // Sizes and return address from the carrying header, before the
        // buffer is re-framed over the same octets.
        let (header_len, message_len, dst_addr) = {
            let frame = ethernet::frame::new_unchecked(buffer.payload());
            let packet = ipv4::packet::new_unchecked(frame.payload_slice());
            (
                packet.header_len(),
                packet.payload_slice().len(),
                packet.src_addr(),
            )
        };

        buffer.reserve(ethernet::HEADER_LEN + header_len + message_len);
        let region = buffer.push(message_len);
        let message = icmpv4::message::new_unchecked_mut(region);
        message.set_msg_type(Message::EchoReply);
        message.fill_checksum();

        buffer.set_protocol(ip::Protocol::Icmp);
        let route = Route { dst_addr };
        net_trace!("icmp: out echo reply to {}", dst_addr);

        // The buffer stays ours; the collaborator only borrows it and it is
        // released by our caller's scope whatever the outcome.
        if let Err(err) = output.send(&route, buffer) {
            net_debug!("icmp: reply not sent: {}", err);
        }
    }
}

//! As noted in RFC 826, the protocol assumes that the mapping and identities
//! of the own host are fully known to the resolver. The receive path below is
//! the packet reception algorithm of that RFC, merge flag included; the only
//! persistent state is the cache.

use crate::layer::{Error, Result};
use crate::nic::{Device, DeviceLookup};
use crate::storage::Buffer;
use crate::wire::arp::{self, Hardware, Operation};
use crate::wire::{ethernet, ip};

use super::Cache;

/// The address resolution engine.
///
/// Owns the translation cache. Methods take `&self`; the cache's internal
/// lock is the only synchronization, so concurrent receive and request calls
/// are allowed.
#[derive(Debug, Default)]
pub struct Endpoint {
    cache: Cache,
}

impl Endpoint {
    /// Create an engine with an empty cache of default capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine around a pre-configured cache.
    pub fn with_cache(cache: Cache) -> Self {
        Endpoint { cache }
    }

    /// Access the translation cache.
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Resolve a protocol address from the cache.
    ///
    /// Returns `None` for an address never observed, otherwise the most
    /// recently recorded hardware address.
    pub fn lookup(&self, addr: ip::v4::Address) -> Option<ethernet::Address> {
        self.cache.lookup(addr)
    }

    /// Process one inbound resolution frame.
    ///
    /// The buffer holds a complete Ethernet frame and is consumed: replies
    /// reuse it in place, every other outcome releases it. Failures are
    /// logged, never reported; a malformed frame must not affect the frames
    /// after it.
    pub fn receive<L: DeviceLookup>(&self, mut buffer: Buffer, devices: &mut L) {
        if let Err(err) = self.receive_inner(&mut buffer, devices) {
            net_debug!("arp: drop: {}", err);
        }
    }

    fn receive_inner<L: DeviceLookup>(&self, buffer: &mut Buffer, devices: &mut L) -> Result<()> {
        let repr = {
            let frame = ethernet::frame::new_checked(buffer.payload())?;
            let packet = arp::packet::new_checked(frame.payload_slice())?;
            arp::Repr::parse(packet)?
        };
        net_trace!("arp: in {}", repr);

        if repr.hardware != Hardware::Ethernet {
            return Err(Error::UnsupportedHardware);
        }
        if repr.protocol != ethernet::EtherType::Ipv4 {
            return Err(Error::UnsupportedProtocol);
        }

        // RFC 826 merge flag: refresh a known sender before deciding whether
        // the frame concerns us at all.
        let merged = self.cache.merge(
            repr.hardware,
            repr.source_protocol_addr,
            repr.source_hardware_addr,
        );

        let device = devices
            .by_protocol_addr(repr.target_protocol_addr)
            .ok_or(Error::NotLocal)?;

        if !merged {
            // Not atomic with the merge above: a racing receiver for the same
            // sender may insert a duplicate. Accepted, see the cache docs.
            self.cache.insert(
                repr.hardware,
                repr.source_protocol_addr,
                repr.source_hardware_addr,
            )?;
        }

        match repr.operation {
            Operation::Request => {
                self.reply(buffer, &repr, device);
                Ok(())
            }
            _ => Err(Error::UnsupportedOperation),
        }
    }

    /// Answer a request in place and transmit to the requester.
    ///
    /// Fire-and-forget: the receive path has already committed to handling
    /// this frame, so a transmit failure is only logged.
    fn reply<D: Device>(&self, buffer: &mut Buffer, request: &arp::Repr, device: &mut D) {
        let answer = arp::Repr {
            operation: Operation::Reply,
            source_hardware_addr: device.hardware_addr(),
            source_protocol_addr: device.protocol_addr(),
            target_hardware_addr: request.source_hardware_addr,
            target_protocol_addr: request.source_protocol_addr,
            ..*request
        };

        buffer.reserve(ethernet::HEADER_LEN + arp::PACKET_LEN);
        let region = buffer.push(arp::PACKET_LEN);
        answer.emit(arp::packet::new_unchecked_mut(region));
        net_trace!("arp: out {}", answer);

        if let Err(err) = device.transmit(buffer, answer.target_hardware_addr, ethernet::EtherType::Arp) {
            net_debug!("arp: reply not sent: {}", err);
        }
    }

    /// Send a resolution request for `target` out of `device`.
    ///
    /// The request is broadcast; the sender fields name the device. This is
    /// the one operation whose failure the caller learns about, since the
    /// caller is waiting to transmit something of its own.
    pub fn request<D: Device>(
        &self,
        source: ip::v4::Address,
        target: ip::v4::Address,
        device: &mut D,
    ) -> Result<()> {
        let mut buffer = Buffer::new(ethernet::HEADER_LEN + arp::PACKET_LEN);
        buffer.reserve(ethernet::HEADER_LEN + arp::PACKET_LEN);

        let query = arp::Repr {
            hardware: Hardware::Ethernet,
            protocol: ethernet::EtherType::Ipv4,
            hardware_len: device.addr_len(),
            protocol_len: 4,
            operation: Operation::Request,
            source_hardware_addr: device.hardware_addr(),
            source_protocol_addr: source,
            target_hardware_addr: ethernet::Address::BROADCAST,
            target_protocol_addr: target,
        };

        let region = buffer.push(arp::PACKET_LEN);
        query.emit(arp::packet::new_unchecked_mut(region));
        net_trace!("arp: out {}", query);

        // The buffer is released when this call returns, sent or not.
        device.transmit(&mut buffer, ethernet::Address::BROADCAST, ethernet::EtherType::Arp)
    }
}

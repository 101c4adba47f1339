//! Encapsulates a network device.
//!
//! The protocol engines only see devices through the [`Device`] trait: a
//! hardware and a protocol address, and a transmit operation that takes care
//! of link framing. [`DeviceLookup`] answers the question "which local device
//! owns this protocol address", used by the resolution engine to decide
//! whether an inbound request is destined for us.
//!
//! [`SoftDevice`] is a software implementation that records what it would
//! have sent; the layer tests run against it.

use crate::layer::{Error, Result};
use crate::storage::Buffer;
use crate::wire::{ethernet, ip};

/// A layer 2 device.
pub trait Device {
    /// The hardware address of this device.
    fn hardware_addr(&self) -> ethernet::Address;

    /// The protocol address assigned to this device.
    fn protocol_addr(&self) -> ip::v4::Address;

    /// The width of the hardware address, in octets.
    fn addr_len(&self) -> u8 {
        6
    }

    /// Frame the buffer's payload and queue it for transmission.
    ///
    /// The device prepends its own link header in front of the payload; the
    /// buffer is borrowed only for the duration of the call and stays with
    /// the caller, who releases it regardless of the outcome.
    fn transmit(
        &mut self,
        buffer: &mut Buffer,
        dst: ethernet::Address,
        ethertype: ethernet::EtherType,
    ) -> Result<()>;
}

/// Resolves a protocol address to the local device owning it.
pub trait DeviceLookup {
    /// The device type produced by a successful lookup.
    type Device: Device;

    /// Return the local device whose protocol address equals `addr`.
    fn by_protocol_addr(&mut self, addr: ip::v4::Address) -> Option<&mut Self::Device>;
}

impl<L: DeviceLookup> DeviceLookup for &'_ mut L {
    type Device = L::Device;

    fn by_protocol_addr(&mut self, addr: ip::v4::Address) -> Option<&mut Self::Device> {
        (**self).by_protocol_addr(addr)
    }
}

impl<D: Device> DeviceLookup for Vec<D> {
    type Device = D;

    fn by_protocol_addr(&mut self, addr: ip::v4::Address) -> Option<&mut D> {
        self.iter_mut().find(|device| device.protocol_addr() == addr)
    }
}

/// A software device that records every frame it is asked to transmit.
#[derive(Debug)]
pub struct SoftDevice {
    hardware_addr: ethernet::Address,
    protocol_addr: ip::v4::Address,
    transmitted: Vec<Vec<u8>>,
    broken: bool,
}

impl SoftDevice {
    /// Create a device with the given addresses.
    pub fn new(hardware_addr: ethernet::Address, protocol_addr: ip::v4::Address) -> Self {
        SoftDevice {
            hardware_addr,
            protocol_addr,
            transmitted: Vec::new(),
            broken: false,
        }
    }

    /// The complete frames handed to `transmit` so far, oldest first.
    pub fn transmitted(&self) -> &[Vec<u8>] {
        &self.transmitted
    }

    /// Remove and return the recorded frames.
    pub fn take_transmitted(&mut self) -> Vec<Vec<u8>> {
        core::mem::take(&mut self.transmitted)
    }

    /// Make every subsequent transmit fail, to exercise error paths.
    pub fn set_broken(&mut self, broken: bool) {
        self.broken = broken;
    }
}

impl Device for SoftDevice {
    fn hardware_addr(&self) -> ethernet::Address {
        self.hardware_addr
    }

    fn protocol_addr(&self) -> ip::v4::Address {
        self.protocol_addr
    }

    fn transmit(
        &mut self,
        buffer: &mut Buffer,
        dst: ethernet::Address,
        ethertype: ethernet::EtherType,
    ) -> Result<()> {
        if self.broken {
            return Err(Error::Transmit);
        }

        {
            let region = buffer.push(ethernet::HEADER_LEN);
            let header = ethernet::frame::new_unchecked_mut(region);
            header.set_dst_addr(dst);
            header.set_src_addr(self.hardware_addr);
            header.set_ethertype(ethertype);
        }
        self.transmitted.push(buffer.payload().to_vec());
        Ok(())
    }
}

impl DeviceLookup for SoftDevice {
    type Device = SoftDevice;

    fn by_protocol_addr(&mut self, addr: ip::v4::Address) -> Option<&mut SoftDevice> {
        if self.protocol_addr == addr {
            Some(self)
        } else {
            None
        }
    }
}

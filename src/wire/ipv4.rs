//! A minimal view of the IPv4 header.
//!
//! The diagnostic engine only needs enough of the carrying packet to locate
//! the message inside it and to learn the return address; header options are
//! skipped over, never interpreted, and nothing here supports constructing an
//! IPv4 packet. The full output path is a collaborator of this crate.

use byteorder::{ByteOrder, NetworkEndian};

use crate::wire::ip;
use crate::wire::{Error, Result};

byte_wrapper! {
    /// A byte sequence representing an IPv4 packet.
    #[derive(Debug, PartialEq, Eq)]
    pub struct packet([u8]);
}

mod field {
    use crate::wire::field::*;

    pub(crate) const VER_IHL:  usize = 0;
    pub(crate) const LENGTH:   Field = 2..4;
    pub(crate) const PROTOCOL: usize = 9;
    pub(crate) const SRC_ADDR: Field = 12..16;
    pub(crate) const DST_ADDR: Field = 16..20;
}

/// The length of an IPv4 header without options.
pub const MIN_HEADER_LEN: usize = 20;

impl packet {
    /// Imbue a raw octet buffer with IPv4 packet structure.
    pub fn new_unchecked(data: &[u8]) -> &Self {
        Self::__from_macro_new_unchecked(data)
    }

    /// Check the version, length fields and buffer length for consistency.
    ///
    /// After this check the payload accessors will not panic and the total
    /// length field can be trusted for in-place reply construction.
    pub fn new_checked(data: &[u8]) -> Result<&Self> {
        let pkt = Self::new_unchecked(data);
        pkt.check_len()?;
        Ok(pkt)
    }

    /// Unwrap the packet as a raw byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Ensure that no accessor method will panic if called.
    ///
    /// Verifies that the buffer covers the header including options and the
    /// full length announced by the total length field, and that the version
    /// field denotes IPv4.
    pub fn check_len(&self) -> Result<()> {
        if self.0.len() < MIN_HEADER_LEN {
            return Err(Error::Truncated);
        }
        if self.version() != 4 {
            return Err(Error::Malformed);
        }
        let header_len = self.header_len();
        let total_len = self.total_len() as usize;
        if header_len < MIN_HEADER_LEN || total_len < header_len {
            return Err(Error::Malformed);
        }
        if total_len > self.0.len() {
            return Err(Error::Truncated);
        }
        Ok(())
    }

    /// Return the version field.
    pub fn version(&self) -> u8 {
        self.0[field::VER_IHL] >> 4
    }

    /// Return the header length, in octets.
    pub fn header_len(&self) -> usize {
        ((self.0[field::VER_IHL] & 0x0f) as usize) * 4
    }

    /// Return the total length field: header plus payload, in octets.
    pub fn total_len(&self) -> u16 {
        NetworkEndian::read_u16(&self.0[field::LENGTH])
    }

    /// Return the protocol field.
    pub fn protocol(&self) -> ip::Protocol {
        ip::Protocol::from(self.0[field::PROTOCOL])
    }

    /// Return the source address field.
    pub fn src_addr(&self) -> ip::v4::Address {
        ip::v4::Address::from_bytes(&self.0[field::SRC_ADDR])
    }

    /// Return the destination address field.
    pub fn dst_addr(&self) -> ip::v4::Address {
        ip::v4::Address::from_bytes(&self.0[field::DST_ADDR])
    }

    /// Return the payload as a byte slice: the octets between the end of the
    /// header (including options) and the announced total length.
    ///
    /// Link-layer padding past the total length is excluded.
    pub fn payload_slice(&self) -> &[u8] {
        &self.0[self.header_len()..self.total_len() as usize]
    }
}

impl AsRef<[u8]> for packet {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

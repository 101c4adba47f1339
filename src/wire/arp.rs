use core::fmt;
use byteorder::{ByteOrder, NetworkEndian};

use crate::wire::ethernet;
use crate::wire::ip;
use crate::wire::{Error, Result};

enum_with_unknown! {
    /// ARP hardware type.
    pub enum Hardware(u16) {
        Ethernet = 1,
    }
}

enum_with_unknown! {
    /// ARP operation type.
    pub enum Operation(u16) {
        Request = 1,
        Reply = 2,
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operation::Request => write!(f, "request"),
            Operation::Reply => write!(f, "reply"),
            Operation::Unknown(id) => write!(f, "op {}", id),
        }
    }
}

byte_wrapper! {
    /// A byte sequence representing an ARP packet for Ethernet and IPv4.
    ///
    /// The address fields have the fixed widths of that pairing; frames
    /// announcing other combinations in their length fields still parse, and
    /// are rejected by the resolution engine rather than here.
    #[derive(Debug, PartialEq, Eq)]
    pub struct packet([u8]);
}

mod field {
    use crate::wire::field::*;

    pub(crate) const HTYPE: Field = 0..2;
    pub(crate) const PTYPE: Field = 2..4;
    pub(crate) const HLEN:  usize = 4;
    pub(crate) const PLEN:  usize = 5;
    pub(crate) const OPER:  Field = 6..8;
    pub(crate) const SHA:   Field = 8..14;
    pub(crate) const SPA:   Field = 14..18;
    pub(crate) const THA:   Field = 18..24;
    pub(crate) const TPA:   Field = 24..28;
}

/// The length of an ARP packet carrying Ethernet and IPv4 addresses.
pub const PACKET_LEN: usize = field::TPA.end;

impl packet {
    /// Imbue a raw octet buffer with ARP packet structure.
    pub fn new_unchecked(data: &[u8]) -> &Self {
        Self::__from_macro_new_unchecked(data)
    }

    /// Imbue a mutable octet buffer with ARP packet structure.
    pub fn new_unchecked_mut(data: &mut [u8]) -> &mut Self {
        Self::__from_macro_new_unchecked_mut(data)
    }

    pub fn new_checked(data: &[u8]) -> Result<&Self> {
        Self::new_unchecked(data).check_len()?;
        Ok(Self::new_unchecked(data))
    }

    /// Unwrap the packet as a raw byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Ensure that no accessor method will panic if called.
    /// Returns `Err(Error::Truncated)` if the buffer is too short.
    pub fn check_len(&self) -> Result<()> {
        if self.0.len() < field::TPA.end {
            Err(Error::Truncated)
        } else {
            Ok(())
        }
    }

    /// Return the hardware type field.
    pub fn hardware_type(&self) -> Hardware {
        Hardware::from(NetworkEndian::read_u16(&self.0[field::HTYPE]))
    }

    /// Return the protocol type field.
    pub fn protocol_type(&self) -> ethernet::EtherType {
        ethernet::EtherType::from(NetworkEndian::read_u16(&self.0[field::PTYPE]))
    }

    /// Return the hardware address length field.
    pub fn hardware_len(&self) -> u8 {
        self.0[field::HLEN]
    }

    /// Return the protocol address length field.
    pub fn protocol_len(&self) -> u8 {
        self.0[field::PLEN]
    }

    /// Return the operation field.
    pub fn operation(&self) -> Operation {
        Operation::from(NetworkEndian::read_u16(&self.0[field::OPER]))
    }

    /// Return the source hardware address field.
    pub fn source_hardware_addr(&self) -> ethernet::Address {
        ethernet::Address::from_bytes(&self.0[field::SHA])
    }

    /// Return the source protocol address field.
    pub fn source_protocol_addr(&self) -> ip::v4::Address {
        ip::v4::Address::from_bytes(&self.0[field::SPA])
    }

    /// Return the target hardware address field.
    pub fn target_hardware_addr(&self) -> ethernet::Address {
        ethernet::Address::from_bytes(&self.0[field::THA])
    }

    /// Return the target protocol address field.
    pub fn target_protocol_addr(&self) -> ip::v4::Address {
        ip::v4::Address::from_bytes(&self.0[field::TPA])
    }

    /// Set the hardware type field.
    pub fn set_hardware_type(&mut self, value: Hardware) {
        NetworkEndian::write_u16(&mut self.0[field::HTYPE], value.into())
    }

    /// Set the protocol type field.
    pub fn set_protocol_type(&mut self, value: ethernet::EtherType) {
        NetworkEndian::write_u16(&mut self.0[field::PTYPE], value.into())
    }

    /// Set the hardware address length field.
    pub fn set_hardware_len(&mut self, value: u8) {
        self.0[field::HLEN] = value
    }

    /// Set the protocol address length field.
    pub fn set_protocol_len(&mut self, value: u8) {
        self.0[field::PLEN] = value
    }

    /// Set the operation field.
    pub fn set_operation(&mut self, value: Operation) {
        NetworkEndian::write_u16(&mut self.0[field::OPER], value.into())
    }

    /// Set the source hardware address field.
    pub fn set_source_hardware_addr(&mut self, value: ethernet::Address) {
        self.0[field::SHA].copy_from_slice(value.as_bytes())
    }

    /// Set the source protocol address field.
    pub fn set_source_protocol_addr(&mut self, value: ip::v4::Address) {
        self.0[field::SPA].copy_from_slice(value.as_bytes())
    }

    /// Set the target hardware address field.
    pub fn set_target_hardware_addr(&mut self, value: ethernet::Address) {
        self.0[field::THA].copy_from_slice(value.as_bytes())
    }

    /// Set the target protocol address field.
    pub fn set_target_protocol_addr(&mut self, value: ip::v4::Address) {
        self.0[field::TPA].copy_from_slice(value.as_bytes())
    }
}

impl AsRef<[u8]> for packet {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsMut<[u8]> for packet {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

/// A high-level representation of an ARP packet.
///
/// The hardware and protocol type fields are carried through unchecked so
/// that the engine can decide how to report an unsupported pairing.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Repr {
    pub hardware: Hardware,
    pub protocol: ethernet::EtherType,
    pub hardware_len: u8,
    pub protocol_len: u8,
    pub operation: Operation,
    pub source_hardware_addr: ethernet::Address,
    pub source_protocol_addr: ip::v4::Address,
    pub target_hardware_addr: ethernet::Address,
    pub target_protocol_addr: ip::v4::Address,
}

impl Repr {
    /// Parse an ARP packet and return a high-level representation.
    pub fn parse(pkt: &packet) -> Result<Repr> {
        pkt.check_len()?;
        Ok(Repr {
            hardware: pkt.hardware_type(),
            protocol: pkt.protocol_type(),
            hardware_len: pkt.hardware_len(),
            protocol_len: pkt.protocol_len(),
            operation: pkt.operation(),
            source_hardware_addr: pkt.source_hardware_addr(),
            source_protocol_addr: pkt.source_protocol_addr(),
            target_hardware_addr: pkt.target_hardware_addr(),
            target_protocol_addr: pkt.target_protocol_addr(),
        })
    }

    /// Return the length of a buffer required to emit this representation.
    pub fn buffer_len(&self) -> usize {
        field::TPA.end
    }

    /// Emit a high-level representation into an ARP packet.
    pub fn emit(&self, pkt: &mut packet) {
        pkt.set_hardware_type(self.hardware);
        pkt.set_protocol_type(self.protocol);
        pkt.set_hardware_len(self.hardware_len);
        pkt.set_protocol_len(self.protocol_len);
        pkt.set_operation(self.operation);
        pkt.set_source_hardware_addr(self.source_hardware_addr);
        pkt.set_source_protocol_addr(self.source_protocol_addr);
        pkt.set_target_hardware_addr(self.target_hardware_addr);
        pkt.set_target_protocol_addr(self.target_protocol_addr);
    }
}

impl fmt::Display for Repr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ARP {} source={}/{} target={}/{}",
               self.operation,
               self.source_hardware_addr, self.source_protocol_addr,
               self.target_hardware_addr, self.target_protocol_addr)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    static PACKET_BYTES: [u8; 28] =
        [0x00, 0x01,
         0x08, 0x00,
         0x06, 0x04,
         0x00, 0x01,
         0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
         0x0a, 0x00, 0x00, 0x05,
         0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
         0x0a, 0x00, 0x00, 0x01];

    fn packet_repr() -> Repr {
        Repr {
            hardware: Hardware::Ethernet,
            protocol: ethernet::EtherType::Ipv4,
            hardware_len: 6,
            protocol_len: 4,
            operation: Operation::Request,
            source_hardware_addr:
                ethernet::Address([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]),
            source_protocol_addr: ip::v4::Address::new(10, 0, 0, 5),
            target_hardware_addr: ethernet::Address([0; 6]),
            target_protocol_addr: ip::v4::Address::new(10, 0, 0, 1),
        }
    }

    #[test]
    fn deconstruct() {
        let pkt = packet::new_checked(&PACKET_BYTES[..]).unwrap();
        assert_eq!(pkt.hardware_type(), Hardware::Ethernet);
        assert_eq!(pkt.protocol_type(), ethernet::EtherType::Ipv4);
        assert_eq!(pkt.hardware_len(), 6);
        assert_eq!(pkt.protocol_len(), 4);
        assert_eq!(pkt.operation(), Operation::Request);
        assert_eq!(pkt.source_hardware_addr(),
                   ethernet::Address([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]));
        assert_eq!(pkt.source_protocol_addr(), ip::v4::Address::new(10, 0, 0, 5));
        assert_eq!(pkt.target_hardware_addr(), ethernet::Address([0; 6]));
        assert_eq!(pkt.target_protocol_addr(), ip::v4::Address::new(10, 0, 0, 1));
    }

    #[test]
    fn parse() {
        let pkt = packet::new_checked(&PACKET_BYTES[..]).unwrap();
        assert_eq!(Repr::parse(pkt).unwrap(), packet_repr());
    }

    #[test]
    fn emit() {
        let mut bytes = vec![0xa5; 28];
        let pkt = packet::new_unchecked_mut(&mut bytes);
        packet_repr().emit(pkt);
        assert_eq!(pkt.as_bytes(), &PACKET_BYTES[..]);
    }

    #[test]
    fn truncated() {
        assert_eq!(packet::new_checked(&PACKET_BYTES[..27]).err(),
                   Some(Error::Truncated));
    }

    #[test]
    fn unknown_types_survive_parse() {
        let mut bytes = PACKET_BYTES;
        bytes[1] = 0x06;
        bytes[3] = 0xdd;
        let pkt = packet::new_checked(&bytes[..]).unwrap();
        let repr = Repr::parse(pkt).unwrap();
        assert_eq!(repr.hardware, Hardware::Unknown(6));
        assert_eq!(repr.protocol, ethernet::EtherType::Unknown(0x08dd));
    }
}

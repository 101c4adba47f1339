use core::fmt;
use byteorder::{ByteOrder, NetworkEndian};

use crate::wire::ip::checksum;
use crate::wire::{Error, Result};

enum_with_unknown! {
    /// Internet protocol control message type.
    pub doc enum Message(u8) {
        /// Echo reply
        EchoReply      = 0,
        /// Destination unreachable
        DstUnreachable = 3,
        /// Echo request
        EchoRequest    = 8,
        /// Time exceeded
        TimeExceeded   = 11,
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Message::EchoReply => write!(f, "echo reply"),
            Message::DstUnreachable => write!(f, "destination unreachable"),
            Message::EchoRequest => write!(f, "echo request"),
            Message::TimeExceeded => write!(f, "time exceeded"),
            Message::Unknown(id) => write!(f, "type {}", id),
        }
    }
}

byte_wrapper! {
    /// A byte sequence representing an ICMPv4 message.
    ///
    /// Everything past the common type/code/checksum prefix is treated as an
    /// opaque payload; echo identifier and sequence number are part of it and
    /// are echoed verbatim by the diagnostic engine.
    #[derive(Debug, PartialEq, Eq)]
    pub struct message([u8]);
}

mod field {
    use crate::wire::field::*;

    pub(crate) const TYPE:     usize = 0;
    pub(crate) const CODE:     usize = 1;
    pub(crate) const CHECKSUM: Field = 2..4;

    pub(crate) const PAYLOAD:  Rest  = 4..;
}

/// The length of the common ICMPv4 message prefix.
pub const HEADER_LEN: usize = field::PAYLOAD.start;

impl message {
    /// Imbue a raw octet buffer with ICMPv4 message structure.
    pub fn new_unchecked(data: &[u8]) -> &Self {
        Self::__from_macro_new_unchecked(data)
    }

    /// Imbue a mutable octet buffer with ICMPv4 message structure.
    pub fn new_unchecked_mut(data: &mut [u8]) -> &mut Self {
        Self::__from_macro_new_unchecked_mut(data)
    }

    pub fn new_checked(data: &[u8]) -> Result<&Self> {
        Self::new_unchecked(data).check_len()?;
        Ok(Self::new_unchecked(data))
    }

    /// Unwrap the message as a raw byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Ensure that no accessor method will panic if called.
    /// Returns `Err(Error::Truncated)` if the buffer is too short.
    pub fn check_len(&self) -> Result<()> {
        if self.0.len() < field::PAYLOAD.start {
            Err(Error::Truncated)
        } else {
            Ok(())
        }
    }

    /// Return the message type field.
    pub fn msg_type(&self) -> Message {
        Message::from(self.0[field::TYPE])
    }

    /// Return the message code field.
    pub fn msg_code(&self) -> u8 {
        self.0[field::CODE]
    }

    /// Return the checksum field.
    pub fn checksum(&self) -> u16 {
        NetworkEndian::read_u16(&self.0[field::CHECKSUM])
    }

    /// Set the message type field.
    pub fn set_msg_type(&mut self, value: Message) {
        self.0[field::TYPE] = value.into();
    }

    /// Set the message code field.
    pub fn set_msg_code(&mut self, value: u8) {
        self.0[field::CODE] = value;
    }

    /// Set the checksum field.
    pub fn set_checksum(&mut self, value: u16) {
        NetworkEndian::write_u16(&mut self.0[field::CHECKSUM], value);
    }

    /// Validate the checksum over the whole message.
    pub fn verify_checksum(&self) -> bool {
        checksum::data(&self.0) == !0
    }

    /// Compute and fill in the checksum over the whole message.
    ///
    /// The checksum field is zeroed for the duration of the computation and
    /// the accumulator starts at zero.
    pub fn fill_checksum(&mut self) {
        self.set_checksum(0);
        let checksum = !checksum::data(&self.0);
        self.set_checksum(checksum);
    }

    /// Return the payload as a byte slice.
    pub fn payload_slice(&self) -> &[u8] {
        &self.0[field::PAYLOAD]
    }

    /// Return the payload as a mutable byte slice.
    pub fn payload_mut_slice(&mut self) -> &mut [u8] {
        &mut self.0[field::PAYLOAD]
    }
}

impl AsRef<[u8]> for message {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsMut<[u8]> for message {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    // An echo request with ident 0x1234, sequence 0xabcd and four octets of
    // data, checksum filled in.
    static ECHO_BYTES: [u8; 12] =
        [0x08, 0x00, 0x8e, 0xfe,
         0x12, 0x34, 0xab, 0xcd,
         0xaa, 0x00, 0x00, 0xff];

    #[test]
    fn deconstruct() {
        let msg = message::new_checked(&ECHO_BYTES[..]).unwrap();
        assert_eq!(msg.msg_type(), Message::EchoRequest);
        assert_eq!(msg.msg_code(), 0);
        assert_eq!(msg.checksum(), 0x8efe);
        assert_eq!(msg.payload_slice(), &ECHO_BYTES[4..]);
        assert!(msg.verify_checksum());
    }

    #[test]
    fn construct() {
        let mut bytes = vec![0xa5; 12];
        let msg = message::new_unchecked_mut(&mut bytes);
        msg.set_msg_type(Message::EchoRequest);
        msg.set_msg_code(0);
        msg.payload_mut_slice().copy_from_slice(&ECHO_BYTES[4..]);
        msg.fill_checksum();
        assert_eq!(msg.as_bytes(), &ECHO_BYTES[..]);
    }

    #[test]
    fn corrupted_checksum() {
        let mut bytes = ECHO_BYTES;
        bytes[8] ^= 0x01;
        let msg = message::new_checked(&bytes[..]).unwrap();
        assert!(!msg.verify_checksum());
    }

    #[test]
    fn truncated() {
        assert_eq!(message::new_checked(&ECHO_BYTES[..3]).err(),
                   Some(Error::Truncated));
    }
}

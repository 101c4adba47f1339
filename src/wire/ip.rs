use core::fmt;

enum_with_unknown! {
    /// The protocol carried inside an IP packet.
    pub enum Protocol(u8) {
        Icmp = 1,
        Tcp  = 6,
        Udp  = 17,
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Protocol::Icmp => write!(f, "ICMP"),
            Protocol::Tcp => write!(f, "TCP"),
            Protocol::Udp => write!(f, "UDP"),
            Protocol::Unknown(id) => write!(f, "0x{:02x}", id),
        }
    }
}

/// IPv4 specific items.
pub mod v4 {
    use core::fmt;

    /// A four-octet IPv4 address.
    ///
    /// Stored in the order the octets appear on the wire; the numeric value
    /// is only materialized through [`to_u32`]/[`from_u32`] at the caller's
    /// request.
    ///
    /// [`to_u32`]: #method.to_u32
    /// [`from_u32`]: #method.from_u32
    #[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
    pub struct Address(pub [u8; 4]);

    impl Address {
        /// The broadcast address.
        pub const BROADCAST: Address = Address([0xff; 4]);

        /// Construct an IPv4 address from its four octets, most significant
        /// first.
        pub const fn new(a0: u8, a1: u8, a2: u8, a3: u8) -> Address {
            Address([a0, a1, a2, a3])
        }

        /// Construct an IPv4 address from a sequence of octets, in big-endian.
        ///
        /// # Panics
        /// The function panics if `data` is not four octets long.
        pub fn from_bytes(data: &[u8]) -> Address {
            let mut bytes = [0; 4];
            bytes.copy_from_slice(data);
            Address(bytes)
        }

        /// Construct an IPv4 address from a host-order integer.
        pub fn from_u32(value: u32) -> Address {
            Address(value.to_be_bytes())
        }

        /// Return the address as a host-order integer.
        pub fn to_u32(self) -> u32 {
            u32::from_be_bytes(self.0)
        }

        /// Return the address as a sequence of octets, in big-endian.
        pub fn as_bytes(&self) -> &[u8] {
            &self.0
        }

        /// Query whether the address is the limited broadcast address.
        pub fn is_broadcast(&self) -> bool {
            *self == Self::BROADCAST
        }

        /// Query whether the address is a multicast address.
        pub fn is_multicast(&self) -> bool {
            self.0[0] & 0xf0 == 0xe0
        }

        /// Query whether the address is an unicast address.
        pub fn is_unicast(&self) -> bool {
            !(self.is_broadcast() || self.is_multicast())
        }
    }

    impl fmt::Display for Address {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            let bytes = self.0;
            write!(f, "{}.{}.{}.{}", bytes[0], bytes[1], bytes[2], bytes[3])
        }
    }

    #[cfg(test)]
    mod test {
        use super::*;

        #[test]
        fn octet_order() {
            let addr = Address::new(10, 0, 0, 1);
            assert_eq!(addr.to_u32(), 0x0a000001);
            assert_eq!(Address::from_u32(0x0a000001), addr);
            assert_eq!(addr.as_bytes(), &[10, 0, 0, 1]);
        }

        #[test]
        fn classification() {
            assert!(Address::BROADCAST.is_broadcast());
            assert!(!Address::BROADCAST.is_unicast());
            assert!(Address::new(224, 0, 0, 1).is_multicast());
            assert!(Address::new(10, 0, 0, 1).is_unicast());
        }
    }
}

pub(crate) mod checksum {
    use byteorder::{ByteOrder, NetworkEndian};

    fn propagate_carries(word: u32) -> u16 {
        let sum = (word >> 16) + (word & 0xffff);
        ((sum >> 16) as u16) + (sum as u16)
    }

    /// Compute an RFC 1071 compliant checksum (without the final complement).
    ///
    /// The accumulator starts at zero.
    pub(crate) fn data(mut data: &[u8]) -> u16 {
        let mut accum = 0;

        while data.len() >= 2 {
            accum += NetworkEndian::read_u16(data) as u32;
            data = &data[2..];
        }

        // Add the last remaining odd byte, if any.
        if let Some(&value) = data.first() {
            accum += (value as u32) << 8;
        }

        propagate_carries(accum)
    }

    #[cfg(test)]
    mod test {
        use super::*;

        #[test]
        fn rfc1071_example() {
            // The running example from RFC 1071 §3.
            let bytes = [0x00, 0x01, 0xf2, 0x03, 0xf4, 0xf5, 0xf6, 0xf7];
            assert_eq!(data(&bytes), 0xddf2);
        }

        #[test]
        fn odd_length() {
            assert_eq!(data(&[0x12]), 0x1200);
            assert_eq!(data(&[0x12, 0x34, 0x56]), 0x1234 + 0x5600);
        }
    }
}

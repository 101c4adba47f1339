use crate::wire::ip;

/// An owned byte region holding one packet, with headroom discipline.
///
/// The buffer keeps a data offset and a data end into its storage.
/// [`reserve`] places both at an absolute position, leaving room in front for
/// headers and an empty payload; [`push`] moves the offset back towards the
/// start and exposes the newly covered region so a header can be written in
/// front of the current payload. Replies are built by reserving past the end
/// of the inbound message and re-pushing the same region in place, without
/// fresh allocation. Because [`reserve`] resets the data end, octets beyond
/// the reserved position, such as link-layer padding on a received frame,
/// never leak into a reply.
///
/// [`reserve`]: #method.reserve
/// [`push`]: #method.push
#[derive(Debug)]
pub struct Buffer {
    storage: Vec<u8>,
    head: usize,
    tail: usize,
    protocol: Option<ip::Protocol>,
}

impl Buffer {
    /// Allocate a zeroed buffer of `size` octets with the data offset at the
    /// start.
    pub fn new(size: usize) -> Self {
        Buffer {
            storage: vec![0; size],
            head: 0,
            tail: size,
            protocol: None,
        }
    }

    /// Take over a received frame; the payload covers the whole storage.
    pub fn from_vec(storage: Vec<u8>) -> Self {
        let tail = storage.len();
        Buffer {
            storage,
            head: 0,
            tail,
            protocol: None,
        }
    }

    /// Place both the data offset and the data end `headroom` octets from the
    /// start of storage, leaving the payload empty.
    ///
    /// # Panics
    /// Panics if `headroom` exceeds the storage size.
    pub fn reserve(&mut self, headroom: usize) {
        assert!(headroom <= self.storage.len());
        self.head = headroom;
        self.tail = headroom;
    }

    /// Move the data offset back by `len` octets and return the region now in
    /// front of the previous payload.
    ///
    /// # Panics
    /// Panics if `len` exceeds the available headroom.
    pub fn push(&mut self, len: usize) -> &mut [u8] {
        assert!(len <= self.head);
        self.head -= len;
        &mut self.storage[self.head..][..len]
    }

    /// Return the octets between the data offset and the data end.
    pub fn payload(&self) -> &[u8] {
        &self.storage[self.head..self.tail]
    }

    /// Return the octets between the data offset and the data end, mutably.
    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.storage[self.head..self.tail]
    }

    /// The number of octets in the current payload.
    pub fn len(&self) -> usize {
        self.tail - self.head
    }

    /// Whether the current payload is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The protocol this buffer was tagged with, if any.
    pub fn protocol(&self) -> Option<ip::Protocol> {
        self.protocol
    }

    /// Tag the buffer with the protocol it carries, for the output path.
    pub fn set_protocol(&mut self, protocol: ip::Protocol) {
        self.protocol = Some(protocol);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reserve_then_push() {
        let mut buffer = Buffer::new(42);
        buffer.reserve(42);
        assert!(buffer.is_empty());

        {
            let region = buffer.push(28);
            assert_eq!(region.len(), 28);
            region[0] = 0xab;
        }
        assert_eq!(buffer.len(), 28);
        assert_eq!(buffer.payload()[0], 0xab);

        buffer.push(14);
        assert_eq!(buffer.len(), 42);
    }

    #[test]
    fn reuse_in_place() {
        // An inbound frame re-framed for a reply exposes the same octets.
        let mut buffer = Buffer::from_vec((0..42).collect());
        buffer.reserve(42);
        let region = buffer.push(28);
        assert_eq!(region[0], 14);
        assert_eq!(region[27], 41);
    }

    #[test]
    fn reserve_drops_trailing_octets() {
        // A short frame padded to the medium's minimum by the link layer.
        let mut buffer = Buffer::from_vec(vec![0xff; 60]);
        assert_eq!(buffer.len(), 60);

        buffer.reserve(42);
        buffer.push(42);
        assert_eq!(buffer.len(), 42);
    }

    #[test]
    #[should_panic]
    fn push_past_headroom() {
        let mut buffer = Buffer::new(16);
        buffer.reserve(8);
        buffer.push(9);
    }

    #[test]
    fn protocol_tag() {
        let mut buffer = Buffer::new(4);
        assert_eq!(buffer.protocol(), None);
        buffer.set_protocol(ip::Protocol::Icmp);
        assert_eq!(buffer.protocol(), Some(ip::Protocol::Icmp));
    }
}

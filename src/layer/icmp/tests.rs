use byteorder::{ByteOrder, NetworkEndian};

use crate::layer::{Error, Result};
use crate::storage::Buffer;
use crate::wire::icmpv4::{self, Message};
use crate::wire::{ethernet, ip};

use super::{Endpoint, IpOutput, Route};

const MAC_ADDR_HOST: ethernet::Address =
    ethernet::Address([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
const MAC_ADDR_OTHER: ethernet::Address =
    ethernet::Address([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
const IP_ADDR_HOST: ip::v4::Address = ip::v4::Address::new(10, 0, 0, 1);
const IP_ADDR_OTHER: ip::v4::Address = ip::v4::Address::new(10, 0, 0, 5);

/// Records everything handed to the output path.
#[derive(Debug, Default)]
struct Sink {
    sent: Vec<(Route, Option<ip::Protocol>, Vec<u8>)>,
    broken: bool,
}

impl IpOutput for Sink {
    fn send(&mut self, route: &Route, buffer: &mut Buffer) -> Result<()> {
        if self.broken {
            return Err(Error::Transmit);
        }
        self.sent
            .push((*route, buffer.protocol(), buffer.payload().to_vec()));
        Ok(())
    }
}

/// Build an inbound frame around one control message with `ip_header_len`
/// octets of IPv4 header and the message body after the four octet prefix.
fn inbound(msg_type: Message, msg_code: u8, ip_header_len: usize, body: &[u8]) -> Buffer {
    let message_len = icmpv4::HEADER_LEN + body.len();
    let total_len = ip_header_len + message_len;
    let mut bytes = vec![0; ethernet::HEADER_LEN + total_len];
    {
        let frame = ethernet::frame::new_unchecked_mut(&mut bytes);
        ethernet::Repr {
            src_addr: MAC_ADDR_OTHER,
            dst_addr: MAC_ADDR_HOST,
            ethertype: ethernet::EtherType::Ipv4,
        }
        .emit(frame);

        let packet = frame.payload_mut_slice();
        packet[0] = 0x40 | (ip_header_len / 4) as u8;
        NetworkEndian::write_u16(&mut packet[2..4], total_len as u16);
        packet[8] = 64;
        packet[9] = ip::Protocol::Icmp.into();
        packet[12..16].copy_from_slice(IP_ADDR_OTHER.as_bytes());
        packet[16..20].copy_from_slice(IP_ADDR_HOST.as_bytes());

        let message =
            icmpv4::message::new_unchecked_mut(&mut packet[ip_header_len..total_len]);
        message.set_msg_type(msg_type);
        message.set_msg_code(msg_code);
        message.payload_mut_slice().copy_from_slice(body);
        message.fill_checksum();
    }
    Buffer::from_vec(bytes)
}

#[test]
fn echo_request_is_answered() {
    let endpoint = Endpoint::new();
    let mut sink = Sink::default();

    // Ident 0x1234, sequence 0x0001, six octets of data.
    let body = [0x12, 0x34, 0x00, 0x01, b'h', b'e', b'l', b'l', b'o', b'!'];
    endpoint.receive(inbound(Message::EchoRequest, 0, 20, &body), &mut sink);

    assert_eq!(sink.sent.len(), 1);
    let (route, protocol, payload) = &sink.sent[0];
    assert_eq!(*route, Route { dst_addr: IP_ADDR_OTHER });
    assert_eq!(*protocol, Some(ip::Protocol::Icmp));

    // Same length as the request message, only type and checksum differ.
    assert_eq!(payload.len(), icmpv4::HEADER_LEN + body.len());
    let message = icmpv4::message::new_checked(&payload[..]).unwrap();
    assert_eq!(message.msg_type(), Message::EchoReply);
    assert_eq!(message.msg_code(), 0);
    assert_eq!(message.payload_slice(), &body[..]);
    assert!(message.verify_checksum());
}

#[test]
fn echo_reply_skips_ip_options() {
    let endpoint = Endpoint::new();
    let mut sink = Sink::default();

    // A 24-octet header: the message starts after the options.
    let body = [0x56, 0x78, 0x00, 0x02];
    endpoint.receive(inbound(Message::EchoRequest, 0, 24, &body), &mut sink);

    assert_eq!(sink.sent.len(), 1);
    let (_, _, payload) = &sink.sent[0];
    let message = icmpv4::message::new_checked(&payload[..]).unwrap();
    assert_eq!(message.msg_type(), Message::EchoReply);
    assert_eq!(message.payload_slice(), &body[..]);
    assert!(message.verify_checksum());
}

#[test]
fn echo_reply_excludes_frame_padding() {
    let endpoint = Endpoint::new();
    let mut sink = Sink::default();

    let body = [0x12, 0x34, 0x00, 0x03];
    let mut buffer = inbound(Message::EchoRequest, 0, 20, &body);
    // Pad the frame past the announced total length, as a link layer would.
    let mut bytes = buffer.payload().to_vec();
    bytes.resize(64, 0);
    buffer = Buffer::from_vec(bytes);
    endpoint.receive(buffer, &mut sink);

    assert_eq!(sink.sent.len(), 1);
    let (_, _, payload) = &sink.sent[0];
    assert_eq!(payload.len(), icmpv4::HEADER_LEN + body.len());
}

#[test]
fn destination_unreachable_is_swallowed() {
    let endpoint = Endpoint::new();
    let mut sink = Sink::default();

    // Code 3, port unreachable, with the offending header as the body.
    let body = [0u8; 28];
    endpoint.receive(inbound(Message::DstUnreachable, 3, 20, &body), &mut sink);

    assert!(sink.sent.is_empty());
}

#[test]
fn unsupported_message_is_dropped() {
    let endpoint = Endpoint::new();
    let mut sink = Sink::default();

    endpoint.receive(inbound(Message::TimeExceeded, 0, 20, &[0u8; 28]), &mut sink);
    endpoint.receive(inbound(Message::Unknown(42), 0, 20, &[]), &mut sink);
    // An answer to someone's request, not ours to handle.
    endpoint.receive(inbound(Message::EchoReply, 0, 20, &[0u8; 4]), &mut sink);

    assert!(sink.sent.is_empty());
}

#[test]
fn truncated_packet_is_dropped() {
    let endpoint = Endpoint::new();
    let mut sink = Sink::default();

    let mut bytes = inbound(Message::EchoRequest, 0, 20, &[0u8; 8])
        .payload()
        .to_vec();
    bytes.truncate(ethernet::HEADER_LEN + 16);
    endpoint.receive(Buffer::from_vec(bytes), &mut sink);

    assert!(sink.sent.is_empty());
}

#[test]
fn corrupted_request_is_still_answered() {
    // Inbound checksums are not validated.
    let endpoint = Endpoint::new();
    let mut sink = Sink::default();

    let mut bytes = inbound(Message::EchoRequest, 0, 20, &[0xaa; 4])
        .payload()
        .to_vec();
    // Flip a data octet after the checksum was filled in.
    let last = bytes.len() - 1;
    bytes[last] ^= 0xff;
    endpoint.receive(Buffer::from_vec(bytes), &mut sink);

    assert_eq!(sink.sent.len(), 1);
    let (_, _, payload) = &sink.sent[0];
    let message = icmpv4::message::new_checked(&payload[..]).unwrap();
    assert_eq!(message.msg_type(), Message::EchoReply);
    // The reply checksum covers the octets as received.
    assert!(message.verify_checksum());
}

#[test]
fn output_failure_is_contained() {
    let endpoint = Endpoint::new();
    let mut sink = Sink {
        broken: true,
        ..Sink::default()
    };

    endpoint.receive(inbound(Message::EchoRequest, 0, 20, &[0u8; 4]), &mut sink);

    // The failure was logged and swallowed; the engine stays usable.
    sink.broken = false;
    endpoint.receive(inbound(Message::EchoRequest, 0, 20, &[0u8; 4]), &mut sink);
    assert_eq!(sink.sent.len(), 1);
}

//! Address resolution and ICMP diagnostics for a user-space IPv4 stack.
//!
//! This crate implements the two protocol engines a minimal IPv4-over-Ethernet
//! stack needs before it can move user data: an ARP engine that learns and
//! answers address resolution frames while maintaining a shared translation
//! cache, and an ICMP engine that answers echo requests and surfaces error
//! notifications. Both operate directly on raw packet buffers handed over by
//! a network device.
//!
//! The crate is deliberately narrow. Link-layer framing, IP routing and the
//! actual device driver live behind the traits in [`nic`] and
//! [`layer::icmp::IpOutput`]; the engines only parse, mutate the cache, and
//! construct replies in place. Buffers are owned by exactly one processing
//! call at a time and are released on every exit path by virtue of being
//! moved into the call.
//!
//! A rough map:
//!
//! * [`wire`] — packet formats: field access over raw octets and the parsed
//!   `Repr` forms. Byte-order conversion happens here and only here.
//! * [`storage`] — the headroom/push packet buffer the engines operate on.
//! * [`nic`] — the device contract (addresses, transmit, lookup).
//! * [`layer::arp`] — resolution cache and protocol engine.
//! * [`layer::icmp`] — diagnostic message engine.
#![warn(missing_docs)]
#![warn(unreachable_pub)]

#[macro_use]
mod macros;
pub mod layer;
pub mod nic;
pub mod storage;
pub mod wire;

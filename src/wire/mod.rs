/*! Low-level packet access and construction.

Each wire format is provided on two levels.

 * A lowercase byte wrapper (e.g. [`arp::packet`] or [`ethernet::frame`])
   gives field access over a raw octet sequence. Accessors read multi-byte
   fields in network byte order, setters write them back the same way; no
   other place in the crate touches wire byte order.
 * A `Repr` struct gives a compact host-order representation of the header
   data, created by `Repr::parse` and written out by `Repr::emit`. Parsing and
   emission are the only boundary between the wire's big-endian layout and
   the in-memory representation.

The byte wrappers guarantee that, once `check_len()` returned `Ok(())`, no
field accessor or setter will panic. `new_checked` is a shorthand combining
`new_unchecked` with that check and must be used on untrusted input. When
emitting into a reused buffer, use `new_unchecked_mut` over a region of the
exact computed length instead; a length check against stale buffer contents
proves nothing.

[`arp::packet`]: arp/struct.packet.html
[`ethernet::frame`]: ethernet/struct.frame.html
*/
// Copyright (C) 2016 whitequark@whitequark.org
//
// The wrapper and `Repr` scheme in this folder derives from `smoltcp`,
// originally distributed under 0-clause BSD.
#![allow(missing_docs)]

mod field {
    pub(crate) type Field = ::core::ops::Range<usize>;
    pub(crate) type Rest = ::core::ops::RangeFrom<usize>;
}

pub mod arp;
mod error;
pub mod ethernet;
pub mod icmpv4;
pub mod ip;
pub mod ipv4;

pub use self::error::{Error, Result};

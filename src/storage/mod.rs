//! Packet buffers.
//!
//! A [`Buffer`] owns the raw storage for one in-flight packet and tracks a
//! data offset so that protocol layers can strip or prepend headers without
//! copying the payload around. The engines in [`crate::layer`] take buffers
//! by value and never hand them back, so the storage is released on every
//! exit path, drop branches included, without explicit bookkeeping.

mod buffer;

pub use buffer::Buffer;

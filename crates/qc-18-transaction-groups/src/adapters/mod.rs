//! Adapters module for Transaction Groups
//!
//! Implements outbound ports.

pub mod msgpack_codec;

pub use msgpack_codec::MsgpackCodec;

//! # Shared Crypto - Hash Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-512/256 | Domain-separated transaction and group identifiers |
//!
//! ## Security Properties
//!
//! - **SHA-512/256**: 256-bit output, immune to length extension
//! - **Domain separation**: every identifier is hashed under a short ASCII prefix

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod hashing;

// Re-exports
pub use hashing::{sha512_256, sha512_256_with_prefix, DomainHasher, Hash};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

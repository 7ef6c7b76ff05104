//! # SHA-512/256 Hashing
//!
//! Domain-separated hashing for ledger identifiers.
//!
//! ## Construction
//!
//! - SHA-512 truncated to 256 bits (FIPS 180-4 SHA-512/256)
//! - An ASCII domain prefix is hashed before the payload, so digests computed
//!   for different purposes never share an input space

use sha2::{Digest, Sha512_256};

/// SHA-512/256 hash output (256-bit).
pub type Hash = [u8; 32];

/// Stateful SHA-512/256 hasher seeded with a domain prefix.
#[derive(Clone)]
pub struct DomainHasher {
    prefix: &'static [u8],
    inner: Sha512_256,
}

impl DomainHasher {
    /// Create a hasher whose input starts with `prefix`.
    pub fn new(prefix: &'static [u8]) -> Self {
        let mut inner = Sha512_256::new();
        inner.update(prefix);
        Self { prefix, inner }
    }

    /// Update with data.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    /// Finalize and return hash.
    pub fn finalize(&self) -> Hash {
        self.inner.clone().finalize().into()
    }

    /// Reset hasher for reuse. The domain prefix is fed again.
    pub fn reset(&mut self) {
        self.inner = Sha512_256::new();
        self.inner.update(self.prefix);
    }

    /// The domain prefix this hasher was created with.
    pub fn prefix(&self) -> &'static [u8] {
        self.prefix
    }
}

/// Hash data with SHA-512/256 (one-shot, no prefix).
pub fn sha512_256(data: &[u8]) -> Hash {
    Sha512_256::digest(data).into()
}

/// Hash `prefix ++ data` with SHA-512/256.
pub fn sha512_256_with_prefix(prefix: &[u8], data: &[u8]) -> Hash {
    let mut hasher = Sha512_256::new();
    hasher.update(prefix);
    hasher.update(data);
    hasher.finalize().into()
}

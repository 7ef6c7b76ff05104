//! # Transaction Groups Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Reference records and group ids (base64)
//! │
//! ├── exploits/         # Attack simulations
//! │   ├── group_splicing.rs
//! │   └── malformed_records.rs
//! │
//! └── integration/      # End-to-end flows
//!     ├── flows.rs
//!     └── group_vectors.rs
//!
//! tests/benches/
//! └── group_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p qc-tests
//!
//! # By category
//! cargo test -p qc-tests integration::
//! cargo test -p qc-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p qc-tests
//! ```

#![allow(dead_code)]

pub mod exploits;

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use shared_crypto::sha512_256_with_prefix;

    /// The published group id is the "TG"-prefixed hash of the digest list.
    #[test]
    fn test_group_id_preimage() {
        let mut payload = vec![0x81, 0xa6];
        payload.extend_from_slice(b"txlist");
        payload.push(0x91);
        payload.extend_from_slice(&[0xc4, 0x20]);
        payload.extend_from_slice(hex_digest(PAY_TX_DIGEST).as_bytes());

        let group = sha512_256_with_prefix(b"TG", &payload);
        assert_eq!(group, *digest(PAY_GROUP_ID).as_bytes());
    }
}

//! # Malformed Record Attacks
//!
//! Hostile bytes handed to the decoder through every service entry point.
//!
//! ## Attack Vectors
//!
//! 1. **Memory exhaustion**: container headers claiming billions of entries
//! 2. **Stack exhaustion**: deeply nested arrays
//! 3. **Ambiguous records**: duplicate keys, two GroupFields, trailing data
//! 4. **Type confusion**: GroupField of the wrong type or width

#[cfg(test)]
mod tests {
    use crate::fixtures::{tx, PAY};
    use qc_18_transaction_groups::{
        ConfigError, DecodeError, DecodeLimits, EncodedTransaction, GroupError, GroupingConfig,
        MsgpackCodec, TransactionCodec, TransactionGroupApi, TransactionGroupService,
        MAX_DECODE_DEPTH,
    };

    fn service() -> TransactionGroupService {
        TransactionGroupService::new()
    }

    /// Every entry point must reject the batch with the same decode error.
    fn assert_rejected_everywhere(bad: Vec<u8>, check: impl Fn(&DecodeError) -> bool) {
        let service = service();
        let batch = vec![tx(PAY), EncodedTransaction::new(bad.clone())];

        let results = [
            service.assign_group(&batch).err(),
            service.group_digest(&batch).err(),
            service.verify_group(&batch).err(),
            service.find_and_verify_groups(&batch).err(),
        ];
        for result in results {
            match result {
                Some(GroupError::Decode { index: 1, source }) => {
                    assert!(check(&source), "unexpected decode error: {source}")
                }
                other => panic!("expected decode error at index 1, got {other:?}"),
            }
        }

        match service.transaction_digest(&bad) {
            Err(GroupError::Decode { index: 0, source }) => assert!(check(&source)),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    /// `{"a": value}`
    fn single_field(value: &[u8]) -> Vec<u8> {
        let mut out = vec![0x81, 0xa1, b'a'];
        out.extend_from_slice(value);
        out
    }

    // =========================================================================
    // ATTACK 1: MEMORY EXHAUSTION
    // =========================================================================

    #[test]
    fn attack_top_level_map32_claim() {
        let bad = vec![0xdf, 0xff, 0xff, 0xff, 0xff];
        assert_rejected_everywhere(bad, |e| {
            matches!(e, DecodeError::ContainerTooLarge { offset: 0, .. })
        });
    }

    #[test]
    fn attack_nested_array32_claim() {
        let bad = single_field(&[0xdd, 0x7f, 0xff, 0xff, 0xff]);
        assert_rejected_everywhere(bad, |e| {
            matches!(e, DecodeError::ContainerTooLarge { offset: 3, .. })
        });
    }

    #[test]
    fn attack_array16_claim_beyond_input() {
        let bad = single_field(&[0xdc, 0x04, 0x00, 0x01, 0x02]);
        assert_rejected_everywhere(bad, |e| matches!(e, DecodeError::UnexpectedEof { .. }));
    }

    #[test]
    fn attack_bin32_length_beyond_input() {
        let bad = single_field(&[0xc6, 0xff, 0xff, 0xff, 0xff, 0x00]);
        assert_rejected_everywhere(bad, |e| matches!(e, DecodeError::UnexpectedEof { .. }));
    }

    // =========================================================================
    // ATTACK 2: STACK EXHAUSTION
    // =========================================================================

    #[test]
    fn attack_deep_nesting() {
        let mut value = vec![0x91; 100_000];
        value.push(0x01);
        let bad = single_field(&value);
        assert_rejected_everywhere(bad, |e| {
            matches!(e, DecodeError::DepthLimitExceeded { max: 16, .. })
        });
    }

    #[test]
    fn attack_nesting_within_configured_limit() {
        let config = GroupingConfig {
            decode_limits: DecodeLimits {
                max_depth: 64,
                ..Default::default()
            },
            ..Default::default()
        };
        let service = TransactionGroupService::with_config(config).unwrap();
        let mut value = vec![0x91; 40];
        value.push(0x01);

        let batch = vec![EncodedTransaction::new(single_field(&value))];
        assert!(service.verify_group(&batch).unwrap());
        assert!(matches!(
            TransactionGroupService::new().verify_group(&batch),
            Err(GroupError::Decode { .. })
        ));
    }

    #[test]
    fn attack_unbounded_depth_config() {
        let config = GroupingConfig {
            decode_limits: DecodeLimits {
                max_depth: usize::MAX,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            TransactionGroupService::with_config(config),
            Err(GroupError::InvalidConfig(ConfigError::DepthTooLarge {
                max: MAX_DECODE_DEPTH,
                ..
            }))
        ));
    }

    #[test]
    fn attack_deep_nesting_with_unbounded_codec() {
        // A codec built directly skips config validation; the walker must
        // still finish without exhausting the stack.
        let codec = MsgpackCodec::with_limits(DecodeLimits {
            max_depth: usize::MAX,
            ..Default::default()
        });
        let mut value = vec![0x91; 500_000];
        value.push(0x01);
        let record = codec.decode(&single_field(&value)).unwrap();
        assert_eq!(record.field_count(), 1);

        value.pop();
        assert!(matches!(
            codec.decode(&single_field(&value)),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }

    // =========================================================================
    // ATTACK 3: AMBIGUOUS RECORDS
    // =========================================================================

    #[test]
    fn attack_duplicate_key() {
        let bad = vec![0x82, 0xa1, b'a', 0x01, 0xa1, b'a', 0x02];
        assert_rejected_everywhere(bad, |e| *e == DecodeError::DuplicateKey("a".into()));
    }

    #[test]
    fn attack_two_group_fields() {
        let mut bad = vec![0x82];
        for fill in [0x11u8, 0x22] {
            bad.extend_from_slice(b"\xa3grp\xc4\x20");
            bad.extend_from_slice(&[fill; 32]);
        }
        assert_rejected_everywhere(bad, |e| *e == DecodeError::DuplicateKey("grp".into()));
    }

    #[test]
    fn attack_trailing_garbage() {
        let mut bad = tx(PAY).into_bytes();
        bad.extend_from_slice(&[0xc0, 0xc0]);
        assert_rejected_everywhere(bad, |e| {
            matches!(e, DecodeError::TrailingBytes { remaining: 2, .. })
        });
    }

    #[test]
    fn attack_truncated_record() {
        let mut bad = tx(PAY).into_bytes();
        bad.truncate(bad.len() - 1);
        assert_rejected_everywhere(bad, |e| matches!(e, DecodeError::UnexpectedEof { .. }));
    }

    #[test]
    fn attack_non_map_record() {
        assert_rejected_everywhere(vec![0x92, 0x01, 0x02], |e| {
            *e == DecodeError::NotAMap { found: 0x92 }
        });
        assert_rejected_everywhere(vec![], |e| matches!(e, DecodeError::UnexpectedEof { .. }));
    }

    #[test]
    fn attack_integer_key() {
        assert_rejected_everywhere(vec![0x81, 0x01, 0x01], |e| {
            matches!(e, DecodeError::NonStringKey { found: 0x01, .. })
        });
    }

    #[test]
    fn attack_reserved_type_byte() {
        assert_rejected_everywhere(single_field(&[0xc1]), |e| {
            matches!(e, DecodeError::ReservedType { found: 0xc1, .. })
        });
    }

    // =========================================================================
    // ATTACK 4: TYPE CONFUSION
    // =========================================================================

    #[test]
    fn attack_group_field_as_string() {
        let mut bad = vec![0x81, 0xa3, b'g', b'r', b'p', 0xd9, 0x20];
        bad.extend_from_slice(&[b'x'; 32]);
        assert_rejected_everywhere(bad, |e| {
            matches!(e, DecodeError::InvalidGroupField { offset: 5, .. })
        });
    }

    #[test]
    fn attack_group_field_short() {
        let mut bad = vec![0x81, 0xa3, b'g', b'r', b'p', 0xc4, 0x1f];
        bad.extend_from_slice(&[0x11; 31]);
        assert_rejected_everywhere(bad, |e| matches!(e, DecodeError::InvalidGroupField { .. }));
    }

    #[test]
    fn attack_zero_group_field_is_absent() {
        // An explicit all-zero GroupField means "no group" and is dropped on
        // re-encoding.
        let service = service();
        let mut explicit = vec![0x82, 0xa3, b'f', b'e', b'e', 0x01, 0xa3, b'g', b'r', b'p', 0xc4, 0x20];
        explicit.extend_from_slice(&[0u8; 32]);
        let implicit = vec![0x81, 0xa3, b'f', b'e', b'e', 0x01];

        assert_eq!(
            service.transaction_digest(&explicit).unwrap(),
            service.transaction_digest(&implicit).unwrap()
        );
        let batch = vec![EncodedTransaction::new(explicit)];
        assert_eq!(service.find_and_verify_groups(&batch).unwrap(), vec![0]);
    }
}

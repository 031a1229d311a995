//! Unit tests for the Identifiers module
//!
//! Tests cover identifier creation, parsing, conversion, and display formatting.

use core_kernel::{ClaimId, CommentId, UserId};
use proptest::prelude::*;

mod claim_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = ClaimId::new_v7();
        let id2 = ClaimId::new_v7();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = ClaimId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = ClaimId::new_v7();
        assert!(id1 < id2);
    }

    #[test]
    fn test_display_prefixes() {
        assert!(ClaimId::new_v7().to_string().starts_with("CLM-"));
        assert!(CommentId::new_v7().to_string().starts_with("CMT-"));
    }

    #[test]
    fn test_from_str_with_and_without_prefix() {
        let original = ClaimId::new_v7();
        let with_prefix: ClaimId = original.to_string().parse().unwrap();
        let bare: ClaimId = original.as_uuid().to_string().parse().unwrap();
        assert_eq!(original, with_prefix);
        assert_eq!(original, bare);
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("CLM-not-a-uuid".parse::<ClaimId>().is_err());
    }

    #[test]
    fn test_ids_are_version_7() {
        assert_eq!(ClaimId::new_v7().as_uuid().get_version_num(), 7);
    }

    #[test]
    fn test_json_is_transparent() {
        let id = ClaimId::new_v7();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
    }
}

mod user_id_tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id = UserId::parse("3").unwrap();
        assert_eq!(id.to_string(), "3");
        assert_eq!("3".parse::<UserId>().unwrap(), id);
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(UserId::parse("").is_err());
    }

    #[test]
    fn test_generated_tokens_are_short_and_distinct() {
        let a = UserId::generate();
        let b = UserId::generate();
        assert_eq!(a.as_str().len(), 9);
        assert_ne!(a, b);
    }

    #[test]
    fn test_system_id() {
        assert_eq!(UserId::system().as_str(), "system");
    }

    proptest! {
        #[test]
        fn test_non_blank_tokens_round_trip_through_json(token in "[a-zA-Z0-9]{1,16}") {
            let id = UserId::parse(token.clone()).unwrap();
            let json = serde_json::to_string(&id).unwrap();
            let back: UserId = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back.as_str(), token.as_str());
        }
    }
}

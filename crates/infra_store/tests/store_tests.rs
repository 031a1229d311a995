//! Tests for the file-backed stores

use rust_decimal_macros::dec;

use core_kernel::{ClaimId, HealthCheckable, PortError};
use domain_claims::{ClaimComment, ClaimStatus, ClaimStore, ClaimUpdate};
use domain_party::{AccountStatus, UserStore};
use infra_store::{FileClaimStore, FileUserStore, SnapshotFile, StoreError};
use test_utils::{ClaimBuilder, TempDataDir, TemporalFixtures, UserFixtures};

// ============================================================================
// Snapshot Tests
// ============================================================================

mod snapshot_tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = TempDataDir::new();
        let snapshot: SnapshotFile<String> = SnapshotFile::new(dir.file("absent.json"));

        assert!(snapshot.load().await.unwrap().is_empty());
        assert!(!snapshot.exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_save_creates_directory_and_leaves_no_staging_file() {
        let dir = TempDataDir::new();
        let snapshot = SnapshotFile::new(dir.file("names.json"));

        snapshot.save(&["a".to_string(), "b".to_string()]).await.unwrap();

        assert_eq!(snapshot.load().await.unwrap(), vec!["a".to_string(), "b".to_string()]);
        assert!(!dir.file("names.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_serialization_error() {
        let dir = TempDataDir::new();
        std::fs::create_dir_all(dir.path()).unwrap();
        std::fs::write(dir.file("claims.json"), b"{ not json").unwrap();

        let result = FileClaimStore::open(dir.path()).await;

        match result {
            Err(e @ StoreError::Serialization { .. }) => assert!(e.path().ends_with("claims.json")),
            other => panic!("expected serialization error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_store_error_becomes_internal_port_error() {
        let error = StoreError::io("/nowhere/claims.json", std::io::Error::other("disk full"));
        let port: PortError = error.into();

        assert!(matches!(port, PortError::Internal { .. }));
        assert!(port.to_string().contains("disk full"));
    }
}

// ============================================================================
// Claim Store Tests
// ============================================================================

mod claim_store_tests {
    use super::*;

    #[tokio::test]
    async fn test_claims_survive_reopen() {
        let dir = TempDataDir::new();
        let claim = ClaimBuilder::new().with_amount(dec!(350)).build();

        {
            let store = FileClaimStore::open(dir.path()).await.unwrap();
            store.insert(claim.clone()).await.unwrap();
        }

        let reopened = FileClaimStore::open(dir.path()).await.unwrap();
        assert_eq!(reopened.get(&claim.id).await.unwrap(), claim);
    }

    #[tokio::test]
    async fn test_seed_written_only_once() {
        let dir = TempDataDir::new();
        let seed = vec![ClaimBuilder::new().build(), ClaimBuilder::new().build()];

        let store = FileClaimStore::open_or_seed(dir.path(), seed.clone()).await.unwrap();
        store.insert(ClaimBuilder::new().build()).await.unwrap();

        let reopened = FileClaimStore::open_or_seed(dir.path(), seed).await.unwrap();
        assert_eq!(reopened.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_insert_conflicts() {
        let dir = TempDataDir::new();
        let store = FileClaimStore::open(dir.path()).await.unwrap();
        let claim = ClaimBuilder::new().build();

        store.insert(claim.clone()).await.unwrap();
        let result = store.insert(claim).await;

        assert!(matches!(result, Err(PortError::Conflict { .. })));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_conditional_update_is_persisted() {
        let dir = TempDataDir::new();
        let claim = ClaimBuilder::new().build();
        let id = claim.id;
        let store = FileClaimStore::open_or_seed(dir.path(), vec![claim]).await.unwrap();

        let at = TemporalFixtures::while_covered();
        let update = ClaimUpdate::at(at)
            .with_status(ClaimStatus::Approved)
            .when_status(ClaimStatus::Pending)
            .with_comment(ClaimComment::system("Claim automatically processed. Recommended status: approved.", at));

        let first = store.update(&id, update.clone()).await.unwrap();
        let second = store.update(&id, update.with_status(ClaimStatus::Rejected)).await.unwrap();
        assert!(first.status_applied);
        assert!(!second.status_applied);

        let reopened = FileClaimStore::open(dir.path()).await.unwrap();
        let stored = reopened.get(&id).await.unwrap();
        assert_eq!(stored.status, ClaimStatus::Approved);
        assert_eq!(stored.comments.len(), 2);
    }

    #[tokio::test]
    async fn test_update_unknown_claim_is_not_found() {
        let dir = TempDataDir::new();
        let store = FileClaimStore::open(dir.path()).await.unwrap();

        let result = store
            .update(&ClaimId::new_v7(), ClaimUpdate::at(TemporalFixtures::while_covered()))
            .await;

        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_memory_untouched() {
        let dir = TempDataDir::new();
        let claim = ClaimBuilder::new().build();
        let id = claim.id;
        let store = FileClaimStore::open_or_seed(dir.path(), vec![claim]).await.unwrap();

        // A directory squatting on the staging path makes every save fail.
        std::fs::create_dir_all(dir.file("claims.json.tmp")).unwrap();

        let update = ClaimUpdate::at(TemporalFixtures::after_expiry()).with_status(ClaimStatus::Rejected);
        let result = store.update(&id, update).await;

        assert!(matches!(result, Err(PortError::Internal { .. })));
        assert_eq!(store.get(&id).await.unwrap().status, ClaimStatus::Pending);
        assert!(store.insert(ClaimBuilder::new().build()).await.is_err());
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_queries_by_patient_and_hospital() {
        let dir = TempDataDir::new();
        let own = ClaimBuilder::new().build();
        let other = ClaimBuilder::new()
            .for_patient(UserFixtures::id("4"), "Alice Roberts")
            .from_hospital(None)
            .build();
        let store = FileClaimStore::open_or_seed(dir.path(), vec![own, other]).await.unwrap();

        assert_eq!(store.find_by_patient(&UserFixtures::id("1")).await.unwrap().len(), 1);
        assert_eq!(store.find_by_patient(&UserFixtures::id("4")).await.unwrap().len(), 1);
        assert_eq!(store.find_by_hospital(&UserFixtures::id("2")).await.unwrap().len(), 1);
        assert!(store.health_check().await.is_healthy());
    }
}

// ============================================================================
// User Store Tests
// ============================================================================

mod user_store_tests {
    use super::*;

    #[tokio::test]
    async fn test_status_change_survives_reopen() {
        let dir = TempDataDir::new();
        let pending = UserFixtures::other_patient().with_status(AccountStatus::Pending);
        let store = FileUserStore::open_or_seed(dir.path(), vec![UserFixtures::admin(), pending.clone()])
            .await
            .unwrap();

        let approved = store.set_status(&pending.id, AccountStatus::Approved).await.unwrap();
        assert_eq!(approved.status, AccountStatus::Approved);

        let reopened = FileUserStore::open(dir.path()).await.unwrap();
        assert_eq!(reopened.get(&pending.id).await.unwrap().status, AccountStatus::Approved);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let dir = TempDataDir::new();
        let store = FileUserStore::open_or_seed(dir.path(), vec![UserFixtures::patient()]).await.unwrap();

        let mut clone = UserFixtures::other_patient();
        clone.email = "patient@example.com".to_string();

        assert!(matches!(store.insert(clone).await, Err(PortError::Conflict { .. })));
        assert!(store.find_by_email("alice@example.com").await.unwrap().is_none());
    }
}

//! Tests for the user directory: registration, sign-in and approval

use std::sync::{Arc, Mutex};

use core_kernel::{Notification, Notifier, UserId};
use domain_party::{
    AccountStatus, InMemoryUserStore, PartyError, RegistrationRequest, Role, User, UserDirectory,
    UserStore,
};

#[derive(Default)]
struct Recorder(Mutex<Vec<Notification>>);

impl Notifier for Recorder {
    fn notify(&self, notification: Notification) {
        self.0.lock().unwrap().push(notification);
    }
}

impl Recorder {
    fn titles(&self) -> Vec<String> {
        self.0.lock().unwrap().iter().map(|n| n.title.clone()).collect()
    }
}

fn uid(token: &str) -> UserId {
    UserId::parse(token).unwrap()
}

fn seed_users() -> Vec<User> {
    vec![
        User::patient(uid("1"), "John Patient", "patient@example.com", "POL-123456"),
        User::hospital(uid("2"), "City Hospital", "hospital@example.com", "City General Hospital"),
        User::admin(uid("3"), "Admin User", "admin@example.com"),
    ]
}

fn directory() -> (UserDirectory, Arc<InMemoryUserStore>, Arc<Recorder>) {
    let store = Arc::new(InMemoryUserStore::with_users(seed_users()));
    let recorder = Arc::new(Recorder::default());
    let directory = UserDirectory::new(store.clone(), "password", recorder.clone());
    (directory, store, recorder)
}

fn registration(email: &str) -> RegistrationRequest {
    RegistrationRequest {
        name: "Priya Singh".to_string(),
        email: email.to_string(),
        password: "password".to_string(),
        role: Role::Patient,
        policy_number: Some("POL-654323".to_string()),
        hospital_name: Some("ignored".to_string()),
    }
}

mod registration_tests {
    use super::*;

    #[tokio::test]
    async fn test_register_creates_pending_account() {
        let (directory, store, recorder) = directory();

        let user = directory.register(registration("priya.singh@example.com")).await.unwrap();

        assert_eq!(user.status, AccountStatus::Pending);
        assert_eq!(user.role, Role::Patient);
        assert_eq!(user.policy_number.as_deref(), Some("POL-654323"));
        assert!(user.hospital_name.is_none());
        assert_eq!(store.list().await.unwrap().len(), 4);
        assert_eq!(recorder.titles(), vec!["Registration successful"]);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (directory, store, _) = directory();

        let result = directory.register(registration("patient@example.com")).await;

        assert!(matches!(result, Err(PartyError::EmailInUse(_))));
        assert_eq!(store.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_register_invalid_request() {
        let (directory, _, recorder) = directory();
        let mut request = registration("bad-email");
        request.policy_number = None;

        match directory.register(request).await {
            Err(PartyError::ValidationFailed(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("Expected validation failure, got {:?}", other),
        }
        assert_eq!(recorder.titles(), vec!["Registration failed"]);
    }
}

mod sign_in_tests {
    use super::*;

    #[tokio::test]
    async fn test_approved_user_signs_in() {
        let (directory, _, _) = directory();
        let user = directory.authenticate("admin@example.com", "password").await.unwrap();
        assert_eq!(user.id, uid("3"));
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let (directory, _, _) = directory();
        let result = directory.authenticate("admin@example.com", "letmein").await;
        assert!(matches!(result, Err(PartyError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_unknown_email() {
        let (directory, _, _) = directory();
        let result = directory.authenticate("nobody@example.com", "password").await;
        assert!(matches!(result, Err(PartyError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_pending_account_refused() {
        let (directory, _, recorder) = directory();
        directory.register(registration("priya.singh@example.com")).await.unwrap();

        let result = directory.authenticate("priya.singh@example.com", "password").await;

        assert!(matches!(result, Err(PartyError::AccountPending)));
        assert_eq!(recorder.titles().last().unwrap(), "Account pending approval");
    }

    #[tokio::test]
    async fn test_rejected_account_refused() {
        let (directory, _, _) = directory();
        let admin = directory.get_user(&uid("3")).await.unwrap();
        directory.reject_user(&admin, &uid("1")).await.unwrap();

        let result = directory.authenticate("patient@example.com", "password").await;
        assert!(matches!(result, Err(PartyError::AccountRejected)));
    }
}

mod approval_tests {
    use super::*;

    #[tokio::test]
    async fn test_admin_approves_pending_account() {
        let (directory, _, _) = directory();
        let admin = directory.get_user(&uid("3")).await.unwrap();
        let pending = directory.register(registration("priya.singh@example.com")).await.unwrap();

        assert_eq!(directory.pending_users(&admin).await.unwrap().len(), 1);

        let approved = directory.approve_user(&admin, &pending.id).await.unwrap();
        assert_eq!(approved.status, AccountStatus::Approved);
        assert!(directory.pending_users(&admin).await.unwrap().is_empty());
        assert!(directory.authenticate("priya.singh@example.com", "password").await.is_ok());
    }

    #[tokio::test]
    async fn test_non_admin_cannot_approve() {
        let (directory, _, recorder) = directory();
        let hospital = directory.get_user(&uid("2")).await.unwrap();

        let result = directory.approve_user(&hospital, &uid("1")).await;

        assert!(matches!(result, Err(PartyError::PermissionDenied(_))));
        assert_eq!(recorder.titles(), vec!["Permission denied"]);
        assert!(directory.pending_users(&hospital).await.is_err());
    }

    #[tokio::test]
    async fn test_approve_unknown_user() {
        let (directory, _, _) = directory();
        let admin = directory.get_user(&uid("3")).await.unwrap();

        let result = directory.approve_user(&admin, &uid("99")).await;
        assert!(matches!(result, Err(PartyError::UserNotFound(id)) if id == "99"));
    }
}

mod validation_properties {
    use super::*;
    use domain_party::RegistrationValidator;
    use proptest::prelude::*;

    fn patient_request(password: String) -> RegistrationRequest {
        RegistrationRequest {
            name: "Priya Singh".to_string(),
            email: "priya.singh@example.com".to_string(),
            password,
            role: Role::Patient,
            policy_number: Some("POL-654323".to_string()),
            hospital_name: None,
        }
    }

    proptest! {
        #[test]
        fn short_passwords_are_rejected(password in "[a-zA-Z0-9]{0,7}") {
            let result = RegistrationValidator::validate(&patient_request(password));
            prop_assert!(!result.is_valid);
            prop_assert!(result.errors.iter().any(|e| e.contains("at least 8 characters")));
        }

        #[test]
        fn long_passwords_pass(password in "[a-zA-Z0-9]{8,32}") {
            let result = RegistrationValidator::validate(&patient_request(password));
            prop_assert!(result.is_valid, "unexpected errors: {:?}", result.errors);
        }
    }
}

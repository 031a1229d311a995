//! Portal users and their roles

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::UserId;

/// The role a user acts in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Insured person submitting and following their own claims
    Patient,
    /// Healthcare provider submitting claims on behalf of patients
    Hospital,
    /// Insurance staff adjudicating claims and approving accounts
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Hospital => "hospital",
            Role::Admin => "admin",
        }
    }

    /// Whether this role may change claim status and manage accounts
    pub fn is_admin(&self) -> bool {
        match self {
            Role::Admin => true,
            Role::Patient | Role::Hospital => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Approval state of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Awaiting admin review; sign-in is refused
    Pending,
    /// May sign in
    Approved,
    /// Registration was refused
    Rejected,
}

/// A registered portal user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
    /// Policy number, for patients
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_number: Option<String>,
    /// Hospital or clinic name, for hospitals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital_name: Option<String>,
}

impl User {
    /// Creates an approved patient account
    pub fn patient(id: UserId, name: impl Into<String>, email: impl Into<String>, policy_number: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role: Role::Patient,
            status: AccountStatus::Approved,
            policy_number: Some(policy_number.into()),
            hospital_name: None,
        }
    }

    /// Creates an approved hospital account
    pub fn hospital(id: UserId, name: impl Into<String>, email: impl Into<String>, hospital_name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role: Role::Hospital,
            status: AccountStatus::Approved,
            policy_number: None,
            hospital_name: Some(hospital_name.into()),
        }
    }

    /// Creates an approved admin account
    pub fn admin(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role: Role::Admin,
            status: AccountStatus::Approved,
            policy_number: None,
            hospital_name: None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn with_status(mut self, status: AccountStatus) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Hospital).unwrap(), "\"hospital\"");
        assert_eq!(Role::Admin.to_string(), "admin");
    }

    #[test]
    fn test_only_admin_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Patient.is_admin());
        assert!(!Role::Hospital.is_admin());
    }
}

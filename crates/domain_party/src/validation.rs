//! Registration validation rules
//!
//! Field-level checks (email format, lengths) are declared with `validator`
//! on [`RegistrationRequest`]; role-specific rules are applied on top by
//! [`RegistrationValidator`].
//!
//! # Validation Rules
//!
//! - Name must be 1-100 characters
//! - Email must be well formed
//! - Password must be at least 8 characters
//! - Patients must supply a policy number
//! - Hospitals must supply a hospital or clinic name
//! - Attributes belonging to another role are ignored with a warning

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::user::Role;

/// Result of registration validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the request is valid
    pub is_valid: bool,
    /// List of validation errors
    pub errors: Vec<String>,
    /// List of validation warnings (non-fatal issues)
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    /// Adds a warning to the result
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Data submitted when signing up for an account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegistrationRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub role: Role,
    pub policy_number: Option<String>,
    pub hospital_name: Option<String>,
}

/// Validator for registration requests
pub struct RegistrationValidator;

impl RegistrationValidator {
    /// Validates a registration request
    ///
    /// # Arguments
    ///
    /// * `request` - The registration request to validate
    ///
    /// # Returns
    ///
    /// A `ValidationResult` containing any errors or warnings
    pub fn validate(request: &RegistrationRequest) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if let Err(errors) = request.validate() {
            let mut messages: Vec<String> = errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errs)| {
                    errs.iter().map(move |e| match &e.message {
                        Some(message) => message.to_string(),
                        None => format!("Invalid {}", field),
                    })
                })
                .collect();
            messages.sort();
            for message in messages {
                result.add_error(message);
            }
        }

        let has_text = |value: &Option<String>| {
            value.as_deref().map(|v| !v.trim().is_empty()).unwrap_or(false)
        };

        match request.role {
            Role::Patient => {
                if !has_text(&request.policy_number) {
                    result.add_error("Policy number is required for patients");
                }
                if request.hospital_name.is_some() {
                    result.add_warning("Hospital name is ignored for patient accounts");
                }
            }
            Role::Hospital => {
                if !has_text(&request.hospital_name) {
                    result.add_error("Hospital name is required for hospitals");
                }
                if request.policy_number.is_some() {
                    result.add_warning("Policy number is ignored for hospital accounts");
                }
            }
            Role::Admin => {
                if request.policy_number.is_some() || request.hospital_name.is_some() {
                    result.add_warning("Role attributes are ignored for admin accounts");
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient_request() -> RegistrationRequest {
        RegistrationRequest {
            name: "Alice Roberts".to_string(),
            email: "alice.roberts@example.com".to_string(),
            password: "password".to_string(),
            role: Role::Patient,
            policy_number: Some("POL-654321".to_string()),
            hospital_name: None,
        }
    }

    #[test]
    fn test_valid_patient() {
        let result = RegistrationValidator::validate(&patient_request());
        assert!(result.is_valid, "{:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_bad_email_and_short_password() {
        let mut request = patient_request();
        request.email = "not-an-email".to_string();
        request.password = "short".to_string();

        let result = RegistrationValidator::validate(&request);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_hospital_requires_name() {
        let mut request = patient_request();
        request.role = Role::Hospital;

        let result = RegistrationValidator::validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("Hospital name")));
        assert_eq!(result.warnings.len(), 1);
    }
}

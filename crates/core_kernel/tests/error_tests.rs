//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::PortError;

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("Invalid input");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Invalid input"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_configuration() {
    let error = CoreError::configuration("Missing data dir");

    match error {
        CoreError::Configuration(msg) => assert_eq!(msg, "Missing data dir"),
        _ => panic!("Expected Configuration error"),
    }
}

#[test]
fn test_core_error_display() {
    let error = CoreError::validation("Test error");
    let display = format!("{}", error);

    assert!(display.contains("Validation error"));
}

#[test]
fn test_port_error_validation_field() {
    let error = PortError::validation_field("Document is empty", "document");

    match error {
        PortError::Validation { message, field } => {
            assert_eq!(message, "Document is empty");
            assert_eq!(field.as_deref(), Some("document"));
        }
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_port_error_internal_keeps_source() {
    use std::error::Error;

    let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    let error = PortError::internal_with_source("Failed to write snapshot", io);

    assert!(error.source().is_some());
    assert!(error.to_string().contains("Failed to write snapshot"));
}

#[test]
fn test_port_error_conflict() {
    let error = PortError::conflict("Claim CLM-1 already exists");
    assert!(matches!(error, PortError::Conflict { .. }));
    assert!(!error.is_not_found());
}

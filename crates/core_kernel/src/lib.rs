//! Core Kernel - Foundational types and utilities for the claims portal
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Strongly-typed identifiers for claims, comments and users
//! - The port error type and health-check contracts shared by all adapters
//! - A clock abstraction so time-dependent rules can be tested deterministically
//! - User-facing notifications emitted by application services

pub mod identifiers;
pub mod error;
pub mod ports;
pub mod temporal;
pub mod notify;

pub use identifiers::{ClaimId, CommentId, UserId};
pub use error::CoreError;
pub use ports::{
    PortError, DomainPort, AdapterHealth, HealthCheckable, HealthCheckResult,
    SimulatedLatency,
};
pub use temporal::{Clock, SystemClock, FixedClock, start_of_day_utc};
pub use notify::{Notification, NotificationLevel, Notifier};

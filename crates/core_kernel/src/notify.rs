//! User-facing notifications
//!
//! Application services report the outcome of user actions (a claim was
//! submitted, a status change was refused, ...) through the [`Notifier`]
//! port. The portal routes them to the log; tests record them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual weight of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    /// Informational outcome of a successful action
    Info,
    /// The action failed or was refused
    Destructive,
}

/// A short message describing the outcome of a user action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: NotificationLevel::Info,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: NotificationLevel::Destructive,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.level == NotificationLevel::Destructive
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// Port for delivering notifications to the acting user
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

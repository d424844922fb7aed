//! User notifications
//!
//! Known errors are shown to the user through a [`Notifier`] instead of
//! crashing the program. The console notifier prints to stderr and records
//! each message at debug level in the log.

use std::cell::RefCell;

use tracing::debug;

use crate::error::SaveSaverError;

/// Type of notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    /// Informational message
    Info,
    /// Warning message
    Warning,
    /// Error message
    Error,
}

impl NotificationType {
    /// Get the title for this notification type
    pub fn title(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

/// A message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub notification_type: NotificationType,
    /// Optional hint on how to fix the problem
    pub suggestion: Option<String>,
}

impl Notification {
    pub fn new(message: impl Into<String>, notification_type: NotificationType) -> Self {
        Self {
            message: message.into(),
            notification_type,
            suggestion: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Warning)
    }

    /// Build an error notification with a recovery hint where one applies
    pub fn from_error(err: &SaveSaverError) -> Self {
        Self {
            message: err.user_message(),
            notification_type: NotificationType::Error,
            suggestion: suggestion_for(err).map(String::from),
        }
    }
}

fn suggestion_for(err: &SaveSaverError) -> Option<&'static str> {
    match err {
        SaveSaverError::NotFound { .. } => {
            Some("Run 'save-saver init --source <dir> --backup <dir>' to create the settings file.")
        }
        SaveSaverError::Corrupt { .. } => {
            Some("Run 'save-saver reset' and then 'save-saver init' to recreate the settings file.")
        }
        SaveSaverError::Validation(_) => Some("Use 'save-saver set' to fix the settings."),
        SaveSaverError::AccessDenied { .. } => {
            Some("Check that you have permission to read the saves and write the backups.")
        }
        SaveSaverError::Io { .. } | SaveSaverError::FileCopy { .. } => {
            Some("Close the game or any program that may be using the files, then try again.")
        }
        _ => None,
    }
}

/// Where notifications end up
pub trait Notifier {
    fn notify(&self, notification: &Notification);

    /// Report an error to the user
    fn show_error(&self, err: &SaveSaverError) {
        self.notify(&Notification::from_error(err));
    }
}

/// Prints notifications to stderr
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        debug!(
            kind = notification.notification_type.title(),
            message = %notification.message,
            "notification"
        );

        eprintln!(
            "{}: {}",
            notification.notification_type.title(),
            notification.message
        );
        if let Some(suggestion) = &notification.suggestion {
            eprintln!("  {}", suggestion);
        }
    }
}

/// Keeps notifications in memory instead of showing them
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    received: RefCell<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything notified so far
    pub fn received(&self) -> Vec<Notification> {
        self.received.borrow().clone()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: &Notification) {
        self.received.borrow_mut().push(notification.clone());
    }
}

//! Notification sink for conversion outcomes
//!
//! The converter reports progress through a [`Notifier`]. Return values are
//! self-sufficient; notifications are only a side channel.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        };
        f.write_str(s)
    }
}

/// Receives user-facing messages
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Forwards notifications to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info | Severity::Success => tracing::info!(%severity, "{}", message),
            Severity::Warning => tracing::warn!(%severity, "{}", message),
            Severity::Danger => tracing::error!(%severity, "{}", message),
        }
    }
}

/// Keeps every notification in memory
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    messages: Mutex<Vec<(Severity, String)>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the notifications received so far
    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((severity, message.to_string()));
        }
    }
}

//! Transient notifications.

use std::time::{Duration, Instant};

/// How long info and warning toasts stay up.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

/// How long error toasts stay up.
pub const ERROR_TOAST_TTL: Duration = Duration::from_secs(8);

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

impl ToastLevel {
    /// Returns the short tag shown before the message.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    #[must_use]
    pub fn ttl(self) -> Duration {
        match self {
            Self::Info | Self::Warning => TOAST_TTL,
            Self::Error => ERROR_TOAST_TTL,
        }
    }
}

/// A notification line shown above the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    shown_at: Instant,
}

impl Toast {
    #[must_use]
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Info, message)
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Warning, message)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Error, message)
    }

    /// Returns `true` once the toast has been visible for its level's TTL.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.level.ttl()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_toast_is_not_expired() {
        let toast = Toast::info("Exported");
        assert!(!toast.is_expired(Instant::now()));
    }

    #[test]
    fn toast_expires_after_ttl() {
        let toast = Toast::warning("Local image omitted");
        let later = toast.shown_at + TOAST_TTL;
        assert!(toast.is_expired(later));
    }

    #[test]
    fn errors_stay_longer() {
        let toast = Toast::error("Export failed");
        assert!(!toast.is_expired(toast.shown_at + TOAST_TTL));
        assert!(toast.is_expired(toast.shown_at + ERROR_TOAST_TTL));
    }

    #[test]
    fn tags() {
        assert_eq!(ToastLevel::Info.tag(), "info");
        assert_eq!(ToastLevel::Warning.tag(), "warning");
        assert_eq!(ToastLevel::Error.tag(), "error");
    }
}

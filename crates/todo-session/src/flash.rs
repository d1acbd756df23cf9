//! One-shot status messages
//!
//! A flash survives exactly one render: handlers set it, the next rendered
//! page takes it and the session no longer holds it.

use serde::{Deserialize, Serialize};

/// Pending error and success messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    /// Error message, shown in the error slot
    pub error: Option<String>,
    /// Success message, shown in the success slot
    pub success: Option<String>,
}

impl Flash {
    /// Replace the error message
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Replace the success message
    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
    }

    /// Whether nothing is pending
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.error.is_none() && self.success.is_none()
    }

    /// Take all pending messages, leaving this flash empty
    #[must_use]
    pub fn take(&mut self) -> Flash {
        std::mem::take(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_clears() {
        let mut flash = Flash::default();
        flash.set_error("bad");
        flash.set_success("good");

        let taken = flash.take();
        assert_eq!(taken.error.as_deref(), Some("bad"));
        assert_eq!(taken.success.as_deref(), Some("good"));
        assert!(flash.is_empty());
        assert!(flash.take().is_empty());
    }

    #[test]
    fn later_message_replaces_earlier() {
        let mut flash = Flash::default();
        flash.set_success("first");
        flash.set_success("second");
        assert_eq!(flash.success.as_deref(), Some("second"));
    }
}

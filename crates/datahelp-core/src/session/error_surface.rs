//! Single-slot error surface.

use serde::{Deserialize, Serialize};

/// The one user-visible error. Setting a new message replaces the old one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorState {
    message: Option<String>,
    show: bool,
}

impl ErrorState {
    pub fn set(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.show = true;
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.show = false;
    }

    pub fn is_visible(&self) -> bool {
        self.show
    }

    pub fn message(&self) -> Option<&str> {
        if self.show { self.message.as_deref() } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_previous_message() {
        let mut error = ErrorState::default();
        assert!(!error.is_visible());
        error.set("first");
        error.set("second");
        assert!(error.is_visible());
        assert_eq!(error.message(), Some("second"));
        error.clear();
        assert_eq!(error.message(), None);
    }
}

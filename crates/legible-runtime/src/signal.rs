#![forbid(unsafe_code)]

//! External enable/disable switch.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared on/off flag owned jointly by the engine and an external controller.
///
/// The engine reads the flag on every operation, so flipping it from any
/// clone takes effect on the next call.
#[derive(Debug, Clone)]
pub struct EnableSignal {
    enabled: Arc<AtomicBool>,
}

impl EnableSignal {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(enabled)),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn set(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }
}

impl Default for EnableSignal {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let signal = EnableSignal::default();
        let controller = signal.clone();
        assert!(signal.is_enabled());

        controller.set(false);
        assert!(!signal.is_enabled());
    }
}

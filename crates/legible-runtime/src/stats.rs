#![forbid(unsafe_code)]

//! Usage statistics collaborator.
//!
//! The engine only emits an "increment" after each successful,
//! history-bearing dispatch. [`StatsCounter`] is a ready-made sink that keeps
//! [`SessionStats`] in the shape hosts persist (`sessionStats` in storage).

use std::cell::RefCell;
use std::rc::Rc;

use web_time::{SystemTime, UNIX_EPOCH};

/// Receiver of enhancement-count notifications.
pub trait StatsSink {
    fn increment(&self);
}

/// Usage counters for one browser profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "settings-io", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "settings-io", serde(rename_all = "camelCase", default))]
pub struct SessionStats {
    pub total_enhancements: u64,
    /// Milliseconds since the Unix epoch.
    pub session_start: u64,
    /// Milliseconds since the Unix epoch.
    #[cfg_attr(
        feature = "settings-io",
        serde(skip_serializing_if = "Option::is_none")
    )]
    pub last_enhancement: Option<u64>,
}

impl SessionStats {
    #[must_use]
    pub fn started_at(session_start: u64) -> Self {
        Self {
            total_enhancements: 0,
            session_start,
            last_enhancement: None,
        }
    }

    /// Count one enhancement at `now_ms`.
    pub fn record(&mut self, now_ms: u64) {
        self.total_enhancements = self.total_enhancements.saturating_add(1);
        self.last_enhancement = Some(now_ms);
    }
}

/// Shared in-memory [`StatsSink`]; clones observe the same counters.
#[derive(Debug, Clone)]
pub struct StatsCounter {
    stats: Rc<RefCell<SessionStats>>,
}

impl StatsCounter {
    /// A counter whose session starts now.
    #[must_use]
    pub fn new() -> Self {
        Self::from_stats(SessionStats::started_at(now_ms()))
    }

    /// Continue counting from previously persisted stats.
    #[must_use]
    pub fn from_stats(stats: SessionStats) -> Self {
        Self {
            stats: Rc::new(RefCell::new(stats)),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionStats {
        self.stats.borrow().clone()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.stats.borrow().total_enhancements
    }
}

impl Default for StatsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsSink for StatsCounter {
    fn increment(&self) {
        self.stats.borrow_mut().record(now_ms());
    }
}

/// Milliseconds since the Unix epoch; zero if the clock is before it.
pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

//! Transient user notifications.
//!
//! At most one alert is shown at a time. Each new alert replaces the previous
//! one and schedules its own dismissal; the timer only removes the alert that
//! started it.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Success,
    Info,
    Warning,
    Danger,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlertLevel::Success => "success",
            AlertLevel::Info => "info",
            AlertLevel::Warning => "warning",
            AlertLevel::Danger => "danger",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub level: AlertLevel,
}

#[derive(Default)]
struct Slot {
    generation: u64,
    current: Option<Alert>,
}

/// The shared alert slot.
#[derive(Clone)]
pub struct Alerts {
    slot: Arc<Mutex<Slot>>,
    dismiss_after: Duration,
}

impl Alerts {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            dismiss_after,
        }
    }

    pub fn current(&self) -> Option<Alert> {
        self.slot
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .current
            .clone()
    }

    pub fn add_message(&self, message: impl Into<String>, level: AlertLevel) {
        let alert = Alert {
            message: message.into(),
            level,
        };
        debug!("Alert ({}): {}", alert.level, alert.message);

        let generation = {
            let mut slot = self.slot.lock().unwrap_or_else(|p| p.into_inner());
            slot.generation += 1;
            slot.current = Some(alert);
            slot.generation
        };

        // Outside a runtime the alert stays until dismissed explicitly.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let slot = Arc::clone(&self.slot);
            let delay = self.dismiss_after;
            handle.spawn(async move {
                tokio::time::sleep(delay).await;
                let mut slot = slot.lock().unwrap_or_else(|p| p.into_inner());
                if slot.generation == generation {
                    slot.current = None;
                }
            });
        }
    }

    pub fn dismiss(&self) {
        self.slot
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .current = None;
    }

    pub fn success(&self, message: impl Into<String>) {
        self.add_message(message, AlertLevel::Success);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.add_message(message, AlertLevel::Info);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.add_message(message, AlertLevel::Warning);
    }

    pub fn danger(&self, message: impl Into<String>) {
        self.add_message(message, AlertLevel::Danger);
    }
}

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use tokio::time::Instant;

pub const BANNER_DURATION: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotificationBanner {
    pub visible: bool,
    pub message: String,
}

struct Shown {
    message: String,
    until: Instant,
}

/// Success banner shared by every form of one page instance.
///
/// Only one banner exists at a time: showing a new one replaces the message
/// and restarts the window.
#[derive(Clone, Default)]
pub struct Notifier {
    shown: Arc<Mutex<Option<Shown>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&self, message: impl Into<String>) {
        let mut shown = self.shown.lock().unwrap_or_else(PoisonError::into_inner);
        *shown = Some(Shown {
            message: message.into(),
            until: Instant::now() + BANNER_DURATION,
        });
    }

    pub fn dismiss(&self) {
        let mut shown = self.shown.lock().unwrap_or_else(PoisonError::into_inner);
        *shown = None;
    }

    pub fn banner(&self) -> NotificationBanner {
        let mut shown = self.shown.lock().unwrap_or_else(PoisonError::into_inner);

        match shown.as_ref() {
            Some(s) if Instant::now() < s.until => NotificationBanner {
                visible: true,
                message: s.message.to_owned(),
            },
            Some(_) => {
                *shown = None;
                NotificationBanner::default()
            }
            None => NotificationBanner::default(),
        }
    }

    /// Time left before the current banner hides itself.
    pub fn remaining(&self) -> Option<Duration> {
        let shown = self.shown.lock().unwrap_or_else(PoisonError::into_inner);

        shown
            .as_ref()
            .map(|s| s.until.saturating_duration_since(Instant::now()))
            .filter(|d| !d.is_zero())
    }
}

//! User-facing notices.
//!
//! A [`Notifier`] is created once by the binary, started, handed by `Arc` to
//! whoever needs to raise a notice, and shut down on exit. Notices pushed
//! while the notifier is not running are dropped.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Instant;

use log::{info, warn};

const MAX_NOTICES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub created_at: Instant,
}

#[derive(Debug, Default)]
struct NotifierState {
    running: bool,
    notices: VecDeque<Notice>,
}

#[derive(Debug, Default)]
pub struct Notifier {
    state: Mutex<NotifierState>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) {
        self.lock().running = true;
    }

    /// Stops accepting notices and drops the pending ones.
    pub fn shutdown(&self) {
        let mut state = self.lock();
        state.running = false;
        state.notices.clear();
    }

    pub fn is_running(&self) -> bool {
        self.lock().running
    }

    pub fn push(&self, level: NoticeLevel, message: impl Into<String>) {
        let message = message.into();
        let mut state = self.lock();
        if !state.running {
            return;
        }
        match level {
            NoticeLevel::Info => info!("notice: {}", message),
            NoticeLevel::Error => warn!("notice: {}", message),
        }
        state.notices.push_back(Notice {
            level,
            message,
            created_at: Instant::now(),
        });
        if state.notices.len() > MAX_NOTICES {
            state.notices.pop_front();
        }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message);
    }

    /// Most recent notice, if any.
    pub fn latest(&self) -> Option<Notice> {
        self.lock().notices.back().cloned()
    }

    pub fn drain(&self) -> Vec<Notice> {
        self.lock().notices.drain(..).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NotifierState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let notifier = Notifier::new();
        notifier.error("dropped before start");
        assert!(notifier.latest().is_none());

        notifier.start();
        notifier.info("saved");
        notifier.error("submission failed");
        assert_eq!(notifier.latest().unwrap().level, NoticeLevel::Error);
        assert_eq!(notifier.drain().len(), 2);

        notifier.info("pending");
        notifier.shutdown();
        assert!(notifier.latest().is_none());
        assert!(!notifier.is_running());
    }

    #[test]
    fn test_queue_is_bounded() {
        let notifier = Notifier::new();
        notifier.start();
        for i in 0..30 {
            notifier.info(format!("notice {}", i));
        }
        let notices = notifier.drain();
        assert_eq!(notices.len(), MAX_NOTICES);
        assert_eq!(notices[0].message, "notice 10");
    }
}

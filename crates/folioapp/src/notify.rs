//! # Notifications
//!
//! A single transient message slot shared by every feature that wants to tell
//! the user something happened: draft saved, draft restored, link copied.
//!
//! - Only one notice is visible at a time; a new notice replaces the current one.
//! - A notice disappears on its own once its time-to-live has elapsed.
//! - Nothing here ever reports an error. Failures in folio are either inline
//!   field messages or silent.

use crate::clock::Clock;
use serde::Serialize;
use std::time::{Duration, Instant};

pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_millis(3000);
/// How many past notices a board keeps before dropping the oldest.
pub const HISTORY_LIMIT: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    #[serde(skip)]
    pub expires_at: Instant,
}

/// Output port for transient notifications.
pub trait Notifier {
    fn notify(&mut self, message: &str, kind: NoticeKind);
}

/// Default [`Notifier`]: keeps the visible notice plus the most recent ones
/// shown, up to [`HISTORY_LIMIT`]. Hosts drain them with [`NoticeBoard::take_history`].
pub struct NoticeBoard<C: Clock> {
    clock: C,
    ttl: Duration,
    current: Option<Notice>,
    history: Vec<Notice>,
}

impl<C: Clock> NoticeBoard<C> {
    pub fn new(clock: C) -> Self {
        Self::with_ttl(clock, DEFAULT_NOTICE_TTL)
    }

    pub fn with_ttl(clock: C, ttl: Duration) -> Self {
        Self {
            clock,
            ttl,
            current: None,
            history: Vec::new(),
        }
    }

    /// The notice currently on screen, if it has not expired yet.
    pub fn current(&self) -> Option<&Notice> {
        let now = self.clock.now();
        self.current.as_ref().filter(|n| n.expires_at > now)
    }

    /// Drops the visible notice if its time is up. Returns true if one was dismissed.
    pub fn dismiss_expired(&mut self) -> bool {
        let now = self.clock.now();
        match &self.current {
            Some(notice) if notice.expires_at <= now => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Recently shown notices not yet taken, oldest first.
    pub fn history(&self) -> &[Notice] {
        &self.history
    }

    /// Hands the recent notices to the caller and empties the buffer.
    pub fn take_history(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.history)
    }
}

impl<C: Clock> Notifier for NoticeBoard<C> {
    fn notify(&mut self, message: &str, kind: NoticeKind) {
        let notice = Notice {
            message: message.to_string(),
            kind,
            expires_at: self.clock.deadline_after(self.ttl),
        };
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(notice.clone());
        self.current = Some(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[test]
    fn new_notice_replaces_current() {
        let clock = ManualClock::new();
        let mut board = NoticeBoard::new(clock.clone());

        board.notify("Draft saved automatically", NoticeKind::Success);
        board.notify("Link copied!", NoticeKind::Info);

        let current = board.current().unwrap();
        assert_eq!(current.message, "Link copied!");
        assert_eq!(current.kind, NoticeKind::Info);
        assert_eq!(board.history().len(), 2);
    }

    #[test]
    fn notice_expires_after_ttl() {
        let clock = ManualClock::new();
        let mut board = NoticeBoard::new(clock.clone());
        board.notify("Draft restored", NoticeKind::Info);

        clock.advance_ms(2999);
        assert!(board.current().is_some());
        assert!(!board.dismiss_expired());

        clock.advance_ms(1);
        assert!(board.current().is_none());
        assert!(board.dismiss_expired());
        assert!(!board.dismiss_expired());
    }

    #[test]
    fn replacing_resets_expiry() {
        let clock = ManualClock::new();
        let mut board = NoticeBoard::with_ttl(clock.clone(), Duration::from_millis(100));
        board.notify("one", NoticeKind::Success);
        clock.advance_ms(80);
        board.notify("two", NoticeKind::Success);
        clock.advance_ms(80);
        assert_eq!(board.current().map(|n| n.message.as_str()), Some("two"));
    }

    #[test]
    fn history_stays_bounded() {
        let clock = ManualClock::new();
        let mut board = NoticeBoard::new(clock.clone());
        for i in 0..(HISTORY_LIMIT * 10) {
            board.notify(&format!("saved {}", i), NoticeKind::Success);
        }

        let history = board.history();
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0].message, format!("saved {}", HISTORY_LIMIT * 9));
        assert_eq!(
            history.last().unwrap().message,
            format!("saved {}", HISTORY_LIMIT * 10 - 1)
        );
    }

    #[test]
    fn take_history_drains_but_keeps_current() {
        let clock = ManualClock::new();
        let mut board = NoticeBoard::new(clock.clone());
        board.notify("Draft restored", NoticeKind::Info);
        board.notify("Draft saved automatically", NoticeKind::Success);

        let taken = board.take_history();
        assert_eq!(taken.len(), 2);
        assert!(board.history().is_empty());
        assert_eq!(
            board.current().map(|n| n.message.as_str()),
            Some("Draft saved automatically")
        );
    }

    #[test]
    fn huge_ttl_does_not_overflow() {
        let clock = ManualClock::new();
        let mut board = NoticeBoard::with_ttl(clock.clone(), Duration::MAX);
        board.notify("Link copied!", NoticeKind::Info);
        assert!(board.current().is_some());
    }
}

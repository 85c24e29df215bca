//! Deterministic test doubles for the clock and notifier ports.
//!
//! These doubles let scheduler and registry behaviour be exercised without
//! wall-clock waits or a live chat transport: [`ManualClock`] is a settable
//! [`mockable::Clock`], and [`RecordingNotifier`] captures outbound
//! messages and can be switched into a failing mode.

use crate::assignment::{
    domain::UserId,
    ports::{Notifier, NotifierError, NotifierResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// A clock whose current instant is set and advanced by the test.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Local>>>,
}

impl ManualClock {
    /// Creates a clock pinned to the given local wall-clock time.
    #[must_use]
    pub fn at_local(now: NaiveDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(to_local(now))),
        }
    }

    /// Repins the clock to the given local wall-clock time.
    pub fn set_local(&self, now: NaiveDateTime) {
        *self.lock() = to_local(now);
    }

    /// Moves the clock forward (or backward) by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.lock();
        *now += delta;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DateTime<Local>> {
        self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        *self.lock()
    }

    fn utc(&self) -> DateTime<Utc> {
        self.lock().with_timezone(&Utc)
    }
}

/// Maps a naive wall-clock time onto the process-local timezone.
fn to_local(now: NaiveDateTime) -> DateTime<Local> {
    Local
        .from_local_datetime(&now)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&now))
}

/// A notifier that records every delivery and can be made to fail.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(UserId, String)>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingNotifier {
    /// Creates a notifier that accepts every delivery.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches delivery failure on or off.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Returns every recorded delivery in send order.
    #[must_use]
    pub fn sent(&self) -> Vec<(UserId, String)> {
        self.lock().clone()
    }

    /// Returns the recorded deliveries addressed to `recipient`.
    #[must_use]
    pub fn sent_to(&self, recipient: UserId) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(user, _)| *user == recipient)
            .map(|(_, text)| text.clone())
            .collect()
    }

    /// Forgets all recorded deliveries.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(UserId, String)>> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, recipient: UserId, text: &str) -> NotifierResult {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotifierError::message("notifier transport offline"));
        }
        self.lock().push((recipient, text.to_owned()));
        Ok(())
    }
}

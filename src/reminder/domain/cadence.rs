//! Reminder cadences derived from task priority.

use crate::assignment::domain::Priority;
use chrono::{DateTime, Local, NaiveTime, TimeDelta, TimeZone, Utc};

/// Recurrence rule of a reminder.
///
/// The cadence is a pure function of task priority and doubles as the timer
/// identity: arming a task under an equal cadence is a no-op, while a
/// different cadence supersedes the armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Repeats at a fixed interval.
    Interval(TimeDelta),
    /// Fires once per day at a fixed local time.
    DailyAt(NaiveTime),
}

impl Cadence {
    /// Returns the cadence for a task priority.
    #[must_use]
    pub fn for_priority(priority: Priority) -> Self {
        match priority {
            Priority::Urgent => Self::Interval(TimeDelta::hours(1)),
            Priority::Medium => Self::Interval(TimeDelta::hours(6)),
            Priority::Low => Self::DailyAt(daily_reminder_time()),
        }
    }

    /// Returns the nominal span between two deliveries.
    ///
    /// Used for delivery deduplication and for deciding whether a stored
    /// last-sent timestamp has gone stale during downtime.
    #[must_use]
    pub fn span(self) -> TimeDelta {
        match self {
            Self::Interval(interval) => interval,
            Self::DailyAt(_) => TimeDelta::days(1),
        }
    }

    /// Returns the first fire instant strictly after `reference`.
    #[must_use]
    pub fn next_fire_after(self, reference: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Interval(interval) => reference + interval,
            Self::DailyAt(at) => next_daily_occurrence(reference, at),
        }
    }
}

/// Local time of day at which low-priority reminders fire.
fn daily_reminder_time() -> NaiveTime {
    NaiveTime::from_hms_opt(7, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Returns the next occurrence of `at` local time strictly after `reference`.
fn next_daily_occurrence(reference: DateTime<Utc>, at: NaiveTime) -> DateTime<Utc> {
    let local = reference.with_timezone(&Local);
    let day = if local.time() < at {
        Some(local.date_naive())
    } else {
        local.date_naive().succ_opt()
    };
    day.and_then(|date| Local.from_local_datetime(&date.and_time(at)).earliest())
        .map_or_else(
            // A nonexistent local instant (timezone transition) falls back
            // to one nominal day later.
            || reference + TimeDelta::days(1),
            |instant| instant.with_timezone(&Utc),
        )
}

//! Daily local-time window during which reminders may be delivered.

use chrono::{DateTime, Local, NaiveTime, TimeDelta, TimeZone, Utc};

/// Inclusive daily local-time range for reminder delivery.
///
/// Reminders that come due outside the window are deferred to the next
/// window opening, never dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl DeliveryWindow {
    /// Creates a delivery window; `start` must not be later than `end`.
    #[must_use]
    pub const fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Returns the start of the window.
    #[must_use]
    pub const fn start(&self) -> NaiveTime {
        self.start
    }

    /// Returns the inclusive end of the window.
    #[must_use]
    pub const fn end(&self) -> NaiveTime {
        self.end
    }

    /// Returns whether the given local time of day falls inside the window.
    #[must_use]
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time <= self.end
    }

    /// Returns the next instant at or after `reference` at which delivery
    /// is allowed.
    ///
    /// Inside the window this is `reference` itself; before the window it
    /// is today's opening; after the window it is tomorrow's opening.
    #[must_use]
    pub fn next_open_at(&self, reference: DateTime<Utc>) -> DateTime<Utc> {
        let local = reference.with_timezone(&Local);
        if self.contains(local.time()) {
            return reference;
        }
        let day = if local.time() < self.start {
            Some(local.date_naive())
        } else {
            local.date_naive().succ_opt()
        };
        day.and_then(|date| {
            Local
                .from_local_datetime(&date.and_time(self.start))
                .earliest()
        })
        .map_or_else(
            // A nonexistent local instant (timezone transition) falls back
            // to one nominal day later.
            || reference + TimeDelta::days(1),
            |instant| instant.with_timezone(&Utc),
        )
    }
}

impl Default for DeliveryWindow {
    /// The standard delivery window: 07:00:00 through 19:59:59 local time.
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(19, 59, 59).unwrap_or(NaiveTime::MIN),
        }
    }
}

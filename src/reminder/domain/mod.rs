//! Domain model for reminder scheduling.
//!
//! Cadences, the daily delivery window, and armed timer state are pure
//! calendar logic with no infrastructure dependencies. All wall-clock math
//! runs in the process-local timezone; durable instants stay in UTC.

mod cadence;
mod timer;
mod window;

pub use cadence::Cadence;
pub use timer::ReminderTimer;
pub use window::DeliveryWindow;

//! Service layer for reminder scheduling and restart recovery.

mod recovery;
mod scheduler;

pub use recovery::{RecoveryManager, recovery_plan};
pub use scheduler::{DEFAULT_TICK_PERIOD, ReminderDeliveryError, ReminderScheduler};

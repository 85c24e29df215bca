//! Unit tests for the daily delivery window.

use super::support::local;
use crate::reminder::domain::DeliveryWindow;
use crate::testing::ManualClock;
use chrono::{NaiveTime, TimeDelta};
use mockable::Clock;
use rstest::rstest;

fn time(hour: u32, minute: u32, second: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, second).expect("fixed test time should be valid")
}

#[rstest]
#[case(time(7, 0, 0), true)]
#[case(time(12, 30, 0), true)]
#[case(time(19, 59, 59), true)]
#[case(time(6, 59, 59), false)]
#[case(time(20, 0, 0), false)]
#[case(time(0, 0, 0), false)]
fn window_contains_only_daytime(#[case] at: NaiveTime, #[case] inside: bool) {
    assert_eq!(DeliveryWindow::default().contains(at), inside);
}

#[rstest]
fn inside_the_window_delivery_is_immediate() {
    let now = ManualClock::at_local(local(12, 0, 0)).utc();
    assert_eq!(DeliveryWindow::default().next_open_at(now), now);
}

#[rstest]
// Early morning waits for today's opening.
#[case(local(5, 30, 0), local(7, 0, 0))]
// Evening waits for tomorrow's opening.
#[case(local(22, 0, 0), local(7, 0, 0) + TimeDelta::days(1))]
fn outside_the_window_delivery_waits_for_the_opening(
    #[case] now: chrono::NaiveDateTime,
    #[case] opening: chrono::NaiveDateTime,
) {
    let now_clock = ManualClock::at_local(now);
    let opening_clock = ManualClock::at_local(opening);

    assert_eq!(
        DeliveryWindow::default().next_open_at(now_clock.utc()),
        opening_clock.utc()
    );
}

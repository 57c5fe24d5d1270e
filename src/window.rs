use crate::models::DayEntry;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// Length of the rolling day window backing each heatmap.
pub const WINDOW_DAYS: usize = 154;

/// Largest intensity a day can hold; values map onto a 5-color palette.
pub const MAX_VALUE: u8 = 4;

/// Build the canonical window: `today - 153 ..= today`, every day at zero.
pub fn build_window(today: NaiveDate) -> Vec<DayEntry> {
    (0..WINDOW_DAYS as i64)
        .rev()
        .map(|offset| DayEntry {
            date: today - Duration::days(offset),
            value: 0,
        })
        .collect()
}

/// Advance a persisted window to end at `today` without losing history.
///
/// A window that is already canonical (154 contiguous days ending today) is
/// returned as-is, so callers can skip the write. Anything else, including a
/// record that mentions today but has the wrong length, is rebuilt: the
/// persisted slice is only ever used as a lookup table, so stale, short, or
/// over-long inputs all come out canonical with their in-range values kept.
pub fn reconcile(persisted: &[DayEntry], today: NaiveDate) -> Vec<DayEntry> {
    if is_canonical(persisted, today) {
        return persisted.to_vec();
    }

    let by_date: BTreeMap<NaiveDate, u8> = persisted
        .iter()
        .map(|entry| (entry.date, entry.value))
        .collect();

    let mut window = build_window(today);
    for entry in &mut window {
        if let Some(value) = by_date.get(&entry.date) {
            entry.value = *value;
        }
    }
    window
}

fn is_canonical(window: &[DayEntry], today: NaiveDate) -> bool {
    window.len() == WINDOW_DAYS
        && window.last().is_some_and(|entry| entry.date == today)
        && window
            .windows(2)
            .all(|pair| pair[1].date - pair[0].date == Duration::days(1))
}

/// Clamp an arbitrary requested intensity into `0..=4`.
pub fn clamp_value(value: i64) -> u8 {
    value.clamp(0, i64::from(MAX_VALUE)) as u8
}

pub fn today_value(window: &[DayEntry], today: NaiveDate) -> u8 {
    window
        .iter()
        .find(|entry| entry.date == today)
        .map(|entry| entry.value)
        .unwrap_or(0)
}

/// Set today's intensity through the clamp. Other days are never touched.
pub fn set_today(window: &mut [DayEntry], today: NaiveDate, value: i64) {
    let clamped = clamp_value(value);
    for entry in window.iter_mut() {
        if entry.date == today {
            entry.value = clamped;
        }
    }
}

/// Consecutive non-zero days ending at today. An unlogged today does not
/// break the run; any earlier zero does. Derived for display only.
pub fn current_streak(window: &[DayEntry], today: NaiveDate) -> u32 {
    let mut streak = 0;
    for entry in window.iter().rev() {
        if entry.date > today {
            continue;
        }
        if entry.value > 0 {
            streak += 1;
        } else if entry.date == today {
            continue;
        } else {
            break;
        }
    }
    streak
}

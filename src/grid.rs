use crate::models::DayEntry;
use crate::theme::Theme;
use crate::window::MAX_VALUE;
use chrono::NaiveDate;
use serde::Serialize;

pub const GRID_COLUMNS: usize = 22;
pub const GRID_ROWS: usize = 7;

/// One square of the rendered heatmap. `column * 7 + row` equals the day's
/// index in the window, so column 0 holds the oldest week of days and each
/// column reads top-to-bottom chronologically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub date: NaiveDate,
    pub value: u8,
    pub color: &'static str,
    pub column: usize,
    pub row: usize,
    pub today: bool,
}

/// Lay a reconciled window out as grid cells under the given palette.
pub fn layout(window: &[DayEntry], theme: Theme, today: NaiveDate) -> Vec<GridCell> {
    let colors = theme.colors();
    window
        .iter()
        .enumerate()
        .map(|(index, entry)| GridCell {
            date: entry.date,
            value: entry.value,
            color: colors[entry.value.min(MAX_VALUE) as usize],
            column: index / GRID_ROWS,
            row: index % GRID_ROWS,
            today: entry.date == today,
        })
        .collect()
}

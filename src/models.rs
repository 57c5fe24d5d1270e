use crate::grid::GridCell;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of one tracker's window. `date` serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tracker {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct TitleRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckinRequest {
    pub action: String,
    pub value: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub theme: String,
}

#[derive(Debug, Serialize)]
pub struct TrackerSummary {
    pub id: String,
    pub title: String,
    pub theme: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TrackerListResponse {
    pub trackers: Vec<TrackerSummary>,
}

/// Everything the page needs to paint one tracker card.
#[derive(Debug, Serialize)]
pub struct WindowResponse {
    pub id: String,
    pub title: String,
    pub theme: &'static str,
    pub today: NaiveDate,
    pub today_value: u8,
    pub streak: u32,
    pub goal: u8,
    pub colors: [&'static str; 5],
    pub cells: Vec<GridCell>,
}

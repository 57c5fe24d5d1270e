use crate::models::Tracker;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Ordered list of the user's trackers. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackerList(Vec<Tracker>);

impl TrackerList {
    /// First-run list: a single seeded tracker so the page is never empty.
    pub fn seed() -> Self {
        Self(vec![Tracker {
            id: "1".to_string(),
            title: "My First Heatmap".to_string(),
        }])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tracker> {
        self.0.iter()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, id: &str) -> Option<&Tracker> {
        self.0.iter().find(|tracker| tracker.id == id)
    }

    /// Append a tracker with a fresh id. A blank title is a silent no-op.
    /// Returns whether the list changed.
    pub fn add(&mut self, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        let id = self.fresh_id();
        self.0.push(Tracker {
            id,
            title: title.to_string(),
        });
        true
    }

    /// Rename in place. Blank titles and unknown ids are silent no-ops.
    pub fn rename(&mut self, id: &str, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        match self.0.iter_mut().find(|tracker| tracker.id == id) {
            Some(tracker) => {
                tracker.title = title.to_string();
                true
            }
            None => false,
        }
    }

    /// Remove by id; unknown ids are a no-op. Returns whether anything was
    /// removed so the caller can drop the tracker's other records.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|tracker| tracker.id != id);
        self.0.len() != before
    }

    // Millisecond timestamp, bumped past any collision with an existing id.
    fn fresh_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis().max(0);
        while self.get(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }
}

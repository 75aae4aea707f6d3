//! Local leaderboard
//!
//! Persisted as a JSON array of `{score, date, timestamp}` records, keeps the
//! top 10 scores.

use serde::{Deserialize, Serialize};

use crate::persistence::{Storage, StorageError};

/// Maximum number of scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Final score of the run
    pub score: u64,
    /// Human-readable local date
    pub date: String,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Leaderboard, sorted by score (highest first)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Storage slot
    pub const STORAGE_KEY: &'static str = "fpsArenaLeaderboard";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score would make it onto the board
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Ties with the last entry lose to the older score
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a score in memory, returning the rank achieved (1-indexed)
    ///
    /// Equal scores keep their insertion order, so a new score ranks below
    /// existing entries with the same value.
    pub fn add_score(&mut self, score: u64, date: String, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = LeaderboardEntry {
            score,
            date,
            timestamp,
        };

        let rank = match self.entries.iter().position(|e| score > e.score) {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the leaderboard; missing or unreadable data is an empty board
    pub fn load<S: Storage>(storage: &S) -> Self {
        match storage.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Leaderboard>(&json) {
                Ok(mut board) => {
                    board.normalize();
                    log::info!("Loaded {} leaderboard entries", board.len());
                    board
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable leaderboard: {}", e);
                    Self::new()
                }
            },
            Ok(None) => {
                log::info!("No leaderboard found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Leaderboard unavailable: {}", e);
                Self::new()
            }
        }
    }

    /// Write the leaderboard back to storage
    pub fn persist<S: Storage>(&self, storage: &mut S) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        storage.set(Self::STORAGE_KEY, &json)?;
        log::info!("Leaderboard saved ({} entries)", self.len());
        Ok(())
    }

    /// Record a finished run and write the board back
    pub fn save<S: Storage>(
        &mut self,
        storage: &mut S,
        score: u64,
        date: String,
        timestamp: f64,
    ) -> Result<Option<usize>, StorageError> {
        let rank = self.add_score(score, date, timestamp);
        if rank.is_some() {
            self.persist(storage)?;
        }
        Ok(rank)
    }

    /// Restore ordering and size for data written by someone else
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }
}

/// Format a timestamp as a local date string
#[cfg(target_arch = "wasm32")]
pub fn format_date(timestamp: f64) -> String {
    let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(timestamp));
    String::from(date.to_locale_date_string("default", &wasm_bindgen::JsValue::UNDEFINED))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn format_date(timestamp: f64) -> String {
    use chrono::{Local, TimeZone};

    match Local.timestamp_millis_opt(timestamp as i64).single() {
        Some(dt) => date_string(&dt.date_naive()),
        None => "N/A".to_string(),
    }
}

/// `month/day/year` without zero padding
#[cfg(not(target_arch = "wasm32"))]
fn date_string(date: &chrono::NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Current time as a Unix timestamp (ms)
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64
}

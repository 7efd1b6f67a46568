use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// How many entries the leaderboard keeps.
pub const LEADERBOARD_SIZE: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
    pub date: String,
}

/// Where the top scores are kept between sessions.
pub trait ScoreStore {
    fn load_top_scores(&self) -> anyhow::Result<Vec<ScoreEntry>>;
    fn save_top_scores(&self, entries: &[ScoreEntry]) -> anyhow::Result<()>;
}

/// Keeps the entries as a pretty-printed JSON list in a single file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn load_top_scores(&self) -> anyhow::Result<Vec<ScoreEntry>> {
        let body = fs::read_to_string(&self.path)
            .with_context(|| format!("Could not read {}", self.path.display()))?;
        let entries = serde_json::from_str(&body)
            .with_context(|| format!("Could not parse {}", self.path.display()))?;
        Ok(entries)
    }

    fn save_top_scores(&self, entries: &[ScoreEntry]) -> anyhow::Result<()> {
        let body = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, body)
            .with_context(|| format!("Could not write {}", self.path.display()))
    }
}

/// The lowest final scores, best first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    /// Reads the stored entries. A missing or unreadable store gives an
    /// empty board.
    pub fn load(store: &dyn ScoreStore) -> Self {
        let mut entries = match store.load_top_scores() {
            Ok(entries) => entries,
            Err(err) => {
                warn!("Starting with an empty leaderboard: {:#}", err);
                Vec::new()
            }
        };
        entries.sort_by_key(|entry| entry.score);
        entries.truncate(LEADERBOARD_SIZE);
        Self { entries }
    }

    pub fn save(&self, store: &dyn ScoreStore) -> anyhow::Result<()> {
        store.save_top_scores(&self.entries)
    }

    /// Adds an entry if it makes the board. Returns whether it did.
    ///
    /// Once the board is full, only a score strictly lower than the current
    /// last place gets in, and it takes that place.
    pub fn record(&mut self, entry: ScoreEntry) -> bool {
        if self.entries.len() >= LEADERBOARD_SIZE {
            match self.entries.last() {
                Some(last) if entry.score < last.score => {
                    self.entries.pop();
                }
                _ => return false,
            }
        }
        let pos = self.entries.partition_point(|e| e.score <= entry.score);
        self.entries.insert(pos, entry);
        true
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }
}

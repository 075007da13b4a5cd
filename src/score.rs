use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

const APP_DIR_NAME: &str = "arena-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// Number of entries kept in the table.
pub const MAX_HIGH_SCORES: usize = 10;

const ANONYMOUS: &str = "Anonymous";

/// One ranked result.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HighScore {
    pub id: u64,
    pub name: String,
    pub score: u32,
    /// Calendar date of the run, `YYYY-MM-DD`.
    pub date: String,
}

/// What happened when a result was submitted.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Submission {
    /// The score beats every previous entry (or the table was empty).
    pub new_record: bool,
    /// The score made it into the table.
    pub ranked: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ScoreFile {
    entries: Vec<HighScore>,
}

/// Top-ten table, highest score first.
#[derive(Debug, Clone, Default)]
pub struct HighScores {
    entries: Vec<HighScore>,
    path: Option<PathBuf>,
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

impl HighScores {
    /// Creates an empty table that is never written to disk.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Loads the table from the default location.
    pub fn load() -> io::Result<Self> {
        Self::load_from_path(scores_path())
    }

    /// Loads the table from `path`.
    ///
    /// Returns an empty table when the file does not yet exist (first run).
    /// Returns `Err` when the file exists but cannot be read or parsed.
    pub fn load_from_path(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Self {
                    entries: Vec::new(),
                    path: Some(path),
                });
            }
            Err(e) => return Err(e),
        };

        let file = serde_json::from_str::<ScoreFile>(&raw)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut entries = file.entries;
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);

        Ok(Self {
            entries,
            path: Some(path),
        })
    }

    /// Empty table that persists to `path`, used after a failed load.
    #[must_use]
    pub fn empty_at(path: impl Into<PathBuf>) -> Self {
        Self {
            entries: Vec::new(),
            path: Some(path.into()),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[HighScore] {
        &self.entries
    }

    /// Returns true when `score` would enter the table.
    #[must_use]
    pub fn is_high_score(&self, score: u32) -> bool {
        match self.entries.last() {
            Some(lowest) if self.entries.len() >= MAX_HIGH_SCORES => score > lowest.score,
            _ => true,
        }
    }

    /// Returns true when `score` beats the current best.
    #[must_use]
    pub fn is_new_record(&self, score: u32) -> bool {
        self.entries.first().is_none_or(|best| score > best.score)
    }

    /// Best score recorded under `name`, compared case-insensitively.
    #[must_use]
    pub fn player_best(&self, name: &str) -> u32 {
        let name = name.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.name.to_lowercase() == name)
            .map(|entry| entry.score)
            .max()
            .unwrap_or(0)
    }

    /// Inserts a result dated today and persists the table.
    ///
    /// Persistence failures are logged and otherwise ignored.
    pub fn submit(&mut self, name: &str, score: u32) -> Submission {
        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        let submission = self.insert(name, score, date);
        self.persist();
        submission
    }

    /// Removes every entry and persists the empty table.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    fn insert(&mut self, name: &str, score: u32, date: String) -> Submission {
        let new_record = self.is_new_record(score);
        let id = self.entries.iter().map(|entry| entry.id).max().map_or(1, |id| id + 1);

        let name = match name.trim() {
            "" => ANONYMOUS.to_owned(),
            trimmed => trimmed.to_owned(),
        };

        self.entries.push(HighScore {
            id,
            name,
            score,
            date,
        });
        // Stable sort: equal scores keep submission order.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);

        Submission {
            new_record,
            ranked: self.entries.iter().any(|entry| entry.id == id),
        }
    }

    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };

        if let Err(error) = save_to_path(path, &self.entries) {
            warn!("failed to save high scores to {}: {error}", path.display());
        }
    }
}

fn save_to_path(path: &Path, entries: &[HighScore]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = ScoreFile {
        entries: entries.to_vec(),
    };
    let json = serde_json::to_string_pretty(&payload)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;

    fs::write(path, json)
}

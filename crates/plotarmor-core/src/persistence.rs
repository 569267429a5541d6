//! Roster persistence.
//!
//! The roster is a small, human-editable JSON config file:
//!
//! ```json
//! { "version": 1, "protected_players": ["<uuid>", ...] }
//! ```
//!
//! A missing file means an empty roster. Individually malformed UUID
//! entries are skipped with a warning rather than failing the load; a
//! version mismatch is an error.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::roster::{PlayerId, Roster};

/// Version number for the roster file format (increment when it changes).
const STORE_VERSION: u32 = 1;

/// On-disk shape of the roster file.
#[derive(Serialize, Deserialize)]
struct RosterFile {
    version: u32,
    protected_players: Vec<String>,
}

/// Loads and saves the roster at a fixed path.
#[derive(Debug, Clone)]
pub struct RosterStore {
    path: PathBuf,
}

impl RosterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Load the roster from disk.
    pub fn load(&self) -> Result<Roster, StoreError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Roster::new()),
            Err(e) => return Err(e.into()),
        };

        let file: RosterFile = serde_json::from_str(&data)?;
        if file.version != STORE_VERSION {
            return Err(StoreError::VersionMismatch {
                expected: STORE_VERSION,
                found: file.version,
            });
        }

        let mut roster = Roster::new();
        for entry in &file.protected_players {
            match entry.parse::<PlayerId>() {
                Ok(id) => {
                    roster.add(id);
                }
                Err(_) => log::warn!(
                    "Invalid player id in {}: {:?}",
                    self.path.display(),
                    entry
                ),
            }
        }
        Ok(roster)
    }

    /// Rewrite the roster file. Entries are sorted so repeated saves of the
    /// same roster produce identical files.
    pub fn save(&self, roster: &Roster) -> Result<(), StoreError> {
        let mut entries: Vec<String> = roster.iter().map(|id| id.to_string()).collect();
        entries.sort();

        let file = RosterFile {
            version: STORE_VERSION,
            protected_players: entries,
        };
        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }
}

/// Errors that can occur loading or saving the roster.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Json(e) => write!(f, "JSON error: {}", e),
            StoreError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Roster version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for StoreError {}

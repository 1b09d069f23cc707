//=========================================================================
// Record Stores
//=========================================================================
//
// `RecordStore` implementations: a JSON file for the game, and an
// in-memory store with failure injection for tests and headless runs.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::{rank, Record, RecordStore};
use crate::error::PersistenceError;

//=== JsonRecordStore =====================================================

/// Records stored as a JSON array at `path`.
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    path: PathBuf,
}

impl JsonRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for JsonRecordStore {
    /// A missing file is an empty board.
    fn load(&mut self) -> Result<Vec<Record>, PersistenceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("No leaderboard at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let records: Vec<Record> =
            serde_json::from_str(&content).map_err(|source| PersistenceError::Parse {
                path: self.path.clone(),
                source,
            })?;

        Ok(rank(records))
    }

    fn save(&mut self, records: &[Record]) -> Result<(), PersistenceError> {
        let content = serde_json::to_string_pretty(records).map_err(PersistenceError::Serialize)?;
        fs::write(&self.path, content).map_err(|source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        })?;

        info!("Saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

//=== MemoryRecordStore ===================================================

#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: Vec<Record>,
    pub fail_load: bool,
    pub fail_save: bool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&mut self) -> Result<Vec<Record>, PersistenceError> {
        if self.fail_load {
            return Err(PersistenceError::Unavailable("load disabled".into()));
        }
        Ok(rank(self.records.clone()))
    }

    fn save(&mut self, records: &[Record]) -> Result<(), PersistenceError> {
        if self.fail_save {
            return Err(PersistenceError::Unavailable("save disabled".into()));
        }
        self.records = records.to_vec();
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

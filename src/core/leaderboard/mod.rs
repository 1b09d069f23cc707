//=========================================================================
// Leaderboard
//
// Bounded top-N ranking of finished rounds.
//
// Responsibilities:
// - Decide whether a score earns a place (admission)
// - Insert a record, keep the list ranked and bounded
// - Define the storage seam; the ranking logic never touches I/O
//
//=========================================================================

//=== Submodules ==========================================================
pub mod store;

//=== External Dependencies ===============================================

use log::debug;
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::error::PersistenceError;

//=== Public API ==========================================================
pub use store::{JsonRecordStore, MemoryRecordStore};

/// Maximum number of ranked records.
pub const CAPACITY: usize = 10;

//=== Record ==============================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub points: u64,
}

impl Record {
    pub fn new(name: impl Into<String>, points: u64) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }
}

//=== Ranking =============================================================

/// True if `points` would earn a place in `records`.
///
/// Any score is admitted while the board has free slots; once full, it
/// must beat at least one existing record.
pub fn admits(records: &[Record], points: u64) -> bool {
    records.len() < CAPACITY || records.iter().any(|record| points > record.points)
}

/// Adds a record and returns the list re-ranked and truncated to
/// [`CAPACITY`]. Equal scores keep their insertion order.
pub fn insert(mut records: Vec<Record>, name: impl Into<String>, points: u64) -> Vec<Record> {
    records.push(Record::new(name, points));
    rank(records)
}

/// Sorts by points descending (stable) and truncates to [`CAPACITY`].
pub fn rank(mut records: Vec<Record>) -> Vec<Record> {
    records.sort_by(|a, b| b.points.cmp(&a.points));
    records.truncate(CAPACITY);
    records
}

//=== Leaderboard =========================================================

/// In-memory ranked records between a load and a save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaderboard {
    records: Vec<Record>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of loaded records, re-ranking them.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            records: rank(records),
        }
    }

    pub fn admits(&self, points: u64) -> bool {
        admits(&self.records, points)
    }

    pub fn insert(&mut self, name: impl Into<String>, points: u64) {
        let records = std::mem::take(&mut self.records);
        self.records = insert(records, name, points);
        debug!("Leaderboard now holds {} records", self.records.len());
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

//=== RecordStore =========================================================

/// Storage collaborator for the leaderboard.
pub trait RecordStore {
    fn load(&mut self) -> Result<Vec<Record>, PersistenceError>;
    fn save(&mut self, records: &[Record]) -> Result<(), PersistenceError>;
}

//=========================================================================
// Unit Tests
//=========================================================================

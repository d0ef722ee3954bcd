//! Bucketed results mapping
//!
//! One pagination session owns a single `GamesByState` value. The engine
//! only ever appends to it, so insertion order within a bucket reflects the
//! descending id walk (higher ids first).

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::domain::game::GameRecord;

/// One of the three display categories a record is sorted into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum Bucket {
    Open,
    Closed,
    Settled,
}

/// Games grouped by display bucket, insertion order preserved.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamesByState {
    open: Vec<GameRecord>,
    closed: Vec<GameRecord>,
    settled: Vec<GameRecord>,
}

impl GamesByState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bucket: Bucket, record: GameRecord) {
        match bucket {
            Bucket::Open => self.open.push(record),
            Bucket::Closed => self.closed.push(record),
            Bucket::Settled => self.settled.push(record),
        }
    }

    pub fn games(&self, bucket: Bucket) -> &[GameRecord] {
        match bucket {
            Bucket::Open => &self.open,
            Bucket::Closed => &self.closed,
            Bucket::Settled => &self.settled,
        }
    }

    /// Total number of records across all buckets.
    pub fn len(&self) -> usize {
        self.open.len() + self.closed.len() + self.settled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

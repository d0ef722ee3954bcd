//! In-memory game fetcher
//!
//! Backs the `--offline` demo mode and the test suite. Holds a fixed set of
//! records keyed by id and serves them without any transport. An induced
//! outage threshold lets failure paths be exercised deterministically.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::{
    AuthorityKey, GameData, GameDefinition, GameRecord, LedgerStats, Settlement,
};
use crate::fetcher::{GameFetcher, TransportError};

#[derive(Clone, Default)]
pub struct MemoryFetcher {
    records: Arc<HashMap<u64, GameRecord>>,
    outage_below: Option<u64>,
}

impl MemoryFetcher {
    pub fn new(records: impl IntoIterator<Item = GameRecord>) -> Self {
        Self {
            records: Arc::new(
                records
                    .into_iter()
                    .map(|record| (record.data.game_id, record))
                    .collect(),
            ),
            outage_below: None,
        }
    }

    /// Fail any fetch that requests an id below `floor`, as if the ledger
    /// became unreachable partway through a session.
    pub fn with_outage_below(mut self, floor: u64) -> Self {
        self.outage_below = Some(floor);
        self
    }

    /// A small ledger for the offline demo: a few open games at the top of
    /// the id space, a closed stretch, then a voided game and settled ones.
    pub fn sample() -> Self {
        let now = Utc::now();
        let mut records = Vec::new();
        for id in 1..=23u64 {
            let (close_offset, settlement) = match id {
                21..=23 => (Duration::hours(12), None),
                16..=20 => (-Duration::hours(3), None),
                15 => (-Duration::days(2), Some(Settlement::Voided)),
                _ => (-Duration::days(3), Some(Settlement::Settled)),
            };
            records.push(GameRecord {
                data: GameData {
                    game_id: id,
                    open_time: now - Duration::days(4),
                    close_time: now + close_offset,
                    settled_at: settlement.map(|_| now - Duration::days(1)),
                    settlement,
                    total_stake: id * 12_500,
                },
                cached: GameDefinition {
                    title: format!("Exhibition match #{id}"),
                },
            });
        }
        Self::new(records)
    }

    fn highest_id(&self) -> u64 {
        self.records.keys().copied().max().unwrap_or(0)
    }
}

impl GameFetcher for MemoryFetcher {
    async fn fetch_games(
        &self,
        ids: &[u64],
        _authority: &AuthorityKey,
    ) -> Result<Vec<GameRecord>, TransportError> {
        if let Some(floor) = self.outage_below {
            if ids.iter().any(|id| *id < floor) {
                return Err(TransportError::Unreachable(
                    "induced outage: ledger connection lost".to_string(),
                ));
            }
        }
        Ok(ids
            .iter()
            .filter_map(|id| self.records.get(id).cloned())
            .collect())
    }

    async fn fetch_stats(&self, _authority: &AuthorityKey) -> Result<LedgerStats, TransportError> {
        Ok(LedgerStats {
            total_games: self.highest_id(),
        })
    }
}

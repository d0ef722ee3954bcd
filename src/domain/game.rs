use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single game instance as served by the ledger.
///
/// `data` is the raw on-chain state; `cached` is the derived view the
/// indexer keeps alongside it (display title and the like). Records are
/// immutable once fetched within a pagination pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub data: GameData,
    pub cached: GameDefinition,
}

/// Raw on-chain state fields of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameData {
    pub game_id: u64,
    pub open_time: DateTime<Utc>,
    pub close_time: DateTime<Utc>,
    #[serde(default)]
    pub settled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub settlement: Option<Settlement>,
    #[serde(default)]
    pub total_stake: u64,
}

/// Explicit settlement tag on the wire.
///
/// Tags this client does not know about deserialize as `Unknown` so they
/// can be rejected loudly instead of being bucketed by guesswork.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Settlement {
    Settled,
    Voided,
    #[serde(other)]
    Unknown,
}

/// Cached definition the indexer derives for display purposes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDefinition {
    pub title: String,
}

/// Owner key identifying which program space to query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityKey(String);

impl AuthorityKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AuthorityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Aggregate counters the ledger keeps per authority.
///
/// `total_games` is the highest game id ever created, which is where a
/// discovery session starts its descent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub total_games: u64,
}

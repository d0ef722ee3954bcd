//! Domain types
//!
//! Records as the ledger serves them, their lifecycle classification,
//! and the bucketed results mapping the UI displays.

pub mod game;
pub mod lifecycle;
pub mod results;

pub use game::{AuthorityKey, GameData, GameDefinition, GameRecord, LedgerStats, Settlement};
pub use lifecycle::{classify, ClassifyError, LifecycleState};
pub use results::{Bucket, GamesByState};

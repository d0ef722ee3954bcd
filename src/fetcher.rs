//! Batch fetcher boundary
//!
//! The pagination engine talks to the ledger through [`GameFetcher`] and
//! nothing else. Implementations must return every requested id that exists
//! exactly once, in no particular order; missing or uninitialized ids are
//! silently omitted and are not an error.

use std::future::Future;

use thiserror::Error;

use crate::domain::{AuthorityKey, GameRecord, LedgerStats};

pub mod memory;
pub mod rpc;

pub use memory::MemoryFetcher;
pub use rpc::RpcFetcher;

/// Failure reaching or querying the ledger.
///
/// Missing ids never produce a `TransportError`; only the transport itself
/// (or the program rejecting the query) does.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("ledger rpc transport: {0}")]
    Http(#[from] reqwest::Error),
    #[error("ledger rejected the query: {message} (code {code})")]
    Rejected { code: i64, message: String },
    #[error("malformed ledger response: {0}")]
    Malformed(String),
    #[error("ledger unreachable: {0}")]
    Unreachable(String),
}

/// Read access to the game records of one program space.
pub trait GameFetcher {
    /// Fetch the records for `ids` owned by `authority`.
    ///
    /// Response order is unspecified and may not match `ids`.
    fn fetch_games(
        &self,
        ids: &[u64],
        authority: &AuthorityKey,
    ) -> impl Future<Output = Result<Vec<GameRecord>, TransportError>> + Send;

    /// Fetch the aggregate counters for `authority`.
    fn fetch_stats(
        &self,
        authority: &AuthorityKey,
    ) -> impl Future<Output = Result<LedgerStats, TransportError>> + Send;
}

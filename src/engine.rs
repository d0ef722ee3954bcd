//! Paginated game discovery
//!
//! The discovery engine walks the id space downwards from the highest known
//! game id, fetching fixed-size batches and bucketing each record by
//! lifecycle state until the id space is exhausted or a settled record
//! signals that everything older is likely settled too.

pub mod pagination;
pub mod range;

pub use pagination::{Page, PaginationEngine, PaginationError};
pub use range::id_range;

use std::num::NonZeroUsize;

/// The next ids to fetch: `last_game_id, last_game_id - 1, ...`, at most
/// `batch_size` of them, stopping above 0. Empty when `last_game_id` is 0.
///
/// Chained via `min(range) - 1` this enumerates every id exactly once.
pub fn id_range(last_game_id: u64, batch_size: NonZeroUsize) -> Vec<u64> {
    (1..=last_game_id).rev().take(batch_size.get()).collect()
}

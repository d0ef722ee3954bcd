//! Pagination engine
//!
//! `fetch_more` drives one discovery session: request a batch of ids,
//! classify every returned record, append them to the caller's results
//! mapping, then either descend to the next batch or stop. The original
//! flow recursed per batch; here it is an explicit loop threading
//! `(games, batch_size, frontier)` so deep id spaces cannot grow the stack.

use std::num::NonZeroUsize;

use chrono::Utc;
use thiserror::Error;

use crate::domain::{
    classify, AuthorityKey, Bucket, ClassifyError, GamesByState, LedgerStats, LifecycleState,
};
use crate::fetcher::{GameFetcher, TransportError};

#[derive(Debug, Error)]
pub enum PaginationError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Classification(#[from] ClassifyError),
}

/// Summary of one `fetch_more` call.
///
/// `frontier` is the next id to fetch from on "load more"; 0 means the id
/// space is exhausted. `batches == 0` means no fetch was issued at all, as
/// opposed to batches that were fetched and came back empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Page {
    pub frontier: u64,
    pub batches: usize,
    pub fetched: usize,
}

#[derive(Clone)]
pub struct PaginationEngine<F> {
    fetcher: F,
    authority: AuthorityKey,
}

impl<F: GameFetcher> PaginationEngine<F> {
    pub fn new(fetcher: F, authority: AuthorityKey) -> Self {
        Self { fetcher, authority }
    }

    /// The ledger's aggregate counters; `total_games` seeds the first
    /// session's frontier.
    pub async fn ledger_stats(&self) -> Result<LedgerStats, TransportError> {
        self.fetcher.fetch_stats(&self.authority).await
    }

    /// Fetch batches descending from `start_id`, appending classified
    /// records to `games`, until the id space is exhausted or a batch ends
    /// on a settled record.
    ///
    /// Games settle in roughly creation order, so one `Settled` record is
    /// taken as a signal that older games are settled too and the rest of
    /// the descent can wait for an explicit "load more". Only the literal
    /// `Settled` raw state stops the descent; a `Voided` record lands in the
    /// Settled bucket but keeps the walk going.
    ///
    /// On error nothing from the failing batch is committed; batches
    /// committed by earlier iterations of the same call remain.
    pub async fn fetch_more(
        &self,
        games: &mut GamesByState,
        batch_size: NonZeroUsize,
        start_id: u64,
    ) -> Result<Page, PaginationError> {
        let mut frontier = start_id;
        let mut batches = 0;
        let mut fetched = 0;

        loop {
            let ids = super::range::id_range(frontier, batch_size);
            let Some(lowest) = ids.last().copied() else {
                return Ok(Page {
                    frontier: 0,
                    batches,
                    fetched,
                });
            };

            let records = self.fetcher.fetch_games(&ids, &self.authority).await?;
            batches += 1;

            // Classify the whole batch before touching `games` so a bad
            // record cannot leave a half-committed batch behind.
            let now = Utc::now();
            let mut staged = Vec::with_capacity(records.len());
            let mut last_state = None;
            for record in records {
                let state = classify(&record.data, now)?;
                last_state = Some(state);
                staged.push((bucket_for(state), record));
            }

            fetched += staged.len();
            for (bucket, record) in staged {
                games.push(bucket, record);
            }

            frontier = lowest - 1;
            log::debug!(
                "batch {batches}: {fetched} games so far, frontier now {frontier}"
            );

            if frontier == 0 || last_state == Some(LifecycleState::Settled) {
                return Ok(Page {
                    frontier,
                    batches,
                    fetched,
                });
            }
        }
    }
}

/// Display-bucket policy: voided games are shown with the settled ones.
fn bucket_for(state: LifecycleState) -> Bucket {
    match state {
        LifecycleState::Open => Bucket::Open,
        LifecycleState::Closed => Bucket::Closed,
        LifecycleState::Settled | LifecycleState::Voided => Bucket::Settled,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::{GameData, GameDefinition, GameRecord, Settlement};
    use crate::fetcher::MemoryFetcher;

    fn batch(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).expect("batch size")
    }

    fn engine(records: Vec<GameRecord>) -> PaginationEngine<MemoryFetcher> {
        PaginationEngine::new(MemoryFetcher::new(records), AuthorityKey::new("feedface"))
    }

    fn record(game_id: u64, settlement: Option<Settlement>, closed: bool) -> GameRecord {
        // Times are pinned far from the present so wall-clock classification
        // is stable: closed games closed in 2000, open ones close in 2100.
        let close_time = if closed {
            Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).single().expect("timestamp")
        } else {
            Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0).single().expect("timestamp")
        };
        GameRecord {
            data: GameData {
                game_id,
                open_time: close_time - Duration::days(7),
                close_time,
                settled_at: settlement.map(|_| close_time),
                settlement,
                total_stake: 1000,
            },
            cached: GameDefinition {
                title: format!("Game {game_id}"),
            },
        }
    }

    fn closed(game_id: u64) -> GameRecord {
        record(game_id, None, true)
    }

    fn open(game_id: u64) -> GameRecord {
        record(game_id, None, false)
    }

    fn settled(game_id: u64) -> GameRecord {
        record(game_id, Some(Settlement::Settled), true)
    }

    fn voided(game_id: u64) -> GameRecord {
        record(game_id, Some(Settlement::Voided), true)
    }

    fn ids(games: &GamesByState, bucket: Bucket) -> Vec<u64> {
        games.games(bucket).iter().map(|r| r.data.game_id).collect()
    }

    #[tokio::test]
    async fn test_worked_example_stops_at_settled_record() {
        // Ids 25..21 closed, 20 settled, 19..16 uninitialized.
        let engine = engine(vec![
            closed(25),
            closed(24),
            closed(23),
            closed(22),
            closed(21),
            settled(20),
        ]);
        let mut games = GamesByState::new();

        let page = engine
            .fetch_more(&mut games, batch(10), 25)
            .await
            .expect("fetch_more");

        assert_eq!(ids(&games, Bucket::Open), Vec::<u64>::new());
        assert_eq!(ids(&games, Bucket::Closed), vec![25, 24, 23, 22, 21]);
        assert_eq!(ids(&games, Bucket::Settled), vec![20]);
        assert_eq!(
            page,
            Page {
                frontier: 15,
                batches: 1,
                fetched: 6
            }
        );
    }

    #[tokio::test]
    async fn test_empty_source_issues_no_fetch() {
        let engine = engine(vec![]);
        let mut games = GamesByState::new();

        let page = engine
            .fetch_more(&mut games, batch(10), 0)
            .await
            .expect("fetch_more");

        assert!(games.is_empty());
        assert_eq!(
            page,
            Page {
                frontier: 0,
                batches: 0,
                fetched: 0
            }
        );
    }

    #[tokio::test]
    async fn test_partial_batch_is_not_an_error() {
        // Only 7 of 10 requested ids exist.
        let engine = engine((4..=10).map(open).collect());
        let mut games = GamesByState::new();

        let page = engine
            .fetch_more(&mut games, batch(10), 10)
            .await
            .expect("fetch_more");

        assert_eq!(games.len(), 7);
        assert_eq!(page.frontier, 0);
        assert_eq!(page.fetched, 7);
    }

    #[tokio::test]
    async fn test_voided_games_do_not_stop_the_descent() {
        // Voided is displayed as settled but only a literal Settled state
        // halts eager fetching.
        let engine = engine(vec![voided(6), voided(5), voided(4), closed(3), closed(2), closed(1)]);
        let mut games = GamesByState::new();

        let page = engine
            .fetch_more(&mut games, batch(3), 6)
            .await
            .expect("fetch_more");

        assert_eq!(ids(&games, Bucket::Settled), vec![6, 5, 4]);
        assert_eq!(ids(&games, Bucket::Closed), vec![3, 2, 1]);
        assert_eq!(page.batches, 2);
        assert_eq!(page.frontier, 0);
    }

    #[tokio::test]
    async fn test_worst_case_batch_count_when_nothing_settles() {
        let engine = engine((1..=25).map(open).collect());
        let mut games = GamesByState::new();

        let page = engine
            .fetch_more(&mut games, batch(10), 25)
            .await
            .expect("fetch_more");

        // ceil(25 / 10)
        assert_eq!(page.batches, 3);
        assert_eq!(page.frontier, 0);
        assert_eq!(games.len(), 25);
    }

    #[tokio::test]
    async fn test_settled_in_first_batch_means_one_batch() {
        // Everything below the open stretch has settled, in creation order.
        let mut records: Vec<GameRecord> = (21..=25).map(open).collect();
        records.extend((1..=20).map(settled));
        let engine = engine(records);
        let mut games = GamesByState::new();

        let page = engine
            .fetch_more(&mut games, batch(10), 25)
            .await
            .expect("fetch_more");

        assert_eq!(page.batches, 1);
        assert_eq!(page.frontier, 15);
    }

    #[tokio::test]
    async fn test_empty_batch_keeps_descending() {
        // Ids 10..6 uninitialized; the walk continues past them.
        let engine = engine((1..=5).map(open).collect());
        let mut games = GamesByState::new();

        let page = engine
            .fetch_more(&mut games, batch(5), 10)
            .await
            .expect("fetch_more");

        assert_eq!(page.batches, 2);
        assert_eq!(games.len(), 5);
        assert_eq!(page.frontier, 0);
    }

    #[tokio::test]
    async fn test_every_record_lands_in_exactly_one_bucket() {
        let engine = engine(vec![open(8), closed(7), voided(6), open(5), closed(4), settled(3)]);
        let mut games = GamesByState::new();

        let page = engine
            .fetch_more(&mut games, batch(4), 8)
            .await
            .expect("fetch_more");

        let total = games.games(Bucket::Open).len()
            + games.games(Bucket::Closed).len()
            + games.games(Bucket::Settled).len();
        assert_eq!(total, page.fetched);
        assert_eq!(total, 6);
    }

    #[tokio::test]
    async fn test_transport_failure_commits_nothing_from_failed_batch() {
        let fetcher = MemoryFetcher::new((1..=10).map(open).collect::<Vec<_>>())
            .with_outage_below(6);
        let engine = PaginationEngine::new(fetcher, AuthorityKey::new("feedface"));
        let mut games = GamesByState::new();

        let result = engine.fetch_more(&mut games, batch(5), 10).await;

        assert!(matches!(result, Err(PaginationError::Transport(_))));
        // The first batch (ids 10..6) was committed before the outage; the
        // failed batch contributed nothing.
        assert_eq!(ids(&games, Bucket::Open), vec![10, 9, 8, 7, 6]);
    }

    #[tokio::test]
    async fn test_ambiguous_state_rejects_the_whole_batch() {
        let engine = engine(vec![
            open(5),
            record(4, Some(Settlement::Unknown), true),
            open(3),
        ]);
        let mut games = GamesByState::new();

        let result = engine.fetch_more(&mut games, batch(5), 5).await;

        assert!(matches!(
            result,
            Err(PaginationError::Classification(ClassifyError { game_id: 4 }))
        ));
        assert!(games.is_empty());
    }

    #[tokio::test]
    async fn test_load_more_appends_to_seeded_results() {
        let mut records = vec![settled(6), settled(5), settled(4)];
        records.extend(vec![settled(3), settled(2), settled(1)]);
        let engine = engine(records);

        let mut games = GamesByState::new();
        let first = engine
            .fetch_more(&mut games, batch(3), 6)
            .await
            .expect("first page");
        assert_eq!(first.frontier, 3);

        let second = engine
            .fetch_more(&mut games, batch(3), first.frontier)
            .await
            .expect("second page");
        assert_eq!(second.frontier, 0);
        assert_eq!(ids(&games, Bucket::Settled), vec![6, 5, 4, 3, 2, 1]);
    }
}

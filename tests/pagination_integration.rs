use std::num::NonZeroUsize;

use pretty_assertions::assert_eq;

use gamestui::{
    domain::{AuthorityKey, Bucket, GamesByState},
    engine::{PaginationEngine, PaginationError},
    fetcher::{GameFetcher, MemoryFetcher, TransportError},
};

fn authority() -> AuthorityKey {
    AuthorityKey::new("feedface")
}

fn batch(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).expect("nonzero")
}

/// A full first-load flow against the sample ledger: stats seed the session,
/// then batches descend until a settled game terminates it.
#[tokio::test]
async fn test_initial_load_over_sample_ledger() {
    let fetcher = MemoryFetcher::sample();
    let engine = PaginationEngine::new(fetcher.clone(), authority());

    let stats = fetcher.fetch_stats(&authority()).await.expect("stats");
    assert_eq!(stats.total_games, 23);

    let mut games = GamesByState::new();
    let page = engine
        .fetch_more(&mut games, batch(10), stats.total_games)
        .await
        .expect("session");

    // Ids 23..14 fetched in one batch. Game 14 is settled, so the
    // session stops with the frontier just below it.
    assert_eq!(page.batches, 1);
    assert_eq!(page.fetched, 10);
    assert_eq!(page.frontier, 13);
    assert_eq!(games.games(Bucket::Open).len(), 3);
    assert_eq!(games.games(Bucket::Closed).len(), 5);
    // The voided game 15 and settled game 14 share a bucket.
    assert_eq!(games.games(Bucket::Settled).len(), 2);
}

/// "Load more" continues from the stored frontier, keeping earlier games.
#[tokio::test]
async fn test_load_more_continues_from_frontier() {
    let fetcher = MemoryFetcher::sample();
    let engine = PaginationEngine::new(fetcher, authority());

    let mut games = GamesByState::new();
    let first = engine
        .fetch_more(&mut games, batch(10), 23)
        .await
        .expect("first session");
    let before = games.len();

    let second = engine
        .fetch_more(&mut games, batch(10), first.frontier)
        .await
        .expect("second session");

    // Ids 13..4 are all settled, so one more batch suffices.
    assert_eq!(second.batches, 1);
    assert_eq!(games.len(), before + 10);
    assert_eq!(second.frontier, 3);
}

/// Driving the engine to exhaustion reaches frontier zero and collects
/// every game the ledger holds exactly once.
#[tokio::test]
async fn test_sessions_eventually_exhaust_the_ledger() {
    let fetcher = MemoryFetcher::sample();
    let engine = PaginationEngine::new(fetcher, authority());

    let mut games = GamesByState::new();
    let mut frontier = 23;
    for _ in 0..10 {
        let page = engine
            .fetch_more(&mut games, batch(10), frontier)
            .await
            .expect("session");
        frontier = page.frontier;
        if frontier == 0 {
            break;
        }
    }

    assert_eq!(frontier, 0);
    assert_eq!(games.len(), 23);
}

/// A transport failure mid-session surfaces as an error while the caller's
/// collection keeps everything committed before the failing batch.
#[tokio::test]
async fn test_outage_preserves_committed_batches() {
    let fetcher = MemoryFetcher::sample().with_outage_below(15);
    let engine = PaginationEngine::new(fetcher, authority());

    // Batch size 7 so the first batch (23..17) commits before the
    // failing request for ids below 15 is ever made.
    let mut games = GamesByState::new();
    let result = engine.fetch_more(&mut games, batch(7), 23).await;

    match result {
        Err(PaginationError::Transport(TransportError::Unreachable(_))) => {}
        other => panic!("expected transport failure, got {other:?}"),
    }
    assert_eq!(games.len(), 7);
}

#[tokio::test]
async fn test_empty_ledger_yields_nothing() {
    let fetcher = MemoryFetcher::new([]);
    let engine = PaginationEngine::new(fetcher.clone(), authority());

    let stats = fetcher.fetch_stats(&authority()).await.expect("stats");
    assert_eq!(stats.total_games, 0);

    let mut games = GamesByState::new();
    let page = engine
        .fetch_more(&mut games, batch(10), stats.total_games)
        .await
        .expect("session");
    assert_eq!(page.batches, 0);
    assert_eq!(page.frontier, 0);
    assert!(games.is_empty());
}

use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::domain::GamesByState;

#[derive(Debug, Clone, PartialEq, Serialize, Display, Deserialize)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Refresh,
    Error(String),
    Help,
    ScrollUp,
    ScrollDown,
    ScrollToTop,
    ScrollToBottom,
    Unselect,
    NextBucket,
    PrevBucket,
    LoadMore,
    /// Run a discovery session seeded with the currently displayed games.
    StartFetch {
        games: GamesByState,
        start_id: u64,
    },
    /// A discovery session was accepted and is now in flight.
    FetchStarted,
    GamesLoaded {
        games: GamesByState,
        frontier: u64,
    },
    LoadFailed(String),
    Key(KeyEvent),
    SystemMessage(String),
}

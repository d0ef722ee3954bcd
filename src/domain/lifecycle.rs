//! Lifecycle classification
//!
//! `classify` is a pure function of a record's raw state fields and the
//! current time. It reports the true underlying state; collapsing `Voided`
//! into the Settled display bucket is a policy of the pagination engine,
//! not of the classifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

use crate::domain::game::{GameData, Settlement};

/// The raw lifecycle state of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum LifecycleState {
    Open,
    Closed,
    Settled,
    Voided,
}

/// A record whose raw state does not map to any known lifecycle state.
///
/// Silently bucketing such a record would corrupt the results mapping, so
/// the whole batch is rejected instead.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("game {game_id} carries an unknown settlement tag")]
pub struct ClassifyError {
    pub game_id: u64,
}

/// Classify a game by its raw state fields.
///
/// A settlement tag always wins over the time window; an unsettled game is
/// `Open` until its close time passes and `Closed` afterwards.
pub fn classify(data: &GameData, now: DateTime<Utc>) -> Result<LifecycleState, ClassifyError> {
    match data.settlement {
        Some(Settlement::Settled) => Ok(LifecycleState::Settled),
        Some(Settlement::Voided) => Ok(LifecycleState::Voided),
        Some(Settlement::Unknown) => Err(ClassifyError {
            game_id: data.game_id,
        }),
        None if now >= data.close_time => Ok(LifecycleState::Closed),
        None => Ok(LifecycleState::Open),
    }
}

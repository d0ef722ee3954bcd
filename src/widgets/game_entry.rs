use ratatui::prelude::*;
use thousands::Separable;

use crate::domain::{GameRecord, Settlement};

/// One list row for a game: title on the left, stake and schedule on the
/// right.
#[derive(Clone)]
pub struct GameEntry {
    record: GameRecord,
}

impl GameEntry {
    pub fn new(record: GameRecord) -> Self {
        Self { record }
    }

    fn status(&self) -> String {
        match self.record.data.settlement {
            Some(Settlement::Settled) => "settled".to_string(),
            Some(Settlement::Voided) => "voided".to_string(),
            Some(Settlement::Unknown) => "?".to_string(),
            None => format!("closes {}", self.record.data.close_time.format("%Y-%m-%d %H:%M")),
        }
    }
}

impl From<GameEntry> for Text<'_> {
    fn from(value: GameEntry) -> Self {
        let id = Span::styled(
            format!("#{:<5}", value.record.data.game_id),
            Style::default().fg(Color::DarkGray),
        );
        let title = Span::raw(format!("{} ", value.record.cached.title));
        let meta = Span::styled(
            format!(
                "[stake {}] {}",
                value.record.data.total_stake.separate_with_commas(),
                value.status()
            ),
            Style::default().fg(Color::Gray).italic(),
        );
        Text::from(Line::from(vec![id, title, meta]))
    }
}

use color_eyre::eyre::Result;
use ratatui::{prelude::*, widgets::*};

use crate::action::Action;
use crate::components::Component;
use crate::domain::AuthorityKey;
use crate::tui::Frame;
use crate::widgets::Authority;

pub struct StatusBar {
    authority: AuthorityKey,
    frontier: Option<u64>,
    message: Option<String>,
    is_loading: bool,
}

impl StatusBar {
    pub fn new(authority: AuthorityKey) -> Self {
        Self {
            authority,
            frontier: None,
            message: None,
            is_loading: false,
        }
    }

    fn frontier_label(&self) -> String {
        match self.frontier {
            None => String::new(),
            Some(0) => "all games loaded".to_string(),
            Some(id) => format!("more games below #{id} (press m)"),
        }
    }
}

impl Component for StatusBar {
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::FetchStarted => self.is_loading = true,
            Action::GamesLoaded { frontier, .. } => {
                self.is_loading = false;
                self.frontier = Some(frontier);
            }
            Action::LoadFailed(message) => {
                self.is_loading = false;
                self.message = Some(message);
            }
            Action::SystemMessage(message) => self.message = Some(message),
            _ => {}
        };

        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ],
        )
        .split(area);
        f.render_widget(Clear, layout[1]);
        f.render_widget(Clear, layout[2]);

        let authority = Span::styled(
            Authority::new(self.authority.clone()).shortened(),
            Style::default().fg(Color::Gray).italic(),
        );
        let frontier = Span::styled(
            format!("  {}", self.frontier_label()),
            Style::default().fg(Color::DarkGray),
        );
        let status_line =
            Paragraph::new(Line::from(vec![authority, frontier])).style(Style::default().bg(Color::Black));
        f.render_widget(status_line, layout[1]);

        let message_line = if self.is_loading {
            Paragraph::new("Loading...")
        } else {
            Paragraph::new(self.message.clone().unwrap_or_default())
        };
        f.render_widget(message_line, layout[2]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::GamesByState;

    #[test]
    fn test_loading_flag_follows_session_lifecycle() {
        let mut bar = StatusBar::new(AuthorityKey::new("feedface"));
        bar.update(Action::FetchStarted).expect("update");
        assert!(bar.is_loading);

        bar.update(Action::GamesLoaded {
            games: GamesByState::new(),
            frontier: 15,
        })
        .expect("update");
        assert!(!bar.is_loading);
        assert_eq!(bar.frontier_label(), "more games below #15 (press m)");
    }

    #[test]
    fn test_failed_load_keeps_frontier_and_shows_message() {
        let mut bar = StatusBar::new(AuthorityKey::new("feedface"));
        bar.update(Action::GamesLoaded {
            games: GamesByState::new(),
            frontier: 15,
        })
        .expect("update");
        bar.update(Action::LoadFailed("ledger unreachable".to_string()))
            .expect("update");
        assert_eq!(bar.frontier_label(), "more games below #15 (press m)");
        assert_eq!(bar.message.as_deref(), Some("ledger unreachable"));
    }

    #[test]
    fn test_exhausted_frontier_label() {
        let mut bar = StatusBar::new(AuthorityKey::new("feedface"));
        bar.update(Action::GamesLoaded {
            games: GamesByState::new(),
            frontier: 0,
        })
        .expect("update");
        assert_eq!(bar.frontier_label(), "all games loaded");
    }
}

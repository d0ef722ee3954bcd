use color_eyre::eyre::Result;
use ratatui::{prelude::*, widgets::*};
use strum::IntoEnumIterator;
use tokio::sync::mpsc::UnboundedSender;

use super::Component;
use crate::{
    action::Action,
    config::Config,
    domain::{Bucket, GamesByState},
    mode::Mode,
    widgets::GameEntry,
};

/// The game listing: one tab per bucket, a scrollable list of games in the
/// active bucket, and a "load more" hook while the frontier is above zero.
#[derive(Default)]
pub struct Home {
    command_tx: Option<UnboundedSender<Action>>,
    config: Config,
    games: GamesByState,
    frontier: u64,
    active_bucket: usize,
    list_state: ListState,
}

impl Home {
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket(&self) -> Bucket {
        Bucket::iter()
            .nth(self.active_bucket)
            .unwrap_or(Bucket::Open)
    }

    fn active_len(&self) -> usize {
        self.games.games(self.bucket()).len()
    }

    fn switch_bucket(&mut self, offset: isize) {
        let count = Bucket::iter().count() as isize;
        self.active_bucket = (self.active_bucket as isize + offset).rem_euclid(count) as usize;
        self.list_state.select(None);
    }

    fn highlight_style(&self) -> Style {
        self.config
            .styles
            .get(&Mode::Home)
            .and_then(|styles| styles.get("highlight"))
            .copied()
            .unwrap_or_else(|| Style::default().reversed())
    }
}

impl Component for Home {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.command_tx = Some(tx);
        Ok(())
    }

    fn register_config_handler(&mut self, config: Config) -> Result<()> {
        self.config = config;
        Ok(())
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::GamesLoaded { games, frontier } => {
                self.games = games;
                self.frontier = frontier;
            }
            Action::ScrollUp => {
                let selection = match self.list_state.selected() {
                    _ if self.active_len() == 0 => None,
                    Some(i) if i > 1 => Some(i - 1),
                    _ => Some(0),
                };
                self.list_state.select(selection);
            }
            Action::ScrollDown => {
                let len = self.active_len();
                let selection = match self.list_state.selected() {
                    _ if len == 0 => None,
                    Some(i) if i < len - 1 => Some(i + 1),
                    Some(_) => Some(len - 1),
                    None if len > 1 => Some(1),
                    None => Some(0),
                };
                self.list_state.select(selection);
            }
            Action::ScrollToTop => {
                let selection = match self.list_state.selected() {
                    _ if self.active_len() == 0 => None,
                    _ => Some(0),
                };
                self.list_state.select(selection);
            }
            Action::ScrollToBottom => {
                let selection = match self.list_state.selected() {
                    _ if self.active_len() == 0 => None,
                    _ => Some(self.active_len() - 1),
                };
                self.list_state.select(selection);
            }
            Action::NextBucket => self.switch_bucket(1),
            Action::PrevBucket => self.switch_bucket(-1),
            Action::Unselect => {
                self.list_state.select(None);
            }
            Action::LoadMore => {
                if self.frontier > 0 {
                    return Ok(Some(Action::StartFetch {
                        games: self.games.clone(),
                        start_id: self.frontier,
                    }));
                }
                return Ok(Some(Action::SystemMessage(
                    "No more games to load".to_string(),
                )));
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(2),
            ],
        )
        .split(area);

        let titles: Vec<String> = Bucket::iter()
            .map(|bucket| format!("{bucket} ({})", self.games.games(bucket).len()))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.active_bucket)
            .style(Style::default().bg(Color::Black))
            .highlight_style(Style::default().reversed());
        f.render_widget(tabs, layout[0]);

        let padding = Padding::new(1, 1, 1, 1);
        let bucket = self.bucket();
        let records = self.games.games(bucket);
        if records.is_empty() {
            let empty_block = Block::default().padding(padding);
            let empty_text = Paragraph::new(format!("No {bucket} games"))
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            let inner = empty_block.inner(layout[1]);
            f.render_widget(empty_block, layout[1]);
            f.render_widget(empty_text, inner);
            return Ok(());
        }

        let items: Vec<ListItem> = records
            .iter()
            .map(|record| ListItem::new(GameEntry::new(record.clone())))
            .collect();
        let list = List::new(items)
            .block(Block::default().padding(padding))
            .style(Style::default().fg(Color::White))
            .highlight_style(self.highlight_style())
            .direction(ListDirection::TopToBottom);
        f.render_stateful_widget(list, layout[1], &mut self.list_state);

        Ok(())
    }
}

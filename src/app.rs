use std::num::NonZeroUsize;

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::prelude::Rect;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;

use crate::{
    action::Action,
    components::{Component, Home, StatusBar},
    config::{Config, DEFAULT_BATCH_SIZE},
    domain::{AuthorityKey, GamesByState},
    engine::{PaginationEngine, PaginationError},
    fetcher::GameFetcher,
    mode::Mode,
    tui,
};

pub struct App<F> {
    pub config: Config,
    pub tick_rate: f64,
    pub frame_rate: f64,
    pub components: Vec<Box<dyn Component>>,
    pub should_quit: bool,
    pub should_suspend: bool,
    pub mode: Mode,
    pub last_tick_key_events: Vec<KeyEvent>,
    engine: PaginationEngine<F>,
    batch_size: NonZeroUsize,
    loading: bool,
    session: Option<JoinHandle<()>>,
}

impl<F> App<F>
where
    F: GameFetcher + Clone + Send + Sync + 'static,
{
    pub fn new(config: Config, tick_rate: f64, frame_rate: f64, fetcher: F) -> Result<Self> {
        let authority = AuthorityKey::new(config.authority.clone());
        let home = Home::new();
        let status_bar = StatusBar::new(authority.clone());
        let engine = PaginationEngine::new(fetcher, authority);
        let batch_size = NonZeroUsize::new(config.batch_size)
            .or(NonZeroUsize::new(DEFAULT_BATCH_SIZE))
            .expect("default batch size is nonzero");
        let mode = Mode::Home;
        Ok(Self {
            tick_rate,
            frame_rate,
            components: vec![Box::new(home), Box::new(status_bar)],
            should_quit: false,
            should_suspend: false,
            config,
            mode,
            last_tick_key_events: Vec::new(),
            engine,
            batch_size,
            loading: false,
            session: None,
        })
    }

    /// Spawn a discovery session unless one is already in flight.
    ///
    /// `start_id` of `None` means "ask the ledger for its stats first and
    /// descend from the highest game id"; `Some(id)` continues a previous
    /// session from its frontier.
    fn start_discovery(
        &mut self,
        action_tx: &UnboundedSender<Action>,
        seed: GamesByState,
        start_id: Option<u64>,
    ) -> Result<()> {
        if self.loading {
            action_tx.send(Action::SystemMessage(
                "A fetch is already in progress".to_string(),
            ))?;
            return Ok(());
        }
        self.loading = true;
        action_tx.send(Action::FetchStarted)?;

        let engine = self.engine.clone();
        let batch_size = self.batch_size;
        let tx = action_tx.clone();
        self.session = Some(tokio::spawn(async move {
            let outcome = async {
                let start_id = match start_id {
                    Some(id) => id,
                    None => engine.ledger_stats().await?.total_games,
                };
                let mut games = seed;
                let page = engine.fetch_more(&mut games, batch_size, start_id).await?;
                Ok::<_, PaginationError>((games, page))
            }
            .await;
            match outcome {
                Ok((games, page)) => {
                    log::info!(
                        "discovery finished: {} games in {} batches, frontier {}",
                        page.fetched,
                        page.batches,
                        page.frontier
                    );
                    let _ = tx.send(Action::GamesLoaded {
                        games,
                        frontier: page.frontier,
                    });
                }
                Err(e) => {
                    log::error!("discovery failed: {e}");
                    let _ = tx.send(Action::LoadFailed(e.to_string()));
                }
            }
        }));
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();

        let mut tui = tui::Tui::new()?
            .tick_rate(self.tick_rate)
            .frame_rate(self.frame_rate);
        tui.enter()?;

        for component in self.components.iter_mut() {
            component.register_action_handler(action_tx.clone())?;
        }

        for component in self.components.iter_mut() {
            component.register_config_handler(self.config.clone())?;
        }

        for component in self.components.iter_mut() {
            let size = tui.size()?;
            component.init(Rect::new(0, 0, size.width, size.height))?;
        }

        // Kick off the initial discovery session.
        action_tx.send(Action::Refresh)?;

        loop {
            if let Some(e) = tui.next().await {
                match e {
                    tui::Event::Quit => action_tx.send(Action::Quit)?,
                    tui::Event::Tick => action_tx.send(Action::Tick)?,
                    tui::Event::Render => action_tx.send(Action::Render)?,
                    tui::Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
                    tui::Event::Key(key) => {
                        action_tx.send(Action::Key(key))?;

                        if let Some(keymap) = self.config.keybindings.get(&self.mode) {
                            if let Some(action) = keymap.get(&vec![key]) {
                                log::info!("Got action: {action:?}");
                                action_tx.send(action.clone())?;
                            } else {
                                // If the key was not handled as a single key action,
                                // then consider it for multi-key combinations.
                                self.last_tick_key_events.push(key);

                                // Check for multi-key combinations
                                if let Some(action) = keymap.get(&self.last_tick_key_events) {
                                    log::info!("Got action: {action:?}");
                                    action_tx.send(action.clone())?;
                                }
                            }
                        };
                    }
                    _ => {}
                }
                for component in self.components.iter_mut() {
                    if let Some(action) = component.handle_events(Some(e.clone()))? {
                        action_tx.send(action)?;
                    }
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                if action != Action::Tick && action != Action::Render {
                    log::debug!("{action:?}");
                }
                match action {
                    Action::Tick => {
                        self.last_tick_key_events.drain(..);
                    }
                    Action::Quit => self.should_quit = true,
                    Action::Suspend => self.should_suspend = true,
                    Action::Resume => self.should_suspend = false,
                    Action::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, w, h))?;
                        tui.draw(|f| {
                            for component in self.components.iter_mut() {
                                let r = component.draw(f, f.area());
                                if let Err(e) = r {
                                    let _ = action_tx
                                        .send(Action::Error(format!("Failed to draw: {e:?}")));
                                }
                            }
                        })?;
                    }
                    Action::Render => {
                        tui.draw(|f| {
                            for component in self.components.iter_mut() {
                                let r = component.draw(f, f.area());
                                if let Err(e) = r {
                                    let _ = action_tx
                                        .send(Action::Error(format!("Failed to draw: {e:?}")));
                                }
                            }
                        })?;
                    }
                    Action::Refresh => {
                        self.start_discovery(&action_tx, GamesByState::new(), None)?;
                    }
                    Action::StartFetch {
                        ref games,
                        start_id,
                    } => {
                        self.start_discovery(&action_tx, games.clone(), Some(start_id))?;
                    }
                    Action::GamesLoaded { .. } | Action::LoadFailed(_) => {
                        self.loading = false;
                        self.session = None;
                    }
                    _ => {}
                }
                for component in self.components.iter_mut() {
                    if let Some(action) = component.update(action.clone())? {
                        action_tx.send(action)?
                    };
                }
            }
            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(Action::Resume)?;
                tui = tui::Tui::new()?
                    .tick_rate(self.tick_rate)
                    .frame_rate(self.frame_rate);
                tui.enter()?;
            } else if self.should_quit {
                // An in-flight session is abandoned; its late resolution
                // has nobody listening and is dropped.
                if let Some(session) = self.session.take() {
                    session.abort();
                }
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }
}

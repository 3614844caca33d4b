//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! All side effects happen here. The reducer stays pure and returns effects;
//! the runtime turns request effects into spawned tasks whose lifecycle is
//! reported back through the inbox:
//!
//! ```text
//! reducer ── UiEffect ──> TaskSpawner ── tokio::spawn(handler)
//!    ^                         │
//!    └── TaskStarted / TaskCompleted ── inbox (unbounded mpsc)
//! ```

mod handlers;

use std::future::Future;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use resena_core::api::ApiClient;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::{TaskResult, UiEvent};
use crate::state::AppState;
use crate::terminal::{self, TerminalGuard};
use crate::{render, update};

pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Tick cadence while a request is in flight (spinner animation).
pub const BUSY_TICK: Duration = Duration::from_millis(50);

/// Poll duration when idle.
pub const IDLE_TICK: Duration = Duration::from_millis(250);

/// Spawns request handlers and reports their lifecycle to the inbox.
#[derive(Clone)]
pub struct TaskSpawner {
    client: ApiClient,
    inbox_tx: UiEventSender,
}

impl TaskSpawner {
    pub fn new(client: ApiClient, inbox_tx: UiEventSender) -> Self {
        Self { client, inbox_tx }
    }

    /// Executes a request effect. Returns false for effects it doesn't own.
    pub fn execute(&self, effect: UiEffect) -> bool {
        let client = self.client.clone();
        match effect {
            UiEffect::Login { task, credentials } => {
                self.spawn_task(TaskKind::Login, task, |_| {
                    handlers::login(client, credentials)
                });
            }
            UiEffect::Register { task, registration } => {
                self.spawn_task(TaskKind::Register, task, |_| {
                    handlers::register(client, registration)
                });
            }
            UiEffect::FetchMovies { task } => {
                self.spawn_task(TaskKind::MovieList, task, |cancel| {
                    handlers::fetch_movies(client, cancel)
                });
            }
            UiEffect::CreateMovie { task, token, movie } => {
                self.spawn_task(TaskKind::MovieCreate, task, |_| {
                    handlers::create_movie(client, token, movie)
                });
            }
            UiEffect::FetchReviews { task, movie_id } => {
                self.spawn_task(TaskKind::ReviewList, task, move |cancel| {
                    handlers::fetch_reviews(client, movie_id, cancel)
                });
            }
            UiEffect::CreateReview {
                task,
                token,
                review,
            } => {
                self.spawn_task(TaskKind::ReviewCreate, task, |_| {
                    handlers::create_review(client, token, review)
                });
            }
            UiEffect::CancelTask { kind, token } => {
                tracing::debug!(?kind, "cancelling superseded request");
                token.cancel();
            }
            UiEffect::Quit => return false,
        }
        true
    }

    /// Sends `TaskStarted` right away and `TaskCompleted` when `f` resolves.
    /// Reads get a cancel token; writes always run to completion.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, f: F)
    where
        F: FnOnce(Option<CancellationToken>) -> Fut + Send + 'static,
        Fut: Future<Output = TaskResult> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let cancel = kind.is_cancelable().then(CancellationToken::new);
        let started = TaskStarted {
            id,
            cancel: cancel.clone(),
        };
        tracing::debug!(?kind, id = id.0, "request started");
        let _ = tx.send(UiEvent::TaskStarted { kind, started });
        tokio::spawn(async move {
            let result = f(cancel).await;
            let completed = TaskCompleted { id, result };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }
}

/// Full-screen runtime. The terminal is restored when this is dropped.
pub struct TuiRuntime {
    guard: TerminalGuard,
    pub state: AppState,
    spawner: TaskSpawner,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Takes over the terminal.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(client: ApiClient) -> Result<Self> {
        terminal::install_panic_hook();
        let guard = TerminalGuard::enter().context("Failed to setup terminal")?;

        let state = AppState::new(client.base_url());
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            guard,
            state,
            spawner: TaskSpawner::new(client, inbox_tx),
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs until the user quits.
    ///
    /// # Errors
    /// Returns an error if drawing or reading terminal input fails.
    pub fn run(&mut self) -> Result<()> {
        let mut dirty = true;
        while !self.state.should_quit {
            let events = self.collect_events()?;
            if !events.is_empty() {
                dirty = true;
            }
            for event in events {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.guard
                    .terminal
                    .draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }
        Ok(())
    }

    /// Drains the inbox, then waits for terminal input until the next tick.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let tick_interval = if self.state.tasks.is_any_running() {
            BUSY_TICK
        } else {
            IDLE_TICK
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Don't block when there is already work to process.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            if matches!(effect, UiEffect::Quit) {
                self.state.should_quit = true;
            } else {
                self.spawner.execute(effect);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use resena_core::api::MovieId;
    use resena_core::forms::Credentials;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn next_event(rx: &mut UiEventReceiver) -> UiEvent {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for event")
            .expect("inbox closed")
    }

    #[tokio::test]
    async fn test_fetch_reports_started_then_completed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/movies"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "title": "Alien", "year": 1979, "metascore": 89}
            ])))
            .mount(&server)
            .await;

        let client = ApiClient::new(&format!("{}/api", server.uri()), None).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let spawner = TaskSpawner::new(client, tx);

        assert!(spawner.execute(UiEffect::FetchMovies { task: TaskId(7) }));

        match next_event(&mut rx).await {
            UiEvent::TaskStarted { kind, started } => {
                assert_eq!(kind, TaskKind::MovieList);
                assert_eq!(started.id, TaskId(7));
                assert!(started.cancel.is_some());
            }
            other => panic!("unexpected event: {other:?}"),
        }
        match next_event(&mut rx).await {
            UiEvent::TaskCompleted { kind, completed } => {
                assert_eq!(kind, TaskKind::MovieList);
                assert_eq!(completed.id, TaskId(7));
                match completed.result {
                    TaskResult::Movies(Ok(movies)) => assert_eq!(movies[0].title, "Alien"),
                    other => panic!("unexpected result: {other:?}"),
                }
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_writes_are_not_cancelable() {
        let server = MockServer::start().await;
        let client = ApiClient::new(&format!("{}/api", server.uri()), None).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let spawner = TaskSpawner::new(client, tx);

        let credentials = Credentials::parse("ana", "pw").unwrap();
        spawner.execute(UiEffect::Login {
            task: TaskId(1),
            credentials,
        });

        match next_event(&mut rx).await {
            UiEvent::TaskStarted { kind, started } => {
                assert_eq!(kind, TaskKind::Login);
                assert!(started.cancel.is_none());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cancel_effect_abandons_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/reviews/movie/1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_secs(30)),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(&format!("{}/api", server.uri()), None).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let spawner = TaskSpawner::new(client, tx);

        spawner.execute(UiEffect::FetchReviews {
            task: TaskId(1),
            movie_id: MovieId(1),
        });
        let UiEvent::TaskStarted { started, .. } = next_event(&mut rx).await else {
            panic!("expected TaskStarted");
        };

        spawner.execute(UiEffect::CancelTask {
            kind: TaskKind::ReviewList,
            token: started.cancel.expect("list fetches are cancelable"),
        });

        match next_event(&mut rx).await {
            UiEvent::TaskCompleted { completed, .. } => {
                assert!(matches!(completed.result, TaskResult::Cancelled));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_quit_is_left_to_the_runtime() {
        let client = ApiClient::new("http://127.0.0.1:9/api", None).unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        let spawner = TaskSpawner::new(client, tx);
        assert!(!spawner.execute(UiEffect::Quit));
    }
}

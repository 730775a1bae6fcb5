use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use jokebox_logging::{jokebox_debug, jokebox_error};
use tokio::sync::Mutex as AsyncMutex;
use tokio_util::sync::CancellationToken;

use crate::source::{FetchSettings, JokeSource, ReqwestJokeSource};
use crate::{EngineEvent, FetchError, JokeStore, UniqueFetchError, UniqueFetcher};

enum EngineCommand {
    FetchUnique { category: Option<String> },
    FetchCategories,
}

/// Runs store fetches on a background tokio runtime.
///
/// Commands return immediately; outcomes arrive as [`EngineEvent`]s while
/// the store itself is updated in place.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    store: JokeStore,
    cancel: CancellationToken,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings, max_attempts: usize) -> Result<Self, FetchError> {
        let source = ReqwestJokeSource::new(settings)?;
        Ok(Self::with_source(Arc::new(source), max_attempts))
    }

    pub fn with_source(source: Arc<dyn JokeSource>, max_attempts: usize) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let store = JokeStore::new(source);
        let fetcher = Arc::new(AsyncMutex::new(UniqueFetcher::with_max_attempts(
            max_attempts,
        )));
        let cancel = CancellationToken::new();

        let worker_store = store.clone();
        let worker_cancel = cancel.clone();
        thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    jokebox_error!("failed to start engine runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let store = worker_store.clone();
                let fetcher = fetcher.clone();
                let event_tx = event_tx.clone();
                let cancel = worker_cancel.clone();
                runtime.spawn(async move {
                    tokio::select! {
                        _ = cancel.cancelled() => {
                            jokebox_debug!("engine command dropped on shutdown");
                        }
                        event = handle_command(&store, &fetcher, command) => {
                            let _ = event_tx.send(event);
                        }
                    }
                });
            }
            runtime.shutdown_timeout(Duration::from_millis(100));
        });

        Self {
            cmd_tx,
            event_rx,
            store,
            cancel,
        }
    }

    pub fn store(&self) -> &JokeStore {
        &self.store
    }

    pub fn fetch_unique(&self, category: Option<String>) {
        self.send(EngineCommand::FetchUnique { category });
    }

    pub fn fetch_categories(&self) {
        self.send(EngineCommand::FetchCategories);
    }

    fn send(&self, command: EngineCommand) {
        if self.cancel.is_cancelled() {
            return;
        }
        let _ = self.cmd_tx.send(command);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Abandons in-flight work; results that settle later are discarded.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn handle_command(
    store: &JokeStore,
    fetcher: &AsyncMutex<UniqueFetcher>,
    command: EngineCommand,
) -> EngineEvent {
    match command {
        EngineCommand::FetchUnique { category } => {
            // Held for the whole loop so two unique fetches never interleave.
            let mut fetcher = fetcher.lock().await;
            match fetcher.fetch_unique(store, category.as_deref()).await {
                Ok(joke) => EngineEvent::JokeReady(joke),
                Err(UniqueFetchError::Exhausted { category, attempts }) => {
                    EngineEvent::Exhausted { category, attempts }
                }
                Err(UniqueFetchError::Fetch(err)) => EngineEvent::Failed(err),
            }
        }
        EngineCommand::FetchCategories => match store.fetch_categories().await {
            Ok(categories) => EngineEvent::CategoriesLoaded(categories),
            Err(err) => EngineEvent::Failed(err),
        },
    }
}

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use jokebox_core::{update, Effect, Joke, JokeState, JokesViewModel, Msg};
use jokebox_logging::{jokebox_debug, jokebox_warn};

use crate::{FetchError, JokeSource};

/// Shared joke store: one `JokeState` behind a mutex plus the source it fetches from.
///
/// Every mutation is a [`Msg`] run through [`jokebox_core::update`], so the
/// async fetch operations and UI commands share a single transition path.
/// Concurrent fetches are not coordinated; whichever settles last wins.
#[derive(Clone)]
pub struct JokeStore {
    state: Arc<Mutex<JokeState>>,
    source: Arc<dyn JokeSource>,
}

impl JokeStore {
    pub fn new(source: Arc<dyn JokeSource>) -> Self {
        Self::with_state(source, JokeState::new())
    }

    pub fn with_state(source: Arc<dyn JokeSource>, state: JokeState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            source,
        }
    }

    fn lock(&self) -> MutexGuard<'_, JokeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `msg` and returns the effects the caller should run.
    pub fn dispatch(&self, msg: Msg) -> Vec<Effect> {
        let mut guard = self.lock();
        let state = std::mem::take(&mut *guard);
        let (state, effects) = update(state, msg);
        *guard = state;
        effects
    }

    pub fn view(&self) -> JokesViewModel {
        self.lock().view()
    }

    pub fn snapshot(&self) -> JokeState {
        self.lock().clone()
    }

    pub fn consume_dirty(&self) -> bool {
        self.lock().consume_dirty()
    }

    pub async fn fetch_random(&self) -> Result<Joke, FetchError> {
        self.fetch_joke(None).await
    }

    pub async fn fetch_by_category(&self, category: &str) -> Result<Joke, FetchError> {
        self.fetch_joke(Some(category)).await
    }

    /// Random fetch when `category` is `None`, scoped fetch otherwise.
    pub async fn fetch_joke(&self, category: Option<&str>) -> Result<Joke, FetchError> {
        self.dispatch(Msg::FetchStarted);
        match self.source.random(category).await {
            Ok(joke) => {
                jokebox_debug!(
                    "fetched joke id={} category={:?} text={}",
                    joke.id,
                    category,
                    jokebox_logging::preview(&joke.value, 48)
                );
                self.dispatch(Msg::JokeFetched(joke.clone()));
                Ok(joke)
            }
            Err(err) => {
                jokebox_warn!("joke fetch failed (category={:?}): {}", category, err);
                self.dispatch(Msg::FetchFailed(err.message.clone()));
                Err(err)
            }
        }
    }

    pub async fn fetch_categories(&self) -> Result<Vec<String>, FetchError> {
        self.dispatch(Msg::FetchStarted);
        match self.source.categories().await {
            Ok(categories) => {
                jokebox_debug!("fetched {} categories", categories.len());
                self.dispatch(Msg::CategoriesFetched(categories.clone()));
                Ok(categories)
            }
            Err(err) => {
                jokebox_warn!("category fetch failed: {}", err);
                self.dispatch(Msg::FetchFailed(err.message.clone()));
                Err(err)
            }
        }
    }

    /// Saves `joke` unless its id is already saved; returns whether it was inserted.
    pub fn save(&self, joke: Joke) -> bool {
        let mut guard = self.lock();
        let inserted = !guard.is_saved(&joke.id);
        let state = std::mem::take(&mut *guard);
        let (state, _) = update(state, Msg::SaveJoke(joke));
        *guard = state;
        inserted
    }

    pub fn delete(&self, id: &str) {
        self.dispatch(Msg::DeleteJoke(id.to_string()));
    }

    pub fn edit(&self, id: &str, value: impl Into<String>) {
        self.dispatch(Msg::EditJoke {
            id: id.to_string(),
            value: value.into(),
        });
    }
}

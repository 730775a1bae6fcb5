use jokebox_core::{Joke, Msg, SeenJokeIds, MAX_UNIQUE_ATTEMPTS};
use jokebox_logging::{jokebox_debug, jokebox_info, jokebox_warn};

use crate::{JokeStore, UniqueFetchError};

/// Repeats store fetches until a joke outside the session's seen set turns up.
///
/// Attempts run strictly one after another. A transport failure ends the loop
/// at once; only duplicate results consume an attempt and retry. The seen set
/// is shared across categories and survives category switches.
#[derive(Debug, Clone)]
pub struct UniqueFetcher {
    seen: SeenJokeIds,
    max_attempts: usize,
}

impl Default for UniqueFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl UniqueFetcher {
    pub fn new() -> Self {
        Self::with_max_attempts(MAX_UNIQUE_ATTEMPTS)
    }

    /// A bound of zero is raised to one so every call issues at least one fetch.
    pub fn with_max_attempts(max_attempts: usize) -> Self {
        Self {
            seen: SeenJokeIds::new(),
            max_attempts: max_attempts.max(1),
        }
    }

    /// Starts from an existing seen set.
    pub fn with_seen(mut self, seen: SeenJokeIds) -> Self {
        self.seen = seen;
        self
    }

    pub fn seen(&self) -> &SeenJokeIds {
        &self.seen
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Fetches until an unseen joke arrives or the attempt bound is hit.
    ///
    /// An empty category is treated as no filter. On exhaustion the store
    /// still holds the last (repeated) joke and carries an exhausted notice.
    pub async fn fetch_unique(
        &mut self,
        store: &JokeStore,
        category: Option<&str>,
    ) -> Result<Joke, UniqueFetchError> {
        let category = category.filter(|name| !name.is_empty());
        let mut attempts = 0;

        while attempts < self.max_attempts {
            let joke = store.fetch_joke(category).await?;
            attempts += 1;
            if self.seen.insert(joke.id.clone()) {
                jokebox_info!(
                    "unique joke id={} after {} attempt(s), {} seen this session",
                    joke.id,
                    attempts,
                    self.seen.len()
                );
                return Ok(joke);
            }
            jokebox_debug!("joke id={} already seen (attempt {})", joke.id, attempts);
        }

        jokebox_warn!(
            "no unseen joke after {} attempts (category={:?})",
            attempts,
            category
        );
        let category = category.map(ToOwned::to_owned);
        store.dispatch(Msg::UniqueExhausted {
            category: category.clone(),
        });
        Err(UniqueFetchError::Exhausted { category, attempts })
    }
}

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};

use jokebox_core::Joke;
use jokebox_engine::{FailureKind, FetchError, JokeSource};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(jokebox_logging::initialize_for_tests);
}

/// Joke source that replays a fixed script, repeating the last entry once exhausted.
#[derive(Default)]
pub struct ScriptedSource {
    jokes: Mutex<VecDeque<Result<Joke, FetchError>>>,
    categories: Mutex<Option<Result<Vec<String>, FetchError>>>,
    requests: Mutex<Vec<Option<String>>>,
}

impl ScriptedSource {
    pub fn with_ids(ids: &[&str]) -> Arc<Self> {
        Self::with_results(
            ids.iter()
                .map(|id| Ok(Joke::new(*id, format!("joke {id}"))))
                .collect(),
        )
    }

    pub fn with_results(results: Vec<Result<Joke, FetchError>>) -> Arc<Self> {
        Arc::new(Self {
            jokes: Mutex::new(results.into()),
            ..Self::default()
        })
    }

    pub fn set_categories(&self, result: Result<Vec<String>, FetchError>) {
        *self.categories.lock().unwrap() = Some(result);
    }

    /// Category argument of every `random` call, in order.
    pub fn requests(&self) -> Vec<Option<String>> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

pub fn network_error(message: &str) -> FetchError {
    FetchError::new(FailureKind::Network, message)
}

#[async_trait::async_trait]
impl JokeSource for ScriptedSource {
    async fn random(&self, category: Option<&str>) -> Result<Joke, FetchError> {
        self.requests
            .lock()
            .unwrap()
            .push(category.map(ToOwned::to_owned));
        let mut jokes = self.jokes.lock().unwrap();
        if jokes.len() > 1 {
            jokes.pop_front().unwrap()
        } else {
            jokes
                .front()
                .cloned()
                .unwrap_or_else(|| Err(network_error("script empty")))
        }
    }

    async fn categories(&self) -> Result<Vec<String>, FetchError> {
        self.categories
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

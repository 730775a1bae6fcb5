use std::collections::HashSet;

/// Opaque identifier assigned by the joke API.
pub type JokeId = String;

/// Upper bound on fetches the unique-fetch loop may issue per request.
pub const MAX_UNIQUE_ATTEMPTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Joke {
    pub id: JokeId,
    pub value: String,
    pub categories: Vec<String>,
}

impl Joke {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            categories: Vec::new(),
        }
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }
}

/// Phase of the most recent asynchronous fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Session-scoped memory of every joke id returned by a fetch.
///
/// Only grows; reset by constructing a new value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeenJokeIds {
    ids: HashSet<JokeId>,
}

impl SeenJokeIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Records `id`; returns `false` if it was already present.
    pub fn insert(&mut self, id: impl Into<JokeId>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<JokeId>> FromIterator<S> for SeenJokeIds {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

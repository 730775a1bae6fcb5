use std::fmt;

use jokebox_core::Joke;

/// Outcome notifications emitted by [`crate::EngineHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    JokeReady(Joke),
    Exhausted {
        category: Option<String>,
        attempts: usize,
    },
    CategoriesLoaded(Vec<String>),
    Failed(FetchError),
}

/// Any failure of a single request against the joke source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Decode,
    /// Category request succeeded at the transport level but carried no joke.
    EmptyCategoryResult { category: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Decode => write!(f, "malformed response body"),
            FailureKind::EmptyCategoryResult { category } => {
                write!(f, "no joke returned for category {category}")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Failure of the unique-fetch loop.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UniqueFetchError {
    #[error("no more unique jokes available after {attempts} attempts{}", scope(.category))]
    Exhausted {
        category: Option<String>,
        attempts: usize,
    },
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

fn scope(category: &Option<String>) -> String {
    match category {
        Some(name) => format!(" in category {name}"),
        None => String::new(),
    }
}

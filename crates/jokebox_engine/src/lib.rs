//! Jokebox engine: joke source IO, the shared store, and the unique-fetch loop.
mod engine;
mod source;
mod store;
mod types;
mod unique;

pub use engine::EngineHandle;
pub use source::{FetchSettings, JokeSource, ReqwestJokeSource, DEFAULT_API_BASE};
pub use store::JokeStore;
pub use types::{EngineEvent, FailureKind, FetchError, UniqueFetchError};
pub use unique::UniqueFetcher;

//! Jokebox core: pure joke store state machine and view-model helpers.
mod effect;
mod joke;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use joke::{Joke, JokeId, LoadStatus, SeenJokeIds, MAX_UNIQUE_ATTEMPTS};
pub use msg::Msg;
pub use state::{JokeState, Notice, Page};
pub use update::update;
pub use view_model::{JokeRowView, JokesViewModel};

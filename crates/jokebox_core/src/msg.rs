use crate::{Joke, JokeId, Page};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Jokes page mounted: load categories and a first joke.
    AppStarted,
    /// User asked for a new joke.
    GetJokeClicked,
    /// User picked a category filter (`None` clears it).
    CategorySelected(Option<String>),
    /// A fetch request left for the network.
    FetchStarted,
    /// A joke request settled successfully.
    JokeFetched(Joke),
    /// The category list request settled successfully.
    CategoriesFetched(Vec<String>),
    /// A fetch request settled with a failure message.
    FetchFailed(String),
    /// User clicked Save on the current joke.
    SaveCurrentClicked,
    SaveJoke(Joke),
    DeleteJoke(JokeId),
    EditJoke { id: JokeId, value: String },
    /// The unique-fetch loop ran out of attempts.
    UniqueExhausted { category: Option<String> },
    Navigate(Page),
}

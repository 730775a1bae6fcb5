use crate::{Effect, JokeState, Msg, Notice};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: JokeState, msg: Msg) -> (JokeState, Vec<Effect>) {
    let effects = match msg {
        Msg::AppStarted => vec![
            Effect::FetchCategories,
            Effect::FetchUniqueJoke {
                category: state.selected_category().map(ToOwned::to_owned),
            },
        ],
        Msg::GetJokeClicked => {
            state.set_notice(None);
            vec![Effect::FetchUniqueJoke {
                category: state.selected_category().map(ToOwned::to_owned),
            }]
        }
        Msg::CategorySelected(category) => {
            state.select_category(category);
            Vec::new()
        }
        Msg::FetchStarted => {
            state.begin_fetch();
            Vec::new()
        }
        Msg::JokeFetched(joke) => {
            state.apply_joke(joke);
            Vec::new()
        }
        Msg::CategoriesFetched(categories) => {
            state.apply_categories(categories);
            Vec::new()
        }
        Msg::FetchFailed(message) => {
            state.apply_failure(message);
            Vec::new()
        }
        Msg::SaveCurrentClicked => {
            if let Some(joke) = state.current_joke().cloned() {
                if state.save_joke(joke) {
                    state.set_notice(None);
                } else {
                    state.set_notice(Some(Notice::AlreadySaved));
                }
            }
            Vec::new()
        }
        Msg::SaveJoke(joke) => {
            state.save_joke(joke);
            Vec::new()
        }
        Msg::DeleteJoke(id) => {
            state.delete_joke(&id);
            Vec::new()
        }
        Msg::EditJoke { id, value } => {
            state.edit_joke(&id, value);
            Vec::new()
        }
        Msg::UniqueExhausted { category } => {
            state.set_notice(Some(Notice::Exhausted { category }));
            Vec::new()
        }
        Msg::Navigate(page) => {
            state.navigate(page);
            Vec::new()
        }
    };

    (state, effects)
}

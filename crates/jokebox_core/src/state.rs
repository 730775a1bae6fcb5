use std::fmt;

use crate::view_model::{JokeRowView, JokesViewModel};
use crate::{Joke, LoadStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Jokes,
    About,
}

/// Transient, user-visible message that is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    AlreadySaved,
    Exhausted { category: Option<String> },
    UnknownCategory(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::AlreadySaved => write!(f, "This joke is already saved!"),
            Notice::Exhausted { category: None } => write!(f, "No more unique jokes available."),
            Notice::Exhausted { category: Some(_) } => {
                write!(f, "No more unique jokes available in this category.")
            }
            Notice::UnknownCategory(name) => write!(f, "Unknown category: {name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JokeState {
    current_joke: Option<Joke>,
    saved_jokes: Vec<Joke>,
    categories: Vec<String>,
    status: LoadStatus,
    last_error: Option<String>,
    selected_category: Option<String>,
    notice: Option<Notice>,
    page: Page,
    dirty: bool,
}

impl JokeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_joke(&self) -> Option<&Joke> {
        self.current_joke.as_ref()
    }

    pub fn saved_jokes(&self) -> &[Joke] {
        &self.saved_jokes
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.saved_jokes.iter().any(|joke| joke.id == id)
    }

    pub fn view(&self) -> JokesViewModel {
        JokesViewModel {
            page: self.page,
            status: self.status,
            current_joke: self.current_joke.clone(),
            current_is_saved: self
                .current_joke
                .as_ref()
                .is_some_and(|joke| self.is_saved(&joke.id)),
            saved: self
                .saved_jokes
                .iter()
                .enumerate()
                .map(|(idx, joke)| JokeRowView {
                    row: idx + 1,
                    id: joke.id.clone(),
                    value: joke.value.clone(),
                    categories: joke.categories.clone(),
                })
                .collect(),
            categories: self.categories.clone(),
            selected_category: self.selected_category.clone(),
            last_error: self.last_error.clone(),
            notice: self.notice.as_ref().map(ToString::to_string),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn begin_fetch(&mut self) {
        self.status = LoadStatus::Pending;
        self.last_error = None;
        self.mark_dirty();
    }

    pub(crate) fn apply_joke(&mut self, joke: Joke) {
        self.current_joke = Some(joke);
        self.status = LoadStatus::Succeeded;
        self.last_error = None;
        self.mark_dirty();
    }

    pub(crate) fn apply_categories(&mut self, categories: Vec<String>) {
        self.categories = categories;
        self.status = LoadStatus::Succeeded;
        self.last_error = None;
        if let Some(selected) = self.selected_category.as_deref() {
            if !self.categories.iter().any(|name| name == selected) {
                self.selected_category = None;
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn apply_failure(&mut self, message: String) {
        self.status = LoadStatus::Failed;
        self.last_error = Some(message);
        self.mark_dirty();
    }

    /// Inserts unless a saved joke already has the same id.
    pub(crate) fn save_joke(&mut self, joke: Joke) -> bool {
        if self.is_saved(&joke.id) {
            return false;
        }
        self.saved_jokes.push(joke);
        self.mark_dirty();
        true
    }

    pub(crate) fn delete_joke(&mut self, id: &str) -> bool {
        let before = self.saved_jokes.len();
        self.saved_jokes.retain(|joke| joke.id != id);
        let removed = self.saved_jokes.len() != before;
        if removed {
            self.mark_dirty();
        }
        removed
    }

    pub(crate) fn edit_joke(&mut self, id: &str, value: String) -> bool {
        match self.saved_jokes.iter_mut().find(|joke| joke.id == id) {
            Some(joke) => {
                joke.value = value;
                self.mark_dirty();
                true
            }
            None => false,
        }
    }

    pub(crate) fn select_category(&mut self, category: Option<String>) {
        let category = category.filter(|name| !name.trim().is_empty());
        if let Some(name) = category.as_deref() {
            if !self.categories.is_empty() && !self.categories.iter().any(|known| known == name) {
                self.set_notice(Some(Notice::UnknownCategory(name.to_string())));
                return;
            }
        }
        if self.selected_category != category {
            self.selected_category = category;
            self.mark_dirty();
        }
        self.set_notice(None);
    }

    pub(crate) fn set_notice(&mut self, notice: Option<Notice>) {
        if self.notice != notice {
            self.notice = notice;
            self.mark_dirty();
        }
    }

    pub(crate) fn navigate(&mut self, page: Page) {
        if self.page != page {
            self.page = page;
            self.mark_dirty();
        }
    }
}

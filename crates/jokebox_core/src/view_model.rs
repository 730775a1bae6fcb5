use crate::{Joke, LoadStatus, Page};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JokesViewModel {
    pub page: Page,
    pub status: LoadStatus,
    pub current_joke: Option<Joke>,
    pub current_is_saved: bool,
    pub saved: Vec<JokeRowView>,
    pub categories: Vec<String>,
    pub selected_category: Option<String>,
    pub last_error: Option<String>,
    pub notice: Option<String>,
    pub dirty: bool,
}

impl JokesViewModel {
    /// Resolves a 1-based row number or a literal id to a saved joke id.
    pub fn resolve_saved_id(&self, token: &str) -> Option<&str> {
        if let Some(row) = self.saved.iter().find(|row| row.id == token) {
            return Some(row.id.as_str());
        }
        let row: usize = token.strip_prefix('#').unwrap_or(token).parse().ok()?;
        self.saved
            .iter()
            .find(|candidate| candidate.row == row)
            .map(|candidate| candidate.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokeRowView {
    pub row: usize,
    pub id: String,
    pub value: String,
    pub categories: Vec<String>,
}

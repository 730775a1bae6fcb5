use jokebox_core::{JokeRowView, JokesViewModel, LoadStatus, Page};

use super::pages::{navbar, ABOUT_TEXT};

const ID_HEADER: &str = "ID";
const JOKE_HEADER: &str = "Joke";

/// Renders the current page as plain text lines.
pub fn render(view: &JokesViewModel) -> Vec<String> {
    let mut lines = vec![navbar(view.page), String::new()];
    match view.page {
        Page::About => lines.extend(ABOUT_TEXT.iter().map(|line| line.to_string())),
        Page::Jokes => render_jokes_page(view, &mut lines),
    }
    lines
}

fn render_jokes_page(view: &JokesViewModel, lines: &mut Vec<String>) {
    if view.status == LoadStatus::Pending {
        lines.push("Loading...".to_string());
        return;
    }
    if let Some(error) = &view.last_error {
        lines.push(format!("Error: {error}"));
        lines.push(String::new());
    }

    let filter = view.selected_category.as_deref().unwrap_or("any");
    lines.push(format!("Category: {filter}"));

    match &view.current_joke {
        Some(joke) => {
            lines.push(String::new());
            lines.push(format!("  {}", joke.value));
            if view.current_is_saved {
                lines.push("  (saved)".to_string());
            } else {
                lines.push("  Type `save` to keep it.".to_string());
            }
        }
        None => lines.push("Type `get` to fetch a joke.".to_string()),
    }
    if let Some(notice) = &view.notice {
        lines.push(format!("! {notice}"));
    }

    lines.push(String::new());
    lines.push(format!("Saved Jokes ({})", view.saved.len()));
    if view.saved.is_empty() {
        lines.push("  (none)".to_string());
    } else {
        lines.extend(saved_table(&view.saved));
    }
}

fn saved_table(rows: &[JokeRowView]) -> Vec<String> {
    let row_width = rows.len().to_string().len().max(1);
    let id_width = rows
        .iter()
        .map(|row| row.id.chars().count())
        .max()
        .unwrap_or(0)
        .max(ID_HEADER.len());

    let mut table = Vec::with_capacity(rows.len() + 1);
    table.push(format!(
        "  {:>row_width$}  {:<id_width$}  {}",
        "#", ID_HEADER, JOKE_HEADER
    ));
    for row in rows {
        table.push(format!(
            "  {:>row_width$}  {:<id_width$}  {}",
            row.row, row.id, row.value
        ));
    }
    table
}

pub fn render_categories(view: &JokesViewModel) -> Vec<String> {
    if view.categories.is_empty() {
        return vec!["No categories loaded.".to_string()];
    }
    let mut lines = vec!["Categories:".to_string()];
    for category in &view.categories {
        let marker = if view.selected_category.as_deref() == Some(category.as_str()) {
            '*'
        } else {
            ' '
        };
        lines.push(format!(" {marker} {category}"));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use jokebox_core::{update, Joke, JokeState, Msg};
    use pretty_assertions::assert_eq;

    fn view_after(msgs: Vec<Msg>) -> JokesViewModel {
        msgs.into_iter()
            .fold(JokeState::new(), |state, msg| update(state, msg).0)
            .view()
    }

    #[test]
    fn pending_shows_only_loading() {
        let view = view_after(vec![Msg::FetchStarted]);
        let lines = render(&view);
        assert_eq!(lines.last().map(String::as_str), Some("Loading..."));
        assert!(!lines.iter().any(|line| line.starts_with("Saved Jokes")));
    }

    #[test]
    fn error_is_shown_above_the_page() {
        let view = view_after(vec![Msg::FetchStarted, Msg::FetchFailed("offline".into())]);
        let lines = render(&view);
        assert!(lines.contains(&"Error: offline".to_string()));
        assert!(lines.contains(&"Saved Jokes (0)".to_string()));
    }

    #[test]
    fn saved_jokes_render_as_aligned_table() {
        let view = view_after(vec![
            Msg::JokeFetched(Joke::new("abc", "first")),
            Msg::SaveCurrentClicked,
            Msg::SaveJoke(Joke::new("x", "second")),
        ]);
        let lines = render(&view);
        let table: Vec<_> = lines
            .iter()
            .skip_while(|line| !line.starts_with("Saved Jokes"))
            .cloned()
            .collect();
        assert_eq!(
            table,
            vec![
                "Saved Jokes (2)".to_string(),
                "  #  ID   Joke".to_string(),
                "  1  abc  first".to_string(),
                "  2  x    second".to_string(),
            ]
        );
        assert!(lines.contains(&"  (saved)".to_string()));
    }

    #[test]
    fn notice_and_filter_are_rendered() {
        let view = view_after(vec![
            Msg::CategoriesFetched(vec!["dev".into(), "food".into()]),
            Msg::CategorySelected(Some("dev".into())),
            Msg::UniqueExhausted {
                category: Some("dev".into()),
            },
        ]);
        let lines = render(&view);
        assert!(lines.contains(&"Category: dev".to_string()));
        assert!(lines.contains(&"! No more unique jokes available in this category.".to_string()));
        assert_eq!(
            render_categories(&view),
            vec!["Categories:", " * dev", "   food"]
        );
    }

    #[test]
    fn about_page_replaces_jokes() {
        let view = view_after(vec![Msg::Navigate(Page::About)]);
        let lines = render(&view);
        assert!(lines[0].contains("[About]"));
        assert_eq!(lines[2], "About");
    }
}

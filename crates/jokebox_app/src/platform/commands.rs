use jokebox_core::{JokesViewModel, Msg, Page};
use thiserror::Error;

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    ShowCategories,
    ShowHelp,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?}; type `help` for a list")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Parses one input line. Blank lines parse to `None`.
///
/// Saved jokes may be addressed by id or by their 1-based row. Tokens that
/// match neither are passed through as ids, which the store ignores.
pub fn parse_command(line: &str, view: &JokesViewModel) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "get" | "next" | "g" => Command::Dispatch(Msg::GetJokeClicked),
        "category" | "cat" => {
            let category = (!rest.is_empty()).then(|| rest.to_string());
            Command::Dispatch(Msg::CategorySelected(category))
        }
        "categories" | "cats" => Command::ShowCategories,
        "save" | "s" => Command::Dispatch(Msg::SaveCurrentClicked),
        "delete" | "del" | "rm" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("delete <id|row>"));
            }
            Command::Dispatch(Msg::DeleteJoke(resolve_id(view, rest)))
        }
        "edit" | "e" => {
            let Some((target, text)) = rest.split_once(char::is_whitespace) else {
                return Err(CommandError::Usage("edit <id|row> <new text>"));
            };
            let text = text.trim();
            if text.is_empty() {
                return Err(CommandError::Usage("edit <id|row> <new text>"));
            }
            Command::Dispatch(Msg::EditJoke {
                id: resolve_id(view, target),
                value: text.to_string(),
            })
        }
        "jokes" | "list" | "home" => Command::Dispatch(Msg::Navigate(Page::Jokes)),
        "about" => Command::Dispatch(Msg::Navigate(Page::About)),
        "help" | "?" => Command::ShowHelp,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(CommandError::Unknown(verb.to_string())),
    };
    Ok(Some(command))
}

fn resolve_id(view: &JokesViewModel, token: &str) -> String {
    view.resolve_saved_id(token).unwrap_or(token).to_string()
}

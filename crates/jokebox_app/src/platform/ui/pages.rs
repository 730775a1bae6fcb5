use jokebox_core::Page;

pub const APP_TITLE: &str = "Chuck Norris Joke Generator";

pub const ABOUT_TEXT: &[&str] = &[
    "About",
    "",
    "Jokebox fetches Chuck Norris jokes from a public joke API.",
    "Browse random jokes or narrow them to a category, and keep the",
    "ones you like in a saved list you can edit or prune.",
    "Saved jokes live in memory and are gone when you quit.",
];

pub const HELP_TEXT: &[&str] = &[
    "Commands:",
    "  get                      fetch a joke you have not seen yet",
    "  category [name]          filter by category (no name clears it)",
    "  categories               list available categories",
    "  save                     save the current joke",
    "  edit <id|row> <text>     replace the text of a saved joke",
    "  delete <id|row>          remove a saved joke",
    "  jokes | about            switch page",
    "  help                     show this help",
    "  quit                     leave",
];

/// Navigation bar with the active page bracketed.
pub fn navbar(page: Page) -> String {
    let (jokes, about) = match page {
        Page::Jokes => ("[Jokes]", "About"),
        Page::About => ("Jokes", "[About]"),
    };
    format!("{APP_TITLE}  |  {jokes}  {about}")
}

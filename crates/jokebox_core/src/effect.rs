/// Side effects requested by [`crate::update`]; executed by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run the unique-fetch loop, scoped to a category when one is given.
    FetchUniqueJoke { category: Option<String> },
    FetchCategories,
}

use jokebox_core::Effect;
use jokebox_engine::{EngineEvent, EngineHandle, JokeStore};
use jokebox_logging::{jokebox_info, jokebox_warn};

/// Executes core effects on the engine and drains its outcome events.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn store(&self) -> &JokeStore {
        self.engine.store()
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchUniqueJoke { category } => {
                    jokebox_info!("FetchUniqueJoke category={:?}", category);
                    self.engine.fetch_unique(category);
                }
                Effect::FetchCategories => {
                    jokebox_info!("FetchCategories");
                    self.engine.fetch_categories();
                }
            }
        }
    }

    /// Logs every pending engine event; returns how many were drained.
    pub fn drain_events(&self) -> usize {
        let mut drained = 0;
        while let Some(event) = self.engine.try_recv() {
            drained += 1;
            match event {
                EngineEvent::JokeReady(joke) => {
                    jokebox_info!("joke ready id={}", joke.id);
                }
                EngineEvent::Exhausted { category, attempts } => {
                    jokebox_warn!(
                        "unique fetch exhausted after {} attempts (category={:?})",
                        attempts,
                        category
                    );
                }
                EngineEvent::CategoriesLoaded(categories) => {
                    jokebox_info!("{} categories loaded", categories.len());
                }
                EngineEvent::Failed(err) => {
                    jokebox_warn!("fetch failed: {}", err);
                }
            }
        }
        drained
    }

    pub fn shutdown(&self) {
        self.engine.shutdown();
    }
}

use std::sync::Arc;

use crate::{
    config::Config,
    services::{
        chat::{ChatProvider, GeminiChat},
        providers::{AnimeCatalog, JikanCatalog, MovieTvCatalog, TmdbCatalog},
    },
};

/// Shared application state
///
/// One handle per external capability, injected at construction so tests
/// can substitute stubs. No mutable state lives here: every request works
/// against the same read-only provider handles.
#[derive(Clone)]
pub struct AppState {
    pub movie_tv: Arc<dyn MovieTvCatalog>,
    pub anime: Arc<dyn AnimeCatalog>,
    pub chat: Arc<dyn ChatProvider>,
}

impl AppState {
    /// Builds the production providers from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            movie_tv: Arc::new(TmdbCatalog::new(config)),
            anime: Arc::new(JikanCatalog::new(config)),
            chat: Arc::new(GeminiChat::new(config)),
        }
    }

    /// Assembles state from explicit provider handles.
    pub fn with_providers(
        movie_tv: Arc<dyn MovieTvCatalog>,
        anime: Arc<dyn AnimeCatalog>,
        chat: Arc<dyn ChatProvider>,
    ) -> Self {
        Self {
            movie_tv,
            anime,
            chat,
        }
    }
}

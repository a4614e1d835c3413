#![allow(dead_code)]

use waymark::{
    ConfigError,
    app::{AppRoutes, Component, routes_with},
    testing::ScriptedLoader,
};

// ============================================================================
// Fixtures
// ============================================================================

/// An About loader the test can inspect and script.
pub fn about_loader() -> ScriptedLoader<Component> {
    ScriptedLoader::new(Component::ABOUT)
}

/// The application table wired to a shared handle on `loader`.
pub fn app_with(loader: &ScriptedLoader<Component>) -> Result<AppRoutes, ConfigError> {
    routes_with(loader.clone())
}

//! GraphQL todo list service with a stub login flow.
//!
//! Todos live in memory only and reset with the process. The bearer token
//! issued by `login` is used to personalise `hello` and nothing else.

pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod model;
pub mod route;
pub mod schema;
pub mod store;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use auth::TokenService;
use config::Config;
use schema::{build_schema, export_sdl, TodoSchema};
use store::TodoStore;

// Struct representing the application state
pub struct AppState {
    pub schema: TodoSchema,
    pub tokens: TokenService,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let tokens = TokenService::new(&config.jwt_secret);
        Self {
            schema: build_schema(Arc::new(TodoStore::new()), tokens.clone()),
            tokens,
            static_dir: config.static_dir.clone(),
        }
    }
}

/// Write the SDL to `output`. Uses the built-in defaults and never reads the
/// environment; the signing secret has no effect on the schema.
pub fn write_schema(output: &Path) -> std::io::Result<()> {
    let state = AppState::new(&Config::default());
    export_sdl(&state.schema, output)
}

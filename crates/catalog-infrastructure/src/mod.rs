//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns for the catalog semantic index.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration (defaults, TOML, `CATALOG__` env) |
//! | [`constants`] | Configuration defaults |
//! | [`di`] | Composition root building the [`AppContext`](di::AppContext) |
//! | [`error_ext`] | Context helpers mapping foreign errors to domain errors |
//! | [`logging`] | tracing subscriber setup |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, ConfigLoader};
pub use di::{AppContext, init_app};
pub use error_ext::ErrorContext;
pub use logging::init_logging;

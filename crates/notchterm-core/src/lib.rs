pub mod config;
pub mod error;
pub mod events;
pub mod ids;
pub mod models;

pub use error::{CoreError, Result};
pub use events::ChangeNotifier;
pub use ids::{IdGenerator, RandomIds};
pub use models::*;

/// Application version, resolved at compile time from the workspace Cargo.toml.
/// Use this constant everywhere instead of calling `env!("CARGO_PKG_VERSION")` directly.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

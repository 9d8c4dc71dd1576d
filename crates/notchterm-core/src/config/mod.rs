pub mod app_config;
pub mod paths;
pub mod state_file;

pub use app_config::AppConfig;
pub use state_file::StateFile;

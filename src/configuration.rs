pub mod config;
pub mod types;

pub use config::{CliArgs, Config};
pub use types::StorageConfig;

pub mod defaults;
pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use types::ClientOptions;

//! indicium-configs
//!
//! Client configuration types and loader for Indicium.

pub mod config;

pub use config::*;
pub use config::defaults;

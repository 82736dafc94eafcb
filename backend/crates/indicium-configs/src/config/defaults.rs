// Default value functions

use indicium_commons::DatabaseName;

/// Directory under the working directory that holds default data roots.
pub const DEFAULT_WORKING_ROOT: &str = "bwd";

pub fn default_directory() -> String {
    "data".to_string()
}

pub fn default_database() -> String {
    DatabaseName::DEFAULT.to_string()
}

pub fn default_production() -> bool {
    false
}

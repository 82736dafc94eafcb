use super::error::ConfigError;
use super::types::ClientOptions;
use indicium_commons::naming::validate_name;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

impl ClientOptions {
    /// Load options from a TOML file, apply environment overrides and validate.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;

        let mut options: ClientOptions = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.as_ref().display(), e)))?;

        options.finalize()?;

        Ok(options)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut options = ClientOptions::default();
        options.finalize()?;
        Ok(options)
    }

    /// Apply environment overrides, then validate.
    pub fn finalize(&mut self) -> Result<(), ConfigError> {
        self.apply_env_overrides()?;
        self.validate()
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(path) = env::var("INDICIUM_PATH") {
            self.path = Some(PathBuf::from(path));
        }

        if let Ok(directory) = env::var("INDICIUM_DIRECTORY") {
            self.directory = directory;
        }

        if let Ok(database) = env::var("INDICIUM_DATABASE") {
            self.database = database;
        }

        if let Ok(val) = env::var("INDICIUM_PRODUCTION") {
            self.production = parse_bool("INDICIUM_PRODUCTION", &val)?;
        }

        // INDICIUM_ENV=production implies production mode
        if env::var("INDICIUM_ENV").is_ok_and(|v| v.eq_ignore_ascii_case("production")) {
            self.production = true;
        }

        Ok(())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_name(&self.database, "Database name").map_err(ConfigError::ValidationError)?;

        if self.path.is_none() {
            validate_name(&self.directory, "Directory").map_err(ConfigError::ValidationError)?;
        }

        if let Some(path) = &self.path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError("path cannot be empty".to_string()));
            }
        }

        Ok(())
    }
}

fn parse_bool(field: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn clear_env() {
        for var in [
            "INDICIUM_PATH",
            "INDICIUM_DIRECTORY",
            "INDICIUM_DATABASE",
            "INDICIUM_PRODUCTION",
            "INDICIUM_ENV",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_default_options_are_valid() {
        let options = ClientOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.database, "default");
        assert_eq!(options.directory, "data");
        assert!(!options.production);
    }

    #[test]
    fn test_resolve_root() {
        let options = ClientOptions::at("/srv/indicium");
        assert_eq!(options.resolve_root().unwrap(), PathBuf::from("/srv/indicium"));

        let options = ClientOptions::default().with_directory("store");
        let root = options.resolve_root().unwrap();
        assert!(root.ends_with("bwd/store"));
    }

    #[test]
    fn test_invalid_database_name() {
        let options = ClientOptions::default().with_database("../escape");
        assert!(matches!(options.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    #[serial]
    fn test_from_file() {
        clear_env();
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("indicium.toml");
        fs::write(&file, "path = \"/tmp/idx\"\ndatabase = \"app\"\nproduction = true\n").unwrap();

        let options = ClientOptions::from_file(&file).unwrap();
        assert_eq!(options.path, Some(PathBuf::from("/tmp/idx")));
        assert_eq!(options.database, "app");
        assert_eq!(options.directory, "data");
        assert!(options.production);
    }

    #[test]
    #[serial]
    fn test_from_file_parse_error() {
        clear_env();
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("broken.toml");
        fs::write(&file, "database = [").unwrap();

        assert!(matches!(
            ClientOptions::from_file(&file),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        env::set_var("INDICIUM_DATABASE", "analytics");
        env::set_var("INDICIUM_PATH", "/var/lib/idx");
        env::set_var("INDICIUM_ENV", "Production");

        let options = ClientOptions::from_env().unwrap();
        clear_env();

        assert_eq!(options.database, "analytics");
        assert_eq!(options.path, Some(PathBuf::from("/var/lib/idx")));
        assert!(options.production);
    }

    #[test]
    #[serial]
    fn test_invalid_production_flag() {
        clear_env();
        env::set_var("INDICIUM_PRODUCTION", "maybe");

        let result = ClientOptions::from_env();
        clear_env();

        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}

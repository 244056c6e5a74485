use std::path::PathBuf;

/// Client configuration: command-line flags first, then environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `None` means the bundled dataset is used directly.
    pub source: Option<String>,
    pub storage_path: PathBuf,
}

impl Config {
    pub fn resolve(source: Option<String>, storage: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::from_lookup(source, storage, |var| std::env::var(var).ok(), dirs::data_dir())
    }

    fn from_lookup(
        source: Option<String>,
        storage: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
        data_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let source = match source.or_else(|| lookup("GADGET_SOURCE")) {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::Invalid("GADGET_SOURCE", "must not be empty"))
            }
            other => other,
        };

        let storage_path = match storage {
            Some(path) => path,
            None => match lookup("GADGET_STORAGE_PATH") {
                Some(value) if value.trim().is_empty() => {
                    return Err(ConfigError::Invalid(
                        "GADGET_STORAGE_PATH",
                        "must not be empty",
                    ))
                }
                Some(value) => PathBuf::from(value),
                None => data_dir
                    .map(|dir| dir.join("gadget-catalog").join("local.redb"))
                    .ok_or(ConfigError::Missing("GADGET_STORAGE_PATH"))?,
            },
        };

        Ok(Config {
            source,
            storage_path,
        })
    }
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, &'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(var) => write!(f, "Missing environment variable: {}", var),
            ConfigError::Invalid(var, msg) => write!(f, "Invalid value for {}: {}", var, msg),
        }
    }
}

impl std::error::Error for ConfigError {}

use std::net::SocketAddr;
use std::path::PathBuf;

/// Server configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub data_path: PathBuf,
    pub static_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let listen_addr = lookup("GADGET_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse()
            .map_err(|_| {
                ConfigError::Invalid("GADGET_LISTEN_ADDR", "must be a valid socket address")
            })?;

        let data_path = Self::non_empty_path(&lookup, "GADGET_DATA_PATH", "./data/gadgets.json")?;
        let static_dir =
            Self::non_empty_path(&lookup, "GADGET_STATIC_DIR", "crates/gadget-server/static")?;

        Ok(Config {
            listen_addr,
            data_path,
            static_dir,
        })
    }

    fn non_empty_path(
        lookup: &impl Fn(&str) -> Option<String>,
        var: &'static str,
        default: &str,
    ) -> Result<PathBuf, ConfigError> {
        match lookup(var) {
            Some(value) if value.trim().is_empty() => {
                Err(ConfigError::Invalid(var, "must not be empty"))
            }
            Some(value) => Ok(PathBuf::from(value)),
            None => Ok(PathBuf::from(default)),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str, &'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid(var, msg) => write!(f, "Invalid value for {}: {}", var, msg),
        }
    }
}

impl std::error::Error for ConfigError {}

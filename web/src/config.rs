use std::env;
use std::path::PathBuf;

/// Server configuration, read from the environment (and `.env`).
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: String,
    pub data_dir: PathBuf,
    pub workers: usize,
    pub sentry_dsn: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, applying defaults for
    /// anything unset or unparseable.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            data_dir: lookup("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./data")),
            workers: lookup("WORKERS")
                .and_then(|w| w.parse().ok())
                .filter(|&w| w > 0)
                .unwrap_or_else(num_cpus::get),
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.workers, num_cpus::get());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn overrides() {
        let config = Config::from_lookup(|key| match key {
            "BIND_ADDRESS" => Some("127.0.0.1:3000".to_string()),
            "DATA_DIR" => Some("/srv/bible".to_string()),
            "WORKERS" => Some("0".to_string()),
            "SENTRY_DSN" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.bind_address, "127.0.0.1:3000");
        assert_eq!(config.data_dir, PathBuf::from("/srv/bible"));
        assert_eq!(config.workers, num_cpus::get());
        assert!(config.sentry_dsn.is_none());
    }
}

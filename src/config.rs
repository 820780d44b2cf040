// Startup configuration: where the lot file lives, where it is posted to
// and where received updates are logged. Every value can be overridden
// from the environment; anything unset falls back to the site defaults.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TARGET_URL: &str = "http://128.1.0.155:8089/update";

pub const ENV_INPUT: &str = "LOT_UPDATER_INPUT";
pub const ENV_URL: &str = "LOT_UPDATER_URL";
pub const ENV_LOG: &str = "LOT_UPDATER_LOG";
pub const ENV_TIMEOUT: &str = "LOT_UPDATER_TIMEOUT_SECS";

/// Everything the updater needs to know before the window opens.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub input_path: PathBuf,
    pub target_url: String,
    pub log_path: PathBuf,
    /// `None` means the upload may block for as long as the server takes.
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn new(
        input_path: impl Into<PathBuf>,
        target_url: impl Into<String>,
        log_path: impl Into<PathBuf>,
    ) -> Self {
        Config {
            input_path: input_path.into(),
            target_url: target_url.into(),
            log_path: log_path.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the configuration from `LOT_UPDATER_*` environment variables,
    /// using the defaults for anything not set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let input_path = lookup(ENV_INPUT).map(PathBuf::from).unwrap_or_else(default_input_path);
        let target_url = lookup(ENV_URL).unwrap_or_else(|| DEFAULT_TARGET_URL.into());
        let log_path = lookup(ENV_LOG).map(PathBuf::from).unwrap_or_else(default_log_path);

        let timeout = match lookup(ENV_TIMEOUT) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().with_context(|| {
                    format!("{} must be a whole number of seconds, got {:?}", ENV_TIMEOUT, raw)
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Config {
            input_path,
            target_url,
            log_path,
            timeout,
        })
    }
}

#[cfg(windows)]
fn default_input_path() -> PathBuf {
    PathBuf::from("C://Temp//Lots.csv")
}

#[cfg(windows)]
fn default_log_path() -> PathBuf {
    PathBuf::from("C://Temp//lot-updater.log")
}

#[cfg(not(windows))]
fn default_input_path() -> PathBuf {
    temp_dir().join("Lots.csv")
}

#[cfg(not(windows))]
fn default_log_path() -> PathBuf {
    temp_dir().join("lot-updater.log")
}

/// `$HOME/Temp`, or `./Temp` when no home directory is known.
#[cfg(not(windows))]
fn temp_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join("Temp")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.target_url, DEFAULT_TARGET_URL);
        assert!(cfg.input_path.ends_with("Lots.csv"));
        assert!(cfg.log_path.ends_with("lot-updater.log"));
        assert_eq!(cfg.timeout, None);
    }

    #[test]
    fn environment_overrides_defaults() {
        let cfg = Config::from_lookup(lookup_from(&[
            (ENV_INPUT, "/data/lots.csv"),
            (ENV_URL, "http://localhost:9000/update"),
            (ENV_LOG, "/var/log/lots.log"),
            (ENV_TIMEOUT, " 45 "),
        ]))
        .unwrap();
        assert_eq!(
            cfg,
            Config::new("/data/lots.csv", "http://localhost:9000/update", "/var/log/lots.log")
                .with_timeout(Duration::from_secs(45))
        );
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[(ENV_TIMEOUT, "soon")])).unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT));
    }
}

use crate::Result;
use crate::poller::{DEFAULT_POLL_INTERVAL, FailureAction, FailurePolicy};
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up when no explicit path is given
pub const CONFIG_FILE_NAME: &str = "pollbar.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Endpoint returning the task's progress as `{"progress": <number>}`
    #[serde(default = "default_url")]
    pub url: String,

    /// Delay between a handled report and the next query
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,

    /// Time allowed for one query before it counts as failed
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    /// What to do when a query fails or returns a malformed report
    #[serde(default)]
    pub on_failure: FailureAction,

    /// Consecutive failures tolerated when retrying
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Line shown once the task completes
    #[serde(default = "default_success_message")]
    pub success_message: String,
}

fn default_url() -> String {
    "http://127.0.0.1:5000/progress".to_string()
}

const fn default_interval() -> Duration {
    DEFAULT_POLL_INTERVAL
}

const fn default_request_timeout() -> Duration {
    Duration::from_secs(60)
}

const fn default_max_retries() -> u32 {
    FailurePolicy::DEFAULT_MAX_RETRIES
}

fn default_success_message() -> String {
    "Task completed successfully".to_string()
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `pollbar.toml` in `base_dir` is used if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading pollbar configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("no configuration file at '{path}', using defaults");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading pollbar configuration file '{path}'")),
            }
        };

        log::debug!("loading configuration from '{final_path}'");
        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// The failure policy described by `on_failure` and `max_retries`
    #[must_use]
    pub const fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy {
            action: self.on_failure,
            max_retries: self.max_retries,
        }
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is unusable, a duration is zero, or retries are enabled without any attempts
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.url).into_app_err_with(|| format!("url '{}' is not a valid absolute URL", self.url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(app_err!("url must use http or https, got '{}'", url.scheme()));
        }

        if self.interval.is_zero() {
            return Err(app_err!("interval must be greater than zero"));
        }

        if self.request_timeout.is_zero() {
            return Err(app_err!("request_timeout must be greater than zero"));
        }

        if self.on_failure == FailureAction::Retry && self.max_retries == 0 {
            return Err(app_err!("max_retries must be at least 1 when on_failure is 'retry'"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: default_url(),
            interval: default_interval(),
            request_timeout: default_request_timeout(),
            on_failure: FailureAction::default(),
            max_retries: default_max_retries(),
            success_message: default_success_message(),
        }
    }
}

use std::env;
use std::path::PathBuf;

use eyre::{Error, Result};

/// Environment variable naming the directory that receives the log files.
pub const LOG_DIRECTORY_KEY: &str = "KILINK_LOG_DIRECTORY";

/// Environment variable naming the deployment environment.
pub const ENVIRONMENT_KEY: &str = "KILINK_ENVIRONMENT";

/// Environment value that suppresses DEBUG propagation to handlers and loggers.
pub const PROD_ENVIRONMENT_VALUE: &str = "production";

/// Configuration struct for logging setup
#[derive(Debug, Clone)]
pub struct Config {
    pub log_directory: PathBuf,
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Environment Variables:
    /// - `KILINK_LOG_DIRECTORY`: directory for `linkode.log.*` files
    /// - `KILINK_ENVIRONMENT`: deployment environment, compared against
    ///   `"production"`
    ///
    /// # Returns
    /// Returns `Config` with values from environment variables
    ///
    /// # Errors
    /// * If either variable is unset; setup must abort before any handler is
    ///   attached, so there are no defaults for these keys
    pub fn from_env() -> Result<Self> {
        let log_directory = env::var(LOG_DIRECTORY_KEY)
            .map_err(|_| Error::msg(format!("{LOG_DIRECTORY_KEY} must be set")))?;
        let environment = env::var(ENVIRONMENT_KEY)
            .map_err(|_| Error::msg(format!("{ENVIRONMENT_KEY} must be set")))?;

        Ok(Self {
            log_directory: PathBuf::from(log_directory),
            environment,
        })
    }

    /// Whether the configured environment is the production one.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment == PROD_ENVIRONMENT_VALUE
    }
}

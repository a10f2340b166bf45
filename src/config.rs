use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

pub const BASE_URL: &str = "https://www.theweekinchess.com/zips/";
pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:73.0) Gecko/20100101 Firefox/73.0";
pub const DEFAULT_WORKERS: usize = 32;

/// Settings shared by every worker of a batch. Fixed once the batch starts.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub user_agent: String,
    pub workers: usize,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub max_redirects: usize,
    /// Where archives are written and PGN files land.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            workers: DEFAULT_WORKERS,
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_redirects: 10,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::invalid_config("worker count must be at least 1"));
        }
        if self.base_url.is_empty() {
            return Err(Error::invalid_config("base url must not be empty"));
        }
        if self.request_timeout.is_zero() {
            return Err(Error::invalid_config("request timeout must be positive"));
        }
        Ok(())
    }
}

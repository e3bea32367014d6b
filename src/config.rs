use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SESSION_DIR: &str = ".gigfinder";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    pub http_timeout: Duration,
    pub session_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let raw_url = get_env("API_BASE_URL")?;
        let api_base_url = Url::parse(&raw_url)
            .map_err(|e| Error::Config(format!("Invalid value for API_BASE_URL: {}", e)))?;
        let timeout_secs = get_env_parse_or("HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let session_dir = env::var("SESSION_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_DIR.to_string());

        Ok(Self {
            api_base_url,
            http_timeout: Duration::from_secs(timeout_secs),
            session_dir: PathBuf::from(session_dir),
        })
    }

    /// Config pointing at `base_url` with default timeout and session dir.
    pub fn new(base_url: &str) -> Result<Self> {
        let api_base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL {}: {}", base_url, e)))?;
        Ok(Self {
            api_base_url,
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_dir: PathBuf::from(DEFAULT_SESSION_DIR),
        })
    }

    pub fn with_session_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.session_dir = dir.into();
        self
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

use std::path::PathBuf;
use std::time::Duration;

pub const HTTP_ADDR_ENV: &str = "COOKWATCH_HTTP";
pub const DB_PATH_ENV: &str = "COOKWATCH_DB";
pub const IMAGE_SERVER_URL_ENV: &str = "IMAGE_SERVER_URL";
pub const STATIC_DIR_ENV: &str = "COOKWATCH_STATIC_DIR";
pub const SCRAPE_TIMEOUT_ENV: &str = "COOKWATCH_SCRAPE_TIMEOUT_MS";

pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_DB_PATH: &str = "cookwatch.sqlite";
pub const DEFAULT_IMAGE_SERVER_URL: &str = "http://209.38.30.63:8000";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_SCRAPE_TIMEOUT_MS: u64 = 5_000;

/// Values given on the command line; each one beats its environment variable.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub http: Option<String>,
    pub db: Option<String>,
    pub image_server_url: Option<String>,
    pub static_dir: Option<String>,
    pub scrape_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub http_addr: String,
    pub db_path: PathBuf,
    pub image_server_url: String,
    pub static_dir: PathBuf,
    pub scrape_timeout: Duration,
}

impl Config {
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, String> {
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    pub fn resolve(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, String> {
        let pick = |cli: Option<String>, key: &str, default: &str| {
            cli.or_else(|| env(key).filter(|v| !v.trim().is_empty()))
                .unwrap_or_else(|| default.to_owned())
        };

        let scrape_timeout_ms = match overrides.scrape_timeout_ms {
            Some(ms) => ms,
            None => match env(SCRAPE_TIMEOUT_ENV) {
                Some(raw) => raw.trim().parse::<u64>().map_err(|error| {
                    format!("invalid {SCRAPE_TIMEOUT_ENV} value {raw:?}: {error}")
                })?,
                None => DEFAULT_SCRAPE_TIMEOUT_MS,
            },
        };
        if scrape_timeout_ms == 0 {
            return Err(String::from("scrape timeout must be greater than zero"));
        }

        Ok(Self {
            http_addr: pick(overrides.http, HTTP_ADDR_ENV, DEFAULT_HTTP_ADDR),
            db_path: PathBuf::from(pick(overrides.db, DB_PATH_ENV, DEFAULT_DB_PATH)),
            image_server_url: pick(
                overrides.image_server_url,
                IMAGE_SERVER_URL_ENV,
                DEFAULT_IMAGE_SERVER_URL,
            ),
            static_dir: PathBuf::from(pick(
                overrides.static_dir,
                STATIC_DIR_ENV,
                DEFAULT_STATIC_DIR,
            )),
            scrape_timeout: Duration::from_millis(scrape_timeout_ms),
        })
    }
}

use std::path::PathBuf;

pub const DEFAULT_CACHE_DIR: &str = "./data/cache";
pub const DEFAULT_PROVIDER_URL: &str = "http://127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub cache_dir: PathBuf,
    pub provider_base_url: String,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            cache_dir: PathBuf::from(get("MACRO_CACHE_DIR", DEFAULT_CACHE_DIR)),
            provider_base_url: get("AKTOOLS_BASE_URL", DEFAULT_PROVIDER_URL),
            log_level: get("LOG_LEVEL", "info"),
            log_format: get("LOG_FORMAT", "pretty"),
        }
    }
}

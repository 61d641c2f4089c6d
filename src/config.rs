use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Backend API
    pub api_base_url: String,
    pub request_timeout_secs: u64,

    // Environment
    pub environment: String,
    pub log_level: String,

    // Pagination defaults
    pub default_page_size: u32,

    // Map screen
    pub map_loading_delay_ms: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5000/api".to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            default_page_size: env::var("DEFAULT_PAGE_SIZE")
                .unwrap_or_else(|_| "10".to_string())
                .parse()?,

            map_loading_delay_ms: env::var("MAP_LOADING_DELAY_MS")
                .unwrap_or_else(|_| "800".to_string())
                .parse()?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: "http://localhost:5000/api".to_string(),
            request_timeout_secs: 30,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            default_page_size: 10,
            map_loading_delay_ms: 800,
        }
    }
}

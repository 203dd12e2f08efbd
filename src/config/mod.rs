use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub catalog: CatalogConfig,
    pub server: ServerConfig,
    pub ranking: RankingConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_rate_limit: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    pub default_top_n: usize,
    pub max_top_n: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub max_query_length: usize,
    pub max_request_body_size: usize,
}

/// Highest accepted `API_RATE_LIMIT`, in requests per second per client
pub const MAX_API_RATE_LIMIT: u64 = 1000;

/// Read an environment variable, falling back to `default`, and parse it.
fn env_or<T: std::str::FromStr>(name: &str, default: &str) -> Result<T> {
    std::env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {name} value")))
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let catalog_path = std::env::var("CATALOG_PATH")
            .unwrap_or_else(|_| "./data/recipes.csv".to_string())
            .into();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env_or("PORT", "3000")?;
        let api_rate_limit = env_or("API_RATE_LIMIT", "100")?;

        let default_top_n = env_or("DEFAULT_TOP_N", "5")?;
        let max_top_n = env_or("MAX_TOP_N", "50")?;

        let max_query_length = env_or("MAX_QUERY_LENGTH", "500")?;
        let max_request_body_size = env_or("MAX_REQUEST_BODY_SIZE", "1048576")?;

        Ok(Settings {
            catalog: CatalogConfig { path: catalog_path },
            server: ServerConfig {
                host,
                port,
                api_rate_limit,
            },
            ranking: RankingConfig {
                default_top_n,
                max_top_n,
            },
            limits: LimitsConfig {
                max_query_length,
                max_request_body_size,
            },
        })
    }

    /// Requests a client may send at once before the per-second refill
    /// applies: twice the configured rate.
    pub fn api_burst_size(&self) -> Result<u32> {
        self.server
            .api_rate_limit
            .checked_mul(2)
            .and_then(|burst| u32::try_from(burst).ok())
            .ok_or_else(|| {
                Error::Config(format!(
                    "API_RATE_LIMIT ({}) is too large",
                    self.server.api_rate_limit
                ))
            })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.server.api_rate_limit == 0 {
            return Err(Error::Config("API rate limit must be non-zero".to_string()));
        }

        // Refill interval is counted in whole milliseconds
        if self.server.api_rate_limit > MAX_API_RATE_LIMIT {
            return Err(Error::Config(format!(
                "API_RATE_LIMIT ({}) exceeds {MAX_API_RATE_LIMIT} requests per second",
                self.server.api_rate_limit
            )));
        }
        self.api_burst_size()?;

        if self.ranking.default_top_n == 0 {
            return Err(Error::Config("DEFAULT_TOP_N must be non-zero".to_string()));
        }

        if self.ranking.default_top_n > self.ranking.max_top_n {
            return Err(Error::Config(format!(
                "DEFAULT_TOP_N ({}) exceeds MAX_TOP_N ({})",
                self.ranking.default_top_n, self.ranking.max_top_n
            )));
        }

        if self.limits.max_query_length == 0 {
            return Err(Error::Config(
                "MAX_QUERY_LENGTH must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn test_settings() -> Settings {
    Settings {
        catalog: CatalogConfig {
            path: "./data/recipes.csv".into(),
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            api_rate_limit: 100,
        },
        ranking: RankingConfig {
            default_top_n: 5,
            max_top_n: 50,
        },
        limits: LimitsConfig {
            max_query_length: 500,
            max_request_body_size: 1048576,
        },
    }
}

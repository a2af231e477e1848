use anyhow::Result;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string. Without it the server keeps data in memory.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub session_ttl_days: i64,
    pub bcrypt_cost: u32,
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub client_base_url: String,
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();
        Self::from_env_only()
    }

    /// Load configuration from environment variables only (without loading .env files)
    pub fn from_env_only() -> Result<Self> {
        Ok(Config {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| {
                "timeclock-development-secret-change-this-in-production".to_string()
            }),
            session_ttl_days: parsed_or("SESSION_TTL_DAYS", 7),
            bcrypt_cost: parsed_or("BCRYPT_COST", bcrypt::DEFAULT_COST),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed_or("PORT", 8080),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            client_base_url: env::var("CLIENT_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        })
    }

    pub fn test_config() -> Self {
        Config {
            database_url: None,
            jwt_secret: "test-jwt-secret-key-that-is-long-enough".to_string(),
            session_ttl_days: 1,
            bcrypt_cost: 4,
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            client_base_url: "http://localhost:3000".to_string(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

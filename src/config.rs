//! Application Configuration
//! Mission: Collect all runtime settings into one immutable struct at startup

use anyhow::Result;
use bcrypt::DEFAULT_COST;

/// Application configuration, resolved once from the environment.
///
/// The signing secret is deliberately required: there is no safe default,
/// and issuance and verification must share the same value.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let jwt_secret = std::env::var("JWT_SECRET")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let Some(jwt_secret) = jwt_secret else {
            anyhow::bail!("JWT_SECRET is not set; refusing to start without a signing secret");
        };

        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "./bookshelf.db".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);

        let token_ttl_hours = std::env::var("TOKEN_TTL_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24);

        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_COST);

        Ok(Self {
            database_path,
            port,
            jwt_secret,
            token_ttl_hours,
            bcrypt_cost,
        })
    }
}

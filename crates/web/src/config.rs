use anyhow::{Context, Result};
use storage::config::AccessConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub api_keys: String,
    pub admin_emails: String,
    pub super_admin_emails: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            api_keys: std::env::var("API_KEYS").unwrap_or_default(),
            admin_emails: std::env::var("ADMIN_EMAILS").unwrap_or_default(),
            super_admin_emails: std::env::var("SUPER_ADMIN_EMAILS").unwrap_or_default(),
        })
    }

    pub fn access(&self) -> AccessConfig {
        AccessConfig::from_comma_separated(&self.admin_emails, &self.super_admin_emails)
    }

    /// Host part of the database URL, without credentials.
    pub fn database_host(&self) -> &str {
        self.database_url.split('@').next_back().unwrap_or("unknown")
    }
}

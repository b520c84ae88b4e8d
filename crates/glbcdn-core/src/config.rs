//! Configuration module
//!
//! All configuration comes from the environment (with `.env` support via
//! dotenvy). Optional secrets stay `Option<String>`: an absent
//! `UPLOAD_API_KEY` is a first-class "guard not configured" state, not an
//! empty string, and an absent `ADMIN_PASSWORD` disables admin login
//! entirely.

use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    /// Single configured storage root. When set it is probed before the
    /// built-in candidate roots.
    pub storage_root: Option<PathBuf>,
    /// Secret for the upload/delete access guard. `None` ⇒ fail-open.
    pub upload_api_key: Option<String>,
    /// Password for admin login. `None` ⇒ login fails closed.
    pub admin_password: Option<String>,
    /// Base URL used to build absolute URLs in upload responses.
    pub public_base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let server_port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("PORT must be a number between 1 and 65535: {raw}"))?,
            Err(_) => DEFAULT_PORT,
        };

        let config = Config {
            server_port,
            environment: opt_env("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            storage_root: opt_env("STORAGE_ROOT").map(PathBuf::from),
            upload_api_key: opt_env("UPLOAD_API_KEY"),
            admin_password: opt_env("ADMIN_PASSWORD"),
            public_base_url: opt_env("PUBLIC_BASE_URL")
                .or_else(|| opt_env("NEXT_PUBLIC_BASE_URL"))
                .map(|url| url.trim_end_matches('/').to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server_port == 0 {
            anyhow::bail!("PORT must not be 0");
        }
        if let Some(url) = &self.public_base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("PUBLIC_BASE_URL must start with http:// or https://: {url}");
            }
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_port: DEFAULT_PORT,
            environment: "development".to_string(),
            storage_root: None,
            upload_api_key: None,
            admin_password: None,
            public_base_url: None,
        }
    }
}

/// Read an env var, treating unset, empty, and whitespace-only as absent.
fn opt_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

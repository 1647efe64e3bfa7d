//! Configuration module for the Ask Big Sister backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Guidance text shown to users when none is configured.
pub const DEFAULT_GUIDANCE_TEXT: &str =
    "This is a safe space to ask questions. Be respectful, and remember: there are no 'dumb' questions!";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key authenticating the fronting gateway (required in production)
    pub api_psk: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Principal promoted to admin at startup
    pub bootstrap_admin: Option<String>,
    /// Community guidance text shown on the home and ask pages
    pub guidance_text: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_psk = env::var("BIGSISTER_API_PSK").ok();

        let db_path = env::var("BIGSISTER_DB_PATH")
            .unwrap_or_else(|_| "./data/app.sqlite".to_string())
            .into();

        let bind_addr = env::var("BIGSISTER_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid BIGSISTER_BIND_ADDR format");

        let log_level = env::var("BIGSISTER_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let bootstrap_admin = env::var("BIGSISTER_BOOTSTRAP_ADMIN").ok();

        let guidance_text = env::var("BIGSISTER_GUIDANCE_TEXT")
            .unwrap_or_else(|_| DEFAULT_GUIDANCE_TEXT.to_string());

        Self {
            api_psk,
            db_path,
            bind_addr,
            log_level,
            bootstrap_admin,
            guidance_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("BIGSISTER_API_PSK");
        env::remove_var("BIGSISTER_DB_PATH");
        env::remove_var("BIGSISTER_BIND_ADDR");
        env::remove_var("BIGSISTER_LOG_LEVEL");
        env::remove_var("BIGSISTER_BOOTSTRAP_ADMIN");
        env::remove_var("BIGSISTER_GUIDANCE_TEXT");

        let config = Config::from_env();

        assert!(config.api_psk.is_none());
        assert_eq!(config.db_path, PathBuf::from("./data/app.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert!(config.bootstrap_admin.is_none());
        assert_eq!(config.guidance_text, DEFAULT_GUIDANCE_TEXT);
    }
}

//! Configuration module for the Devine backend.
//!
//! All configuration is loaded from environment variables (and an optional
//! `.env` file) with development-friendly defaults.

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

/// Fixed window used by the `/api` rate limiter.
pub const RATE_LIMIT_WINDOW_SECS: u64 = 15 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Deployment mode; production tightens CORS, headers and rate limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
    /// SendGrid API key; without it mail is only logged
    pub sendgrid_api_key: Option<String>,
    pub sendgrid_api_url: String,
    pub mail_from: String,
    /// Recipient of new-inquiry notifications
    pub admin_email: String,
    pub guide_pdf_url: String,
    /// Key required by the admin routes; without it they deny everything
    pub admin_api_key: Option<String>,
    /// Origins allowed by CORS in production
    pub cors_allowed_origins: Vec<String>,
    /// Requests per client per window on `/api`
    pub rate_limit_max: u32,
    /// Load the fixture content at startup
    pub seed_fixtures: bool,
}

impl Config {
    /// Load configuration from environment variables, after applying `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_process_env()
    }

    /// Load configuration from the process environment only.
    fn from_process_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("development") | Ok("dev") | Err(_) => Environment::Development,
            Ok(other) => {
                return Err(ConfigError::Invalid {
                    name: "APP_ENV",
                    reason: format!("expected 'production' or 'development', got '{}'", other),
                })
            }
        };

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:5000".to_string())
            .parse()
            .map_err(|e| ConfigError::Invalid {
                name: "BIND_ADDR",
                reason: format!("{}", e),
            })?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("pretty") | Err(_) => LogFormat::Pretty,
            Ok(other) => {
                return Err(ConfigError::Invalid {
                    name: "LOG_FORMAT",
                    reason: format!("expected 'json' or 'pretty', got '{}'", other),
                })
            }
        };

        let sendgrid_api_key = non_empty_var("SENDGRID_API_KEY");
        let sendgrid_api_url = env::var("SENDGRID_API_URL")
            .unwrap_or_else(|_| "https://api.sendgrid.com".to_string());
        let mail_from = env::var("SENDGRID_FROM_EMAIL")
            .unwrap_or_else(|_| "noreply@devineseniorliving.com".to_string());
        let admin_email =
            env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@devineseniorliving.com".to_string());
        let guide_pdf_url = env::var("GUIDE_PDF_URL").unwrap_or_else(|_| "#".to_string());

        let admin_api_key = non_empty_var("ADMIN_API_KEY");

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "https://devineseniorliving.com".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let rate_limit_max = match env::var("RATE_LIMIT_MAX") {
            Ok(raw) => raw.parse().map_err(|e| ConfigError::Invalid {
                name: "RATE_LIMIT_MAX",
                reason: format!("{}", e),
            })?,
            Err(_) => match environment {
                Environment::Production => 100,
                Environment::Development => 1000,
            },
        };

        let seed_fixtures = match env::var("SEED_FIXTURES") {
            Ok(raw) => raw.parse().map_err(|e| ConfigError::Invalid {
                name: "SEED_FIXTURES",
                reason: format!("{}", e),
            })?,
            Err(_) => true,
        };

        Ok(Self {
            environment,
            bind_addr,
            log_level,
            log_format,
            sendgrid_api_key,
            sendgrid_api_url,
            mail_from,
            admin_email,
            guide_pdf_url,
            admin_api_key,
            cors_allowed_origins,
            rate_limit_max,
            seed_fixtures,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: &[&str] = &[
        "APP_ENV",
        "BIND_ADDR",
        "LOG_LEVEL",
        "LOG_FORMAT",
        "SENDGRID_API_KEY",
        "SENDGRID_API_URL",
        "SENDGRID_FROM_EMAIL",
        "ADMIN_EMAIL",
        "GUIDE_PDF_URL",
        "ADMIN_API_KEY",
        "CORS_ALLOWED_ORIGINS",
        "RATE_LIMIT_MAX",
        "SEED_FIXTURES",
    ];

    // Environment is process-global, so every scenario runs in one test.
    #[test]
    fn test_config_from_env() {
        for var in VARS {
            env::remove_var(var);
        }

        let config = Config::from_process_env().unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:5000");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.sendgrid_api_key.is_none());
        assert_eq!(config.mail_from, "noreply@devineseniorliving.com");
        assert_eq!(config.admin_email, "admin@devineseniorliving.com");
        assert_eq!(config.guide_pdf_url, "#");
        assert!(config.admin_api_key.is_none());
        assert_eq!(config.cors_allowed_origins, vec!["https://devineseniorliving.com"]);
        assert_eq!(config.rate_limit_max, 1000);
        assert!(config.seed_fixtures);

        env::set_var("APP_ENV", "production");
        env::set_var("SENDGRID_API_KEY", "  ");
        env::set_var("CORS_ALLOWED_ORIGINS", "https://a.example, ,https://b.example");
        let config = Config::from_process_env().unwrap();
        assert!(config.is_production());
        assert_eq!(config.rate_limit_max, 100);
        assert!(config.sendgrid_api_key.is_none());
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );

        env::set_var("RATE_LIMIT_MAX", "lots");
        assert!(matches!(
            Config::from_process_env(),
            Err(ConfigError::Invalid {
                name: "RATE_LIMIT_MAX",
                ..
            })
        ));
        env::remove_var("RATE_LIMIT_MAX");

        env::set_var("BIND_ADDR", "not-an-address");
        assert!(Config::from_process_env().is_err());

        for var in VARS {
            env::remove_var(var);
        }
    }
}

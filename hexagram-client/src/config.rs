//! Client configuration
//!
//! The backend address depends on the environment the client runs in:
//! a fixed local server during development, an `/api` prefix on the hosting
//! origin in production.

use crate::error::ClientError;

/// Environment variable selecting `development` or `production`
pub const ENV_VAR: &str = "HEXAGRAM_ENV";

/// Environment variable holding the production origin
pub const ORIGIN_VAR: &str = "HEXAGRAM_ORIGIN";

/// Backend used during development
pub const DEV_BASE_URL: &str = "http://localhost:8000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production { origin: String },
}

impl Environment {
    pub fn base_url(&self) -> String {
        match self {
            Environment::Development => DEV_BASE_URL.to_string(),
            Environment::Production { origin } => {
                format!("{}/api", origin.trim_end_matches('/'))
            }
        }
    }
}

/// Client configuration
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Environment::Development.base_url(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn for_environment(env: &Environment) -> Self {
        Self::new(env.base_url())
    }

    /// Read the environment flag from the process environment
    pub fn from_env() -> Result<Self, ClientError> {
        let env = parse_environment(
            std::env::var(ENV_VAR).ok().as_deref(),
            std::env::var(ORIGIN_VAR).ok(),
        )?;
        Ok(Self::for_environment(&env))
    }

    /// Absolute URL of an endpoint path (`path` starts with `/`)
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn parse_environment(flag: Option<&str>, origin: Option<String>) -> Result<Environment, ClientError> {
    match flag.map(str::to_ascii_lowercase).as_deref() {
        None | Some("") | Some("development") | Some("dev") => Ok(Environment::Development),
        Some("production") | Some("prod") => origin
            .filter(|o| !o.is_empty())
            .map(|origin| Environment::Production { origin })
            .ok_or_else(|| ClientError::Config(format!("{} must be set in production", ORIGIN_VAR))),
        Some(other) => Err(ClientError::Config(format!("unknown environment: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_development() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.url("/room"), "http://localhost:8000/room");
    }

    #[test]
    fn test_production_prefix() {
        let env = parse_environment(Some("production"), Some("https://play.example.org/".into())).unwrap();
        assert_eq!(ClientConfig::for_environment(&env).base_url, "https://play.example.org/api");
    }

    #[test]
    fn test_production_needs_origin() {
        assert!(parse_environment(Some("production"), None).is_err());
        assert!(parse_environment(Some("staging"), None).is_err());
        assert_eq!(parse_environment(None, None).unwrap(), Environment::Development);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        assert_eq!(ClientConfig::new("http://h:1/").url("/add"), "http://h:1/add");
    }
}

use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::constants::{
    DEFAULT_HOST, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_INVITE_MAX_ATTEMPTS,
    DEFAULT_INVITE_POLL_INTERVAL_MS, DEFAULT_PORT, WORDFEUD_API_URL,
};
use crate::integrations::{BoardType, RuleSet};
use crate::services::InvitePolicy;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,
    pub environment: String,

    // Wordfeud platform
    pub wordfeud_api_url: String,
    pub wordfeud_ruleset: String,
    pub wordfeud_board_type: String,
    pub wordfeud_http_timeout_secs: u64,

    // Invitation confirmation
    pub invite_poll_interval_ms: u64,
    pub invite_max_attempts: u32,

    // CORS
    pub cors_allowed_origins: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            wordfeud_api_url: env::var("WORDFEUD_API_URL")
                .unwrap_or_else(|_| WORDFEUD_API_URL.to_string()),
            wordfeud_ruleset: env::var("WORDFEUD_RULESET")
                .unwrap_or_else(|_| "norwegian".to_string()),
            wordfeud_board_type: env::var("WORDFEUD_BOARD_TYPE")
                .unwrap_or_else(|_| "normal".to_string()),
            wordfeud_http_timeout_secs: env::var("WORDFEUD_HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_HTTP_TIMEOUT_SECS.to_string())
                .parse()?,

            invite_poll_interval_ms: env::var("INVITE_POLL_INTERVAL_MS")
                .unwrap_or_else(|_| DEFAULT_INVITE_POLL_INTERVAL_MS.to_string())
                .parse()?,
            invite_max_attempts: env::var("INVITE_MAX_ATTEMPTS")
                .unwrap_or_else(|_| DEFAULT_INVITE_MAX_ATTEMPTS.to_string())
                .parse()?,

            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "*".to_string()),
        })
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.wordfeud_api_url.trim().is_empty() {
            anyhow::bail!("WORDFEUD_API_URL is empty");
        }
        if self.invite_max_attempts == 0 {
            anyhow::bail!("INVITE_MAX_ATTEMPTS must be > 0");
        }
        if self.invite_poll_interval_ms == 0 {
            anyhow::bail!("INVITE_POLL_INTERVAL_MS must be > 0");
        }
        if self.wordfeud_http_timeout_secs == 0 {
            anyhow::bail!("WORDFEUD_HTTP_TIMEOUT_SECS must be > 0");
        }
        self.invite_policy()?;

        if !self.is_development() && !self.wordfeud_api_url.starts_with("https://") {
            tracing::warn!("WORDFEUD_API_URL is not https; credentials travel in clear text");
        }
        if self.cors_allowed_origins.trim().is_empty() {
            tracing::warn!("CORS_ALLOWED_ORIGINS is empty; requests may be blocked");
        }

        Ok(())
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development" || self.environment == "test"
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.wordfeud_http_timeout_secs)
    }

    pub fn invite_policy(&self) -> anyhow::Result<InvitePolicy> {
        let ruleset: RuleSet = self
            .wordfeud_ruleset
            .parse()
            .map_err(|e: String| anyhow::anyhow!("WORDFEUD_RULESET: {}", e))?;
        let board_type: BoardType = self
            .wordfeud_board_type
            .parse()
            .map_err(|e: String| anyhow::anyhow!("WORDFEUD_BOARD_TYPE: {}", e))?;

        Ok(InvitePolicy {
            ruleset,
            board_type,
            poll_interval: Duration::from_millis(self.invite_poll_interval_ms),
            max_attempts: self.invite_max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            environment: "test".to_string(),
            wordfeud_api_url: WORDFEUD_API_URL.to_string(),
            wordfeud_ruleset: "norwegian".to_string(),
            wordfeud_board_type: "normal".to_string(),
            wordfeud_http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            invite_poll_interval_ms: DEFAULT_INVITE_POLL_INTERVAL_MS,
            invite_max_attempts: DEFAULT_INVITE_MAX_ATTEMPTS,
            cors_allowed_origins: "*".to_string(),
        }
    }

    #[test]
    fn default_policy_is_norwegian_one_minute() {
        let policy = config().invite_policy().expect("policy");
        assert_eq!(policy.ruleset, RuleSet::Norwegian);
        assert_eq!(policy.board_type, BoardType::Normal);
        assert_eq!(policy.budget(), Duration::from_secs(60));
    }

    #[test]
    fn validate_rejects_zero_attempts() {
        let mut config = config();
        config.invite_max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_ruleset() {
        let mut config = config();
        config.wordfeud_ruleset = "elvish".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(config().validate().is_ok());
    }
}

use std::env;

use crate::conversion::RewardPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,
    pub environment: String,

    // Database
    pub database_url: String,
    pub database_max_connections: u32,

    // Reward economy
    pub reward_policy: RewardPolicy,

    // CORS
    pub cors_allowed_origins: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            database_url: env::var("DATABASE_URL")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()?,

            reward_policy: reward_policy_from_env(env::var("REWARD_POLICY").ok().as_deref()),

            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "*".to_string()),
        })
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.database_url.trim().is_empty() {
            anyhow::bail!("DATABASE_URL is empty");
        }
        if self.database_max_connections == 0 {
            anyhow::bail!("DATABASE_MAX_CONNECTIONS must be > 0");
        }

        if self.cors_allowed_origins.trim().is_empty() {
            tracing::warn!("CORS_ALLOWED_ORIGINS is empty; requests may be blocked");
        }

        Ok(())
    }
}

fn reward_policy_from_env(raw: Option<&str>) -> RewardPolicy {
    match raw.map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if v == "flat" => RewardPolicy::Flat,
        Some(v) if v.is_empty() || v == "progressive" => RewardPolicy::Progressive,
        Some(v) => {
            tracing::warn!("Unknown REWARD_POLICY '{}'; using progressive", v);
            RewardPolicy::Progressive
        }
        None => RewardPolicy::Progressive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reward_policy_defaults_to_progressive() {
        assert_eq!(reward_policy_from_env(None), RewardPolicy::Progressive);
        assert_eq!(reward_policy_from_env(Some("")), RewardPolicy::Progressive);
        assert_eq!(
            reward_policy_from_env(Some("something-else")),
            RewardPolicy::Progressive
        );
    }

    #[test]
    fn reward_policy_parses_flat() {
        assert_eq!(reward_policy_from_env(Some("flat")), RewardPolicy::Flat);
        assert_eq!(reward_policy_from_env(Some("  FLAT ")), RewardPolicy::Flat);
    }
}

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    config::Config,
    error::Result,
    models::{GameMode, GameSession, GameWallet},
};

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(&config.database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> anyhow::Result<()> {
        // migrations live at the crate root: ./migrations
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ==================== WALLET QUERIES ====================
impl Database {
    /// Lazily creates the wallet for an email with a zero balance.
    pub async fn ensure_wallet(&self, email: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO game_wallets (email) VALUES ($1)
             ON CONFLICT DO NOTHING",
        )
        .bind(email)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_wallet(&self, email: &str) -> Result<Option<GameWallet>> {
        let wallet = sqlx::query_as::<_, GameWallet>("SELECT * FROM game_wallets WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(wallet)
    }

    pub async fn get_or_create_wallet(&self, email: &str) -> Result<GameWallet> {
        self.ensure_wallet(email).await?;
        let wallet = sqlx::query_as::<_, GameWallet>("SELECT * FROM game_wallets WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(wallet)
    }
}

// ==================== SESSION QUERIES ====================
impl Database {
    pub async fn create_session(
        &self,
        session_id: &str,
        email: &str,
        mode: GameMode,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO game_sessions (session_id, email, mode)
             VALUES ($1, $2, $3)",
        )
        .bind(session_id)
        .bind(email)
        .bind(mode)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_session(&self, session_id: &str) -> Result<Option<GameSession>> {
        let session =
            sqlx::query_as::<_, GameSession>("SELECT * FROM game_sessions WHERE session_id = $1")
                .bind(session_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(session)
    }
}

// ==================== PRE-REGISTRATION QUERIES ====================
impl Database {
    /// Insert-once by email. Returns false when the email was already
    /// registered (the insert is a conditional no-op, so a concurrent
    /// duplicate cannot create two records).
    pub async fn create_preregistration(&self, email: &str) -> Result<bool> {
        let result = sqlx::query(
            "INSERT INTO preregistrations (email) VALUES ($1)
             ON CONFLICT DO NOTHING",
        )
        .bind(email)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::RewardPolicy;

    fn test_config(database_url: &str) -> Config {
        Config {
            host: "0.0.0.0".to_string(),
            port: 4000,
            environment: "development".to_string(),
            database_url: database_url.to_string(),
            database_max_connections: 1,
            reward_policy: RewardPolicy::Progressive,
            cors_allowed_origins: "*".to_string(),
        }
    }

    #[tokio::test]
    async fn database_new_returns_error_on_invalid_url() {
        let config = test_config("not-a-url");
        let result = Database::new(&config).await;
        assert!(result.is_err());
    }
}

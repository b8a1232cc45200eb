//! Session lifecycle: start, and the one-time finish transition that feeds
//! the conversion engine.

use chrono::Utc;
use uuid::Uuid;

use crate::{
    constants::{MAX_CLIENT_ELAPSED_MS, MAX_COINS_PER_SESSION, MAX_SERVER_ELAPSED_MS},
    conversion::{self, RewardPolicy},
    db::Database,
    error::{AppError, Result},
    models::{FinishSessionResponse, GameMode, GameSession, GameWallet, StartSessionResponse},
};

pub async fn start(db: &Database, email: &str, mode: GameMode) -> Result<StartSessionResponse> {
    db.ensure_wallet(email).await?;

    let session_id = Uuid::new_v4().to_string();
    db.create_session(&session_id, email, mode).await?;

    tracing::info!(%session_id, email, ?mode, "session started");

    Ok(StartSessionResponse { session_id, mode })
}

pub async fn finish(
    db: &Database,
    policy: RewardPolicy,
    session_id: &str,
    coins: i64,
    elapsed_ms: i64,
) -> Result<FinishSessionResponse> {
    let session = db
        .get_session(session_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;

    if session.finished_at.is_some() {
        return already_finished(db, &session).await;
    }

    // Timing checks run before any write, so a rejected session stays active
    // and the client may retry with the same session id.
    let server_elapsed_ms = (Utc::now() - session.started_at).num_milliseconds();
    validate_elapsed(elapsed_ms, server_elapsed_ms)?;

    let clamped_coins = clamp_coins(coins);

    let mut tx = db.pool().begin().await?;

    // Row lock serializes wallet mutation per email; concurrent finishes for
    // the same player (arena + endless) cannot lose updates.
    let wallet = lock_wallet(&mut tx, &session.email).await?;

    let (reward_cents, new_balance_cents, new_pending_coins) = match policy {
        RewardPolicy::Progressive => {
            let pool = wallet.pending_coins + clamped_coins;
            let outcome = conversion::convert(wallet.balance_cents, pool);
            (
                outcome.reward_cents,
                outcome.new_balance_cents,
                outcome.remainder_coins,
            )
        }
        RewardPolicy::Flat => {
            let reward = conversion::flat_convert(clamped_coins, session.mode);
            (
                reward,
                wallet.balance_cents + reward,
                wallet.pending_coins,
            )
        }
    };

    // Atomic active -> finished transition. Zero rows means a concurrent
    // finish already committed; this call then answers idempotently.
    let updated = sqlx::query(
        "UPDATE game_sessions
         SET finished_at = NOW(), coins = $2, reward_cents = $3
         WHERE session_id = $1 AND finished_at IS NULL",
    )
    .bind(session_id)
    .bind(clamped_coins)
    .bind(reward_cents)
    .execute(&mut *tx)
    .await?;

    if updated.rows_affected() == 0 {
        tx.rollback().await?;
        let session = db
            .get_session(session_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
        return already_finished(db, &session).await;
    }

    sqlx::query(
        "UPDATE game_wallets
         SET balance_cents = $2, pending_coins = $3,
             total_coins = total_coins + $4, updated_at = NOW()
         WHERE email = $1",
    )
    .bind(&session.email)
    .bind(new_balance_cents)
    .bind(new_pending_coins)
    .bind(clamped_coins)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        session_id,
        email = %session.email,
        reward_cents,
        balance_cents = new_balance_cents,
        pending_coins = new_pending_coins,
        "session finished"
    );

    Ok(FinishSessionResponse {
        message: "Round finished".to_string(),
        reward_cents,
        balance_cents: new_balance_cents,
        pending_coins: new_pending_coins,
        mode: session.mode,
    })
}

/// Idempotent reply for a session that already committed its finish: the
/// original reward, the wallet as it stands, nothing re-credited.
async fn already_finished(db: &Database, session: &GameSession) -> Result<FinishSessionResponse> {
    let wallet = db.get_wallet(&session.email).await?;
    let (balance_cents, pending_coins) = wallet
        .map(|w| (w.balance_cents, w.pending_coins))
        .unwrap_or((0, 0));

    Ok(FinishSessionResponse {
        message: "Already finished".to_string(),
        reward_cents: session.reward_cents,
        balance_cents,
        pending_coins,
        mode: session.mode,
    })
}

async fn lock_wallet(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    email: &str,
) -> Result<GameWallet> {
    let wallet =
        sqlx::query_as::<_, GameWallet>("SELECT * FROM game_wallets WHERE email = $1 FOR UPDATE")
            .bind(email)
            .fetch_optional(&mut **tx)
            .await?;

    if let Some(wallet) = wallet {
        return Ok(wallet);
    }

    // Wallet missing (session predates lazy creation); create it inside the
    // transaction and take the lock.
    sqlx::query("INSERT INTO game_wallets (email) VALUES ($1) ON CONFLICT DO NOTHING")
        .bind(email)
        .execute(&mut **tx)
        .await?;

    let wallet =
        sqlx::query_as::<_, GameWallet>("SELECT * FROM game_wallets WHERE email = $1 FOR UPDATE")
            .bind(email)
            .fetch_one(&mut **tx)
            .await?;
    Ok(wallet)
}

fn clamp_coins(coins: i64) -> i64 {
    coins.clamp(0, MAX_COINS_PER_SESSION)
}

fn validate_elapsed(client_elapsed_ms: i64, server_elapsed_ms: i64) -> Result<()> {
    if client_elapsed_ms <= 0 || client_elapsed_ms > MAX_CLIENT_ELAPSED_MS {
        return Err(AppError::Validation("Invalid elapsed time".to_string()));
    }
    if server_elapsed_ms > MAX_SERVER_ELAPSED_MS {
        return Err(AppError::Validation("Session timed out".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_zero_is_rejected() {
        assert!(validate_elapsed(0, 1_000).is_err());
    }

    #[test]
    fn elapsed_at_ten_minutes_is_accepted() {
        assert!(validate_elapsed(600_000, 600_000).is_ok());
    }

    #[test]
    fn elapsed_just_over_ten_minutes_is_rejected() {
        assert!(validate_elapsed(600_001, 600_001).is_err());
    }

    #[test]
    fn negative_elapsed_is_rejected() {
        assert!(validate_elapsed(-1, 1_000).is_err());
    }

    #[test]
    fn server_elapsed_over_fifteen_minutes_is_rejected() {
        assert!(validate_elapsed(60_000, 900_001).is_err());
        assert!(validate_elapsed(60_000, 900_000).is_ok());
    }

    #[test]
    fn coins_are_clamped_to_session_cap() {
        assert_eq!(clamp_coins(-10), 0);
        assert_eq!(clamp_coins(0), 0);
        assert_eq!(clamp_coins(42), 42);
        assert_eq!(clamp_coins(100_000), 100_000);
        assert_eq!(clamp_coins(100_001), 100_000);
    }
}

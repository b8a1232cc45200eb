use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ==================== GAME MODE ====================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "game_mode", rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Endless,
    Arena,
}

// ==================== SESSION ====================
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GameSession {
    pub session_id: String,
    pub email: String,
    pub mode: GameMode,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub coins: i64,
    pub reward_cents: i64,
}

// ==================== WALLET ====================
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GameWallet {
    pub email: String,
    pub balance_cents: i64,
    pub pending_coins: i64,
    pub total_coins: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==================== PRE-REGISTRATION ====================
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PreRegistration {
    pub email: String,
    pub created_at: DateTime<Utc>,
}

// ==================== REQUESTS / RESPONSES ====================
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    pub email: Option<String>,
    #[serde(default)]
    pub mode: GameMode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionResponse {
    pub session_id: String,
    pub mode: GameMode,
}

#[derive(Debug, Deserialize)]
pub struct WalletQuery {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletResponse {
    pub email: String,
    pub balance_cents: i64,
    pub pending_coins: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishSessionRequest {
    pub session_id: Option<String>,
    #[serde(default)]
    pub coins: i64,
    #[serde(default)]
    pub elapsed_ms: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishSessionResponse {
    pub message: String,
    pub reward_cents: i64,
    pub balance_cents: i64,
    pub pending_coins: i64,
    pub mode: GameMode,
}

#[derive(Debug, Deserialize)]
pub struct PreRegisterRequest {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreRegisterResponse {
    pub message: String,
    pub already_registered: bool,
    pub balance_cents: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn responses_serialize_with_wire_field_names() {
        let resp = FinishSessionResponse {
            message: "Round finished".to_string(),
            reward_cents: 3,
            balance_cents: 103,
            pending_coins: 12,
            mode: GameMode::Arena,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["rewardCents"], 3);
        assert_eq!(json["balanceCents"], 103);
        assert_eq!(json["pendingCoins"], 12);
        assert_eq!(json["mode"], "arena");
    }

    #[test]
    fn start_request_defaults_mode_to_endless() {
        let req: StartSessionRequest =
            serde_json::from_str(r#"{"email":"player@example.com"}"#).unwrap();
        assert_eq!(req.mode, GameMode::Endless);
        assert_eq!(req.email.as_deref(), Some("player@example.com"));
    }

    #[test]
    fn finish_request_defaults_coins_and_elapsed() {
        let req: FinishSessionRequest = serde_json::from_str(r#"{"sessionId":"abc"}"#).unwrap();
        assert_eq!(req.coins, 0);
        assert_eq!(req.elapsed_ms, 0);
    }
}

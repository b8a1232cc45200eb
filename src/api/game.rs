use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::{AppError, Result},
    models::{
        FinishSessionRequest, FinishSessionResponse, StartSessionRequest, StartSessionResponse,
        WalletQuery, WalletResponse,
    },
    services::session,
};

use super::AppState;

/// POST /api/game/start
pub async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartSessionRequest>,
) -> Result<Json<StartSessionResponse>> {
    let email = req.email.as_deref().map(str::trim).unwrap_or("");
    if email.is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }

    let response = session::start(&state.db, email, req.mode).await?;
    Ok(Json(response))
}

/// GET /api/game/wallet?email=
pub async fn get_wallet(
    State(state): State<AppState>,
    Query(query): Query<WalletQuery>,
) -> Result<Json<WalletResponse>> {
    let email = query.email.as_deref().map(str::trim).unwrap_or("");
    if email.is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }

    let wallet = state.db.get_or_create_wallet(email).await?;

    Ok(Json(WalletResponse {
        email: wallet.email,
        balance_cents: wallet.balance_cents,
        pending_coins: wallet.pending_coins,
    }))
}

/// POST /api/game/finish
pub async fn finish_session(
    State(state): State<AppState>,
    Json(req): Json<FinishSessionRequest>,
) -> Result<Json<FinishSessionResponse>> {
    let session_id = req.session_id.as_deref().map(str::trim).unwrap_or("");
    if session_id.is_empty() {
        return Err(AppError::Validation("sessionId required".to_string()));
    }

    let response = session::finish(
        &state.db,
        state.config.reward_policy,
        session_id,
        req.coins,
        req.elapsed_ms,
    )
    .await?;
    Ok(Json(response))
}

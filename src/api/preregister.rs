use axum::{extract::State, Json};

use crate::{
    error::{AppError, Result},
    models::{PreRegisterRequest, PreRegisterResponse},
    utils::is_valid_email,
};

use super::AppState;

/// POST /api/preregister
pub async fn preregister(
    State(state): State<AppState>,
    Json(req): Json<PreRegisterRequest>,
) -> Result<Json<PreRegisterResponse>> {
    let email = req.email.as_deref().map(str::trim).unwrap_or("");
    if !is_valid_email(email) {
        return Err(AppError::Validation(
            "A valid email is required".to_string(),
        ));
    }

    let wallet = state.db.get_or_create_wallet(email).await?;

    let inserted = state.db.create_preregistration(email).await?;
    if !inserted {
        return Ok(Json(PreRegisterResponse {
            message: "You are already pre-registered".to_string(),
            already_registered: true,
            balance_cents: wallet.balance_cents,
        }));
    }

    tracing::info!(email, "pre-registration captured");

    Ok(Json(PreRegisterResponse {
        message: "Pre-registration successful. We will contact you before launch.".to_string(),
        already_registered: false,
        balance_cents: wallet.balance_cents,
    }))
}

use axum::{
    extract::{FromRef, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{LoginRequest, TokenResponse},
        jwt::{AuthUser, JwtKeys},
        password::verify_password,
    },
    errors::ApiError,
    state::AppState,
    users::repo::User,
    validate::is_valid_email,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/auth", get(current_user).post(login))
}

/// GET /api/auth — the identity behind the presented token, password excluded.
#[instrument(skip(state))]
pub async fn current_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<User>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;
    Ok(Json(user))
}

/// POST /api/auth — verify credentials and issue a token.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let mut errors = Vec::new();
    if !is_valid_email(&payload.email) {
        errors.push("Please include a valid email".to_string());
    }
    if payload.password.is_empty() {
        errors.push("Password is required".to_string());
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    // Unknown email and wrong password answer identically.
    let Some(user) = User::find_by_email(&state.db, &payload.email).await? else {
        return Err(ApiError::invalid_credentials());
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(ApiError::invalid_credentials());
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(TokenResponse { token }))
}

use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{dto::TokenResponse, jwt::JwtKeys, password::hash_password},
    errors::ApiError,
    state::AppState,
    users::{avatar::gravatar_url, dto::RegisterRequest, repo::User},
    validate::is_valid_email,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/users", post(register))
}

/// POST /api/users — register an identity and issue a token.
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let mut errors = Vec::new();
    if payload.name.trim().is_empty() {
        errors.push("Name is required".to_string());
    }
    if !is_valid_email(&payload.email) {
        errors.push("Please include a valid email".to_string());
    }
    if payload.password.len() < 6 {
        errors.push("Please enter a password with 6 or more characters".to_string());
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    // Duplicate check is explicit, ahead of the insert.
    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        return Err(ApiError::validation(["User already exists"]));
    }

    let avatar = gravatar_url(&payload.email);
    let hash = hash_password(&payload.password)?;
    let user = User::create(&state.db, payload.name.trim(), &payload.email, &hash, &avatar).await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = %user.id, "user registered");
    Ok(Json(TokenResponse { token }))
}

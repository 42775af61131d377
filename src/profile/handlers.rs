use axum::{
    extract::{Path, State},
    routing::{delete, get, put},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    errors::ApiError,
    github::GithubError,
    profile::{
        dto::{EducationInput, ExperienceInput, ProfileInput, ProfileView},
        merge::{merge_profile, remove_entry},
        repo::{EducationEntry, ExperienceEntry, Profile},
    },
    state::AppState,
    users::repo::User,
    validate::require_field,
};

const NO_PROFILE: &str = "There is no profile for this user";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile/me", get(my_profile))
        .route(
            "/profile",
            get(list_profiles)
                .post(upsert_profile)
                .delete(delete_account),
        )
        .route("/profile/user/:user_id", get(profile_by_user))
        .route("/profile/experience", put(add_experience))
        .route("/profile/experience/:exp_id", delete(delete_experience))
        .route("/profile/education", put(add_education))
        .route("/profile/education/:edu_id", delete(delete_education))
        .route("/profile/github/:username", get(github_repos))
}

/// GET /api/profile/me
#[instrument(skip(state))]
pub async fn my_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileView>, ApiError> {
    let profile = Profile::find_by_user_with_owner(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::BadRequest(NO_PROFILE.to_string()))?;
    Ok(Json(profile.into()))
}

/// POST /api/profile — create or partially update the caller's profile.
#[instrument(skip(state, input))]
pub async fn upsert_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(input): Json<ProfileInput>,
) -> Result<Json<Profile>, ApiError> {
    let mut errors = Vec::new();
    require_field(input.status.as_deref(), "Status is required", &mut errors);
    require_field(input.skills.as_deref(), "Skills is required", &mut errors);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let existing = Profile::find_by_user(&state.db, user_id).await?;
    let fields = merge_profile(&input, existing.as_ref());
    let (experience, education) = match existing {
        Some(p) => (p.experience.0, p.education.0),
        None => (Vec::new(), Vec::new()),
    };

    let profile = Profile::upsert(&state.db, user_id, fields, experience, education).await?;
    info!(user_id = %user_id, "profile upserted");
    Ok(Json(profile))
}

/// GET /api/profile — all profiles joined with their owners.
#[instrument(skip(state))]
pub async fn list_profiles(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfileView>>, ApiError> {
    let profiles = Profile::find_all_with_owner(&state.db).await?;
    Ok(Json(profiles.into_iter().map(Into::into).collect()))
}

/// GET /api/profile/user/:user_id — a malformed id reads as "no profile",
/// never as a server error.
#[instrument(skip(state))]
pub async fn profile_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileView>, ApiError> {
    let Ok(user_id) = Uuid::parse_str(&user_id) else {
        return Err(ApiError::BadRequest(NO_PROFILE.to_string()));
    };
    let profile = Profile::find_by_user_with_owner(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::BadRequest(NO_PROFILE.to_string()))?;
    Ok(Json(profile.into()))
}

/// DELETE /api/profile — remove the identity and its profile together.
/// Both deletes are issued concurrently; each is idempotent on its own.
#[instrument(skip(state))]
pub async fn delete_account(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Value>, ApiError> {
    tokio::try_join!(
        User::delete_by_id(&state.db, user_id),
        Profile::delete_by_user(&state.db, user_id),
    )?;
    info!(user_id = %user_id, "account deleted");
    Ok(Json(json!({ "msg": "User deleted" })))
}

/// PUT /api/profile/experience — prepend an entry, newest first.
#[instrument(skip(state, input))]
pub async fn add_experience(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(input): Json<ExperienceInput>,
) -> Result<Json<Profile>, ApiError> {
    let mut errors = Vec::new();
    let title = require_field(input.title.as_deref(), "Title is required", &mut errors);
    let company = require_field(input.company.as_deref(), "Company is required", &mut errors);
    let from = require_field(input.from.as_deref(), "From date is required", &mut errors);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let profile = Profile::find_by_user(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::BadRequest(NO_PROFILE.to_string()))?;

    let mut entries = profile.experience.0;
    entries.insert(
        0,
        ExperienceEntry {
            id: Uuid::new_v4(),
            title,
            company,
            location: input.location,
            from,
            to: input.to,
            current: input.current,
            description: input.description,
        },
    );

    let updated = Profile::save_experience(&state.db, user_id, entries).await?;
    Ok(Json(updated))
}

/// DELETE /api/profile/experience/:exp_id
#[instrument(skip(state))]
pub async fn delete_experience(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(exp_id): Path<Uuid>,
) -> Result<Json<Profile>, ApiError> {
    let profile = Profile::find_by_user(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::BadRequest(NO_PROFILE.to_string()))?;

    let entries = remove_entry(profile.experience.0, exp_id, |e| e.id)
        .ok_or_else(|| ApiError::BadRequest("Invalid request".to_string()))?;

    let updated = Profile::save_experience(&state.db, user_id, entries).await?;
    Ok(Json(updated))
}

/// PUT /api/profile/education — prepend an entry, newest first.
#[instrument(skip(state, input))]
pub async fn add_education(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(input): Json<EducationInput>,
) -> Result<Json<Profile>, ApiError> {
    let mut errors = Vec::new();
    let school = require_field(input.school.as_deref(), "School is required", &mut errors);
    let degree = require_field(input.degree.as_deref(), "Degree is required", &mut errors);
    let field_of_study = require_field(
        input.field_of_study.as_deref(),
        "Field of study is required",
        &mut errors,
    );
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let from = input.from.unwrap_or_default();
    let profile = Profile::find_by_user(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::BadRequest(NO_PROFILE.to_string()))?;

    let mut entries = profile.education.0;
    entries.insert(
        0,
        EducationEntry {
            id: Uuid::new_v4(),
            school,
            degree,
            field_of_study,
            from,
            to: input.to,
            current: input.current,
            description: input.description,
        },
    );

    let updated = Profile::save_education(&state.db, user_id, entries).await?;
    Ok(Json(updated))
}

/// DELETE /api/profile/education/:edu_id
#[instrument(skip(state))]
pub async fn delete_education(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(edu_id): Path<Uuid>,
) -> Result<Json<Profile>, ApiError> {
    let profile = Profile::find_by_user(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::BadRequest(NO_PROFILE.to_string()))?;

    let entries = remove_entry(profile.education.0, edu_id, |e| e.id)
        .ok_or_else(|| ApiError::BadRequest("Invalid request".to_string()))?;

    let updated = Profile::save_education(&state.db, user_id, entries).await?;
    Ok(Json(updated))
}

/// GET /api/profile/github/:username — relay the user's five newest repos.
#[instrument(skip(state))]
pub async fn github_repos(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Value>, ApiError> {
    match state.github.repos_for(&username).await {
        Ok(repos) => Ok(Json(repos)),
        Err(GithubError::Status(status)) => {
            warn!(%username, status, "github lookup returned non-success");
            Err(ApiError::NotFound("No Github profile found".to_string()))
        }
        Err(GithubError::Http(e)) => Err(ApiError::Internal(e.into())),
    }
}

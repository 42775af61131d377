use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::profile::merge::ProfileFields;

/// Optional social links. Rebuilt wholesale on every profile upsert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Social {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

/// One experience entry; `id` is assigned at creation and used for removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: String,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub from: String,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

/// Profile record; one row per user, nested lists stored as JSONB.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Profile {
    pub user_id: Uuid,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub github_username: Option<String>,
    pub skills: Json<Vec<String>>,
    pub social: Json<Social>,
    pub experience: Json<Vec<ExperienceEntry>>,
    pub education: Json<Vec<EducationEntry>>,
    pub updated_at: OffsetDateTime,
}

/// Profile joined with the owning identity's name and avatar.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileWithOwner {
    pub user_id: Uuid,
    pub name: String,
    pub avatar: String,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub github_username: Option<String>,
    pub skills: Json<Vec<String>>,
    pub social: Json<Social>,
    pub experience: Json<Vec<ExperienceEntry>>,
    pub education: Json<Vec<EducationEntry>>,
    pub updated_at: OffsetDateTime,
}

const PROFILE_COLUMNS: &str = "user_id, company, website, location, bio, status, \
     github_username, skills, social, experience, education, updated_at";

const JOINED_COLUMNS: &str = "p.user_id, u.name, u.avatar, p.company, p.website, \
     p.location, p.bio, p.status, p.github_username, p.skills, p.social, \
     p.experience, p.education, p.updated_at";

impl Profile {
    pub async fn find_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(profile)
    }

    pub async fn find_by_user_with_owner(
        db: &PgPool,
        user_id: Uuid,
    ) -> anyhow::Result<Option<ProfileWithOwner>> {
        let profile = sqlx::query_as::<_, ProfileWithOwner>(&format!(
            "SELECT {JOINED_COLUMNS} FROM profiles p \
             JOIN users u ON u.id = p.user_id WHERE p.user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(profile)
    }

    pub async fn find_all_with_owner(db: &PgPool) -> anyhow::Result<Vec<ProfileWithOwner>> {
        let profiles = sqlx::query_as::<_, ProfileWithOwner>(&format!(
            "SELECT {JOINED_COLUMNS} FROM profiles p \
             JOIN users u ON u.id = p.user_id ORDER BY p.updated_at DESC"
        ))
        .fetch_all(db)
        .await?;
        Ok(profiles)
    }

    /// Writes the merged field set; the caller has already resolved the
    /// partial-update semantics against the existing row.
    pub async fn upsert(
        db: &PgPool,
        user_id: Uuid,
        fields: ProfileFields,
        experience: Vec<ExperienceEntry>,
        education: Vec<EducationEntry>,
    ) -> anyhow::Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "INSERT INTO profiles (user_id, company, website, location, bio, status, \
                 github_username, skills, social, experience, education) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 company = $2, website = $3, location = $4, bio = $5, status = $6, \
                 github_username = $7, skills = $8, social = $9, \
                 experience = $10, education = $11, updated_at = now() \
             RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(fields.company)
        .bind(fields.website)
        .bind(fields.location)
        .bind(fields.bio)
        .bind(fields.status)
        .bind(fields.github_username)
        .bind(Json(fields.skills))
        .bind(Json(fields.social))
        .bind(Json(experience))
        .bind(Json(education))
        .fetch_one(db)
        .await?;
        Ok(profile)
    }

    pub async fn save_experience(
        db: &PgPool,
        user_id: Uuid,
        entries: Vec<ExperienceEntry>,
    ) -> anyhow::Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "UPDATE profiles SET experience = $2, updated_at = now() \
             WHERE user_id = $1 RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(Json(entries))
        .fetch_one(db)
        .await?;
        Ok(profile)
    }

    pub async fn save_education(
        db: &PgPool,
        user_id: Uuid,
        entries: Vec<EducationEntry>,
    ) -> anyhow::Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "UPDATE profiles SET education = $2, updated_at = now() \
             WHERE user_id = $1 RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(Json(entries))
        .fetch_one(db)
        .await?;
        Ok(profile)
    }

    /// Idempotent; deleting an absent profile is not an error.
    pub async fn delete_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn social_omits_absent_links() {
        let social = Social {
            twitter: Some("https://twitter.com/dev".into()),
            ..Social::default()
        };
        let json = serde_json::to_value(&social).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "twitter": "https://twitter.com/dev" })
        );
    }

    #[test]
    fn experience_entry_roundtrips_through_json() {
        let entry = ExperienceEntry {
            id: Uuid::new_v4(),
            title: "Engineer".into(),
            company: "Acme".into(),
            location: None,
            from: "2020-01-01".into(),
            to: None,
            current: Some(true),
            description: None,
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: ExperienceEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}

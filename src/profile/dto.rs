use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::profile::repo::{EducationEntry, ExperienceEntry, ProfileWithOwner, Social};

/// Create-or-update body. Every field is optional; skills arrive as one
/// comma-delimited string.
#[derive(Debug, Deserialize)]
pub struct ProfileInput {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub github_username: Option<String>,
    pub skills: Option<String>,
    pub youtube: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExperienceInput {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EducationInput {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Owner {
    pub id: Uuid,
    pub name: String,
    pub avatar: String,
}

/// Profile response joined with the owning identity.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub user: Owner,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub github_username: Option<String>,
    pub skills: Vec<String>,
    pub social: Social,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

impl From<ProfileWithOwner> for ProfileView {
    fn from(row: ProfileWithOwner) -> Self {
        Self {
            user: Owner {
                id: row.user_id,
                name: row.name,
                avatar: row.avatar,
            },
            company: row.company,
            website: row.website,
            location: row.location,
            bio: row.bio,
            status: row.status,
            github_username: row.github_username,
            skills: row.skills.0,
            social: row.social.0,
            experience: row.experience.0,
            education: row.education.0,
        }
    }
}

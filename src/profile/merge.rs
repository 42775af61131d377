use uuid::Uuid;

use crate::profile::dto::ProfileInput;
use crate::profile::repo::{Profile, Social};
use crate::validate::split_skills;

/// The scalar field set written by an upsert, after partial-update
/// resolution. Lists of experience/education entries are carried separately.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileFields {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub github_username: Option<String>,
    pub skills: Vec<String>,
    pub social: Social,
}

/// Resolves partial-update semantics: a field present in the input replaces
/// the stored value, an absent field keeps it. The social sub-record is the
/// exception and is rebuilt from the input links alone.
pub fn merge_profile(input: &ProfileInput, existing: Option<&Profile>) -> ProfileFields {
    let keep = |current: &Option<String>, field: fn(&Profile) -> Option<String>| {
        current
            .clone()
            .or_else(|| existing.and_then(field))
    };

    let skills = match &input.skills {
        Some(raw) => split_skills(raw),
        None => existing.map(|p| p.skills.0.clone()).unwrap_or_default(),
    };

    ProfileFields {
        company: keep(&input.company, |p| p.company.clone()),
        website: keep(&input.website, |p| p.website.clone()),
        location: keep(&input.location, |p| p.location.clone()),
        bio: keep(&input.bio, |p| p.bio.clone()),
        status: keep(&input.status, |p| p.status.clone()),
        github_username: keep(&input.github_username, |p| p.github_username.clone()),
        skills,
        social: Social {
            youtube: input.youtube.clone(),
            facebook: input.facebook.clone(),
            twitter: input.twitter.clone(),
            instagram: input.instagram.clone(),
            linkedin: input.linkedin.clone(),
        },
    }
}

/// Removes the entry with `entry_id`, keeping the rest in order.
/// Returns `None` when the id is not in the list.
pub fn remove_entry<T>(
    entries: Vec<T>,
    entry_id: Uuid,
    id_of: impl Fn(&T) -> Uuid,
) -> Option<Vec<T>> {
    if !entries.iter().any(|e| id_of(e) == entry_id) {
        return None;
    }
    Some(
        entries
            .into_iter()
            .filter(|e| id_of(e) != entry_id)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::repo::ExperienceEntry;
    use sqlx::types::Json;
    use time::OffsetDateTime;

    fn input() -> ProfileInput {
        ProfileInput {
            company: None,
            website: None,
            location: None,
            bio: None,
            status: None,
            github_username: None,
            skills: None,
            youtube: None,
            facebook: None,
            twitter: None,
            instagram: None,
            linkedin: None,
        }
    }

    fn stored(fields: ProfileFields) -> Profile {
        Profile {
            user_id: Uuid::new_v4(),
            company: fields.company,
            website: fields.website,
            location: fields.location,
            bio: fields.bio,
            status: fields.status,
            github_username: fields.github_username,
            skills: Json(fields.skills),
            social: Json(fields.social),
            experience: Json(Vec::new()),
            education: Json(Vec::new()),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn fresh_profile_gets_only_present_fields() {
        let mut input = input();
        input.status = Some("Developer".into());
        input.skills = Some("js, css".into());

        let fields = merge_profile(&input, None);
        assert_eq!(fields.status.as_deref(), Some("Developer"));
        assert_eq!(fields.skills, vec!["js", "css"]);
        assert_eq!(fields.company, None);
        assert_eq!(fields.bio, None);
        assert_eq!(fields.social, Social::default());
    }

    #[test]
    fn absent_fields_keep_stored_values() {
        let mut first = input();
        first.status = Some("Developer".into());
        first.skills = Some("js, css".into());
        let existing = stored(merge_profile(&first, None));

        let mut second = input();
        second.bio = Some("hi".into());
        let fields = merge_profile(&second, Some(&existing));

        assert_eq!(fields.bio.as_deref(), Some("hi"));
        assert_eq!(fields.status.as_deref(), Some("Developer"));
        assert_eq!(fields.skills, vec!["js", "css"]);
    }

    #[test]
    fn present_fields_replace_stored_values() {
        let mut first = input();
        first.status = Some("Developer".into());
        let existing = stored(merge_profile(&first, None));

        let mut second = input();
        second.status = Some("Manager".into());
        let fields = merge_profile(&second, Some(&existing));
        assert_eq!(fields.status.as_deref(), Some("Manager"));
    }

    #[test]
    fn social_is_rebuilt_not_merged() {
        let mut first = input();
        first.youtube = Some("https://youtube.com/dev".into());
        let existing = stored(merge_profile(&first, None));

        let mut second = input();
        second.twitter = Some("https://twitter.com/dev".into());
        let fields = merge_profile(&second, Some(&existing));

        assert_eq!(fields.social.twitter.as_deref(), Some("https://twitter.com/dev"));
        assert_eq!(fields.social.youtube, None);
    }

    fn entry(title: &str) -> ExperienceEntry {
        ExperienceEntry {
            id: Uuid::new_v4(),
            title: title.into(),
            company: "Acme".into(),
            location: None,
            from: "2020-01-01".into(),
            to: None,
            current: None,
            description: None,
        }
    }

    #[test]
    fn remove_entry_keeps_order_of_the_rest() {
        let entries = vec![entry("c"), entry("b"), entry("a")];
        let target = entries[1].id;
        let remaining = remove_entry(entries, target, |e| e.id).expect("entry present");
        let titles: Vec<_> = remaining.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "a"]);
    }

    #[test]
    fn remove_entry_unknown_id_is_none() {
        let entries = vec![entry("a")];
        assert!(remove_entry(entries, Uuid::new_v4(), |e| e.id).is_none());
    }
}

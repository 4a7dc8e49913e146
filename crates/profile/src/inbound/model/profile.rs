use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::entity::profile::{Education, Experience, Profile, Social};

// ╔════════════════════════════╗
// ║    Profile                 ║
// ╚════════════════════════════╝

#[derive(Serialize)]
pub struct OwnerResponse {
    pub id: i64,
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub user: Option<OwnerResponse>,
    pub user_id: i64,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub githubusername: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub social: Social,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id.to_string(),
            user: profile.owner.map(|owner| OwnerResponse {
                id: profile.user_id,
                name: owner.name,
                avatar: owner.avatar,
            }),
            user_id: profile.user_id,
            company: profile.company,
            website: profile.website,
            location: profile.location,
            status: profile.status,
            githubusername: profile.githubusername,
            bio: profile.bio,
            skills: profile.skills,
            social: profile.social,
            experience: profile.experience,
            education: profile.education,
            created_at: profile.created_at.to_rfc3339(),
            updated_at: profile.updated_at.to_rfc3339(),
        }
    }
}

// ╔════════════════════════════╗
// ║    Upsert Profile          ║
// ╚════════════════════════════╝

#[derive(Deserialize)]
pub struct UpsertProfileRequest {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

// ╔════════════════════════════╗
// ║    Delete Account          ║
// ╚════════════════════════════╝

#[derive(Serialize)]
pub struct DeleteAccountResponse {
    pub success: bool,
}

// ╔════════════════════════════╗
// ║    Add Experience          ║
// ╚════════════════════════════╝

#[derive(Deserialize)]
pub struct AddExperienceRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "blank_date")]
    pub from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_date")]
    pub to: Option<NaiveDate>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

// ╔════════════════════════════╗
// ║    Add Education           ║
// ╚════════════════════════════╝

#[derive(Deserialize)]
pub struct AddEducationRequest {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub fieldofstudy: Option<String>,
    #[serde(default, deserialize_with = "blank_date")]
    pub from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_date")]
    pub to: Option<NaiveDate>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

/// Reads a `YYYY-MM-DD` date, treating `null` and `""` as absent.
fn blank_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().map(Some).map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

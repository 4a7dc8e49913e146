use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const SKILL_SEPARATOR: &str = ", ";

/// Display fields of the user a profile belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileOwner {
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Social {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: i64,
    pub owner: Option<ProfileOwner>,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Entries are kept most recent first.
    pub fn add_experience(&mut self, experience: Experience) {
        self.experience.insert(0, experience);
        self.updated_at = Utc::now();
    }

    /// Returns `false` when no entry carries `id`.
    pub fn remove_experience(&mut self, id: Uuid) -> bool {
        let before = self.experience.len();
        self.experience.retain(|e| e.id != id);
        self.touch_if(before != self.experience.len())
    }

    pub fn add_education(&mut self, education: Education) {
        self.education.insert(0, education);
        self.updated_at = Utc::now();
    }

    pub fn remove_education(&mut self, id: Uuid) -> bool {
        let before = self.education.len();
        self.education.retain(|e| e.id != id);
        self.touch_if(before != self.education.len())
    }

    fn touch_if(&mut self, changed: bool) -> bool {
        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}

/// Fields written when a user's first profile is created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfile {
    pub id: Uuid,
    pub user_id: i64,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub githubusername: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub social: Social,
}

/// A partial update: `None` keeps the stored value. `social` is always replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdatePayload {
    pub user_id: i64,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    pub social: Social,
}

/// Splits a `"node, react, css"` style list. Only a comma followed by a space
/// separates entries, so `"a,b"` stays a single skill.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(SKILL_SEPARATOR).map(|skill| skill.trim().to_string()).collect()
}

use chrono::NaiveDate;
use validator::Validate;

// ╔════════════════════════════╗
// ║     Get Own Profile        ║
// ╚════════════════════════════╝

#[derive(Debug)]
pub struct GetOwnProfileInput {
    pub user_id: i64,
}

// ╔════════════════════════════╗
// ║      Upsert Profile        ║
// ╚════════════════════════════╝

#[derive(Debug, Default, Validate)]
pub struct UpsertProfileInput {
    pub user_id: i64,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,

    #[validate(
        required(message = "Status is required"),
        length(min = 1, message = "Status is required")
    )]
    pub status: Option<String>,

    pub githubusername: Option<String>,

    #[validate(
        required(message = "Skills is required"),
        length(min = 1, message = "Skills is required")
    )]
    pub skills: Option<String>,

    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

// ╔════════════════════════════╗
// ║ Get Profile By User Id     ║
// ╚════════════════════════════╝

/// `user_id` is the raw path segment; it may not be numeric.
#[derive(Debug)]
pub struct GetProfileByUserIdInput {
    pub user_id: String,
}

// ╔════════════════════════════╗
// ║      Delete Account        ║
// ╚════════════════════════════╝

#[derive(Debug)]
pub struct DeleteAccountInput {
    pub user_id: i64,
}

#[derive(Debug)]
pub struct DeleteAccountOutput {
    pub success: bool,
}

// ╔════════════════════════════╗
// ║      Add Experience        ║
// ╚════════════════════════════╝

#[derive(Debug, Default, Validate)]
pub struct AddExperienceInput {
    pub user_id: i64,

    #[validate(required(message = "Title is required"), length(min = 1, message = "Title is required"))]
    pub title: Option<String>,

    #[validate(required(message = "Company is required"), length(min = 1, message = "Company is required"))]
    pub company: Option<String>,

    pub location: Option<String>,

    #[validate(required(message = "From date is required"))]
    pub from: Option<NaiveDate>,

    pub to: Option<NaiveDate>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

// ╔════════════════════════════╗
// ║     Remove Experience      ║
// ╚════════════════════════════╝

#[derive(Debug)]
pub struct RemoveExperienceInput {
    pub user_id: i64,
    pub experience_id: String,
}

// ╔════════════════════════════╗
// ║      Add Education         ║
// ╚════════════════════════════╝

#[derive(Debug, Default, Validate)]
pub struct AddEducationInput {
    pub user_id: i64,

    #[validate(required(message = "School is required"), length(min = 1, message = "School is required"))]
    pub school: Option<String>,

    #[validate(required(message = "Degree is required"), length(min = 1, message = "Degree is required"))]
    pub degree: Option<String>,

    #[validate(
        required(message = "Field of study is required"),
        length(min = 1, message = "Field of study is required")
    )]
    pub fieldofstudy: Option<String>,

    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

// ╔════════════════════════════╗
// ║     Remove Education       ║
// ╚════════════════════════════╝

#[derive(Debug)]
pub struct RemoveEducationInput {
    pub user_id: i64,
    pub education_id: String,
}

// ╔════════════════════════════╗
// ║    List Repositories       ║
// ╚════════════════════════════╝

#[derive(Debug)]
pub struct ListRepositoriesInput {
    pub username: String,
}

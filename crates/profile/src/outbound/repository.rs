use app_core::error::AppError;
use async_trait::async_trait;

use crate::domain::entity::profile::{NewProfile, Profile, ProfileUpdatePayload};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Loads the profile of `user_id` together with its owner's display fields.
    async fn find_profile_by_user_id(&self, user_id: i64) -> Result<Option<Profile>, AppError>;
    async fn find_all_profiles(&self) -> Result<Vec<Profile>, AppError>;
    async fn create_profile(&self, profile: NewProfile) -> Result<(), AppError>;
    async fn update_profile(&self, payload: ProfileUpdatePayload) -> Result<(), AppError>;
    /// Persists `profile.experience` and `profile.updated_at`.
    async fn update_experience(&self, profile: &Profile) -> Result<(), AppError>;
    /// Persists `profile.education` and `profile.updated_at`.
    async fn update_education(&self, profile: &Profile) -> Result<(), AppError>;
    /// Removes the user's posts, profile and user row in one transaction.
    async fn delete_account(&self, user_id: i64) -> Result<(), AppError>;
}

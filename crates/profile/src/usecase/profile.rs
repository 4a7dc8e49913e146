use std::sync::Arc;

use app_core::error::AppError;
use app_core::github::{Repository, RepositoryDirectory};
use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use crate::domain::entity::profile::{Education, Experience, NewProfile, Profile, ProfileUpdatePayload, Social, parse_skills};
use crate::domain::inout::prelude::*;
use crate::outbound::repository::ProfileRepository;

const PROFILE_NOT_FOUND_MSG: &str = "There is no profile for this user";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileUseCase: Send + Sync {
    async fn get_own_profile(&self, input: GetOwnProfileInput) -> Result<Profile, AppError>;
    async fn upsert_profile(&self, input: UpsertProfileInput) -> Result<Profile, AppError>;
    async fn list_profiles(&self) -> Result<Vec<Profile>, AppError>;
    async fn get_profile_by_user_id(&self, input: GetProfileByUserIdInput) -> Result<Profile, AppError>;
    async fn delete_account(&self, input: DeleteAccountInput) -> Result<DeleteAccountOutput, AppError>;
    async fn add_experience(&self, input: AddExperienceInput) -> Result<Profile, AppError>;
    async fn remove_experience(&self, input: RemoveExperienceInput) -> Result<Profile, AppError>;
    async fn add_education(&self, input: AddEducationInput) -> Result<Profile, AppError>;
    async fn remove_education(&self, input: RemoveEducationInput) -> Result<Profile, AppError>;
    async fn list_repositories(&self, input: ListRepositoriesInput) -> Result<Vec<Repository>, AppError>;
}

#[derive(Clone)]
pub struct ProfileService {
    repo: Arc<dyn ProfileRepository>,
    github: Arc<dyn RepositoryDirectory>,
}

impl ProfileService {
    pub fn new(repo: Arc<dyn ProfileRepository>, github: Arc<dyn RepositoryDirectory>) -> Self {
        Self { repo, github }
    }

    async fn get_profile(&self, user_id: i64) -> Result<Profile, AppError> {
        self.repo
            .find_profile_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(PROFILE_NOT_FOUND_MSG.to_string()))
    }
}

/// Empty strings count as absent.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[async_trait]
impl ProfileUseCase for ProfileService {
    async fn get_own_profile(&self, input: GetOwnProfileInput) -> Result<Profile, AppError> {
        self.get_profile(input.user_id).await
    }

    async fn upsert_profile(&self, input: UpsertProfileInput) -> Result<Profile, AppError> {
        input.validate()?;

        let social = Social {
            youtube: present(input.youtube),
            twitter: present(input.twitter),
            facebook: present(input.facebook),
            linkedin: present(input.linkedin),
            instagram: present(input.instagram),
        };
        let skills = present(input.skills).map(|raw| parse_skills(&raw));

        if self.repo.find_profile_by_user_id(input.user_id).await?.is_some() {
            self.repo
                .update_profile(ProfileUpdatePayload {
                    user_id: input.user_id,
                    company: present(input.company),
                    website: present(input.website),
                    location: present(input.location),
                    status: present(input.status),
                    githubusername: present(input.githubusername),
                    bio: present(input.bio),
                    skills,
                    social,
                })
                .await?;

            tracing::info!("Profile updated for user: {}", input.user_id);
        } else {
            self.repo
                .create_profile(NewProfile {
                    id: Uuid::new_v4(),
                    user_id: input.user_id,
                    company: present(input.company),
                    website: present(input.website),
                    location: present(input.location),
                    status: input.status.unwrap_or_default(),
                    githubusername: present(input.githubusername),
                    bio: present(input.bio),
                    skills: skills.unwrap_or_default(),
                    social,
                })
                .await?;

            tracing::info!("Profile created for user: {}", input.user_id);
        }

        self.get_profile(input.user_id).await
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, AppError> {
        self.repo.find_all_profiles().await
    }

    async fn get_profile_by_user_id(&self, input: GetProfileByUserIdInput) -> Result<Profile, AppError> {
        let user_id = input
            .user_id
            .parse::<i64>()
            .map_err(|_| AppError::NotFound(PROFILE_NOT_FOUND_MSG.to_string()))?;

        self.get_profile(user_id).await
    }

    async fn delete_account(&self, input: DeleteAccountInput) -> Result<DeleteAccountOutput, AppError> {
        self.repo.delete_account(input.user_id).await?;

        Ok(DeleteAccountOutput { success: true })
    }

    async fn add_experience(&self, input: AddExperienceInput) -> Result<Profile, AppError> {
        input.validate()?;

        let mut profile = self.get_profile(input.user_id).await?;
        profile.add_experience(Experience {
            id: Uuid::new_v4(),
            title: input.title.unwrap_or_default(),
            company: input.company.unwrap_or_default(),
            location: present(input.location),
            from: input.from.unwrap_or_default(),
            to: input.to,
            current: input.current.unwrap_or(false),
            description: present(input.description),
        });

        self.repo.update_experience(&profile).await?;

        Ok(profile)
    }

    async fn remove_experience(&self, input: RemoveExperienceInput) -> Result<Profile, AppError> {
        let mut profile = self.get_profile(input.user_id).await?;

        let removed = Uuid::parse_str(&input.experience_id).is_ok_and(|id| profile.remove_experience(id));
        if removed {
            self.repo.update_experience(&profile).await?;
        }

        Ok(profile)
    }

    async fn add_education(&self, input: AddEducationInput) -> Result<Profile, AppError> {
        input.validate()?;

        let mut profile = self.get_profile(input.user_id).await?;
        profile.add_education(Education {
            id: Uuid::new_v4(),
            school: input.school.unwrap_or_default(),
            degree: input.degree.unwrap_or_default(),
            fieldofstudy: input.fieldofstudy.unwrap_or_default(),
            from: input.from,
            to: input.to,
            current: input.current.unwrap_or(false),
            description: present(input.description),
        });

        self.repo.update_education(&profile).await?;

        Ok(profile)
    }

    async fn remove_education(&self, input: RemoveEducationInput) -> Result<Profile, AppError> {
        let mut profile = self.get_profile(input.user_id).await?;

        let removed = Uuid::parse_str(&input.education_id).is_ok_and(|id| profile.remove_education(id));
        if removed {
            self.repo.update_education(&profile).await?;
        }

        Ok(profile)
    }

    async fn list_repositories(&self, input: ListRepositoriesInput) -> Result<Vec<Repository>, AppError> {
        Ok(self.github.latest_repositories(&input.username).await?)
    }
}

use std::sync::Arc;

use app_core::error::AppError;
use app_orm::prelude::{Posts, Profiles, Users};
use app_orm::{posts, profiles, users};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::repository::ProfileRepository;
use crate::domain::entity::profile::{NewProfile, Profile, ProfileOwner, ProfileUpdatePayload};

const PROFILE_NOT_FOUND_MSG: &str = "There is no profile for this user";

/// `ProfileORM` maps `profiles` rows, joined with their `users` row, to
/// [`Profile`] entities. The list-valued fields are stored as JSONB.
pub struct ProfileORM {
    db: Arc<DatabaseConnection>,
}

impl ProfileORM {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    // ===== Mappers =====

    fn to_profile(&self, model: profiles::Model, owner: Option<users::Model>) -> Result<Profile, AppError> {
        Ok(Profile {
            id: model.id,
            user_id: model.user_id,
            owner: owner.map(|u| ProfileOwner { name: u.name, avatar: u.avatar }),
            company: model.company,
            website: model.website,
            location: model.location,
            status: model.status,
            githubusername: model.githubusername,
            bio: model.bio,
            skills: from_json(model.skills)?,
            social: from_json(model.social)?,
            experience: from_json(model.experience)?,
            education: from_json(model.education)?,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }

    async fn update_by_user_id(&self, user_id: i64, active_model: profiles::ActiveModel) -> Result<(), AppError> {
        let result = Profiles::update_many()
            .set(active_model)
            .filter(profiles::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(PROFILE_NOT_FOUND_MSG.to_string()));
        }

        Ok(())
    }
}

/// A `null` column decodes to the type's default.
fn from_json<T: DeserializeOwned + Default>(value: Value) -> Result<T, AppError> {
    if value.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(value)?)
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, AppError> {
    Ok(serde_json::to_value(value)?)
}

#[async_trait]
impl ProfileRepository for ProfileORM {
    async fn find_profile_by_user_id(&self, user_id: i64) -> Result<Option<Profile>, AppError> {
        let row = Profiles::find()
            .filter(profiles::Column::UserId.eq(user_id))
            .find_also_related(Users)
            .one(self.db.as_ref())
            .await?;

        row.map(|(profile, owner)| self.to_profile(profile, owner)).transpose()
    }

    async fn find_all_profiles(&self) -> Result<Vec<Profile>, AppError> {
        let rows = Profiles::find()
            .find_also_related(Users)
            .order_by_asc(profiles::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        rows.into_iter().map(|(profile, owner)| self.to_profile(profile, owner)).collect()
    }

    async fn create_profile(&self, profile: NewProfile) -> Result<(), AppError> {
        let now = Utc::now().fixed_offset();
        let model = profiles::ActiveModel {
            id: ActiveValue::Set(profile.id),
            user_id: ActiveValue::Set(profile.user_id),
            company: ActiveValue::Set(profile.company),
            website: ActiveValue::Set(profile.website),
            location: ActiveValue::Set(profile.location),
            status: ActiveValue::Set(profile.status),
            githubusername: ActiveValue::Set(profile.githubusername),
            bio: ActiveValue::Set(profile.bio),
            skills: ActiveValue::Set(to_json(&profile.skills)?),
            social: ActiveValue::Set(to_json(&profile.social)?),
            experience: ActiveValue::Set(Value::Array(vec![])),
            education: ActiveValue::Set(Value::Array(vec![])),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        Profiles::insert(model).exec_without_returning(self.db.as_ref()).await?;

        Ok(())
    }

    async fn update_profile(&self, payload: ProfileUpdatePayload) -> Result<(), AppError> {
        let mut active_model = profiles::ActiveModel { ..Default::default() };

        if let Some(company) = payload.company {
            active_model.company = ActiveValue::Set(Some(company));
        }
        if let Some(website) = payload.website {
            active_model.website = ActiveValue::Set(Some(website));
        }
        if let Some(location) = payload.location {
            active_model.location = ActiveValue::Set(Some(location));
        }
        if let Some(status) = payload.status {
            active_model.status = ActiveValue::Set(status);
        }
        if let Some(githubusername) = payload.githubusername {
            active_model.githubusername = ActiveValue::Set(Some(githubusername));
        }
        if let Some(bio) = payload.bio {
            active_model.bio = ActiveValue::Set(Some(bio));
        }
        if let Some(skills) = payload.skills {
            active_model.skills = ActiveValue::Set(to_json(&skills)?);
        }
        active_model.social = ActiveValue::Set(to_json(&payload.social)?);
        active_model.updated_at = ActiveValue::Set(Utc::now().fixed_offset());

        self.update_by_user_id(payload.user_id, active_model).await
    }

    async fn update_experience(&self, profile: &Profile) -> Result<(), AppError> {
        let active_model = profiles::ActiveModel {
            experience: ActiveValue::Set(to_json(&profile.experience)?),
            updated_at: ActiveValue::Set(profile.updated_at.fixed_offset()),
            ..Default::default()
        };

        self.update_by_user_id(profile.user_id, active_model).await
    }

    async fn update_education(&self, profile: &Profile) -> Result<(), AppError> {
        let active_model = profiles::ActiveModel {
            education: ActiveValue::Set(to_json(&profile.education)?),
            updated_at: ActiveValue::Set(profile.updated_at.fixed_offset()),
            ..Default::default()
        };

        self.update_by_user_id(profile.user_id, active_model).await
    }

    async fn delete_account(&self, user_id: i64) -> Result<(), AppError> {
        let txn = self.db.begin().await?;

        Posts::delete_many().filter(posts::Column::UserId.eq(user_id)).exec(&txn).await?;
        Profiles::delete_many().filter(profiles::Column::UserId.eq(user_id)).exec(&txn).await?;
        Users::delete_many().filter(users::Column::Id.eq(user_id)).exec(&txn).await?;

        tracing::info!("Account removed for user: {}", user_id);

        Ok(txn.commit().await?)
    }
}

use app_core::extractors::{AppJson, AppPath};
use app_core::jwt::Claims;
use app_core::response::Response;
use axum::debug_handler;
use axum::extract::State;
use axum::response::IntoResponse;

use crate::domain::inout::prelude::*;
use crate::inbound::model::prelude::*;
use crate::inbound::state::ProfileState;

const USER_REMOVED_MSG: &str = "User removed";

#[debug_handler]
pub async fn get_own_profile(claims: Claims, State(state): State<ProfileState>) -> impl IntoResponse {
    state
        .profile
        .get_own_profile(GetOwnProfileInput { user_id: claims.sub })
        .await
        .map(ProfileResponse::from)
        .map(Response::from)
}

#[debug_handler]
pub async fn upsert_profile(
    claims: Claims,
    State(state): State<ProfileState>,
    AppJson(req): AppJson<UpsertProfileRequest>,
) -> impl IntoResponse {
    state
        .profile
        .upsert_profile(UpsertProfileInput {
            user_id: claims.sub,
            company: req.company,
            website: req.website,
            location: req.location,
            bio: req.bio,
            status: req.status,
            githubusername: req.githubusername,
            skills: req.skills,
            youtube: req.youtube,
            twitter: req.twitter,
            facebook: req.facebook,
            linkedin: req.linkedin,
            instagram: req.instagram,
        })
        .await
        .map(ProfileResponse::from)
        .map(Response::from)
}

#[debug_handler]
pub async fn list_profiles(State(state): State<ProfileState>) -> impl IntoResponse {
    state
        .profile
        .list_profiles()
        .await
        .map(|profiles| profiles.into_iter().map(ProfileResponse::from).collect::<Vec<_>>())
        .map(Response::from)
}

#[debug_handler]
pub async fn get_profile_by_user_id(
    State(state): State<ProfileState>,
    AppPath(user_id): AppPath<String>,
) -> impl IntoResponse {
    state
        .profile
        .get_profile_by_user_id(GetProfileByUserIdInput { user_id })
        .await
        .map(ProfileResponse::from)
        .map(Response::from)
}

#[debug_handler]
pub async fn delete_account(claims: Claims, State(state): State<ProfileState>) -> impl IntoResponse {
    state
        .profile
        .delete_account(DeleteAccountInput { user_id: claims.sub })
        .await
        .map(|output| Response::with_message(DeleteAccountResponse { success: output.success }, USER_REMOVED_MSG))
}

#[debug_handler]
pub async fn add_experience(
    claims: Claims,
    State(state): State<ProfileState>,
    AppJson(req): AppJson<AddExperienceRequest>,
) -> impl IntoResponse {
    state
        .profile
        .add_experience(AddExperienceInput {
            user_id: claims.sub,
            title: req.title,
            company: req.company,
            location: req.location,
            from: req.from,
            to: req.to,
            current: req.current,
            description: req.description,
        })
        .await
        .map(ProfileResponse::from)
        .map(Response::from)
}

#[debug_handler]
pub async fn remove_experience(
    claims: Claims,
    State(state): State<ProfileState>,
    AppPath(experience_id): AppPath<String>,
) -> impl IntoResponse {
    state
        .profile
        .remove_experience(RemoveExperienceInput { user_id: claims.sub, experience_id })
        .await
        .map(ProfileResponse::from)
        .map(Response::from)
}

#[debug_handler]
pub async fn add_education(
    claims: Claims,
    State(state): State<ProfileState>,
    AppJson(req): AppJson<AddEducationRequest>,
) -> impl IntoResponse {
    state
        .profile
        .add_education(AddEducationInput {
            user_id: claims.sub,
            school: req.school,
            degree: req.degree,
            fieldofstudy: req.fieldofstudy,
            from: req.from,
            to: req.to,
            current: req.current,
            description: req.description,
        })
        .await
        .map(ProfileResponse::from)
        .map(Response::from)
}

#[debug_handler]
pub async fn remove_education(
    claims: Claims,
    State(state): State<ProfileState>,
    AppPath(education_id): AppPath<String>,
) -> impl IntoResponse {
    state
        .profile
        .remove_education(RemoveEducationInput { user_id: claims.sub, education_id })
        .await
        .map(ProfileResponse::from)
        .map(Response::from)
}

#[debug_handler]
pub async fn list_repositories(
    State(state): State<ProfileState>,
    AppPath(username): AppPath<String>,
) -> impl IntoResponse {
    state.profile.list_repositories(ListRepositoriesInput { username }).await.map(Response::from)
}

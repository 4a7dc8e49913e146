use axum::Router;
use axum::routing::{delete, get, put};

use crate::inbound::http::profile::*;
use crate::inbound::state::ProfileState;

/// Routes relative to the `/api/profile` mount point. Private handlers take
/// `Claims` as their first argument.
pub fn create_router(state: ProfileState) -> Router {
    Router::new()
        .route("/", get(list_profiles).post(upsert_profile).delete(delete_account))
        .route("/me", get(get_own_profile))
        .route("/user/{user_id}", get(get_profile_by_user_id))
        .route("/experience", put(add_experience))
        .route("/experience/{exp_id}", delete(remove_experience))
        .route("/education", put(add_education))
        .route("/education/{edu_id}", delete(remove_education))
        .route("/github/{username}", get(list_repositories))
        .with_state(state)
}

use std::sync::Arc;

use app_core::jwt::TokenManager;
use axum::extract::FromRef;

use crate::usecase::profile::ProfileUseCase;

#[derive(Clone)]
pub struct ProfileState {
    pub token: Arc<dyn TokenManager>,
    pub profile: Arc<dyn ProfileUseCase>,
}

impl ProfileState {
    pub fn new(token: Arc<dyn TokenManager>, profile: Arc<dyn ProfileUseCase>) -> Self {
        Self { token, profile }
    }
}

/// Lets the `Claims` extractor reach the token manager.
impl FromRef<ProfileState> for Arc<dyn TokenManager> {
    fn from_ref(state: &ProfileState) -> Self {
        state.token.clone()
    }
}

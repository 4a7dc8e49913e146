//! Developer profiles: CRUD over a user's profile, experience and education,
//! plus a lookup of their public GitHub repositories.

mod domain;
mod inbound;
mod outbound;
mod usecase;

use std::sync::Arc;

use app_core::github::RepositoryDirectory;
use app_core::jwt::TokenManager;
pub use inbound::router::create_router;
pub use inbound::state::ProfileState;
use sea_orm::DatabaseConnection;

use crate::outbound::orm::ProfileORM;
use crate::usecase::profile::ProfileService;

pub struct Dependency {
    pub db: Arc<DatabaseConnection>,
    pub token: Arc<dyn TokenManager>,
    pub github: Arc<dyn RepositoryDirectory>,
}

pub fn new(dep: Dependency) -> ProfileState {
    let repo = Arc::new(ProfileORM::new(dep.db));
    let profile_svc = Arc::new(ProfileService::new(repo, dep.github));

    ProfileState::new(dep.token, profile_svc)
}

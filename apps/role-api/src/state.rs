use std::sync::Arc;

use role_lib::role_service::RoleService;

use crate::auth::AuthConfig;

#[derive(Clone)]
pub struct AppState {
    pub role_service: Arc<RoleService>,
    pub auth: Arc<AuthConfig>,
    pub env: String,
}

impl AppState {
    pub fn new(role_service: RoleService, auth: AuthConfig, env: impl Into<String>) -> Self {
        Self {
            role_service: Arc::new(role_service),
            auth: Arc::new(auth),
            env: env.into(),
        }
    }
}

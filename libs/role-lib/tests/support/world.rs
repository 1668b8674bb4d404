use cucumber::World;

use role_lib::entities::{Role, RoleMember, RoleProject};
use role_lib::errors_service::RoleServiceError;
use role_lib::repository::MemoryStore;
use role_lib::role_service::RoleService;

#[derive(Debug, Default, World)]
pub struct TestWorld {
    // State
    pub store: MemoryStore,
    pub role: Option<Role>,
    pub member: Option<RoleMember>,
    pub relation: Option<RoleProject>,

    // Results
    pub members: Vec<RoleMember>,
    pub projects: Vec<RoleProject>,
    pub error: Option<RoleServiceError>,
}

impl TestWorld {
    pub fn service(&self) -> RoleService {
        RoleService::in_memory(self.store.clone())
    }

    pub fn role_id(&self) -> i64 {
        self.role.as_ref().expect("no role in this scenario").id
    }

    /// Keeps the error of a failed step for the `then` assertions.
    pub fn record<T>(&mut self, result: Result<T, RoleServiceError>) -> Option<T> {
        match result {
            Ok(value) => {
                self.error = None;
                Some(value)
            }
            Err(err) => {
                self.error = Some(err);
                None
            }
        }
    }
}

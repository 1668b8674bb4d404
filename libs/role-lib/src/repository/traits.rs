use async_trait::async_trait;

use crate::entities::ProjectPermission;
use crate::repository::errors::RoleRepositoryError;
use crate::repository::models::{
    NewRoleRecord, RoleChanges, RoleMemberRow, RoleProjectRow, RoleRow,
};

#[async_trait]
pub trait RoleRepositoryTrait: Send + Sync {
    async fn create_role(&self, record: &NewRoleRecord) -> Result<RoleRow, RoleRepositoryError>;
    async fn get_role(&self, role_id: i64) -> Result<Option<RoleRow>, RoleRepositoryError>;
    async fn get_role_by_name(&self, project_id: i64, name: &str) -> Result<Option<RoleRow>, RoleRepositoryError>;
    async fn update_role(&self, role_id: i64, changes: &RoleChanges) -> Result<RoleRow, RoleRepositoryError>;
    async fn delete_role(&self, role_id: i64) -> Result<(), RoleRepositoryError>;
}

#[async_trait]
pub trait RoleMemberRepositoryTrait: Send + Sync {
    async fn add_member(&self, role_id: i64, user_id: i64, create_by: i64) -> Result<RoleMemberRow, RoleRepositoryError>;
    async fn get_member(&self, relation_id: i64) -> Result<Option<RoleMemberRow>, RoleRepositoryError>;
    async fn get_by_role_and_user(&self, role_id: i64, user_id: i64) -> Result<Option<RoleMemberRow>, RoleRepositoryError>;
    async fn delete_member(&self, relation_id: i64) -> Result<(), RoleRepositoryError>;
    async fn get_members(&self, role_id: i64) -> Result<Vec<RoleMemberRow>, RoleRepositoryError>;
}

#[async_trait]
pub trait RoleProjectRepositoryTrait: Send + Sync {
    async fn add_project(
        &self,
        role_id: i64,
        project_id: i64,
        permission: &ProjectPermission,
        create_by: i64,
    ) -> Result<RoleProjectRow, RoleRepositoryError>;
    async fn get_relation(&self, relation_id: i64) -> Result<Option<RoleProjectRow>, RoleRepositoryError>;
    async fn get_by_role_and_project(&self, role_id: i64, project_id: i64) -> Result<Option<RoleProjectRow>, RoleRepositoryError>;
    async fn update_permission(
        &self,
        relation_id: i64,
        permission: &ProjectPermission,
        update_by: i64,
    ) -> Result<RoleProjectRow, RoleRepositoryError>;
    async fn delete_project(&self, relation_id: i64) -> Result<(), RoleRepositoryError>;
    async fn get_projects(&self, role_id: i64) -> Result<Vec<RoleProjectRow>, RoleRepositoryError>;
}

/// Read-only lookups into tables owned by the rest of the platform.
#[async_trait]
pub trait DirectoryRepositoryTrait: Send + Sync {
    async fn user_exists(&self, user_id: i64) -> Result<bool, RoleRepositoryError>;
    async fn project_exists(&self, project_id: i64) -> Result<bool, RoleRepositoryError>;
}

/// Answers whether a user may administer a project.
#[async_trait]
pub trait ProjectAuthorizer: Send + Sync {
    async fn can_administer(&self, user_id: i64, project_id: i64) -> Result<bool, RoleRepositoryError>;
}

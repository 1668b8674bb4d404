use crate::entities::{
    MemberUser, NewRole, ProjectPermission, Role, RoleMember, RoleProject, RoleUpdate,
};
use crate::errors_service::RoleServiceError;
use crate::repository::errors::RoleRepositoryError;
use crate::repository::models::{
    NewRoleRecord, RoleChanges, RoleMemberRow, RoleProjectRow, RoleRow,
};
use crate::repository::traits::{
    DirectoryRepositoryTrait, ProjectAuthorizer, RoleMemberRepositoryTrait,
    RoleProjectRepositoryTrait, RoleRepositoryTrait,
};
#[cfg(any(test, feature = "testing"))]
use crate::repository::MemoryStore;
use crate::repository::{
    DirectoryRepository, RoleMemberRepository, RoleProjectRepository, RoleRepository,
    SqlProjectAuthorizer,
};
use sqlx::MySqlPool;
use std::sync::Arc;

const MAX_ROLE_NAME_LENGTH: usize = 100;
const MAX_DESCRIPTION_LENGTH: usize = 255;

fn validate_role_name(name: &str) -> Result<(), RoleServiceError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RoleServiceError::Validation(
            "role name cannot be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_ROLE_NAME_LENGTH {
        return Err(RoleServiceError::Validation(format!(
            "role name cannot exceed {MAX_ROLE_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_description(description: Option<&str>) -> Result<(), RoleServiceError> {
    match description {
        Some(d) if d.chars().count() > MAX_DESCRIPTION_LENGTH => Err(RoleServiceError::Validation(
            format!("description cannot exceed {MAX_DESCRIPTION_LENGTH} characters"),
        )),
        _ => Ok(()),
    }
}

fn validate_permission(permission: &ProjectPermission) -> Result<(), RoleServiceError> {
    match permission.first_invalid_level() {
        Some(field) => Err(RoleServiceError::Validation(format!(
            "{field} must be between 0 and {}",
            crate::entities::MAX_PERMISSION_LEVEL
        ))),
        None => Ok(()),
    }
}

fn role_from_row(row: RoleRow) -> Role {
    Role {
        id: row.id,
        name: row.name,
        description: row.description,
        project_id: row.project_id,
        create_by: row.create_by,
        create_time: row.create_time,
        update_by: row.update_by,
        update_time: row.update_time,
    }
}

fn member_from_row(row: RoleMemberRow) -> RoleMember {
    RoleMember {
        id: row.id,
        role_id: row.role_id,
        user: MemberUser {
            id: row.user_id,
            username: row.username,
            avatar: row.avatar,
        },
        create_by: row.create_by,
        create_time: row.create_time,
    }
}

fn role_project_from_row(row: RoleProjectRow) -> RoleProject {
    RoleProject {
        id: row.id,
        role_id: row.role_id,
        project_id: row.project_id,
        permission: ProjectPermission {
            viz_permission: row.viz_permission,
            widget_permission: row.widget_permission,
            view_permission: row.view_permission,
            source_permission: row.source_permission,
            schedule_permission: row.schedule_permission,
            share_permission: row.share_permission,
            download_permission: row.download_permission,
        },
        create_by: row.create_by,
        create_time: row.create_time,
        update_by: row.update_by,
        update_time: row.update_time,
    }
}

/// Repository `NotFound` on a write means the row disappeared after our read.
fn gone(entity: &'static str, id: i64) -> impl FnOnce(RoleRepositoryError) -> RoleServiceError {
    move |err| match err {
        RoleRepositoryError::NotFound => RoleServiceError::not_found(entity, id),
        other => RoleServiceError::from(other),
    }
}

/// Role administration: roles, their members and their project relations.
///
/// Every operation resolves the acting user's rights through the role's parent
/// project before touching storage.
#[derive(Clone)]
pub struct RoleService {
    pub role_repo: Arc<dyn RoleRepositoryTrait>,
    pub member_repo: Arc<dyn RoleMemberRepositoryTrait>,
    pub project_repo: Arc<dyn RoleProjectRepositoryTrait>,
    pub directory: Arc<dyn DirectoryRepositoryTrait>,
    pub authorizer: Arc<dyn ProjectAuthorizer>,
}

impl RoleService {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            role_repo: Arc::new(RoleRepository::new(pool.clone())),
            member_repo: Arc::new(RoleMemberRepository::new(pool.clone())),
            project_repo: Arc::new(RoleProjectRepository::new(pool.clone())),
            directory: Arc::new(DirectoryRepository::new(pool.clone())),
            authorizer: Arc::new(SqlProjectAuthorizer::new(pool)),
        }
    }

    #[cfg(any(test, feature = "testing"))]
    pub fn in_memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            role_repo: store.clone(),
            member_repo: store.clone(),
            project_repo: store.clone(),
            directory: store.clone(),
            authorizer: store,
        }
    }

    pub fn with_repos(
        role_repo: Arc<dyn RoleRepositoryTrait>,
        member_repo: Arc<dyn RoleMemberRepositoryTrait>,
        project_repo: Arc<dyn RoleProjectRepositoryTrait>,
        directory: Arc<dyn DirectoryRepositoryTrait>,
        authorizer: Arc<dyn ProjectAuthorizer>,
    ) -> Self {
        Self {
            role_repo,
            member_repo,
            project_repo,
            directory,
            authorizer,
        }
    }

    async fn ensure_project_admin(&self, project_id: i64, actor: i64) -> Result<(), RoleServiceError> {
        let allowed = self
            .authorizer
            .can_administer(actor, project_id)
            .await
            .map_err(RoleServiceError::from)?;
        if !allowed {
            tracing::warn!(user_id = actor, project_id, "user is not an administrator of the project");
            return Err(RoleServiceError::Unauthorized(format!(
                "you have not permission to manage roles of project (id: {project_id})"
            )));
        }
        Ok(())
    }

    async fn load_role(&self, role_id: i64) -> Result<RoleRow, RoleServiceError> {
        self.role_repo
            .get_role(role_id)
            .await
            .map_err(RoleServiceError::from)?
            .ok_or(RoleServiceError::not_found("role", role_id))
    }

    /// Loads the role and checks the actor administers its project.
    async fn authorized_role(&self, role_id: i64, actor: i64) -> Result<RoleRow, RoleServiceError> {
        let role = self.load_role(role_id).await?;
        self.ensure_project_admin(role.project_id, actor).await?;
        Ok(role)
    }

    /// Name lookups follow the column collation, so `owner` may come back for
    /// its own name in another casing.
    async fn ensure_name_available(
        &self,
        project_id: i64,
        name: &str,
        owner: Option<i64>,
    ) -> Result<(), RoleServiceError> {
        let existing = self
            .role_repo
            .get_role_by_name(project_id, name)
            .await
            .map_err(RoleServiceError::from)?;
        if existing.is_some_and(|role| Some(role.id) != owner) {
            tracing::warn!(project_id, name, "role name already exists in project");
            return Err(RoleServiceError::RoleNameAlreadyExists);
        }
        Ok(())
    }

    pub async fn create_role(&self, new_role: NewRole, actor: i64) -> Result<Role, RoleServiceError> {
        validate_role_name(&new_role.name)?;
        validate_description(new_role.description.as_deref())?;
        let name = new_role.name.trim().to_string();

        let project_exists = self
            .directory
            .project_exists(new_role.project_id)
            .await
            .map_err(RoleServiceError::from)?;
        if !project_exists {
            return Err(RoleServiceError::not_found("project", new_role.project_id));
        }
        self.ensure_project_admin(new_role.project_id, actor).await?;
        self.ensure_name_available(new_role.project_id, &name, None).await?;

        let row = self
            .role_repo
            .create_role(&NewRoleRecord {
                name,
                description: new_role.description,
                project_id: new_role.project_id,
                create_by: actor,
            })
            .await
            .map_err(RoleServiceError::from)?;
        tracing::info!(role_id = row.id, project_id = row.project_id, user_id = actor, "role created");
        Ok(role_from_row(row))
    }

    pub async fn delete_role(&self, role_id: i64, actor: i64) -> Result<(), RoleServiceError> {
        self.authorized_role(role_id, actor).await?;
        self.role_repo
            .delete_role(role_id)
            .await
            .map_err(gone("role", role_id))?;
        tracing::info!(role_id, user_id = actor, "role deleted");
        Ok(())
    }

    pub async fn update_role(&self, role_id: i64, update: RoleUpdate, actor: i64) -> Result<Role, RoleServiceError> {
        validate_role_name(&update.name)?;
        validate_description(update.description.as_deref())?;
        let name = update.name.trim().to_string();

        let role = self.authorized_role(role_id, actor).await?;
        if role.name != name {
            self.ensure_name_available(role.project_id, &name, Some(role_id)).await?;
        }

        let row = self
            .role_repo
            .update_role(
                role_id,
                &RoleChanges {
                    name,
                    description: update.description,
                    update_by: actor,
                },
            )
            .await
            .map_err(gone("role", role_id))?;
        tracing::info!(role_id, user_id = actor, "role updated");
        Ok(role_from_row(row))
    }

    pub async fn get_role(&self, role_id: i64, actor: i64) -> Result<Role, RoleServiceError> {
        let role = self.authorized_role(role_id, actor).await?;
        Ok(role_from_row(role))
    }

    pub async fn add_member(&self, role_id: i64, member_id: i64, actor: i64) -> Result<RoleMember, RoleServiceError> {
        self.authorized_role(role_id, actor).await?;

        let user_exists = self
            .directory
            .user_exists(member_id)
            .await
            .map_err(RoleServiceError::from)?;
        if !user_exists {
            return Err(RoleServiceError::not_found("user", member_id));
        }

        let existing = self
            .member_repo
            .get_by_role_and_user(role_id, member_id)
            .await
            .map_err(RoleServiceError::from)?;
        if existing.is_some() {
            tracing::warn!(role_id, member_id, "user is already a member of the role");
            return Err(RoleServiceError::MemberAlreadyExists);
        }

        let row = self
            .member_repo
            .add_member(role_id, member_id, actor)
            .await
            .map_err(RoleServiceError::from)?;
        tracing::info!(relation_id = row.id, role_id, member_id, user_id = actor, "role member added");
        Ok(member_from_row(row))
    }

    pub async fn delete_member(&self, relation_id: i64, actor: i64) -> Result<(), RoleServiceError> {
        let relation = self
            .member_repo
            .get_member(relation_id)
            .await
            .map_err(RoleServiceError::from)?
            .ok_or(RoleServiceError::not_found("role member relation", relation_id))?;
        self.authorized_role(relation.role_id, actor).await?;

        self.member_repo
            .delete_member(relation_id)
            .await
            .map_err(gone("role member relation", relation_id))?;
        tracing::info!(relation_id, role_id = relation.role_id, user_id = actor, "role member removed");
        Ok(())
    }

    pub async fn get_members(&self, role_id: i64, actor: i64) -> Result<Vec<RoleMember>, RoleServiceError> {
        self.authorized_role(role_id, actor).await?;
        let rows = self
            .member_repo
            .get_members(role_id)
            .await
            .map_err(RoleServiceError::from)?;
        Ok(rows.into_iter().map(member_from_row).collect())
    }

    /// Grants the role access to another project with the default permissions.
    ///
    /// The actor must administer both the role's own project and the target.
    pub async fn add_project(&self, role_id: i64, project_id: i64, actor: i64) -> Result<RoleProject, RoleServiceError> {
        self.authorized_role(role_id, actor).await?;

        let project_exists = self
            .directory
            .project_exists(project_id)
            .await
            .map_err(RoleServiceError::from)?;
        if !project_exists {
            return Err(RoleServiceError::not_found("project", project_id));
        }
        self.ensure_project_admin(project_id, actor).await?;

        let existing = self
            .project_repo
            .get_by_role_and_project(role_id, project_id)
            .await
            .map_err(RoleServiceError::from)?;
        if existing.is_some() {
            tracing::warn!(role_id, project_id, "role is already related to the project");
            return Err(RoleServiceError::ProjectAlreadyLinked);
        }

        let row = self
            .project_repo
            .add_project(role_id, project_id, &ProjectPermission::default(), actor)
            .await
            .map_err(RoleServiceError::from)?;
        tracing::info!(relation_id = row.id, role_id, project_id, user_id = actor, "role project added");
        Ok(role_project_from_row(row))
    }

    async fn load_project_relation(&self, relation_id: i64) -> Result<RoleProjectRow, RoleServiceError> {
        self.project_repo
            .get_relation(relation_id)
            .await
            .map_err(RoleServiceError::from)?
            .ok_or(RoleServiceError::not_found("role project relation", relation_id))
    }

    pub async fn delete_project(&self, relation_id: i64, actor: i64) -> Result<(), RoleServiceError> {
        let relation = self.load_project_relation(relation_id).await?;
        self.authorized_role(relation.role_id, actor).await?;

        self.project_repo
            .delete_project(relation_id)
            .await
            .map_err(gone("role project relation", relation_id))?;
        tracing::info!(relation_id, role_id = relation.role_id, user_id = actor, "role project removed");
        Ok(())
    }

    pub async fn update_project_permission(
        &self,
        relation_id: i64,
        permission: ProjectPermission,
        actor: i64,
    ) -> Result<RoleProject, RoleServiceError> {
        validate_permission(&permission)?;
        let relation = self.load_project_relation(relation_id).await?;
        self.authorized_role(relation.role_id, actor).await?;

        let row = self
            .project_repo
            .update_permission(relation_id, &permission, actor)
            .await
            .map_err(gone("role project relation", relation_id))?;
        tracing::info!(relation_id, role_id = relation.role_id, user_id = actor, "role project permission updated");
        Ok(role_project_from_row(row))
    }

    pub async fn get_projects(&self, role_id: i64, actor: i64) -> Result<Vec<RoleProject>, RoleServiceError> {
        self.authorized_role(role_id, actor).await?;
        let rows = self
            .project_repo
            .get_projects(role_id)
            .await
            .map_err(RoleServiceError::from)?;
        Ok(rows.into_iter().map(role_project_from_row).collect())
    }
}

//! In-memory store implementing every repository trait.
//!
//! Mirrors the MySQL schema's guarantees (per-project role names, unique
//! role/user and role/project pairs, cascading role deletes) so services can
//! be exercised without a database.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::entities::ProjectPermission;
use crate::repository::errors::RoleRepositoryError;
use crate::repository::models::{
    NewRoleRecord, RoleChanges, RoleMemberRow, RoleProjectRow, RoleRow,
};
use crate::repository::traits::{
    DirectoryRepositoryTrait, ProjectAuthorizer, RoleMemberRepositoryTrait,
    RoleProjectRepositoryTrait, RoleRepositoryTrait,
};

/// `roles.name` is collated case-insensitively, so "Analyst" and "ANALYST"
/// collide within a project.
fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[derive(Debug, Clone)]
struct StoredUser {
    username: String,
    avatar: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    users: HashMap<i64, StoredUser>,
    // project id -> creator
    projects: HashMap<i64, i64>,
    project_admins: HashSet<(i64, i64)>,
    roles: BTreeMap<i64, RoleRow>,
    members: BTreeMap<i64, (i64, i64, i64, chrono::DateTime<Utc>)>,
    relations: BTreeMap<i64, RoleProjectRow>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn member_row(&self, id: i64) -> Option<RoleMemberRow> {
        let (role_id, user_id, create_by, create_time) = *self.members.get(&id)?;
        let user = self.users.get(&user_id);
        Some(RoleMemberRow {
            id,
            role_id,
            user_id,
            username: user.map(|u| u.username.clone()),
            avatar: user.and_then(|u| u.avatar.clone()),
            create_by,
            create_time,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A poisoned lock only happens after a panicking test; keep serving.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn with_user(self, user_id: i64, username: &str) -> Self {
        self.lock().users.insert(
            user_id,
            StoredUser {
                username: username.to_string(),
                avatar: None,
            },
        );
        self
    }

    pub fn with_project(self, project_id: i64, creator_id: i64) -> Self {
        self.lock().projects.insert(project_id, creator_id);
        self
    }

    pub fn with_project_admin(self, project_id: i64, user_id: i64) -> Self {
        self.lock().project_admins.insert((project_id, user_id));
        self
    }

    pub fn role_count(&self) -> usize {
        self.lock().roles.len()
    }

    pub fn member_count(&self, role_id: i64) -> usize {
        self.lock()
            .members
            .values()
            .filter(|(r, ..)| *r == role_id)
            .count()
    }

    pub fn project_relation_count(&self, role_id: i64) -> usize {
        self.lock()
            .relations
            .values()
            .filter(|row| row.role_id == role_id)
            .count()
    }
}

#[async_trait]
impl RoleRepositoryTrait for MemoryStore {
    async fn create_role(&self, record: &NewRoleRecord) -> Result<RoleRow, RoleRepositoryError> {
        let mut state = self.lock();
        if state
            .roles
            .values()
            .any(|r| r.project_id == record.project_id && same_name(&r.name, &record.name))
        {
            return Err(RoleRepositoryError::RoleNameAlreadyExists);
        }
        let id = state.next_id();
        let row = RoleRow {
            id,
            name: record.name.clone(),
            description: record.description.clone(),
            project_id: record.project_id,
            create_by: record.create_by,
            create_time: Utc::now(),
            update_by: None,
            update_time: None,
        };
        state.roles.insert(id, row.clone());
        Ok(row)
    }

    async fn get_role(&self, role_id: i64) -> Result<Option<RoleRow>, RoleRepositoryError> {
        Ok(self.lock().roles.get(&role_id).cloned())
    }

    async fn get_role_by_name(&self, project_id: i64, name: &str) -> Result<Option<RoleRow>, RoleRepositoryError> {
        Ok(self
            .lock()
            .roles
            .values()
            .find(|r| r.project_id == project_id && same_name(&r.name, name))
            .cloned())
    }

    async fn update_role(&self, role_id: i64, changes: &RoleChanges) -> Result<RoleRow, RoleRepositoryError> {
        let mut state = self.lock();
        let project_id = state
            .roles
            .get(&role_id)
            .map(|r| r.project_id)
            .ok_or(RoleRepositoryError::NotFound)?;
        if state
            .roles
            .values()
            .any(|r| r.id != role_id && r.project_id == project_id && same_name(&r.name, &changes.name))
        {
            return Err(RoleRepositoryError::RoleNameAlreadyExists);
        }
        let row = state
            .roles
            .get_mut(&role_id)
            .ok_or(RoleRepositoryError::NotFound)?;
        row.name = changes.name.clone();
        row.description = changes.description.clone();
        row.update_by = Some(changes.update_by);
        row.update_time = Some(Utc::now());
        Ok(row.clone())
    }

    async fn delete_role(&self, role_id: i64) -> Result<(), RoleRepositoryError> {
        let mut state = self.lock();
        state
            .roles
            .remove(&role_id)
            .ok_or(RoleRepositoryError::NotFound)?;
        state.members.retain(|_, (r, ..)| *r != role_id);
        state.relations.retain(|_, row| row.role_id != role_id);
        Ok(())
    }
}

#[async_trait]
impl RoleMemberRepositoryTrait for MemoryStore {
    async fn add_member(&self, role_id: i64, user_id: i64, create_by: i64) -> Result<RoleMemberRow, RoleRepositoryError> {
        let mut state = self.lock();
        if state
            .members
            .values()
            .any(|(r, u, ..)| *r == role_id && *u == user_id)
        {
            return Err(RoleRepositoryError::MemberAlreadyExists);
        }
        let id = state.next_id();
        state
            .members
            .insert(id, (role_id, user_id, create_by, Utc::now()));
        state.member_row(id).ok_or(RoleRepositoryError::NotFound)
    }

    async fn get_member(&self, relation_id: i64) -> Result<Option<RoleMemberRow>, RoleRepositoryError> {
        Ok(self.lock().member_row(relation_id))
    }

    async fn get_by_role_and_user(&self, role_id: i64, user_id: i64) -> Result<Option<RoleMemberRow>, RoleRepositoryError> {
        let state = self.lock();
        let id = state
            .members
            .iter()
            .find(|(_, (r, u, ..))| *r == role_id && *u == user_id)
            .map(|(id, _)| *id);
        Ok(id.and_then(|id| state.member_row(id)))
    }

    async fn delete_member(&self, relation_id: i64) -> Result<(), RoleRepositoryError> {
        self.lock()
            .members
            .remove(&relation_id)
            .map(|_| ())
            .ok_or(RoleRepositoryError::NotFound)
    }

    async fn get_members(&self, role_id: i64) -> Result<Vec<RoleMemberRow>, RoleRepositoryError> {
        let state = self.lock();
        Ok(state
            .members
            .iter()
            .filter(|(_, (r, ..))| *r == role_id)
            .filter_map(|(id, _)| state.member_row(*id))
            .collect())
    }
}

#[async_trait]
impl RoleProjectRepositoryTrait for MemoryStore {
    async fn add_project(
        &self,
        role_id: i64,
        project_id: i64,
        permission: &ProjectPermission,
        create_by: i64,
    ) -> Result<RoleProjectRow, RoleRepositoryError> {
        let mut state = self.lock();
        if state
            .relations
            .values()
            .any(|row| row.role_id == role_id && row.project_id == project_id)
        {
            return Err(RoleRepositoryError::ProjectAlreadyLinked);
        }
        let id = state.next_id();
        let row = RoleProjectRow {
            id,
            role_id,
            project_id,
            viz_permission: permission.viz_permission,
            widget_permission: permission.widget_permission,
            view_permission: permission.view_permission,
            source_permission: permission.source_permission,
            schedule_permission: permission.schedule_permission,
            share_permission: permission.share_permission,
            download_permission: permission.download_permission,
            create_by,
            create_time: Utc::now(),
            update_by: None,
            update_time: None,
        };
        state.relations.insert(id, row.clone());
        Ok(row)
    }

    async fn get_relation(&self, relation_id: i64) -> Result<Option<RoleProjectRow>, RoleRepositoryError> {
        Ok(self.lock().relations.get(&relation_id).cloned())
    }

    async fn get_by_role_and_project(&self, role_id: i64, project_id: i64) -> Result<Option<RoleProjectRow>, RoleRepositoryError> {
        Ok(self
            .lock()
            .relations
            .values()
            .find(|row| row.role_id == role_id && row.project_id == project_id)
            .cloned())
    }

    async fn update_permission(
        &self,
        relation_id: i64,
        permission: &ProjectPermission,
        update_by: i64,
    ) -> Result<RoleProjectRow, RoleRepositoryError> {
        let mut state = self.lock();
        let row = state
            .relations
            .get_mut(&relation_id)
            .ok_or(RoleRepositoryError::NotFound)?;
        row.viz_permission = permission.viz_permission;
        row.widget_permission = permission.widget_permission;
        row.view_permission = permission.view_permission;
        row.source_permission = permission.source_permission;
        row.schedule_permission = permission.schedule_permission;
        row.share_permission = permission.share_permission;
        row.download_permission = permission.download_permission;
        row.update_by = Some(update_by);
        row.update_time = Some(Utc::now());
        Ok(row.clone())
    }

    async fn delete_project(&self, relation_id: i64) -> Result<(), RoleRepositoryError> {
        self.lock()
            .relations
            .remove(&relation_id)
            .map(|_| ())
            .ok_or(RoleRepositoryError::NotFound)
    }

    async fn get_projects(&self, role_id: i64) -> Result<Vec<RoleProjectRow>, RoleRepositoryError> {
        Ok(self
            .lock()
            .relations
            .values()
            .filter(|row| row.role_id == role_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DirectoryRepositoryTrait for MemoryStore {
    async fn user_exists(&self, user_id: i64) -> Result<bool, RoleRepositoryError> {
        Ok(self.lock().users.contains_key(&user_id))
    }

    async fn project_exists(&self, project_id: i64) -> Result<bool, RoleRepositoryError> {
        Ok(self.lock().projects.contains_key(&project_id))
    }
}

#[async_trait]
impl ProjectAuthorizer for MemoryStore {
    async fn can_administer(&self, user_id: i64, project_id: i64) -> Result<bool, RoleRepositoryError> {
        let state = self.lock();
        Ok(state.projects.get(&project_id) == Some(&user_id)
            || state.project_admins.contains(&(project_id, user_id)))
    }
}

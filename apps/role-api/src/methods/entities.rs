use chrono::{DateTime, Utc};
use role_lib::entities::{
    MemberUser, NewRole, ProjectPermission, Role, RoleMember, RoleProject, RoleUpdate,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleRequest {
    #[validate(length(min = 1, max = 100, message = "role name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(max = 255, message = "description cannot exceed 255 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Invalid project id"))]
    pub project_id: i64,
}

impl From<CreateRoleRequest> for NewRole {
    fn from(request: CreateRoleRequest) -> Self {
        NewRole {
            name: request.name,
            description: request.description,
            project_id: request.project_id,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    #[validate(length(min = 1, max = 100, message = "role name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(max = 255, message = "description cannot exceed 255 characters"))]
    pub description: Option<String>,
}

impl From<UpdateRoleRequest> for RoleUpdate {
    fn from(request: UpdateRoleRequest) -> Self {
        RoleUpdate {
            name: request.name,
            description: request.description,
        }
    }
}

/// Levels run from 0 (hidden) through 1 (read) and 2 (write) to 3 (delete).
#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema, Validate, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PermissionPayload {
    #[validate(range(max = 3, message = "vizPermission must be between 0 and 3"))]
    pub viz_permission: u8,
    #[validate(range(max = 3, message = "widgetPermission must be between 0 and 3"))]
    pub widget_permission: u8,
    #[validate(range(max = 3, message = "viewPermission must be between 0 and 3"))]
    pub view_permission: u8,
    #[validate(range(max = 3, message = "sourcePermission must be between 0 and 3"))]
    pub source_permission: u8,
    #[validate(range(max = 3, message = "schedulePermission must be between 0 and 3"))]
    pub schedule_permission: u8,
    pub share_permission: bool,
    pub download_permission: bool,
}

impl From<PermissionPayload> for ProjectPermission {
    fn from(p: PermissionPayload) -> Self {
        ProjectPermission {
            viz_permission: p.viz_permission,
            widget_permission: p.widget_permission,
            view_permission: p.view_permission,
            source_permission: p.source_permission,
            schedule_permission: p.schedule_permission,
            share_permission: p.share_permission,
            download_permission: p.download_permission,
        }
    }
}

impl From<ProjectPermission> for PermissionPayload {
    fn from(p: ProjectPermission) -> Self {
        PermissionPayload {
            viz_permission: p.viz_permission,
            widget_permission: p.widget_permission,
            view_permission: p.view_permission,
            source_permission: p.source_permission,
            schedule_permission: p.schedule_permission,
            share_permission: p.share_permission,
            download_permission: p.download_permission,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub project_id: i64,
    pub create_by: i64,
    pub create_time: DateTime<Utc>,
    pub update_by: Option<i64>,
    pub update_time: Option<DateTime<Utc>>,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        RoleResponse {
            id: role.id,
            name: role.name,
            description: role.description,
            project_id: role.project_id,
            create_by: role.create_by,
            create_time: role.create_time,
            update_by: role.update_by,
            update_time: role.update_time,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MemberUserResponse {
    pub id: i64,
    pub username: Option<String>,
    pub avatar: Option<String>,
}

impl From<MemberUser> for MemberUserResponse {
    fn from(user: MemberUser) -> Self {
        MemberUserResponse {
            id: user.id,
            username: user.username,
            avatar: user.avatar,
        }
    }
}

/// A role member relation; `id` is the relation id used to remove it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleMemberResponse {
    pub id: i64,
    pub role_id: i64,
    pub user: MemberUserResponse,
    pub create_by: i64,
    pub create_time: DateTime<Utc>,
}

impl From<RoleMember> for RoleMemberResponse {
    fn from(member: RoleMember) -> Self {
        RoleMemberResponse {
            id: member.id,
            role_id: member.role_id,
            user: member.user.into(),
            create_by: member.create_by,
            create_time: member.create_time,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleProjectResponse {
    pub id: i64,
    pub role_id: i64,
    pub project_id: i64,
    pub permission: PermissionPayload,
    pub create_by: i64,
    pub create_time: DateTime<Utc>,
    pub update_by: Option<i64>,
    pub update_time: Option<DateTime<Utc>>,
}

impl From<RoleProject> for RoleProjectResponse {
    fn from(relation: RoleProject) -> Self {
        RoleProjectResponse {
            id: relation.id,
            role_id: relation.role_id,
            project_id: relation.project_id,
            permission: relation.permission.into(),
            create_by: relation.create_by,
            create_time: relation.create_time,
            update_by: relation.update_by,
            update_time: relation.update_time,
        }
    }
}

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct RoleRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub project_id: i64,
    pub create_by: i64,
    pub create_time: DateTime<Utc>,
    pub update_by: Option<i64>,
    pub update_time: Option<DateTime<Utc>>,
}

/// Role member relation joined with the member's public profile.
#[derive(Debug, Clone, FromRow)]
pub struct RoleMemberRow {
    pub id: i64,
    pub role_id: i64,
    pub user_id: i64,
    pub username: Option<String>,
    pub avatar: Option<String>,
    pub create_by: i64,
    pub create_time: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct RoleProjectRow {
    pub id: i64,
    pub role_id: i64,
    pub project_id: i64,
    pub viz_permission: u8,
    pub widget_permission: u8,
    pub view_permission: u8,
    pub source_permission: u8,
    pub schedule_permission: u8,
    pub share_permission: bool,
    pub download_permission: bool,
    pub create_by: i64,
    pub create_time: DateTime<Utc>,
    pub update_by: Option<i64>,
    pub update_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoleRecord {
    pub name: String,
    pub description: Option<String>,
    pub project_id: i64,
    pub create_by: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleChanges {
    pub name: String,
    pub description: Option<String>,
    pub update_by: i64,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Highest permission level a role can hold on a project sub-resource.
///
/// Levels: 0 hidden, 1 read, 2 write, 3 delete.
pub const MAX_PERMISSION_LEVEL: u8 = 3;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub project_id: i64,
    pub create_by: i64,
    pub create_time: DateTime<Utc>,
    pub update_by: Option<i64>,
    pub update_time: Option<DateTime<Utc>>,
}

/// Input for creating a role inside a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    pub name: String,
    pub description: Option<String>,
    pub project_id: i64,
}

/// Full replacement of the mutable role fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleUpdate {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MemberUser {
    pub id: i64,
    pub username: Option<String>,
    pub avatar: Option<String>,
}

/// A role <-> user relation, addressed by its own id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoleMember {
    pub id: i64,
    pub role_id: i64,
    pub user: MemberUser,
    pub create_by: i64,
    pub create_time: DateTime<Utc>,
}

/// What a role may see and do inside a project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPermission {
    pub viz_permission: u8,
    pub widget_permission: u8,
    pub view_permission: u8,
    pub source_permission: u8,
    pub schedule_permission: u8,
    pub share_permission: bool,
    pub download_permission: bool,
}

impl Default for ProjectPermission {
    // New relations can read visualizations and nothing else.
    fn default() -> Self {
        Self {
            viz_permission: 1,
            widget_permission: 0,
            view_permission: 0,
            source_permission: 0,
            schedule_permission: 0,
            share_permission: false,
            download_permission: false,
        }
    }
}

impl ProjectPermission {
    /// Returns the name of the first level outside `0..=MAX_PERMISSION_LEVEL`.
    pub fn first_invalid_level(&self) -> Option<&'static str> {
        [
            ("vizPermission", self.viz_permission),
            ("widgetPermission", self.widget_permission),
            ("viewPermission", self.view_permission),
            ("sourcePermission", self.source_permission),
            ("schedulePermission", self.schedule_permission),
        ]
        .into_iter()
        .find(|(_, level)| *level > MAX_PERMISSION_LEVEL)
        .map(|(name, _)| name)
    }
}

/// A role <-> project relation with its permission payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoleProject {
    pub id: i64,
    pub role_id: i64,
    pub project_id: i64,
    pub permission: ProjectPermission,
    pub create_by: i64,
    pub create_time: DateTime<Utc>,
    pub update_by: Option<i64>,
    pub update_time: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_permission_is_within_range() {
        assert_eq!(ProjectPermission::default().first_invalid_level(), None);
    }

    #[test]
    fn reports_first_level_out_of_range() {
        let permission = ProjectPermission {
            view_permission: 4,
            schedule_permission: 9,
            ..ProjectPermission::default()
        };
        assert_eq!(permission.first_invalid_level(), Some("viewPermission"));
    }
}

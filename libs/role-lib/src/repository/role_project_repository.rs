use async_trait::async_trait;
use sqlx::{query, query_as, MySqlPool};

use crate::entities::ProjectPermission;
use crate::repository::errors::{map_sqlx_error, RoleRepositoryError};
use crate::repository::models::RoleProjectRow;
use crate::repository::traits::RoleProjectRepositoryTrait;

const SELECT_RELATION: &str = r#"
    SELECT id, role_id, project_id,
           viz_permission, widget_permission, view_permission, source_permission,
           schedule_permission, share_permission, download_permission,
           create_by, create_time, update_by, update_time
    FROM rel_role_project
"#;

#[derive(Debug, Clone)]
pub struct RoleProjectRepository {
    pub pool: MySqlPool,
}

impl RoleProjectRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleProjectRepositoryTrait for RoleProjectRepository {
    async fn add_project(
        &self,
        role_id: i64,
        project_id: i64,
        permission: &ProjectPermission,
        create_by: i64,
    ) -> Result<RoleProjectRow, RoleRepositoryError> {
        let result = query(
            r#"
            INSERT INTO rel_role_project (
                role_id, project_id,
                viz_permission, widget_permission, view_permission, source_permission,
                schedule_permission, share_permission, download_permission,
                create_by
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(role_id)
        .bind(project_id)
        .bind(permission.viz_permission)
        .bind(permission.widget_permission)
        .bind(permission.view_permission)
        .bind(permission.source_permission)
        .bind(permission.schedule_permission)
        .bind(permission.share_permission)
        .bind(permission.download_permission)
        .bind(create_by)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        self.get_relation(result.last_insert_id() as i64)
            .await?
            .ok_or(RoleRepositoryError::NotFound)
    }

    async fn get_relation(&self, relation_id: i64) -> Result<Option<RoleProjectRow>, RoleRepositoryError> {
        query_as::<_, RoleProjectRow>(&format!("{SELECT_RELATION} WHERE id = ?"))
            .bind(relation_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn get_by_role_and_project(&self, role_id: i64, project_id: i64) -> Result<Option<RoleProjectRow>, RoleRepositoryError> {
        query_as::<_, RoleProjectRow>(&format!(
            "{SELECT_RELATION} WHERE role_id = ? AND project_id = ?"
        ))
        .bind(role_id)
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    // Only the permission payload and the update audit columns change.
    async fn update_permission(
        &self,
        relation_id: i64,
        permission: &ProjectPermission,
        update_by: i64,
    ) -> Result<RoleProjectRow, RoleRepositoryError> {
        query(
            r#"
            UPDATE rel_role_project
            SET viz_permission = ?, widget_permission = ?, view_permission = ?,
                source_permission = ?, schedule_permission = ?,
                share_permission = ?, download_permission = ?,
                update_by = ?, update_time = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(permission.viz_permission)
        .bind(permission.widget_permission)
        .bind(permission.view_permission)
        .bind(permission.source_permission)
        .bind(permission.schedule_permission)
        .bind(permission.share_permission)
        .bind(permission.download_permission)
        .bind(update_by)
        .bind(relation_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        self.get_relation(relation_id)
            .await?
            .ok_or(RoleRepositoryError::NotFound)
    }

    async fn delete_project(&self, relation_id: i64) -> Result<(), RoleRepositoryError> {
        let result = query(
            r#"
            DELETE FROM rel_role_project WHERE id = ?
            "#,
        )
        .bind(relation_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RoleRepositoryError::NotFound);
        }
        Ok(())
    }

    async fn get_projects(&self, role_id: i64) -> Result<Vec<RoleProjectRow>, RoleRepositoryError> {
        query_as::<_, RoleProjectRow>(&format!("{SELECT_RELATION} WHERE role_id = ? ORDER BY id"))
            .bind(role_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }
}

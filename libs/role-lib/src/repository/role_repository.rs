use async_trait::async_trait;
use sqlx::{query, query_as, MySqlPool};

use crate::repository::errors::{map_sqlx_error, RoleRepositoryError};
use crate::repository::models::{NewRoleRecord, RoleChanges, RoleRow};
use crate::repository::traits::RoleRepositoryTrait;

const SELECT_ROLE: &str = r#"
    SELECT id, name, description, project_id, create_by, create_time, update_by, update_time
    FROM roles
"#;

#[derive(Debug, Clone)]
pub struct RoleRepository {
    pub pool: MySqlPool,
}

impl RoleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_role(&self, role_id: i64) -> Result<Option<RoleRow>, RoleRepositoryError> {
        query_as::<_, RoleRow>(&format!("{SELECT_ROLE} WHERE id = ?"))
            .bind(role_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl RoleRepositoryTrait for RoleRepository {
    async fn create_role(&self, record: &NewRoleRecord) -> Result<RoleRow, RoleRepositoryError> {
        let result = query(
            r#"
            INSERT INTO roles (name, description, project_id, create_by)
            VALUES (?, ?, ?, ?)
            "#
        )
        .bind(&record.name)
        .bind(&record.description)
        .bind(record.project_id)
        .bind(record.create_by)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        self.fetch_role(result.last_insert_id() as i64)
            .await?
            .ok_or(RoleRepositoryError::NotFound)
    }

    async fn get_role(&self, role_id: i64) -> Result<Option<RoleRow>, RoleRepositoryError> {
        self.fetch_role(role_id).await
    }

    async fn get_role_by_name(&self, project_id: i64, name: &str) -> Result<Option<RoleRow>, RoleRepositoryError> {
        query_as::<_, RoleRow>(&format!("{SELECT_ROLE} WHERE project_id = ? AND name = ?"))
            .bind(project_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn update_role(&self, role_id: i64, changes: &RoleChanges) -> Result<RoleRow, RoleRepositoryError> {
        query(
            r#"
            UPDATE roles
            SET name = ?, description = ?, update_by = ?, update_time = CURRENT_TIMESTAMP
            WHERE id = ?
            "#
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.update_by)
        .bind(role_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        self.fetch_role(role_id)
            .await?
            .ok_or(RoleRepositoryError::NotFound)
    }

    // Member and project relations go with the role through ON DELETE CASCADE.
    async fn delete_role(&self, role_id: i64) -> Result<(), RoleRepositoryError> {
        let result = query(
            r#"
            DELETE FROM roles WHERE id = ?
            "#
        )
        .bind(role_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RoleRepositoryError::NotFound);
        }
        Ok(())
    }
}

use async_trait::async_trait;
use sqlx::{query_scalar, MySqlPool};

use crate::repository::errors::{map_sqlx_error, RoleRepositoryError};
use crate::repository::traits::{DirectoryRepositoryTrait, ProjectAuthorizer};

/// Existence lookups on the platform's `users` and `projects` tables.
#[derive(Debug, Clone)]
pub struct DirectoryRepository {
    pub pool: MySqlPool,
}

impl DirectoryRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DirectoryRepositoryTrait for DirectoryRepository {
    async fn user_exists(&self, user_id: i64) -> Result<bool, RoleRepositoryError> {
        let found: Option<i64> = query_scalar("SELECT id FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(found.is_some())
    }

    async fn project_exists(&self, project_id: i64) -> Result<bool, RoleRepositoryError> {
        let found: Option<i64> = query_scalar("SELECT id FROM projects WHERE id = ?")
            .bind(project_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(found.is_some())
    }
}

/// Grants project administration to the project's creator and to users listed
/// in `rel_project_admin`.
#[derive(Debug, Clone)]
pub struct SqlProjectAuthorizer {
    pub pool: MySqlPool,
}

impl SqlProjectAuthorizer {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectAuthorizer for SqlProjectAuthorizer {
    async fn can_administer(&self, user_id: i64, project_id: i64) -> Result<bool, RoleRepositoryError> {
        let allowed: i64 = query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM projects p
                WHERE p.id = ?
                  AND (p.user_id = ?
                       OR EXISTS (SELECT 1 FROM rel_project_admin rpa
                                  WHERE rpa.project_id = p.id AND rpa.user_id = ?))
            )
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(allowed == 1)
    }
}

use async_trait::async_trait;
use sqlx::{query, query_as, MySqlPool};

use crate::repository::errors::{map_sqlx_error, RoleRepositoryError};
use crate::repository::models::RoleMemberRow;
use crate::repository::traits::RoleMemberRepositoryTrait;

// Members without a display name fall back to their login name.
const SELECT_MEMBER: &str = r#"
    SELECT rru.id, rru.role_id, rru.user_id,
           COALESCE(u.name, u.username) AS username, u.avatar,
           rru.create_by, rru.create_time
    FROM rel_role_user rru
    LEFT JOIN users u ON u.id = rru.user_id
"#;

#[derive(Debug, Clone)]
pub struct RoleMemberRepository {
    pub pool: MySqlPool,
}

impl RoleMemberRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleMemberRepositoryTrait for RoleMemberRepository {
    async fn add_member(&self, role_id: i64, user_id: i64, create_by: i64) -> Result<RoleMemberRow, RoleRepositoryError> {
        let result = query(
            r#"
            INSERT INTO rel_role_user (role_id, user_id, create_by)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(role_id)
        .bind(user_id)
        .bind(create_by)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        self.get_member(result.last_insert_id() as i64)
            .await?
            .ok_or(RoleRepositoryError::NotFound)
    }

    async fn get_member(&self, relation_id: i64) -> Result<Option<RoleMemberRow>, RoleRepositoryError> {
        query_as::<_, RoleMemberRow>(&format!("{SELECT_MEMBER} WHERE rru.id = ?"))
            .bind(relation_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn get_by_role_and_user(&self, role_id: i64, user_id: i64) -> Result<Option<RoleMemberRow>, RoleRepositoryError> {
        query_as::<_, RoleMemberRow>(&format!(
            "{SELECT_MEMBER} WHERE rru.role_id = ? AND rru.user_id = ?"
        ))
        .bind(role_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn delete_member(&self, relation_id: i64) -> Result<(), RoleRepositoryError> {
        let result = query(
            r#"
            DELETE FROM rel_role_user WHERE id = ?
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

    async fn get_members(&self, role_id: i64) -> Result<Vec<RoleMemberRow>, RoleRepositoryError> {
        query_as::<_, RoleMemberRow>(&format!("{SELECT_MEMBER} WHERE rru.role_id = ? ORDER BY rru.id"))
            .bind(role_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }
}

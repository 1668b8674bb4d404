use crate::repository::errors::RoleRepositoryError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RoleServiceError {
    #[error("role name already exists in this project")]
    RoleNameAlreadyExists,

    #[error("user is already a member of this role")]
    MemberAlreadyExists,

    #[error("role is already related to this project")]
    ProjectAlreadyLinked,

    #[error("{entity} (id: {id}) is not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{0}")]
    Unauthorized(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl RoleServiceError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        RoleServiceError::NotFound { entity, id }
    }
}

impl From<RoleRepositoryError> for RoleServiceError {
    fn from(err: RoleRepositoryError) -> Self {
        match err {
            RoleRepositoryError::RoleNameAlreadyExists => RoleServiceError::RoleNameAlreadyExists,
            RoleRepositoryError::MemberAlreadyExists => RoleServiceError::MemberAlreadyExists,
            RoleRepositoryError::ProjectAlreadyLinked => RoleServiceError::ProjectAlreadyLinked,
            // Callers that can name the missing row map this themselves.
            RoleRepositoryError::NotFound => {
                RoleServiceError::Internal(anyhow::anyhow!("row vanished during update"))
            }
            RoleRepositoryError::Sqlx(e) => RoleServiceError::Internal(e.into()),
        }
    }
}

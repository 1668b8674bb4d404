#[derive(Debug)]
pub enum RoleRepositoryError {
    RoleNameAlreadyExists,
    MemberAlreadyExists,
    ProjectAlreadyLinked,
    NotFound,
    Sqlx(sqlx::Error),
}

impl std::fmt::Display for RoleRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleRepositoryError::RoleNameAlreadyExists => write!(f, "role name already exists"),
            RoleRepositoryError::MemberAlreadyExists => write!(f, "role member already exists"),
            RoleRepositoryError::ProjectAlreadyLinked => write!(f, "role project already exists"),
            RoleRepositoryError::NotFound => write!(f, "not found"),
            RoleRepositoryError::Sqlx(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RoleRepositoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RoleRepositoryError::Sqlx(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for RoleRepositoryError {
    fn from(value: sqlx::Error) -> Self {
        map_sqlx_error(value)
    }
}

const ROLE_NAME_UNIQUE: &str = "role_project_name_unique";
const ROLE_USER_UNIQUE: &str = "rel_role_user_unique";
const ROLE_PROJECT_UNIQUE: &str = "rel_role_project_unique";

fn extract_mysql_key_name(msg_lower: &str) -> Option<String> {
    // msg_lower is already lowercased
    let marker = "for key '";
    let start = msg_lower.find(marker)? + marker.len();
    let rest = &msg_lower[start..];
    let end = rest.find('\'')?;
    Some(rest[..end].to_string())
}

/// Maps a MySQL duplicate-entry message onto the unique key it violated.
///
/// MySQL reports `Duplicate entry '7-Analyst' for key 'roles.role_project_name_unique'`;
/// the table prefix is optional depending on the server version.
fn classify_duplicate_key(msg_lower: &str) -> Option<RoleRepositoryError> {
    if !(msg_lower.contains("duplicate entry") && msg_lower.contains("for key")) {
        return None;
    }
    let key = extract_mysql_key_name(msg_lower).unwrap_or_default();

    if key.ends_with(ROLE_NAME_UNIQUE) {
        return Some(RoleRepositoryError::RoleNameAlreadyExists);
    }
    if key.ends_with(ROLE_USER_UNIQUE) {
        return Some(RoleRepositoryError::MemberAlreadyExists);
    }
    if key.ends_with(ROLE_PROJECT_UNIQUE) {
        return Some(RoleRepositoryError::ProjectAlreadyLinked);
    }
    None
}

pub fn map_sqlx_error(err: sqlx::Error) -> RoleRepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        // Integrity constraint violations surface as SQLSTATE 23000.
        if db_err.code().as_deref() == Some("23000") {
            let msg = db_err.message().to_lowercase();
            if let Some(mapped) = classify_duplicate_key(&msg) {
                return mapped;
            }
        }
    }

    RoleRepositoryError::Sqlx(err)
}

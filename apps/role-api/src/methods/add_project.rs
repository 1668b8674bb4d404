use axum::extract::{Path, State};

use crate::auth::AuthUser;
use crate::error::{handle_service_error, parse_id, ApiError};
use crate::methods::entities::RoleProjectResponse;
use crate::methods::routes::ROLE_PROJECT_PATH;
use crate::response::{Payload, ResultMap};
use crate::state::AppState;

/// The new relation starts with read access to visualizations only.
#[utoipa::path(
    post,
    path = ROLE_PROJECT_PATH,
    tag = "role projects",
    params(
        ("id" = i64, Path, description = "Role id"),
        ("project_id" = i64, Path, description = "Project to grant the role access to")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Project relation created", body = ResultMap<RoleProjectResponse>),
        (status = 400, description = "Invalid role or project id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not an administrator of both projects"),
        (status = 404, description = "Role or project not found"),
        (status = 409, description = "Role is already related to the project"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn add_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, project_id)): Path<(String, String)>,
) -> ResultMap<RoleProjectResponse> {
    user.reply(execute(&state, &user, &id, &project_id).await)
}

async fn execute(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    project_id: &str,
) -> Result<Payload<RoleProjectResponse>, ApiError> {
    let role_id = parse_id(id, ApiError::invalid_role_id)?;
    let project_id = parse_id(project_id, ApiError::invalid_project_id)?;

    let relation = state
        .role_service
        .add_project(role_id, project_id, user.id)
        .await
        .map_err(|e| handle_service_error(e, &state.env, "add_project"))?;

    Ok(Payload::One(RoleProjectResponse::from(relation)))
}

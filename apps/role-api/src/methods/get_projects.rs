use axum::extract::{Path, State};

use crate::auth::AuthUser;
use crate::error::{handle_service_error, parse_id, ApiError};
use crate::methods::entities::RoleProjectResponse;
use crate::methods::routes::ROLE_PROJECTS_PATH;
use crate::response::{Payload, ResultMap};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = ROLE_PROJECTS_PATH,
    tag = "role projects",
    params(
        ("id" = i64, Path, description = "Role id")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Project relations of the role in `payloads`", body = ResultMap<RoleProjectResponse>),
        (status = 400, description = "Invalid role id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not an administrator of the role's project"),
        (status = 404, description = "Role not found"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn get_projects(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ResultMap<RoleProjectResponse> {
    user.reply(execute(&state, &user, &id).await)
}

async fn execute(state: &AppState, user: &AuthUser, id: &str) -> Result<Payload<RoleProjectResponse>, ApiError> {
    let role_id = parse_id(id, ApiError::invalid_role_id)?;

    state
        .role_service
        .get_projects(role_id, user.id)
        .await
        .map(|relations| Payload::Many(relations.into_iter().map(RoleProjectResponse::from).collect()))
        .map_err(|e| handle_service_error(e, &state.env, "get_projects"))
}

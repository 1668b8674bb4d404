use axum::extract::{Path, State};

use crate::auth::AuthUser;
use crate::error::{handle_service_error, parse_id, ApiError};
use crate::methods::entities::RoleResponse;
use crate::methods::routes::ROLES_BY_ID_PATH;
use crate::response::{Payload, ResultMap};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = ROLES_BY_ID_PATH,
    tag = "roles",
    params(
        ("id" = i64, Path, description = "Role id")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Role found", body = ResultMap<RoleResponse>),
        (status = 400, description = "Invalid role id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not an administrator of the role's project"),
        (status = 404, description = "Role not found"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn get_role(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ResultMap<RoleResponse> {
    user.reply(execute(&state, &user, &id).await)
}

async fn execute(state: &AppState, user: &AuthUser, id: &str) -> Result<Payload<RoleResponse>, ApiError> {
    let role_id = parse_id(id, ApiError::invalid_role_id)?;

    state
        .role_service
        .get_role(role_id, user.id)
        .await
        .map(|role| Payload::One(RoleResponse::from(role)))
        .map_err(|e| handle_service_error(e, &state.env, "get_role"))
}

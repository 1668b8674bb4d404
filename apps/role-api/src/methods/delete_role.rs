use axum::extract::{Path, State};

use crate::auth::AuthUser;
use crate::error::{handle_service_error, parse_id, ApiError};
use crate::methods::routes::ROLES_BY_ID_PATH;
use crate::response::{NoPayload, Payload, ResultMap};
use crate::state::AppState;

/// Deleting a role also removes its member and project relations.
#[utoipa::path(
    delete,
    path = ROLES_BY_ID_PATH,
    tag = "roles",
    params(
        ("id" = i64, Path, description = "Role id")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Role deleted", body = ResultMap<NoPayload>),
        (status = 400, description = "Invalid role id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not an administrator of the role's project"),
        (status = 404, description = "Role not found"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn delete_role(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ResultMap<NoPayload> {
    user.reply(execute(&state, &user, &id).await)
}

async fn execute(state: &AppState, user: &AuthUser, id: &str) -> Result<Payload<NoPayload>, ApiError> {
    let role_id = parse_id(id, ApiError::invalid_role_id)?;

    state
        .role_service
        .delete_role(role_id, user.id)
        .await
        .map_err(|e| handle_service_error(e, &state.env, "delete_role"))?;

    Ok(Payload::Empty)
}

use axum::extract::{rejection::JsonRejection, Path, State};
use axum::Json;

use crate::auth::AuthUser;
use crate::error::{handle_service_error, parse_id, validated_body, ApiError};
use crate::methods::entities::{RoleResponse, UpdateRoleRequest};
use crate::methods::routes::ROLES_BY_ID_PATH;
use crate::response::{Payload, ResultMap};
use crate::state::AppState;

#[utoipa::path(
    put,
    path = ROLES_BY_ID_PATH,
    tag = "roles",
    params(
        ("id" = i64, Path, description = "Role id")
    ),
    request_body = UpdateRoleRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Role updated", body = ResultMap<RoleResponse>),
        (status = 400, description = "Invalid role id or validation error"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not an administrator of the role's project"),
        (status = 404, description = "Role not found"),
        (status = 409, description = "Role name already exists in the project"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn update_role(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    body: Result<Json<UpdateRoleRequest>, JsonRejection>,
) -> ResultMap<RoleResponse> {
    user.reply(execute(&state, &user, &id, body).await)
}

async fn execute(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    body: Result<Json<UpdateRoleRequest>, JsonRejection>,
) -> Result<Payload<RoleResponse>, ApiError> {
    let role_id = parse_id(id, ApiError::invalid_role_id)?;
    let request = validated_body(body)?;

    let role = state
        .role_service
        .update_role(role_id, request.into(), user.id)
        .await
        .map_err(|e| handle_service_error(e, &state.env, "update_role"))?;

    Ok(Payload::One(RoleResponse::from(role)))
}

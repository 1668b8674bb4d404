use axum::extract::{rejection::JsonRejection, State};
use axum::Json;

use crate::auth::AuthUser;
use crate::error::{handle_service_error, validated_body, ApiError};
use crate::methods::entities::{CreateRoleRequest, RoleResponse};
use crate::methods::routes::ROLES_PATH;
use crate::response::{Payload, ResultMap};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = ROLES_PATH,
    tag = "roles",
    request_body = CreateRoleRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Role created", body = ResultMap<RoleResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not an administrator of the project"),
        (status = 404, description = "Project not found"),
        (status = 409, description = "Role name already exists in the project"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn create_role(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<CreateRoleRequest>, JsonRejection>,
) -> ResultMap<RoleResponse> {
    user.reply(execute(&state, &user, body).await)
}

async fn execute(
    state: &AppState,
    user: &AuthUser,
    body: Result<Json<CreateRoleRequest>, JsonRejection>,
) -> Result<Payload<RoleResponse>, ApiError> {
    let request = validated_body(body)?;

    let role = state
        .role_service
        .create_role(request.into(), user.id)
        .await
        .map_err(|e| handle_service_error(e, &state.env, "create_role"))?;

    Ok(Payload::One(RoleResponse::from(role)))
}

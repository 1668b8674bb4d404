use axum::extract::{rejection::JsonRejection, Path, State};
use axum::Json;

use crate::auth::AuthUser;
use crate::error::{handle_service_error, parse_id, validated_body, ApiError};
use crate::methods::entities::{PermissionPayload, RoleProjectResponse};
use crate::methods::routes::ROLE_PROJECT_RELATION_PATH;
use crate::response::{Payload, ResultMap};
use crate::state::AppState;

/// Replaces the permission payload of a relation. Ids and creation audit stay put.
#[utoipa::path(
    put,
    path = ROLE_PROJECT_RELATION_PATH,
    tag = "role projects",
    params(
        ("relation_id" = i64, Path, description = "Project relation id")
    ),
    request_body = PermissionPayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Permission updated", body = ResultMap<RoleProjectResponse>),
        (status = 400, description = "Invalid relation id or permission level"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not an administrator of the role's project"),
        (status = 404, description = "Relation not found"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn update_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(relation_id): Path<String>,
    body: Result<Json<PermissionPayload>, JsonRejection>,
) -> ResultMap<RoleProjectResponse> {
    user.reply(execute(&state, &user, &relation_id, body).await)
}

async fn execute(
    state: &AppState,
    user: &AuthUser,
    relation_id: &str,
    body: Result<Json<PermissionPayload>, JsonRejection>,
) -> Result<Payload<RoleProjectResponse>, ApiError> {
    let relation_id = parse_id(relation_id, ApiError::invalid_relation_id)?;
    let permission = validated_body(body)?;

    let relation = state
        .role_service
        .update_project_permission(relation_id, permission.into(), user.id)
        .await
        .map_err(|e| handle_service_error(e, &state.env, "update_project"))?;

    Ok(Payload::One(RoleProjectResponse::from(relation)))
}

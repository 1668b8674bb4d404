use axum::extract::{Path, State};

use crate::auth::AuthUser;
use crate::error::{handle_service_error, parse_id, ApiError};
use crate::methods::entities::RoleMemberResponse;
use crate::methods::routes::ROLE_MEMBERS_PATH;
use crate::response::{Payload, ResultMap};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = ROLE_MEMBERS_PATH,
    tag = "role members",
    params(
        ("id" = i64, Path, description = "Role id")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Member relations of the role in `payloads`", body = ResultMap<RoleMemberResponse>),
        (status = 400, description = "Invalid role id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not an administrator of the role's project"),
        (status = 404, description = "Role not found"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn get_members(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ResultMap<RoleMemberResponse> {
    user.reply(execute(&state, &user, &id).await)
}

async fn execute(state: &AppState, user: &AuthUser, id: &str) -> Result<Payload<RoleMemberResponse>, ApiError> {
    let role_id = parse_id(id, ApiError::invalid_role_id)?;

    let members = state
        .role_service
        .get_members(role_id, user.id)
        .await
        .map_err(|e| handle_service_error(e, &state.env, "get_members"))?;

    Ok(Payload::Many(members.into_iter().map(RoleMemberResponse::from).collect()))
}

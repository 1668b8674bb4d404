use axum::extract::{Path, State};

use crate::auth::AuthUser;
use crate::error::{handle_service_error, parse_id, ApiError};
use crate::methods::entities::RoleMemberResponse;
use crate::methods::routes::ROLE_MEMBER_PATH;
use crate::response::{Payload, ResultMap};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = ROLE_MEMBER_PATH,
    tag = "role members",
    params(
        ("id" = i64, Path, description = "Role id"),
        ("member_id" = i64, Path, description = "User id of the new member")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Member relation created", body = ResultMap<RoleMemberResponse>),
        (status = 400, description = "Invalid role or member id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not an administrator of the role's project"),
        (status = 404, description = "Role or user not found"),
        (status = 409, description = "User is already a member of the role"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn add_member(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, member_id)): Path<(String, String)>,
) -> ResultMap<RoleMemberResponse> {
    user.reply(execute(&state, &user, &id, &member_id).await)
}

async fn execute(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    member_id: &str,
) -> Result<Payload<RoleMemberResponse>, ApiError> {
    let role_id = parse_id(id, ApiError::invalid_role_id)?;
    let member_id = parse_id(member_id, ApiError::invalid_member_id)?;

    let member = state
        .role_service
        .add_member(role_id, member_id, user.id)
        .await
        .map_err(|e| handle_service_error(e, &state.env, "add_member"))?;

    Ok(Payload::One(RoleMemberResponse::from(member)))
}

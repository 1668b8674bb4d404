use axum::extract::{Path, State};

use crate::auth::AuthUser;
use crate::error::{handle_service_error, parse_id, ApiError};
use crate::methods::routes::ROLE_PROJECT_RELATION_PATH;
use crate::response::{NoPayload, Payload, ResultMap};
use crate::state::AppState;

#[utoipa::path(
    delete,
    path = ROLE_PROJECT_RELATION_PATH,
    tag = "role projects",
    params(
        ("relation_id" = i64, Path, description = "Project relation id")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Project relation deleted", body = ResultMap<NoPayload>),
        (status = 400, description = "Invalid relation id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not an administrator of the role's project"),
        (status = 404, description = "Relation not found"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn delete_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(relation_id): Path<String>,
) -> ResultMap<NoPayload> {
    user.reply(execute(&state, &user, &relation_id).await)
}

async fn execute(state: &AppState, user: &AuthUser, relation_id: &str) -> Result<Payload<NoPayload>, ApiError> {
    let relation_id = parse_id(relation_id, ApiError::invalid_relation_id)?;

    state
        .role_service
        .delete_project(relation_id, user.id)
        .await
        .map_err(|e| handle_service_error(e, &state.env, "delete_project"))?;

    Ok(Payload::Empty)
}

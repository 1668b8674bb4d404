use crate::methods::routes::SERVICE_HEALTH_PATH;

#[utoipa::path(
    get,
    path = SERVICE_HEALTH_PATH,
    tag = "health",
    responses(
        (status = 200, description = "System is healthy", body = String),
    )
)]
pub async fn health_check() -> &'static str {
    "OK"
}

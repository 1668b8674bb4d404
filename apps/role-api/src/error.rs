use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use role_lib::errors_service::RoleServiceError;
use validator::{Validate, ValidationErrors};

use crate::response::{NoPayload, ResultMap};

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// The caller could not be authenticated.
    Unauthorized(String),
    /// The caller is authenticated but may not manage the target.
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl ApiError {
    pub fn invalid_role_id() -> Self {
        ApiError::BadRequest("Invalid role id".to_string())
    }

    pub fn invalid_member_id() -> Self {
        ApiError::BadRequest("Invalid member id".to_string())
    }

    pub fn invalid_project_id() -> Self {
        ApiError::BadRequest("Invalid project id".to_string())
    }

    pub fn invalid_relation_id() -> Self {
        ApiError::BadRequest("Invalid relation id".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

/// Errors raised before the caller is known carry no refreshed token.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body: ResultMap<NoPayload> = ResultMap::failure(&self, None);
        (self.status(), Json(body)).into_response()
    }
}

impl From<RoleServiceError> for ApiError {
    fn from(err: RoleServiceError) -> Self {
        match err {
            RoleServiceError::Validation(msg) => ApiError::BadRequest(msg),
            RoleServiceError::Unauthorized(msg) => ApiError::Forbidden(msg),
            RoleServiceError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            RoleServiceError::RoleNameAlreadyExists
            | RoleServiceError::MemberAlreadyExists
            | RoleServiceError::ProjectAlreadyLinked => ApiError::Conflict(err.to_string()),
            RoleServiceError::Internal(err) => ApiError::Internal(err.to_string()),
            _ => ApiError::Internal("unexpected error".to_string()),
        }
    }
}

/// Check if environment is production-like (prod, prod01, prod02, etc.)
pub fn is_prod_like(env: &str) -> bool {
    env.to_lowercase().starts_with("prod")
}

/// Converts a service error to an ApiError, logging internal errors.
/// In production, internal error details are hidden.
pub fn handle_service_error(err: RoleServiceError, env: &str, operation: &str) -> ApiError {
    match &err {
        RoleServiceError::Internal(_) => {
            tracing::error!(env = %env, error = ?err, operation = %operation, "service error");
            if is_prod_like(env) {
                ApiError::Internal("internal server error".to_string())
            } else {
                ApiError::from(err)
            }
        }
        _ => ApiError::from(err),
    }
}

/// Path ids must be positive integers.
pub fn parse_id(raw: &str, invalid: fn() -> ApiError) -> Result<i64, ApiError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(invalid()),
    }
}

/// Message of the first failing field, fields taken in name order.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));
    fields
        .into_iter()
        .find_map(|(field, errs)| {
            errs.first().map(|e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid ({})", e.code),
            })
        })
        .unwrap_or_else(|| "invalid request body".to_string())
}

/// Unwraps a JSON body and runs its declared field checks.
pub fn validated_body<T: Validate>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    let Json(value) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    value
        .validate()
        .map_err(|errors| ApiError::BadRequest(first_validation_message(&errors)))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_only_positive_integers() {
        assert_eq!(parse_id("42", ApiError::invalid_role_id).unwrap(), 42);
        for raw in ["0", "-3", "abc", "", "1.5", "99999999999999999999"] {
            let err = parse_id(raw, ApiError::invalid_role_id).unwrap_err();
            assert_eq!(err.message(), "Invalid role id", "input {raw:?}");
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (RoleServiceError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (RoleServiceError::not_found("role", 3), StatusCode::NOT_FOUND),
            (RoleServiceError::Unauthorized("no".into()), StatusCode::FORBIDDEN),
            (RoleServiceError::MemberAlreadyExists, StatusCode::CONFLICT),
            (RoleServiceError::ProjectAlreadyLinked, StatusCode::CONFLICT),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn internal_details_hidden_in_prod() {
        let err = RoleServiceError::Internal(anyhow::anyhow!("connection reset"));
        assert_eq!(handle_service_error(err, "prod01", "test").message(), "internal server error");

        let err = RoleServiceError::Internal(anyhow::anyhow!("connection reset"));
        assert!(handle_service_error(err, "local", "test").message().contains("connection reset"));
    }
}

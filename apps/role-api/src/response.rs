use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;

pub const SUCCESS_MSG: &str = "Success";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResponseHeader {
    /// Mirrors the HTTP status code.
    pub code: u16,
    pub msg: String,
    /// Renewed bearer token, present whenever the caller was authenticated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Placeholder payload type for envelopes that never carry one.
#[derive(Debug, Serialize, ToSchema)]
pub struct NoPayload {}

/// What a successful operation hands back to the envelope.
#[derive(Debug)]
pub enum Payload<T> {
    Empty,
    One(T),
    Many(Vec<T>),
}

/// The envelope every endpoint answers with.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResultMap<T> {
    pub header: ResponseHeader,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payloads: Option<Vec<T>>,
}

impl<T> ResultMap<T> {
    pub fn success(payload: Payload<T>, token: Option<String>) -> Self {
        let (payload, payloads) = match payload {
            Payload::Empty => (None, None),
            Payload::One(item) => (Some(item), None),
            Payload::Many(items) => (None, Some(items)),
        };
        Self {
            header: ResponseHeader {
                code: StatusCode::OK.as_u16(),
                msg: SUCCESS_MSG.to_string(),
                token,
            },
            payload,
            payloads,
        }
    }

    pub fn failure(err: &ApiError, token: Option<String>) -> Self {
        Self {
            header: ResponseHeader {
                code: err.status().as_u16(),
                msg: err.message().to_string(),
                token,
            },
            payload: None,
            payloads: None,
        }
    }

    pub fn from_result(result: Result<Payload<T>, ApiError>, token: Option<String>) -> Self {
        match result {
            Ok(payload) => Self::success(payload, token),
            Err(err) => Self::failure(&err, token),
        }
    }
}

impl<T: Serialize> IntoResponse for ResultMap<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.header.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_success_omits_payloads() {
        let map: ResultMap<NoPayload> = ResultMap::success(Payload::Empty, Some("t".to_string()));
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["header"]["code"], 200);
        assert_eq!(json["header"]["msg"], "Success");
        assert_eq!(json["header"]["token"], "t");
        assert!(json.get("payload").is_none());
        assert!(json.get("payloads").is_none());
    }

    #[test]
    fn empty_list_is_still_a_list() {
        let map: ResultMap<u8> = ResultMap::success(Payload::Many(vec![]), None);
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["payloads"], serde_json::json!([]));
        assert!(json["header"].get("token").is_none());
    }

    #[test]
    fn failure_code_follows_error() {
        let err = ApiError::Conflict("role name already exists".to_string());
        let map: ResultMap<u8> = ResultMap::failure(&err, None);
        assert_eq!(map.header.code, 409);
        assert_eq!(map.header.msg, "role name already exists");
    }
}

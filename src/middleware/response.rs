use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Status line carried by every envelope the directory emits
pub const HANDLED_STATUS: &str = "Successfully processed request.";

/// Wire shape of a successful response: `{"status": ..., "data": ...}`.
/// An empty envelope omits `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn handled_with(data: T) -> Self {
        Self {
            status: HANDLED_STATUS.to_string(),
            data: Some(data),
        }
    }

    pub fn handled() -> Self {
        Self {
            status: HANDLED_STATUS.to_string(),
            data: None,
        }
    }
}

/// Wrapper for API responses that automatically adds the envelope
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
    pub status_code: Option<StatusCode>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response with default 200 status
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            status_code: None,
        }
    }

    /// Empty envelope with the given status, used for absent lookup targets
    pub fn empty(status_code: StatusCode) -> Self {
        Self {
            data: None,
            status_code: Some(status_code),
        }
    }

    pub fn not_found() -> Self {
        Self::empty(StatusCode::NOT_FOUND)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        let data_value = match self.data.map(|data| serde_json::to_value(&data)).transpose() {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": true,
                        "message": "Failed to serialize response data",
                        "code": "INTERNAL_SERVER_ERROR"
                    })),
                )
                    .into_response();
            }
        };

        let envelope = match data_value {
            Some(value) => Envelope::handled_with(value),
            None => Envelope::handled(),
        };

        (status, Json(envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_envelope_has_no_data_key() {
        let value = serde_json::to_value(Envelope::<u32>::handled()).unwrap();
        assert_eq!(value, json!({ "status": HANDLED_STATUS }));
    }

    #[test]
    fn envelope_decodes_without_status() {
        let envelope: Envelope<bool> = serde_json::from_value(json!({ "data": true })).unwrap();
        assert_eq!(envelope.data, Some(true));
        assert!(envelope.status.is_empty());
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Record {
        name: String,
    }

    #[test]
    fn envelope_decodes_payloads_without_default() {
        let empty: Envelope<Record> = serde_json::from_value(json!({ "status": HANDLED_STATUS })).unwrap();
        assert_eq!(empty.data, None);

        let full: Envelope<Record> =
            serde_json::from_value(json!({ "status": HANDLED_STATUS, "data": { "name": "a" } })).unwrap();
        assert_eq!(full.data, Some(Record { name: "a".into() }));
    }
}

//! Uniform API response envelope.
//!
//! Every response body, success or error, has the shape
//! `{"status": bool, "msg": string, "data": any|null}`.

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

/// The `{status, msg, data}` envelope applied to all API responses.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    /// `true` on success, `false` on error.
    pub status: bool,
    /// Human-readable outcome message.
    pub msg: String,
    /// Response payload; `null` when there is none.
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    /// Success envelope with a payload.
    pub fn success(data: T, msg: impl Into<String>) -> Self {
        Self {
            status: true,
            msg: msg.into(),
            data: Some(data),
        }
    }

    /// Error envelope with an optional payload.
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            status: false,
            msg: msg.into(),
            data: None,
        }
    }
}

/// 200 OK with a success envelope.
pub fn ok<T: Serialize>(data: T, msg: impl Into<String>) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::OK, Json(Envelope::success(data, msg)))
}

/// 201 Created with a success envelope.
pub fn created<T: Serialize>(data: T, msg: impl Into<String>) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::CREATED, Json(Envelope::success(data, msg)))
}

/// 200 OK with a success envelope and no payload (`data: null`).
pub fn message(msg: impl Into<String>) -> (StatusCode, Json<Envelope<()>>) {
    (
        StatusCode::OK,
        Json(Envelope {
            status: true,
            msg: msg.into(),
            data: None,
        }),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let envelope = Envelope::success(json!({"id": 1}), "Created.");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["status"], json!(true));
        assert_eq!(value["msg"], json!("Created."));
        assert_eq!(value["data"], json!({"id": 1}));
    }

    #[test]
    fn test_error_envelope_has_null_data() {
        let envelope = Envelope::<()>::error("Not found.");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["status"], json!(false));
        assert_eq!(value["msg"], json!("Not found."));
        assert!(value["data"].is_null());
    }

    #[test]
    fn test_message_payload_is_null() {
        let (status, Json(envelope)) = message("Deleted.");
        assert_eq!(status, StatusCode::OK);
        let value = serde_json::to_value(&envelope).unwrap();
        assert!(value["data"].is_null());
        assert_eq!(value["status"], json!(true));
    }

    #[test]
    fn test_created_status_code() {
        let (status, _) = created(json!({}), "Created.");
        assert_eq!(status, StatusCode::CREATED);
    }
}

//! Static-token authentication extractor.
//!
//! Protected routes require the client to send the configured token in a
//! custom `token` header. This is a shared-secret gate, not a real auth
//! system: there is no expiry, rotation, or per-user identity.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use secrecy::ExposeSecret;

use crate::response::Envelope;
use crate::state::AppState;

/// Name of the custom header carrying the static token.
const TOKEN_HEADER: &str = "token";

/// Extractor that requires the static API token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     _auth: RequireApiToken,
/// ) -> impl IntoResponse {
///     "only with a valid token"
/// }
/// ```
pub struct RequireApiToken;

/// Error returned when the token header is missing or does not match.
pub enum ApiTokenRejection {
    /// No `token` header on the request.
    Missing,
    /// The header value does not match the configured token.
    Invalid,
}

impl IntoResponse for ApiTokenRejection {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            Self::Missing => (StatusCode::UNAUTHORIZED, "Missing token header"),
            Self::Invalid => (StatusCode::FORBIDDEN, "Invalid token"),
        };
        (status, Json(Envelope::<()>::error(msg))).into_response()
    }
}

impl FromRequestParts<AppState> for RequireApiToken {
    type Rejection = ApiTokenRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiTokenRejection::Missing)?;

        if token != state.api_token().expose_secret() {
            return Err(ApiTokenRejection::Invalid);
        }

        Ok(Self)
    }
}

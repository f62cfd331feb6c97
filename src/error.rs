use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::integrations::PlatformError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed for {identity}: {reason}")]
    AuthenticationFailed { identity: String, reason: String },

    #[error("Session for {0} expired again after re-login")]
    SessionExpired(String),

    #[error("Waited {waited_secs} seconds without receiving notification about new game with {invitee}")]
    InvitationTimeout { invitee: String, waited_secs: u64 },

    #[error("Invalid tile coordinate ({x}, {y})")]
    InvalidTileCoordinate { x: i64, y: i64 },

    #[error("Remote platform error: {0}")]
    RemoteTransport(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// `LoginRequired` is consumed by `SessionClient`'s retry branch, which builds
// `SessionExpired` itself with the identity attached.
impl From<PlatformError> for AppError {
    fn from(err: PlatformError) -> Self {
        AppError::RemoteTransport(err.to_string())
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Soft failure body, returned with 200.
#[derive(Serialize)]
pub struct SoftErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::InvitationTimeout { .. } = self {
            let body = Json(SoftErrorResponse {
                error: self.to_string(),
            });
            return (StatusCode::OK, body).into_response();
        }

        let (status, code) = match self {
            AppError::AuthenticationFailed { .. } => (StatusCode::UNAUTHORIZED, "AUTH_FAILED"),
            AppError::SessionExpired(_) => (StatusCode::UNAUTHORIZED, "SESSION_EXPIRED"),
            AppError::InvalidTileCoordinate { .. } => {
                (StatusCode::BAD_GATEWAY, "INVALID_TILE_COORDINATE")
            }
            AppError::RemoteTransport(_) => (StatusCode::BAD_GATEWAY, "REMOTE_TRANSPORT_ERROR"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            AppError::InvitationTimeout { .. } => (StatusCode::OK, "INVITATION_TIMEOUT"),
        };

        let body = Json(ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        });

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invitation_timeout_is_a_soft_failure() {
        let response = AppError::InvitationTimeout {
            invitee: "alice".to_string(),
            waited_secs: 60,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn remote_failures_map_to_bad_gateway() {
        let response = AppError::InvalidTileCoordinate { x: 15, y: 0 }.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = AppError::RemoteTransport("connection reset".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn platform_errors_convert_to_remote_transport() {
        assert!(matches!(
            AppError::from(PlatformError::LoginRequired),
            AppError::RemoteTransport(ref msg) if msg == "login required"
        ));
        assert!(matches!(
            AppError::from(PlatformError::Transport("timeout".into())),
            AppError::RemoteTransport(_)
        ));
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Domain-level failure codes. Every one of these means "the operation did
/// not apply"; none of them is a crash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    BadRequest,
    Forbidden,
    ReservationNotFound,
    GuestNotFound,
    ExhibitionNotFound,
    InvalidWristbandCode,
    WrongWristbandColor,
    AlreadyUsedWristband,
    AllMemberCheckedIn,
    NoMemberCheckedIn,
    OutOfReservationTime,
    ExitTimeExceeded,
    GuestAlreadyEntered,
    PeopleLimitExceeded,
    GuestAlreadyCheckedOut,
    InvalidTimestamp,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::ReservationNotFound => "RESERVATION_NOT_FOUND",
            ErrorCode::GuestNotFound => "GUEST_NOT_FOUND",
            ErrorCode::ExhibitionNotFound => "EXHIBITION_NOT_FOUND",
            ErrorCode::InvalidWristbandCode => "INVALID_WRISTBAND_CODE",
            ErrorCode::WrongWristbandColor => "WRONG_WRISTBAND_COLOR",
            ErrorCode::AlreadyUsedWristband => "ALREADY_USED_WRISTBAND",
            ErrorCode::AllMemberCheckedIn => "ALL_MEMBER_CHECKED_IN",
            ErrorCode::NoMemberCheckedIn => "NO_MEMBER_CHECKED_IN",
            ErrorCode::OutOfReservationTime => "OUT_OF_RESERVATION_TIME",
            ErrorCode::ExitTimeExceeded => "EXIT_TIME_EXCEEDED",
            ErrorCode::GuestAlreadyEntered => "GUEST_ALREADY_ENTERED",
            ErrorCode::PeopleLimitExceeded => "PEOPLE_LIMIT_EXCEEDED",
            ErrorCode::GuestAlreadyCheckedOut => "GUEST_ALREADY_CHECKED_OUT",
            ErrorCode::InvalidTimestamp => "INVALID_TIMESTAMP",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::GuestNotFound => StatusCode::NOT_FOUND,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{}", .0.as_str())]
    Code(ErrorCode),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Internal server error")]
    Internal,
}

impl From<ErrorCode> for AppError {
    fn from(code: ErrorCode) -> Self {
        AppError::Code(code)
    }
}

/// Unique-key violation sniffing across both backends.
/// 1555/2067 = SQLite primary-key/unique constraint, 23505 = PostgreSQL.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = e {
        let code = db_err.code().unwrap_or_default();
        return code == "1555" || code == "2067" || code == "23505";
    }
    false
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = match self {
            AppError::Code(code) => code,
            AppError::Unauthorized => {
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Unauthorized" })),
                )
                    .into_response();
            }
            AppError::Database(e) => {
                error!("Database error: {:?}", e);
                ErrorCode::InternalError
            }
            AppError::Internal => {
                error!("Internal error");
                ErrorCode::InternalError
            }
        };

        let body = Json(json!({ "error_code": code.as_str() }));
        (code.status(), body).into_response()
    }
}

use crate::application::{ErrorKind, LibraryApplicationError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(LibraryApplicationError);

impl From<LibraryApplicationError> for ApiError {
    fn from(err: LibraryApplicationError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    fn error_type(&self) -> &'static str {
        match self.0 {
            LibraryApplicationError::BlankBookName => "BLANK_BOOK_NAME",
            LibraryApplicationError::BlankUserName => "BLANK_USER_NAME",
            LibraryApplicationError::UserNotFound => "USER_NOT_FOUND",
            LibraryApplicationError::BookNotFound => "BOOK_NOT_FOUND",
            LibraryApplicationError::LoanNotFound => "LOAN_NOT_FOUND",
            LibraryApplicationError::BookAlreadyLoaned => "BOOK_ALREADY_LOANED",
            LibraryApplicationError::UserHasActiveLoans => "USER_HAS_ACTIVE_LOANS",
            LibraryApplicationError::InvalidLoanState(_) => "INVALID_LOAN_STATE",
            LibraryApplicationError::StoreError(_) => "STORE_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_type = self.error_type();

        let (status, message) = match self.0.kind() {
            // 400 Bad Request - 入力値の不正
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, self.0.to_string()),
            // 404 Not Found - 対象が存在しない
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, self.0.to_string()),
            // 409 Conflict - 現在の状態と矛盾する
            ErrorKind::Conflict => (StatusCode::CONFLICT, self.0.to_string()),
            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            ErrorKind::Internal => {
                match &self.0 {
                    LibraryApplicationError::StoreError(e) => {
                        tracing::error!("Store error: {}", e)
                    }
                    other => tracing::error!("Internal error: {}", other),
                }
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}

use crate::application::{ServiceDependencies, book_service, user_service};
use crate::domain::commands::DeleteUser;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{
        BookLoanRequest, BookRequest, BookReturnRequest, BookStatResponse, CreatedResponse,
        UserCreateRequest, UserDeleteQuery, UserLoanHistoryResponse, UserResponse,
        UserUpdateRequest,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Book handlers
// ============================================================================

/// POST /book - 書籍を登録
pub async fn save_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let book_id = book_service::save_book(&state.service_deps, req.to_command()).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: book_id.value(),
        }),
    ))
}

/// POST /book/loan - 書籍を貸し出す
///
/// 強制されるビジネスルール:
/// - 会員と書籍が存在すること
/// - 同じ書籍名が貸出中でないこと
pub async fn loan_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookLoanRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let history_id = book_service::loan_book(&state.service_deps, req.to_command()).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: history_id.value(),
        }),
    ))
}

/// PUT /book/return - 書籍を返却
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookReturnRequest>,
) -> Result<StatusCode, ApiError> {
    book_service::return_book(&state.service_deps, req.to_command()).await?;
    Ok(StatusCode::OK)
}

/// GET /book/loan - 貸出中の書籍数
pub async fn count_loaned_book(
    State(state): State<Arc<AppState>>,
) -> Result<Json<u64>, ApiError> {
    let count = book_service::count_loaned_book(&state.service_deps).await?;
    Ok(Json(count))
}

/// GET /book/stat - 分野別の書籍数
pub async fn get_book_statistics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookStatResponse>>, ApiError> {
    let stats = book_service::get_book_statistics(&state.service_deps).await?;
    Ok(Json(stats.into_iter().map(BookStatResponse::from).collect()))
}

// ============================================================================
// User handlers
// ============================================================================

/// POST /user - 会員を登録
pub async fn save_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UserCreateRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let user_id = user_service::save_user(&state.service_deps, req.to_command()).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: user_id.value(),
        }),
    ))
}

/// GET /user - 会員一覧
pub async fn get_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = user_service::get_users(&state.service_deps).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// PUT /user - 会員名を変更
pub async fn update_user_name(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UserUpdateRequest>,
) -> Result<StatusCode, ApiError> {
    user_service::update_user_name(&state.service_deps, req.to_command()).await?;
    Ok(StatusCode::OK)
}

/// DELETE /user?name= - 会員を削除
///
/// 貸出中の書籍がある会員は削除できない（409）。
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserDeleteQuery>,
) -> Result<StatusCode, ApiError> {
    user_service::delete_user(&state.service_deps, DeleteUser { name: query.name }).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /user/loan - 全会員の貸出履歴
pub async fn get_user_loan_histories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserLoanHistoryResponse>>, ApiError> {
    let histories = user_service::get_user_loan_histories(&state.service_deps).await?;
    Ok(Json(
        histories
            .into_iter()
            .map(UserLoanHistoryResponse::from)
            .collect(),
    ))
}

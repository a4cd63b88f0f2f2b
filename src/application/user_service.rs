use crate::domain::{User, UserError, UserId, UserLoanHistory, UserLoanStatus, commands::*};
use crate::ports::Transaction;
use std::collections::HashMap;

use super::dependencies::{ServiceDependencies, begin, finish};
use super::errors::{LibraryApplicationError, Result};

impl From<UserError> for LibraryApplicationError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::BlankName => LibraryApplicationError::BlankUserName,
        }
    }
}

/// 会員ごとの貸出履歴ビュー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLoanHistoryView {
    pub name: String,
    pub books: Vec<BookHistoryView>,
}

/// 貸出履歴の1件分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookHistoryView {
    pub name: String,
    pub is_returned: bool,
}

impl From<&UserLoanHistory> for BookHistoryView {
    fn from(history: &UserLoanHistory) -> Self {
        Self {
            name: history.book_name.clone(),
            is_returned: history.is_returned(),
        }
    }
}

fn persisted_id(user: &User) -> Result<UserId> {
    user.id
        .ok_or_else(|| LibraryApplicationError::StoreError("persisted user has no id".into()))
}

/// 会員を登録する
#[tracing::instrument(skip(deps))]
pub async fn save_user(deps: &ServiceDependencies, cmd: SaveUser) -> Result<UserId> {
    let mut tx = begin(deps).await?;
    let result = save_user_in(tx.as_mut(), cmd).await;
    finish(tx, result).await
}

pub async fn save_user_in(tx: &mut dyn Transaction, cmd: SaveUser) -> Result<UserId> {
    let user = User::new(cmd.name, cmd.age)?;

    let user_id = tx
        .insert_user(&user)
        .await
        .map_err(LibraryApplicationError::StoreError)?;

    tracing::info!(user_id = user_id.value(), "User saved");
    Ok(user_id)
}

/// すべての会員を取得する（フィルタ・ページングなし）
#[tracing::instrument(skip(deps))]
pub async fn get_users(deps: &ServiceDependencies) -> Result<Vec<User>> {
    let mut tx = begin(deps).await?;
    let result = get_users_in(tx.as_mut()).await;
    finish(tx, result).await
}

pub async fn get_users_in(tx: &mut dyn Transaction) -> Result<Vec<User>> {
    tx.find_all_users()
        .await
        .map_err(LibraryApplicationError::StoreError)
}

/// 会員名を変更する
#[tracing::instrument(skip(deps))]
pub async fn update_user_name(deps: &ServiceDependencies, cmd: UpdateUserName) -> Result<()> {
    let mut tx = begin(deps).await?;
    let result = update_user_name_in(tx.as_mut(), cmd).await;
    finish(tx, result).await
}

pub async fn update_user_name_in(tx: &mut dyn Transaction, cmd: UpdateUserName) -> Result<()> {
    let mut user = tx
        .find_user_by_id(cmd.id)
        .await
        .map_err(LibraryApplicationError::StoreError)?
        .ok_or(LibraryApplicationError::UserNotFound)?;

    user.rename(cmd.name)?;

    tx.update_user(&user)
        .await
        .map_err(LibraryApplicationError::StoreError)?;

    tracing::info!(user_id = cmd.id.value(), "User renamed");
    Ok(())
}

/// 会員を削除する
///
/// ビジネスルール：
/// - 会員が存在すること
/// - 貸出中（LOANED）の書籍がないこと
///
/// 返却済みの履歴は会員と同じトランザクションで削除し、参照切れを残さない。
#[tracing::instrument(skip(deps))]
pub async fn delete_user(deps: &ServiceDependencies, cmd: DeleteUser) -> Result<()> {
    let mut tx = begin(deps).await?;
    let result = delete_user_in(tx.as_mut(), cmd).await;
    finish(tx, result).await
}

pub async fn delete_user_in(tx: &mut dyn Transaction, cmd: DeleteUser) -> Result<()> {
    let user = tx
        .find_user_by_name(&cmd.name)
        .await
        .map_err(LibraryApplicationError::StoreError)?
        .ok_or(LibraryApplicationError::UserNotFound)?;
    let user_id = persisted_id(&user)?;

    let histories = tx
        .find_histories_by_user(user_id)
        .await
        .map_err(LibraryApplicationError::StoreError)?;

    if histories
        .iter()
        .any(|history| history.status == UserLoanStatus::Loaned)
    {
        return Err(LibraryApplicationError::UserHasActiveLoans);
    }

    let removed = tx
        .delete_histories_by_user(user_id)
        .await
        .map_err(LibraryApplicationError::StoreError)?;

    tx.delete_user(user_id)
        .await
        .map_err(LibraryApplicationError::StoreError)?;

    tracing::info!(
        user_id = user_id.value(),
        removed_histories = removed,
        "User deleted"
    );
    Ok(())
}

/// 全会員の貸出履歴を取得する
///
/// 履歴のない会員も空のリストで含まれる。
/// 会員はID順、各会員の書籍は履歴ID順。
#[tracing::instrument(skip(deps))]
pub async fn get_user_loan_histories(
    deps: &ServiceDependencies,
) -> Result<Vec<UserLoanHistoryView>> {
    let mut tx = begin(deps).await?;
    let result = get_user_loan_histories_in(tx.as_mut()).await;
    finish(tx, result).await
}

pub async fn get_user_loan_histories_in(
    tx: &mut dyn Transaction,
) -> Result<Vec<UserLoanHistoryView>> {
    let users = tx
        .find_all_users()
        .await
        .map_err(LibraryApplicationError::StoreError)?;

    let histories = tx
        .find_all_histories()
        .await
        .map_err(LibraryApplicationError::StoreError)?;

    let mut by_user: HashMap<UserId, Vec<BookHistoryView>> = HashMap::new();
    for history in &histories {
        by_user
            .entry(history.user_id)
            .or_default()
            .push(BookHistoryView::from(history));
    }

    users
        .into_iter()
        .map(|user| -> Result<UserLoanHistoryView> {
            let user_id = persisted_id(&user)?;
            Ok(UserLoanHistoryView {
                books: by_user.remove(&user_id).unwrap_or_default(),
                name: user.name,
            })
        })
        .collect()
}

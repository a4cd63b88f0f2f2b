use crate::domain::{self, Book, BookError, BookId, LoanHistoryId, UserLoanStatus, commands::*};
use crate::ports::{BookStat, Transaction};

use super::dependencies::{ServiceDependencies, begin, finish};
use super::errors::{LibraryApplicationError, Result};

impl From<BookError> for LibraryApplicationError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::BlankName => LibraryApplicationError::BlankBookName,
        }
    }
}

/// 書籍を登録する
///
/// ビジネスルール：
/// - 書籍名は空であってはならない
/// - 同名の書籍の重複は確認しない
#[tracing::instrument(skip(deps))]
pub async fn save_book(deps: &ServiceDependencies, cmd: SaveBook) -> Result<BookId> {
    let mut tx = begin(deps).await?;
    let result = save_book_in(tx.as_mut(), cmd).await;
    finish(tx, result).await
}

/// 書籍を登録する（呼び出し側のトランザクション内で実行）
pub async fn save_book_in(tx: &mut dyn Transaction, cmd: SaveBook) -> Result<BookId> {
    let book = Book::new(cmd.name, cmd.book_type)?;

    let book_id = tx
        .insert_book(&book)
        .await
        .map_err(LibraryApplicationError::StoreError)?;

    tracing::info!(book_id = book_id.value(), "Book saved");
    Ok(book_id)
}

/// 書籍を貸し出す
///
/// ビジネスルール：
/// - 会員が存在すること
/// - 書籍が存在すること
/// - 同じ書籍名の貸出中（LOANED）の履歴が存在しないこと
///
/// # 一貫性保証
///
/// 貸出中チェックと履歴の保存は同一トランザクションで行われるが、
/// READ COMMITTED では同じ書籍への同時貸出を完全には防げない
/// （チェックと挿入の間に他のトランザクションが挿入し得る）。
#[tracing::instrument(skip(deps))]
pub async fn loan_book(deps: &ServiceDependencies, cmd: LoanBook) -> Result<LoanHistoryId> {
    let mut tx = begin(deps).await?;
    let result = loan_book_in(tx.as_mut(), cmd).await;
    finish(tx, result).await
}

/// 書籍を貸し出す（呼び出し側のトランザクション内で実行）
pub async fn loan_book_in(tx: &mut dyn Transaction, cmd: LoanBook) -> Result<LoanHistoryId> {
    // 1. 会員の存在確認
    let user = tx
        .find_user_by_name(&cmd.user_name)
        .await
        .map_err(LibraryApplicationError::StoreError)?
        .ok_or(LibraryApplicationError::UserNotFound)?;

    let user_id = user.id.ok_or_else(|| {
        LibraryApplicationError::StoreError("persisted user has no id".into())
    })?;

    // 2. 書籍の存在確認
    tx.find_book_by_name(&cmd.book_name)
        .await
        .map_err(LibraryApplicationError::StoreError)?
        .ok_or(LibraryApplicationError::BookNotFound)?;

    // 3. 貸出中の確認
    let on_loan = tx
        .find_history_by_book_name_and_status(&cmd.book_name, UserLoanStatus::Loaned)
        .await
        .map_err(LibraryApplicationError::StoreError)?;

    if on_loan.is_some() {
        return Err(LibraryApplicationError::BookAlreadyLoaned);
    }

    // 4. ドメイン層の純粋関数で履歴を生成して保存
    let history = domain::loan_history::loan_book(user_id, cmd.book_name);
    let history_id = tx
        .insert_history(&history)
        .await
        .map_err(LibraryApplicationError::StoreError)?;

    tracing::info!(
        history_id = history_id.value(),
        user_id = user_id.value(),
        "Book loaned"
    );
    Ok(history_id)
}

/// 書籍を返却する
///
/// 貸出中の履歴は書籍名のみで検索し、会員では絞り込まない。
/// 1タイトルにつき貸出中の履歴は1件という前提に基づく。
/// `user_name`はログにのみ記録される。
#[tracing::instrument(skip(deps))]
pub async fn return_book(deps: &ServiceDependencies, cmd: ReturnBook) -> Result<()> {
    let mut tx = begin(deps).await?;
    let result = return_book_in(tx.as_mut(), cmd).await;
    finish(tx, result).await
}

/// 書籍を返却する（呼び出し側のトランザクション内で実行）
pub async fn return_book_in(tx: &mut dyn Transaction, cmd: ReturnBook) -> Result<()> {
    let history = tx
        .find_history_by_book_name_and_status(&cmd.book_name, UserLoanStatus::Loaned)
        .await
        .map_err(LibraryApplicationError::StoreError)?
        .ok_or(LibraryApplicationError::LoanNotFound)?;

    let returned = domain::loan_history::return_book(&history)
        .map_err(|e| LibraryApplicationError::InvalidLoanState(format!("{:?}", e)))?;

    tx.update_history(&returned)
        .await
        .map_err(LibraryApplicationError::StoreError)?;

    tracing::info!(book_name = %returned.book_name, "Book returned");
    Ok(())
}

/// 貸出中の書籍数を取得する
#[tracing::instrument(skip(deps))]
pub async fn count_loaned_book(deps: &ServiceDependencies) -> Result<u64> {
    let mut tx = begin(deps).await?;
    let result = count_loaned_book_in(tx.as_mut()).await;
    finish(tx, result).await
}

pub async fn count_loaned_book_in(tx: &mut dyn Transaction) -> Result<u64> {
    tx.count_histories_by_status(UserLoanStatus::Loaned)
        .await
        .map_err(LibraryApplicationError::StoreError)
}

/// 分野ごとの書籍数を取得する
///
/// 書籍が1冊もない分野は含まれない。結果は`BookType`の宣言順。
#[tracing::instrument(skip(deps))]
pub async fn get_book_statistics(deps: &ServiceDependencies) -> Result<Vec<BookStat>> {
    let mut tx = begin(deps).await?;
    let result = get_book_statistics_in(tx.as_mut()).await;
    finish(tx, result).await
}

pub async fn get_book_statistics_in(tx: &mut dyn Transaction) -> Result<Vec<BookStat>> {
    let mut stats = tx
        .count_books_by_type()
        .await
        .map_err(LibraryApplicationError::StoreError)?;

    stats.retain(|stat| stat.count > 0);
    stats.sort_by_key(|stat| stat.book_type);
    Ok(stats)
}

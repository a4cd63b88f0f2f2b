use crate::domain::{LoanHistoryId, UserId, UserLoanHistory, UserLoanStatus};
use async_trait::async_trait;

use super::Result;

/// 貸出履歴リポジトリポート
#[async_trait]
pub trait LoanHistoryRepository: Send {
    /// 貸出履歴を保存し、採番されたIDを返す
    async fn insert_history(&mut self, history: &UserLoanHistory) -> Result<LoanHistoryId>;

    /// 既存の貸出履歴の状態を更新する
    ///
    /// IDが未採番、または該当行がない場合はエラー。
    async fn update_history(&mut self, history: &UserLoanHistory) -> Result<()>;

    /// 書籍名と状態で貸出履歴を1件検索する
    ///
    /// 会員では絞り込まない。複数ある場合はIDが最も小さいものを返す。
    async fn find_history_by_book_name_and_status(
        &mut self,
        book_name: &str,
        status: UserLoanStatus,
    ) -> Result<Option<UserLoanHistory>>;

    /// 指定状態の貸出履歴の件数
    async fn count_histories_by_status(&mut self, status: UserLoanStatus) -> Result<u64>;

    /// すべての貸出履歴をID順に取得する
    async fn find_all_histories(&mut self) -> Result<Vec<UserLoanHistory>>;

    /// 会員の貸出履歴をID順に取得する
    async fn find_histories_by_user(&mut self, user_id: UserId) -> Result<Vec<UserLoanHistory>>;

    /// 会員の貸出履歴をすべて削除し、削除件数を返す
    async fn delete_histories_by_user(&mut self, user_id: UserId) -> Result<u64>;
}

use crate::domain::{User, UserId};
use async_trait::async_trait;

use super::Result;

/// 会員リポジトリポート
#[async_trait]
pub trait UserRepository: Send {
    /// 会員を保存し、採番されたIDを返す
    async fn insert_user(&mut self, user: &User) -> Result<UserId>;

    /// 既存会員の名前・年齢を更新する
    ///
    /// IDが未採番、または該当行がない場合はエラー。
    async fn update_user(&mut self, user: &User) -> Result<()>;

    async fn find_user_by_id(&mut self, id: UserId) -> Result<Option<User>>;

    /// 会員名で会員を1件検索する
    ///
    /// 同名の会員が複数ある場合はIDが最も小さいものを返す。
    async fn find_user_by_name(&mut self, name: &str) -> Result<Option<User>>;

    /// すべての会員をID順に取得する
    async fn find_all_users(&mut self) -> Result<Vec<User>>;

    /// 会員を削除する
    ///
    /// 会員の貸出履歴は削除しない。履歴が残っている場合はエラーになるため、
    /// 呼び出し側が事前に扱うこと。
    async fn delete_user(&mut self, id: UserId) -> Result<()>;
}

use async_trait::async_trait;
use futures::future::BoxFuture;

use super::{BookRepository, LoanHistoryRepository, Result, UserRepository};

/// トランザクションポート
///
/// 1つのトランザクションに束縛された3つのリポジトリをまとめる。
/// `commit`されずに破棄された場合、変更はすべて破棄される。
pub trait Transaction: BookRepository + UserRepository + LoanHistoryRepository + Send {
    /// 変更を確定する
    fn commit(self: Box<Self>) -> BoxFuture<'static, Result<()>>;

    /// 変更を破棄する
    fn rollback(self: Box<Self>) -> BoxFuture<'static, Result<()>>;
}

/// Unit of Workポート
///
/// サービス操作ごとにトランザクションを開始する。
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn Transaction>>;
}

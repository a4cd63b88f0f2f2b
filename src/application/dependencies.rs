use crate::ports::{Transaction, UnitOfWork};
use std::sync::Arc;

use super::errors::{LibraryApplicationError, Result};

/// サービスの依存関係
///
/// 振る舞いは持たず、サービス関数に引数として渡される。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub store: Arc<dyn UnitOfWork>,
}

/// トランザクションを開始する
pub(super) async fn begin(deps: &ServiceDependencies) -> Result<Box<dyn Transaction>> {
    deps.store
        .begin()
        .await
        .map_err(LibraryApplicationError::StoreError)
}

/// 操作結果に応じてトランザクションを確定または破棄する
///
/// 成功時はコミットし、コミット失敗は`StoreError`になる。
/// 失敗時はロールバックし、元のエラーを返す（ロールバック失敗はログのみ）。
pub(super) async fn finish<T>(tx: Box<dyn Transaction>, result: Result<T>) -> Result<T> {
    match result {
        Ok(value) => {
            tx.commit()
                .await
                .map_err(LibraryApplicationError::StoreError)?;
            Ok(value)
        }
        Err(err) => {
            tracing::debug!("Rolling back transaction: {}", err);
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!("Failed to roll back transaction: {}", rollback_err);
            }
            Err(err)
        }
    }
}

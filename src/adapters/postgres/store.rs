use crate::ports::{Result, Transaction, UnitOfWork};
use async_trait::async_trait;
use futures::future::BoxFuture;
use sqlx::{PgPool, Postgres};

/// PostgreSQL implementation of the UnitOfWork port
///
/// Every service operation runs in one `BEGIN ... COMMIT` block at the
/// database's default isolation level (READ COMMITTED).
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new store with a PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWork for PostgresStore {
    async fn begin(&self) -> Result<Box<dyn Transaction>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PostgresTransaction { tx }))
    }
}

/// Open PostgreSQL transaction
///
/// The repository ports are implemented on this type so that every query of
/// an operation shares the same connection. sqlx rolls back on drop.
pub struct PostgresTransaction {
    pub(super) tx: sqlx::Transaction<'static, Postgres>,
}

impl Transaction for PostgresTransaction {
    fn commit(self: Box<Self>) -> BoxFuture<'static, Result<()>> {
        let tx = self.tx;
        Box::pin(async move {
            tx.commit().await?;
            Ok(())
        })
    }

    fn rollback(self: Box<Self>) -> BoxFuture<'static, Result<()>> {
        let tx = self.tx;
        Box::pin(async move {
            tx.rollback().await?;
            Ok(())
        })
    }
}

/// 取得した値が不正な場合のエラー
pub(super) fn invalid_data(message: String) -> Box<dyn std::error::Error + Send + Sync> {
    Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message))
}

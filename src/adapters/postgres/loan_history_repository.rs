use crate::domain::{LoanHistoryId, UserId, UserLoanHistory, UserLoanStatus};
use crate::ports::{LoanHistoryRepository, Result};
use async_trait::async_trait;
use sqlx::{Row, postgres::PgRow};
use std::str::FromStr;

use super::store::{PostgresTransaction, invalid_data};

/// PostgreSQLの行データをUserLoanHistoryに変換する
fn map_row_to_history(row: &PgRow) -> Result<UserLoanHistory> {
    let status_str: &str = row.get("status");
    let status = UserLoanStatus::from_str(status_str).map_err(invalid_data)?;

    Ok(UserLoanHistory::restore(
        LoanHistoryId::new(row.get("id")),
        UserId::new(row.get("user_id")),
        row.get("book_name"),
        status,
    ))
}

#[async_trait]
impl LoanHistoryRepository for PostgresTransaction {
    async fn insert_history(&mut self, history: &UserLoanHistory) -> Result<LoanHistoryId> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO user_loan_history (user_id, book_name, status)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(history.user_id.value())
        .bind(&history.book_name)
        .bind(history.status.as_str())
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(LoanHistoryId::new(id))
    }

    async fn update_history(&mut self, history: &UserLoanHistory) -> Result<()> {
        let id = history.id.ok_or("loan history has no id")?;

        let result = sqlx::query(
            r#"
            UPDATE user_loan_history
            SET status = $2
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .bind(history.status.as_str())
        .execute(&mut *self.tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(format!("loan history {} does not exist", id.value()).into());
        }
        Ok(())
    }

    async fn find_history_by_book_name_and_status(
        &mut self,
        book_name: &str,
        status: UserLoanStatus,
    ) -> Result<Option<UserLoanHistory>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, book_name, status
            FROM user_loan_history
            WHERE book_name = $1 AND status = $2
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(book_name)
        .bind(status.as_str())
        .fetch_optional(&mut *self.tx)
        .await?;

        row.as_ref().map(map_row_to_history).transpose()
    }

    async fn count_histories_by_status(&mut self, status: UserLoanStatus) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM user_loan_history
            WHERE status = $1
            "#,
        )
        .bind(status.as_str())
        .fetch_one(&mut *self.tx)
        .await?;

        u64::try_from(count).map_err(|_| invalid_data(format!("count out of range: {}", count)))
    }

    async fn find_all_histories(&mut self) -> Result<Vec<UserLoanHistory>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, book_name, status
            FROM user_loan_history
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&mut *self.tx)
        .await?;

        rows.iter().map(map_row_to_history).collect()
    }

    async fn find_histories_by_user(&mut self, user_id: UserId) -> Result<Vec<UserLoanHistory>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, book_name, status
            FROM user_loan_history
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id.value())
        .fetch_all(&mut *self.tx)
        .await?;

        rows.iter().map(map_row_to_history).collect()
    }

    async fn delete_histories_by_user(&mut self, user_id: UserId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM user_loan_history WHERE user_id = $1")
            .bind(user_id.value())
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected())
    }
}

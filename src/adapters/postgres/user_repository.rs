use crate::domain::{User, UserId};
use crate::ports::{Result, UserRepository};
use async_trait::async_trait;
use sqlx::{Row, postgres::PgRow};

use super::store::{PostgresTransaction, invalid_data};

/// PostgreSQLの行データをUserに変換する
///
/// ageはBIGINT（i64）で保存されているため、u32への変換でエラーハンドリングを行う。
fn map_row_to_user(row: &PgRow) -> Result<User> {
    let age: Option<i64> = row.get("age");
    let age = age
        .map(|value| {
            u32::try_from(value).map_err(|_| invalid_data(format!("age out of range: {}", value)))
        })
        .transpose()?;

    Ok(User::restore(UserId::new(row.get("id")), row.get("name"), age))
}

fn age_to_column(age: Option<u32>) -> Option<i64> {
    age.map(i64::from)
}

#[async_trait]
impl UserRepository for PostgresTransaction {
    async fn insert_user(&mut self, user: &User) -> Result<UserId> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (name, age)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(age_to_column(user.age))
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(UserId::new(id))
    }

    async fn update_user(&mut self, user: &User) -> Result<()> {
        let id = user.id.ok_or("user has no id")?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, age = $3
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .bind(&user.name)
        .bind(age_to_column(user.age))
        .execute(&mut *self.tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(format!("user {} does not exist", id.value()).into());
        }
        Ok(())
    }

    async fn find_user_by_id(&mut self, id: UserId) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, age
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&mut *self.tx)
        .await?;

        row.as_ref().map(map_row_to_user).transpose()
    }

    async fn find_user_by_name(&mut self, name: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, age
            FROM users
            WHERE name = $1
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&mut *self.tx)
        .await?;

        row.as_ref().map(map_row_to_user).transpose()
    }

    async fn find_all_users(&mut self) -> Result<Vec<User>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, age
            FROM users
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&mut *self.tx)
        .await?;

        rows.iter().map(map_row_to_user).collect()
    }

    async fn delete_user(&mut self, id: UserId) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.value())
            .execute(&mut *self.tx)
            .await?;

        Ok(())
    }
}

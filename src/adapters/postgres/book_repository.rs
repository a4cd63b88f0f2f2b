use crate::domain::{Book, BookId, BookType};
use crate::ports::{BookRepository, BookStat, Result};
use async_trait::async_trait;
use sqlx::{Row, postgres::PgRow};
use std::str::FromStr;

use super::store::{PostgresTransaction, invalid_data};

/// PostgreSQLの行データをBookに変換する
fn map_row_to_book(row: &PgRow) -> Result<Book> {
    let type_str: &str = row.get("type");
    let book_type = BookType::from_str(type_str).map_err(invalid_data)?;

    Ok(Book::restore(
        BookId::new(row.get("id")),
        row.get("name"),
        book_type,
    ))
}

#[async_trait]
impl BookRepository for PostgresTransaction {
    async fn insert_book(&mut self, book: &Book) -> Result<BookId> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO book (name, type)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(&book.name)
        .bind(book.book_type.as_str())
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(BookId::new(id))
    }

    async fn find_book_by_name(&mut self, name: &str) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, type
            FROM book
            WHERE name = $1
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&mut *self.tx)
        .await?;

        row.as_ref().map(map_row_to_book).transpose()
    }

    /// GROUP BYで分野ごとに集計する
    async fn count_books_by_type(&mut self) -> Result<Vec<BookStat>> {
        let rows = sqlx::query(
            r#"
            SELECT type, COUNT(*) AS count
            FROM book
            GROUP BY type
            "#,
        )
        .fetch_all(&mut *self.tx)
        .await?;

        rows.iter()
            .map(|row| {
                let type_str: &str = row.get("type");
                let book_type = BookType::from_str(type_str).map_err(invalid_data)?;
                let count: i64 = row.get("count");
                let count = u64::try_from(count)
                    .map_err(|_| invalid_data(format!("count out of range: {}", count)))?;
                Ok(BookStat { book_type, count })
            })
            .collect()
    }
}

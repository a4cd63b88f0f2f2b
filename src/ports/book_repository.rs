use crate::domain::{Book, BookId, BookType};
use async_trait::async_trait;

use super::Result;

/// 分野ごとの書籍数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookStat {
    pub book_type: BookType,
    pub count: u64,
}

/// 書籍リポジトリポート
///
/// 実装はトランザクションに束縛され、すべての操作は同一トランザクション内で実行される。
#[async_trait]
pub trait BookRepository: Send {
    /// 書籍を保存し、採番されたIDを返す
    async fn insert_book(&mut self, book: &Book) -> Result<BookId>;

    /// 書籍名で書籍を1件検索する
    ///
    /// 同名の書籍が複数ある場合はIDが最も小さいものを返す。
    async fn find_book_by_name(&mut self, name: &str) -> Result<Option<Book>>;

    /// 分野ごとの書籍数を集計する
    ///
    /// 書籍が1冊もない分野は結果に含まれない。
    async fn count_books_by_type(&mut self) -> Result<Vec<BookStat>>;
}

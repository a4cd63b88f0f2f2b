use serde::{Deserialize, Serialize};

use super::{BookError, BookId, value_objects::is_blank};

/// 書籍の分野
///
/// 永続化時は大文字の名前（"COMPUTER" など）で保存される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookType {
    Computer,
    Economy,
    Society,
    Language,
    Science,
}

impl BookType {
    /// 宣言順のすべての分野
    pub const ALL: [BookType; 5] = [
        BookType::Computer,
        BookType::Economy,
        BookType::Society,
        BookType::Language,
        BookType::Science,
    ];

    /// 文字列表現を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            BookType::Computer => "COMPUTER",
            BookType::Economy => "ECONOMY",
            BookType::Society => "SOCIETY",
            BookType::Language => "LANGUAGE",
            BookType::Science => "SCIENCE",
        }
    }
}

impl std::str::FromStr for BookType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookType::ALL
            .into_iter()
            .find(|book_type| book_type.as_str() == s)
            .ok_or_else(|| format!("Invalid book type: {}", s))
    }
}

/// 書籍 - カタログ上の1冊
///
/// 不変条件：書籍名は空であってはならない（生成時に検証）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: Option<BookId>,
    pub name: String,
    pub book_type: BookType,
}

impl Book {
    /// 新しい書籍を生成する（IDは未採番）
    ///
    /// # エラー
    /// 書籍名が空白のみの場合は`BookError::BlankName`を返す
    pub fn new(name: impl Into<String>, book_type: BookType) -> Result<Self, BookError> {
        let name = name.into();
        if is_blank(&name) {
            return Err(BookError::BlankName);
        }

        Ok(Self {
            id: None,
            name,
            book_type,
        })
    }

    /// 永続化済みの値から書籍を復元する
    pub fn restore(id: BookId, name: String, book_type: BookType) -> Self {
        Self {
            id: Some(id),
            name,
            book_type,
        }
    }
}

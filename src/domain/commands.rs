use serde::{Deserialize, Serialize};

use super::{BookType, UserId};

/// コマンド：書籍を登録する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveBook {
    pub name: String,
    pub book_type: BookType,
}

/// コマンド：書籍を貸し出す
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanBook {
    pub user_name: String,
    pub book_name: String,
}

/// コマンド：書籍を返却する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnBook {
    pub user_name: String,
    pub book_name: String,
}

/// コマンド：会員を登録する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveUser {
    pub name: String,
    pub age: Option<u32>,
}

/// コマンド：会員名を変更する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserName {
    pub id: UserId,
    pub name: String,
}

/// コマンド：会員を削除する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteUser {
    pub name: String,
}

use serde::{Deserialize, Serialize};

use crate::application::{BookHistoryView, UserLoanHistoryView};
use crate::domain::{BookType, User, UserId, commands::*};
use crate::ports::BookStat;

/// 書籍登録リクエスト（POST /book）
#[derive(Debug, Serialize, Deserialize)]
pub struct BookRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub book_type: BookType,
}

impl BookRequest {
    pub fn to_command(&self) -> SaveBook {
        SaveBook {
            name: self.name.clone(),
            book_type: self.book_type,
        }
    }
}

/// 貸出リクエスト（POST /book/loan）
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookLoanRequest {
    pub user_name: String,
    pub book_name: String,
}

impl BookLoanRequest {
    pub fn to_command(&self) -> LoanBook {
        LoanBook {
            user_name: self.user_name.clone(),
            book_name: self.book_name.clone(),
        }
    }
}

/// 返却リクエスト（PUT /book/return）
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookReturnRequest {
    pub user_name: String,
    pub book_name: String,
}

impl BookReturnRequest {
    pub fn to_command(&self) -> ReturnBook {
        ReturnBook {
            user_name: self.user_name.clone(),
            book_name: self.book_name.clone(),
        }
    }
}

/// 分野別統計レスポンス（GET /book/stat）
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookStatResponse {
    #[serde(rename = "type")]
    pub book_type: BookType,
    pub count: u64,
}

impl From<BookStat> for BookStatResponse {
    fn from(stat: BookStat) -> Self {
        Self {
            book_type: stat.book_type,
            count: stat.count,
        }
    }
}

/// 会員登録リクエスト（POST /user）
#[derive(Debug, Serialize, Deserialize)]
pub struct UserCreateRequest {
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
}

impl UserCreateRequest {
    pub fn to_command(&self) -> SaveUser {
        SaveUser {
            name: self.name.clone(),
            age: self.age,
        }
    }
}

/// 会員名変更リクエスト（PUT /user）
#[derive(Debug, Serialize, Deserialize)]
pub struct UserUpdateRequest {
    pub id: i64,
    pub name: String,
}

impl UserUpdateRequest {
    pub fn to_command(&self) -> UpdateUserName {
        UpdateUserName {
            id: UserId::new(self.id),
            name: self.name.clone(),
        }
    }
}

/// 会員削除のクエリパラメータ（DELETE /user?name=）
#[derive(Debug, Deserialize)]
pub struct UserDeleteQuery {
    pub name: String,
}

/// 作成されたリソースのID
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// 会員レスポンス（GET /user）
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Option<i64>,
    pub name: String,
    pub age: Option<u32>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.value()),
            name: user.name,
            age: user.age,
        }
    }
}

/// 会員ごとの貸出履歴レスポンス（GET /user/loan）
#[derive(Debug, Serialize, Deserialize)]
pub struct UserLoanHistoryResponse {
    pub name: String,
    pub books: Vec<BookHistoryResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookHistoryResponse {
    pub name: String,
    pub is_returned: bool,
}

impl From<BookHistoryView> for BookHistoryResponse {
    fn from(view: BookHistoryView) -> Self {
        Self {
            name: view.name,
            is_returned: view.is_returned,
        }
    }
}

impl From<UserLoanHistoryView> for UserLoanHistoryResponse {
    fn from(view: UserLoanHistoryView) -> Self {
        Self {
            name: view.name,
            books: view.books.into_iter().map(BookHistoryResponse::from).collect(),
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
        }
    }
}

use thiserror::Error;

/// エラーの分類
///
/// API層でのHTTPステータスへの対応付けに使用される。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 入力値が不正
    Validation,
    /// 対象が存在しない
    NotFound,
    /// 現在の状態と矛盾する操作
    Conflict,
    /// システム障害
    Internal,
}

/// 図書館アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum LibraryApplicationError {
    /// 書籍名が空
    #[error("Book name must not be blank")]
    BlankBookName,

    /// 会員名が空
    #[error("User name must not be blank")]
    BlankUserName,

    /// 会員が存在しない
    #[error("User not found")]
    UserNotFound,

    /// 書籍が存在しない
    #[error("Book not found")]
    BookNotFound,

    /// 貸出中の履歴が存在しない
    #[error("Loan not found")]
    LoanNotFound,

    /// 書籍が既に貸出中
    #[error("Book is already on loan")]
    BookAlreadyLoaned,

    /// 貸出中の書籍がある会員は削除できない
    #[error("User has books on loan")]
    UserHasActiveLoans,

    /// 貸出の状態が不正（例: LOANEDを期待したがRETURNEDだった）
    #[error("Invalid loan state: {0}")]
    InvalidLoanState(String),

    /// 永続化層のエラー
    #[error("Store error")]
    StoreError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl LibraryApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LibraryApplicationError::BlankBookName | LibraryApplicationError::BlankUserName => {
                ErrorKind::Validation
            }
            LibraryApplicationError::UserNotFound
            | LibraryApplicationError::BookNotFound
            | LibraryApplicationError::LoanNotFound => ErrorKind::NotFound,
            LibraryApplicationError::BookAlreadyLoaned
            | LibraryApplicationError::UserHasActiveLoans
            | LibraryApplicationError::InvalidLoanState(_) => ErrorKind::Conflict,
            LibraryApplicationError::StoreError(_) => ErrorKind::Internal,
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LibraryApplicationError>;

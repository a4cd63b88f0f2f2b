/// 書籍のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// 書籍名が空
    BlankName,
}

/// 会員のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    /// 会員名が空
    BlankName,
}

/// 返却のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnBookError {
    /// 既に返却済み
    AlreadyReturned,
}

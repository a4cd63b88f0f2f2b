use serde::{Deserialize, Serialize};

/// 書籍ID - 永続化時に採番される数値ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookId(i64);

impl BookId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 会員ID - 永続化時に採番される数値ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(i64);

impl UserId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 貸出履歴ID - 永続化時に採番される数値ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoanHistoryId(i64);

impl LoanHistoryId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 空白のみ、または空の文字列かどうか
///
/// 空白として扱うのは制御文字（HT, LF, VT, FF, CR, U+001C〜U+001F）と
/// 空白区切り文字（Zs, Zl, Zp）。`str::trim`と異なり U+0085 は空白ではない。
pub(crate) fn is_blank(value: &str) -> bool {
    value.chars().all(is_blank_char)
}

fn is_blank_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | '\u{1C}'..='\u{1F}'
            // Zs
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            // Zl, Zp
            | '\u{2028}'
            | '\u{2029}'
    )
}

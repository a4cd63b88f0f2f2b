use serde::{Deserialize, Serialize};

use super::{LoanHistoryId, ReturnBookError, UserId};

/// 貸出状態
///
/// 状態遷移：LOANED → RETURNED（一方向・1回のみ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserLoanStatus {
    /// 貸出中
    Loaned,
    /// 返却済み
    Returned,
}

impl UserLoanStatus {
    /// 文字列表現を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            UserLoanStatus::Loaned => "LOANED",
            UserLoanStatus::Returned => "RETURNED",
        }
    }

    pub fn is_returned(&self) -> bool {
        matches!(self, UserLoanStatus::Returned)
    }
}

impl std::str::FromStr for UserLoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOANED" => Ok(UserLoanStatus::Loaned),
            "RETURNED" => Ok(UserLoanStatus::Returned),
            _ => Err(format!("Invalid loan status: {}", s)),
        }
    }
}

/// 貸出履歴 - 会員による1冊の1回の貸出
///
/// `book_name`は書籍名の非正規化コピーで、書籍への参照ではない。
/// 1つの書籍名に対してLOANEDの履歴は同時に1件まで（貸出処理の事前チェックで担保）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLoanHistory {
    pub id: Option<LoanHistoryId>,
    pub user_id: UserId,
    pub book_name: String,
    pub status: UserLoanStatus,
}

impl UserLoanHistory {
    /// 永続化済みの値から貸出履歴を復元する
    pub fn restore(
        id: LoanHistoryId,
        user_id: UserId,
        book_name: String,
        status: UserLoanStatus,
    ) -> Self {
        Self {
            id: Some(id),
            user_id,
            book_name,
            status,
        }
    }

    pub fn is_returned(&self) -> bool {
        self.status.is_returned()
    }
}

/// 純粋関数：書籍を貸し出す
///
/// 初期状態はLOANED。既に貸出中かどうかの確認はアプリケーション層が
/// 同一トランザクション内で行う。
pub fn loan_book(user_id: UserId, book_name: impl Into<String>) -> UserLoanHistory {
    UserLoanHistory {
        id: None,
        user_id,
        book_name: book_name.into(),
        status: UserLoanStatus::Loaned,
    }
}

/// 純粋関数：書籍を返却する
///
/// IDと会員は変えず、状態のみRETURNEDにした新しい履歴を返す。
pub fn return_book(history: &UserLoanHistory) -> Result<UserLoanHistory, ReturnBookError> {
    if history.status.is_returned() {
        return Err(ReturnBookError::AlreadyReturned);
    }

    Ok(UserLoanHistory {
        status: UserLoanStatus::Returned,
        ..history.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loan_book_creates_loaned_history() {
        let user_id = UserId::new(1);
        let history = loan_book(user_id, "오브젝트");

        assert_eq!(history.id, None);
        assert_eq!(history.user_id, user_id);
        assert_eq!(history.book_name, "오브젝트");
        assert_eq!(history.status, UserLoanStatus::Loaned);
        assert!(!history.is_returned());
    }

    #[test]
    fn test_return_book_success() {
        let history = UserLoanHistory::restore(
            LoanHistoryId::new(5),
            UserId::new(1),
            "오브젝트".to_string(),
            UserLoanStatus::Loaned,
        );

        let returned = return_book(&history).unwrap();

        assert_eq!(returned.status, UserLoanStatus::Returned);
        assert_eq!(returned.id, history.id);
        assert_eq!(returned.user_id, history.user_id);
        assert_eq!(returned.book_name, history.book_name);
        assert!(returned.is_returned());
    }

    #[test]
    fn test_return_book_fails_when_already_returned() {
        let history = UserLoanHistory::restore(
            LoanHistoryId::new(5),
            UserId::new(1),
            "오브젝트".to_string(),
            UserLoanStatus::Returned,
        );

        let result = return_book(&history);
        assert_eq!(result.unwrap_err(), ReturnBookError::AlreadyReturned);
    }

    #[test]
    fn test_loan_status_string_round_trip() {
        for status in [UserLoanStatus::Loaned, UserLoanStatus::Returned] {
            assert_eq!(status.as_str().parse::<UserLoanStatus>().unwrap(), status);
        }
        assert!("loaned".parse::<UserLoanStatus>().is_err());
    }
}

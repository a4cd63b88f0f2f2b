use serde::{Deserialize, Serialize};

use super::{UserError, UserId, value_objects::is_blank};

/// 会員
///
/// 不変条件：会員名は空であってはならない。年齢は任意（負の値は型で排除）。
/// 貸出履歴は埋め込まず、必要時にリポジトリから取得する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<UserId>,
    pub name: String,
    pub age: Option<u32>,
}

impl User {
    /// 新しい会員を生成する（IDは未採番）
    pub fn new(name: impl Into<String>, age: Option<u32>) -> Result<Self, UserError> {
        let name = name.into();
        if is_blank(&name) {
            return Err(UserError::BlankName);
        }

        Ok(Self {
            id: None,
            name,
            age,
        })
    }

    /// 永続化済みの値から会員を復元する
    pub fn restore(id: UserId, name: String, age: Option<u32>) -> Self {
        Self {
            id: Some(id),
            name,
            age,
        }
    }

    /// 会員名を変更する
    ///
    /// # エラー
    /// 新しい名前が空白のみの場合は`UserError::BlankName`を返し、元の名前は変わらない
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), UserError> {
        let name = name.into();
        if is_blank(&name) {
            return Err(UserError::BlankName);
        }
        self.name = name;
        Ok(())
    }
}

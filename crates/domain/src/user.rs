//! # ユーザー
//!
//! ログイン主体となるユーザーエンティティを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 備考 |
//! |---|------------|------|
//! | [`User`] | ユーザー | パスワードハッシュを含む。レスポンスには出さない |
//! | [`PublicUser`] | 公開ユーザー情報 | レスポンス用の射影 |
//! | [`Username`] | ユーザー名 | trim + 小文字化。メールアドレスを使ってもよい |
//!
//! ## 無効化
//!
//! `is_active` が明示的に `false` のユーザーのみ無効とみなす。
//! 列が `null` の既存行は有効として扱う。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::password::PasswordHash;

define_uuid_id! {
    /// ユーザー ID
    pub struct UserId;
}

define_required_text! {
    /// ユーザー名（小文字）
    pub struct Username {
        field: "username",
        lowercase: true,
    }
}

/// ユーザーエンティティ
///
/// バックエンドの `users` テーブルの行に対応する。
/// `Serialize` は実装しない（ハッシュをレスポンスに含めないため）。
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id:            UserId,
    pub username:      String,
    #[serde(default)]
    pub password_hash: Option<PasswordHash>,
    #[serde(default)]
    pub display_name:  Option<String>,
    #[serde(default)]
    pub is_active:     Option<bool>,
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// 明示的に無効化されているか
    pub fn is_disabled(&self) -> bool {
        self.is_active == Some(false)
    }

    /// レスポンス用の公開情報に変換する
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id:           self.id,
            username:     self.username.clone(),
            display_name: self.display_name.clone(),
            is_active:    self.is_active,
        }
    }
}

/// 公開ユーザー情報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id:           UserId,
    pub username:     String,
    pub display_name: Option<String>,
    pub is_active:    Option<bool>,
}

/// ユーザーの作成入力
///
/// `is_active` はバックエンドのデフォルト値に任せる。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUser {
    pub username:      Username,
    pub password_hash: PasswordHash,
    pub display_name:  Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn user_row(is_active: serde_json::Value) -> serde_json::Value {
        json!({
            "id": "0193a5b0-7c1e-7000-8000-0000000000aa",
            "username": "owner@acme.test",
            "password_hash": "temp$1$abc",
            "display_name": "Owner",
            "is_active": is_active,
            "last_login_at": null
        })
    }

    #[rstest]
    fn test_ユーザー名はtrimされ小文字化される() {
        let username = Username::new("  Owner@ACME.test ").unwrap();
        assert_eq!(username.as_str(), "owner@acme.test");
    }

    #[rstest]
    #[case(json!(false), true)]
    #[case(json!(true), false)]
    #[case(json!(null), false)]
    fn test_明示的なfalseのときだけ無効(#[case] is_active: serde_json::Value, #[case] disabled: bool) {
        let user: User = serde_json::from_value(user_row(is_active)).unwrap();
        assert_eq!(user.is_disabled(), disabled);
    }

    #[rstest]
    fn test_公開情報にはハッシュが含まれない() {
        let user: User = serde_json::from_value(user_row(json!(true))).unwrap();

        let value = serde_json::to_value(user.to_public()).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "0193a5b0-7c1e-7000-8000-0000000000aa",
                "username": "owner@acme.test",
                "display_name": "Owner",
                "is_active": true
            })
        );
    }

    #[rstest]
    fn test_ハッシュ列がない行もデシリアライズできる() {
        let row = json!({
            "id": "0193a5b0-7c1e-7000-8000-0000000000aa",
            "username": "owner@acme.test"
        });

        let user: User = serde_json::from_value(row).unwrap();

        assert_eq!(user.password_hash, None);
        assert!(!user.is_disabled());
    }
}

//! # パスワード
//!
//! パスワード関連の値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`PlainPassword`] | 平文パスワード | ログイン時の入力値 |
//! | [`NewPassword`] | 新しいパスワード | 管理者によるパスワード設定時の入力値（6 文字以上） |
//! | [`PasswordHash`] | パスワードハッシュ | 永続化用のハッシュ値、または仮ハッシュ |
//! | [`PasswordVerifyResult`] | 検証結果 | パスワード検証の成否 |
//!
//! ## 仮ハッシュ
//!
//! オーナー作成時のユーザーには、パスワード設定が済むまで
//! `temp$<unix ミリ秒>$<16 桁の乱数 hex>` 形式の仮ハッシュを保存する。
//! 仮ハッシュはどの入力に対しても検証に成功しない。

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// 仮ハッシュの接頭辞
pub const PLACEHOLDER_PREFIX: &str = "temp$";

/// パスワードの最小文字数
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// 平文パスワード（ログイン時の入力値）
///
/// # セキュリティ
///
/// Debug 出力ではパスワードの値をマスクする。
#[derive(Clone)]
pub struct PlainPassword(String);

impl std::fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PlainPassword").field(&"[REDACTED]").finish()
    }
}

impl PlainPassword {
    /// パスワードを作成する
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 前後の空白を除去した必須入力として作成する
    pub fn required(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("password required".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 新しいパスワード（管理者による設定時の入力値）
///
/// trim 後に 6 文字以上であることを保証する。
#[derive(Clone)]
pub struct NewPassword(PlainPassword);

impl std::fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("NewPassword").field(&"[REDACTED]").finish()
    }
}

impl NewPassword {
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::Validation(format!(
                "new_password (>={MIN_PASSWORD_LENGTH}) required"
            )));
        }
        Ok(Self(PlainPassword::new(trimmed)))
    }

    pub fn as_plain(&self) -> &PlainPassword {
        &self.0
    }
}

/// パスワードハッシュ（永続化用）
///
/// Argon2id の PHC 文字列、または [`PasswordHash::placeholder`] で生成した仮ハッシュ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// ハッシュ文字列からインスタンスを作成する
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// 仮ハッシュを生成する
    ///
    /// 呼び出しごとに異なる値になる。
    pub fn placeholder(now: DateTime<Utc>) -> Self {
        let suffix: u64 = rand::rng().random();
        Self(format!(
            "{PLACEHOLDER_PREFIX}{}${suffix:016x}",
            now.timestamp_millis()
        ))
    }

    /// 仮ハッシュかどうか
    pub fn is_placeholder(&self) -> bool {
        self.0.starts_with(PLACEHOLDER_PREFIX)
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

/// パスワード検証結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVerifyResult {
    /// パスワードが一致した
    Match,
    /// パスワードが一致しなかった
    Mismatch,
}

impl PasswordVerifyResult {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch)
    }
}

impl From<bool> for PasswordVerifyResult {
    fn from(matched: bool) -> Self {
        if matched { Self::Match } else { Self::Mismatch }
    }
}

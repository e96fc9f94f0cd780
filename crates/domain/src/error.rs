//! # ドメイン層エラー定義
//!
//! 入力値がビジネスルールに違反している状態を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 必須項目の欠落、形式不正、文字数不足 |
//!
//! 「見つからない」系のエラーはエコーするフィールドが操作ごとに異なるため、
//! API 層のエラー型で表現する。
//!
//! ## 使用例
//!
//! ```rust
//! use hygiene_domain::DomainError;
//!
//! fn validate_area(area: &str) -> Result<(), DomainError> {
//!     if area.trim().is_empty() {
//!         return Err(DomainError::Validation("area required".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_area(" ").is_err());
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// メッセージはクライアントに `message` としてそのまま返される。
    #[error("{0}")]
    Validation(String),
}

impl DomainError {
    /// バリデーションメッセージを取得する
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message) => message,
        }
    }
}

//! # 共通値オブジェクト
//!
//! 複数のエンティティや操作で共有される値オブジェクトと入力正規化ヘルパーを定義する。
//!
//! ## 含まれる型
//!
//! | 型 | ラップ対象 | 用途 |
//! |---|-----------|------|
//! | [`ListLimit`] | `u32` | 一覧取得の件数上限（1〜200 にクランプ） |
//! | [`ActiveFlag`] | `bool` | `is_active` 入力（明示的な `false` 以外は有効） |

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 一覧取得の件数上限
///
/// # 不変条件
///
/// - 値は常に `1..=200` の範囲内
///
/// # 使用例
///
/// ```rust
/// use hygiene_domain::value_objects::ListLimit;
///
/// assert_eq!(ListLimit::parse(Some("500"), ListLimit::DEFAULT_REPORTS).get(), 200);
/// assert_eq!(ListLimit::parse(Some("0"), ListLimit::DEFAULT_REPORTS).get(), 1);
/// assert_eq!(ListLimit::parse(None, ListLimit::DEFAULT_REPORTS).get(), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListLimit(u32);

impl ListLimit {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 200;
    /// 点検レポート一覧のデフォルト件数
    pub const DEFAULT_REPORTS: u32 = 20;
    /// その他の一覧のデフォルト件数
    pub const DEFAULT_LISTS: u32 = 50;

    /// 任意の整数を範囲内にクランプして作成する
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u32)
    }

    /// クエリパラメータの文字列から作成する
    ///
    /// 未指定・空文字・数値として解釈できない値はデフォルト値になる。
    /// 小数は切り捨てる。
    pub fn parse(raw: Option<&str>, default: u32) -> Self {
        raw.map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|n| n.is_finite())
            .map(|n| Self::clamped(n.floor() as i64))
            .unwrap_or_else(|| Self::clamped(i64::from(default)))
    }

    /// JSON ボディの値（数値または数値文字列）から作成する
    pub fn from_value(raw: Option<&Value>, default: u32) -> Self {
        match raw {
            Some(Value::Number(n)) => n
                .as_f64()
                .filter(|n| n.is_finite())
                .map(|n| Self::clamped(n.floor() as i64))
                .unwrap_or_else(|| Self::clamped(i64::from(default))),
            Some(Value::String(s)) => Self::parse(Some(s), default),
            _ => Self::clamped(i64::from(default)),
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

/// `is_active` 入力
///
/// 入力が JSON の `false` のときだけ無効になる。
/// 未指定・`null`・文字列 `"false"` などはすべて有効として扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveFlag(bool);

impl ActiveFlag {
    pub fn from_input(raw: Option<&Value>) -> Self {
        Self(!matches!(raw, Some(Value::Bool(false))))
    }

    pub fn get(&self) -> bool {
        self.0
    }
}

/// 任意入力の文字列を trim し、空なら `None` にする
pub fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

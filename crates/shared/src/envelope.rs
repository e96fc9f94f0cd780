//! # レスポンスエンベロープ
//!
//! 全エンドポイント共通のレスポンス形式 `{ "ok": bool, ... }` を提供する。
//!
//! - 成功: `{ "ok": true, "org": {...} }` のようにリソース固有キーを並べる
//! - 失敗: `{ "ok": false, "error": "<CODE>", "message"?: "...", "detail"?: {...} }`
//!
//! エラーコードの文字列は [`code`] モジュールの定数を使用する。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// エラーコード定数
///
/// クライアント（管理画面）はこの文字列で分岐するため、値は変更しないこと。
pub mod code {
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const AUTH_MISSING: &str = "AUTH_MISSING";
    pub const AUTH_DENIED: &str = "AUTH_DENIED";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const ACCOUNT_DISABLED: &str = "ACCOUNT_DISABLED";
    pub const ORG_NOT_FOUND: &str = "ORG_NOT_FOUND";
    pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";
    pub const METHOD_NOT_ALLOWED: &str = "METHOD_NOT_ALLOWED";
    pub const UNKNOWN_ACTION: &str = "UNKNOWN_ACTION";
    pub const BACKEND_ERROR: &str = "BACKEND_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// 成功レスポンス
///
/// `data` はフラット化されるため、フィールドを持つ構造体（またはマップ）を渡す。
///
/// ## 使用例
///
/// ```
/// use hygiene_shared::ApiResponse;
/// use serde_json::json;
///
/// let response = ApiResponse::new(json!({ "orgs": [] }));
/// let value = serde_json::to_value(&response).unwrap();
/// assert_eq!(value, json!({ "ok": true, "orgs": [] }));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok:   bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// 新しい成功レスポンスを作成する
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

/// エラーレスポンス
///
/// `extra` には `action` や `org_code` など、エラーの文脈をクライアントに
/// 返すための追加フィールドを格納する（トップレベルに展開される）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok:      bool,
    pub error:   String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail:  Option<Value>,
    #[serde(flatten)]
    pub extra:   Map<String, Value>,
}

impl ErrorResponse {
    /// エラーコードのみのレスポンスを作成する
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok:      false,
            error:   error.into(),
            message: None,
            detail:  None,
            extra:   Map::new(),
        }
    }

    /// メッセージを付与する
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// 診断用の詳細情報を付与する
    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = Some(detail);
        self
    }

    /// トップレベルに追加フィールドを付与する
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(code::BAD_REQUEST).with_message(message)
    }

    /// 405 Method Not Allowed
    pub fn method_not_allowed() -> Self {
        Self::new(code::METHOD_NOT_ALLOWED)
    }

    /// 500 Internal Server Error
    ///
    /// message は固定値（内部情報を漏らさないため）。
    pub fn internal_error() -> Self {
        Self::new(code::INTERNAL_ERROR).with_message("内部エラーが発生しました")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct OrgPayload {
        org: Value,
    }

    #[test]
    fn test_成功レスポンスはokとペイロードのキーをフラットに並べる() {
        let response = ApiResponse::new(OrgPayload {
            org: json!({ "name": "Acme" }),
        });

        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value, json!({ "ok": true, "org": { "name": "Acme" } }));
    }

    #[test]
    fn test_成功レスポンスをデシリアライズできる() {
        let response: ApiResponse<OrgPayload> =
            serde_json::from_str(r#"{"ok": true, "org": {"id": 1}}"#).unwrap();

        assert!(response.ok);
        assert_eq!(response.data.org, json!({ "id": 1 }));
    }

    #[test]
    fn test_エラーコードのみのときmessageとdetailは出力しない() {
        let value = serde_json::to_value(ErrorResponse::method_not_allowed()).unwrap();

        assert_eq!(value, json!({ "ok": false, "error": "METHOD_NOT_ALLOWED" }));
    }

    #[test]
    fn test_追加フィールドはトップレベルに展開される() {
        let error = ErrorResponse::new(code::UNKNOWN_ACTION).with_field("action", "drop_all");

        let value = serde_json::to_value(&error).unwrap();

        assert_eq!(
            value,
            json!({ "ok": false, "error": "UNKNOWN_ACTION", "action": "drop_all" })
        );
    }

    #[test]
    fn test_detail付きのエラーをシリアライズできる() {
        let error = ErrorResponse::new(code::BACKEND_ERROR)
            .with_detail(json!({ "status": 503, "data": "unavailable" }));

        let value = serde_json::to_value(&error).unwrap();

        assert_eq!(value["detail"]["status"], 503);
        assert_eq!(value["error"], "BACKEND_ERROR");
    }

    #[test]
    fn test_internal_errorは固定メッセージを返す() {
        let error = ErrorResponse::internal_error();

        assert_eq!(error.error, "INTERNAL_ERROR");
        assert_eq!(error.message.as_deref(), Some("内部エラーが発生しました"));
    }

    #[test]
    fn test_エラーレスポンスのデシリアライズで追加フィールドを保持する() {
        let error: ErrorResponse = serde_json::from_str(
            r#"{"ok": false, "error": "ORG_NOT_FOUND", "org_code": "acme"}"#,
        )
        .unwrap();

        assert_eq!(error.error, "ORG_NOT_FOUND");
        assert_eq!(error.extra.get("org_code"), Some(&json!("acme")));
    }
}

//! # 管理 API 認証ミドルウェア
//!
//! `Authorization: Bearer <token>` を設定済みの管理トークンと照合する。
//! 拒否したリクエストはハンドラに到達しないため、バックエンド呼び出しは発生しない。
//!
//! | 状況 | エラー |
//! |------|--------|
//! | `ADMIN_TOKEN` 未設定 | `CONFIG_ERROR` (500) |
//! | トークンなし | `AUTH_MISSING` (401) |
//! | トークン不一致 | `AUTH_DENIED` (401) |

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::{error::ApiError, state::AppState};

/// `Authorization` ヘッダーから Bearer トークンを取り出す
///
/// スキーム名は大文字小文字を区別せず、前後の空白を許容する。
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(char::is_whitespace)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// 管理トークンを検証する
fn authorize(expected: Option<&str>, headers: &HeaderMap) -> Result<(), ApiError> {
    let expected = expected
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Config("ADMIN_TOKEN".to_string()))?;
    let provided = extract_bearer_token(headers).ok_or(ApiError::AuthMissing)?;

    // タイミング攻撃対策として定数時間比較を使用
    let is_valid: bool = provided.as_bytes().ct_eq(expected.as_bytes()).into();
    if !is_valid {
        return Err(ApiError::AuthDenied);
    }
    Ok(())
}

/// 管理 API 用の認証ミドルウェア
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    match authorize(state.config.admin_token.as_deref(), request.headers()) {
        Ok(()) => next.run(request).await,
        Err(e) => {
            tracing::debug!(path = %request.uri().path(), "管理 API の認証に失敗しました: {}", e);
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn headers(authorization: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(authorization).unwrap());
        headers
    }

    #[rstest]
    #[case("Bearer secret", Some("secret"))]
    #[case("bearer secret", Some("secret"))]
    #[case("BEARER   secret  ", Some("secret"))]
    #[case("  Bearer secret", Some("secret"))]
    #[case("Basic secret", None)]
    #[case("Bearer", None)]
    #[case("Bearer    ", None)]
    #[case("secret", None)]
    fn test_bearerトークンの抽出(#[case] authorization: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_bearer_token(&headers(authorization)), expected);
    }

    #[test]
    fn test_ヘッダーがなければトークンなし() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_管理トークン未設定は設定エラー() {
        let result = authorize(None, &headers("Bearer secret"));

        assert!(matches!(result, Err(ApiError::Config(name)) if name == "ADMIN_TOKEN"));
    }

    #[test]
    fn test_管理トークンが空なら設定エラー() {
        let result = authorize(Some(""), &headers("Bearer secret"));

        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[test]
    fn test_トークンなしは認証なしエラー() {
        let result = authorize(Some("secret"), &HeaderMap::new());

        assert!(matches!(result, Err(ApiError::AuthMissing)));
    }

    #[test]
    fn test_トークン不一致は拒否() {
        let result = authorize(Some("secret"), &headers("Bearer secreT"));

        assert!(matches!(result, Err(ApiError::AuthDenied)));
    }

    #[test]
    fn test_トークン一致は通過() {
        assert!(authorize(Some("secret"), &headers("bearer secret")).is_ok());
    }
}

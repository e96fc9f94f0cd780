//! # リクエスト抽出
//!
//! ボディ・クエリの抽出失敗を共通エンベロープの `BAD_REQUEST` で返すための
//! axum エクストラクタ。
//!
//! ボディが空または `null` の場合は `{}` として扱う。

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// JSON ボディ
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;
        parse_body(&bytes).map(JsonBody)
    }
}

/// ボディを JSON として解釈する
pub(crate) fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    let value = if bytes.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(bytes)
            .map_err(|e| ApiError::Validation(format!("invalid JSON body: {e}")))?
    };
    from_data(value)
}

/// JSON 値をリクエスト型に変換する（`null` は `{}` として扱う）
pub(crate) fn from_data<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    let value = match value {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    serde_json::from_value(value).map_err(|e| ApiError::Validation(format!("invalid request: {e}")))
}

/// クエリパラメータ
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;
        Ok(QueryParams(params))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Input {
        #[serde(default)]
        name: Option<String>,
    }

    #[test]
    fn test_空のボディは空オブジェクトとして扱う() {
        let input: Input = parse_body(b"  ").unwrap();

        assert_eq!(input, Input { name: None });
    }

    #[test]
    fn test_nullは空オブジェクトとして扱う() {
        let input: Input = parse_body(b"null").unwrap();

        assert_eq!(input, Input { name: None });
    }

    #[test]
    fn test_不正なjsonは検証エラー() {
        let result: Result<Input, _> = parse_body(b"{name:");

        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_型が合わなければ検証エラー() {
        let result: Result<Input, _> = parse_body(br#"{"name": 42}"#);

        assert!(matches!(result, Err(ApiError::Validation(_))));
    }
}

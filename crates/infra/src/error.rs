//! # インフラ層エラー
//!
//! [`InfraError`] は種別（[`InfraErrorKind`]）と、生成時点の [`SpanTrace`] を持つ。
//! どのリポジトリ・どのテーブルへの呼び出しで失敗したかは SpanTrace から辿れるため、
//! 種別側にはテーブル名などを持たせない。
//!
//! API 層での扱い:
//!
//! | 種別 | API エラー |
//! |------|-----------|
//! | `Config` | `CONFIG_ERROR`（500） |
//! | それ以外 | `BACKEND_ERROR`（502） |

use std::fmt;

use derive_more::Display;
use serde_json::{Value, json};
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層のエラー
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// 必要な環境変数が未設定（値は変数名）
    #[error("設定が不足しています: {0}")]
    Config(String),

    /// 応答を受け取れなかった（接続失敗・タイムアウト）
    #[error("ネットワークエラー: {0}")]
    Network(String),

    /// バックエンドが 2xx 以外を返した
    #[error("バックエンドエラー: status={status}")]
    Backend { status: u16, data: Value },

    #[error("シリアライズエラー: {0}")]
    Serialization(#[source] serde_json::Error),

    /// 2xx だが期待した形ではなかった、など
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl From<InfraErrorKind> for InfraError {
    fn from(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }
}

impl InfraError {
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// `EXPOSE_ERROR_DETAIL` 有効時にレスポンスへ載せる `{status, data}`
    ///
    /// バックエンドが応答を返した場合だけ `Some`。
    pub fn backend_detail(&self) -> Option<Value> {
        match &self.kind {
            InfraErrorKind::Backend { status, data } => {
                Some(json!({ "status": status, "data": data }))
            }
            _ => None,
        }
    }

    pub fn config(variable: impl Into<String>) -> Self {
        InfraErrorKind::Config(variable.into()).into()
    }

    pub fn network(message: impl Into<String>) -> Self {
        InfraErrorKind::Network(message.into()).into()
    }

    pub fn backend(status: u16, data: Value) -> Self {
        InfraErrorKind::Backend { status, data }.into()
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        InfraErrorKind::Unexpected(message.into()).into()
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

/// reqwest のエラーはすべて「応答を受け取れなかった」として扱う
///
/// ステータスによる失敗は `error_for_status` ではなく
/// [`BackendResponse`](crate::backend::BackendResponse) 側で判定するため、ここには来ない。
impl From<reqwest::Error> for InfraError {
    fn from(source: reqwest::Error) -> Self {
        let message = if source.is_timeout() {
            format!("タイムアウトしました: {source}")
        } else {
            source.to_string()
        };
        InfraError::network(message)
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(source: serde_json::Error) -> Self {
        InfraErrorKind::Serialization(source).into()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    #[test]
    fn test_生成時のスパンがspan_traceに残る() {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        let span = tracing::info_span!("org_repository", table = "orgs");
        let _enter = span.enter();

        let err = InfraError::backend(503, json!("unavailable"));

        let trace = err.span_trace().to_string();
        assert!(trace.contains("org_repository"), "trace: {trace}");
    }

    #[test]
    fn test_backend_detailはステータスとボディを返す() {
        let err = InfraError::backend(409, json!({ "code": "23505" }));

        assert_eq!(
            err.backend_detail(),
            Some(json!({ "status": 409, "data": { "code": "23505" } }))
        );
    }

    #[test]
    fn test_応答がないエラーにはdetailがない() {
        assert!(InfraError::network("connection refused").backend_detail().is_none());

        let err = InfraError::config("SUPABASE_URL");
        assert!(err.backend_detail().is_none());
        assert_eq!(err.to_string(), "設定が不足しています: SUPABASE_URL");
    }

    #[test]
    fn test_serde_jsonのエラーはsourceを保持する() {
        let source = serde_json::from_str::<Value>("{").unwrap_err();

        let err = InfraError::from(source);

        assert!(matches!(err.kind(), InfraErrorKind::Serialization(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}

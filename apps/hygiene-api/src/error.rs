//! # API エラー定義
//!
//! ハンドラ・ユースケースが返すエラーと、共通エンベロープ
//! `{ "ok": false, "error": <CODE>, ... }` への変換を定義する。
//!
//! ## 診断情報（`detail`）の扱い
//!
//! バックエンドエラーの `{status, data}` や内部エラーの原因は、
//! レスポンスボディには含めずにレスポンス拡張（[`ErrorDetail`]）として保持する。
//! `EXPOSE_ERROR_DETAIL=true` のときだけ
//! [`crate::middleware::expose_error_detail`] がボディに差し込む。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hygiene_domain::{DomainError, org::OrgRef};
use hygiene_infra::{InfraError, InfraErrorKind};
use hygiene_shared::{
    ErrorResponse,
    envelope::code,
    event_log::error::{category, kind},
};
use serde_json::Value;
use thiserror::Error;

/// API で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// 入力値の検証エラー
    #[error("{0}")]
    Validation(String),

    /// 必要な設定（環境変数）が不足している
    #[error("設定が不足しています: {0}")]
    Config(String),

    /// Bearer トークンがない
    #[error("認証トークンがありません")]
    AuthMissing,

    /// Bearer トークンが一致しない
    #[error("認証トークンが一致しません")]
    AuthDenied,

    /// ユーザーが存在しない、またはパスワードが一致しない
    #[error("ユーザー名またはパスワードが正しくありません")]
    InvalidCredentials,

    /// ユーザーが無効化されている
    #[error("アカウントが無効です")]
    AccountDisabled,

    /// 指定された組織が存在しない
    #[error("組織が見つかりません")]
    OrgNotFound(OrgRef),

    /// 指定されたユーザーが存在しない
    #[error("ユーザーが見つかりません")]
    UserNotFound,

    /// 管理 API のアクション名が不明
    #[error("不明なアクションです: {0}")]
    UnknownAction(String),

    /// バックエンドへのリクエストが失敗した
    #[error("バックエンドエラー: {0}")]
    Backend(InfraError),

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

/// 診断情報付きの完全なエラーレスポンス
///
/// レスポンス拡張として保持し、公開するかどうかはミドルウェアで決める。
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub ErrorResponse);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(message) => ApiError::Validation(message),
        }
    }
}

impl From<InfraError> for ApiError {
    fn from(err: InfraError) -> Self {
        match err.kind() {
            InfraErrorKind::Config(name) => ApiError::Config(name.clone()),
            _ => ApiError::Backend(err),
        }
    }
}

impl ApiError {
    /// HTTP ステータスコード
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::UnknownAction(_) => StatusCode::BAD_REQUEST,
            ApiError::AuthMissing | ApiError::AuthDenied | ApiError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::AccountDisabled => StatusCode::FORBIDDEN,
            ApiError::OrgNotFound(_) | ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::Backend(_) => StatusCode::BAD_GATEWAY,
            ApiError::Config(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 公開用のエラーレスポンスと、診断情報を付けたエラーレスポンスを組み立てる
    fn to_envelopes(&self) -> (ErrorResponse, Option<ErrorResponse>) {
        match self {
            ApiError::Validation(message) => (ErrorResponse::bad_request(message), None),
            ApiError::Config(name) => (
                ErrorResponse::new(code::CONFIG_ERROR)
                    .with_message(format!("{name} が設定されていません")),
                None,
            ),
            ApiError::AuthMissing => (ErrorResponse::new(code::AUTH_MISSING), None),
            ApiError::AuthDenied => (ErrorResponse::new(code::AUTH_DENIED), None),
            ApiError::InvalidCredentials => (ErrorResponse::new(code::INVALID_CREDENTIALS), None),
            ApiError::AccountDisabled => (ErrorResponse::new(code::ACCOUNT_DISABLED), None),
            ApiError::OrgNotFound(org_ref) => {
                let response = ErrorResponse::new(code::ORG_NOT_FOUND);
                let response = match org_ref {
                    OrgRef::Id(id) => response.with_field("org_id", id.to_string()),
                    OrgRef::Code(org_code) => response.with_field("org_code", org_code.as_str()),
                };
                (response, None)
            }
            ApiError::UserNotFound => (ErrorResponse::new(code::USER_NOT_FOUND), None),
            ApiError::UnknownAction(action) => (
                ErrorResponse::new(code::UNKNOWN_ACTION).with_field("action", action.as_str()),
                None,
            ),
            ApiError::Backend(err) => {
                let public = ErrorResponse::new(code::BACKEND_ERROR)
                    .with_message("バックエンドへのリクエストに失敗しました");
                let detail = err
                    .backend_detail()
                    .unwrap_or_else(|| Value::String(err.to_string()));
                (public.clone(), Some(public.with_detail(detail)))
            }
            ApiError::Internal(message) => {
                let public = ErrorResponse::internal_error();
                let full = ErrorResponse::internal_error().with_detail(Value::String(message.clone()));
                (public, Some(full))
            }
        }
    }

    fn log(&self) {
        match self {
            ApiError::Config(name) => {
                tracing::error!(
                    error.category = category::CONFIGURATION,
                    "設定が不足しています: {}",
                    name
                );
            }
            ApiError::Backend(err) => {
                tracing::error!(
                    error.category = category::EXTERNAL_SERVICE,
                    error.kind = kind::BACKEND,
                    detail = ?err.backend_detail(),
                    "バックエンドエラー: {}\n{}",
                    err,
                    err.span_trace()
                );
            }
            ApiError::Internal(message) => {
                tracing::error!(
                    error.category = category::INTERNAL,
                    "内部エラー: {}",
                    message
                );
            }
            _ => {}
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status();
        let (public, full) = self.to_envelopes();
        let mut response = (status, Json(public)).into_response();
        if let Some(full) = full {
            response.extensions_mut().insert(ErrorDetail(full));
        }
        response
    }
}

//! # パニックハンドラ
//!
//! `CatchPanicLayer` から呼ばれ、`INTERNAL_ERROR` エンベロープを返す。
//! パニックのメッセージは [`ErrorDetail`] として付け、公開の判断は
//! [`expose_error_detail`](super::expose_error_detail) に任せる。

use std::any::Any;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hygiene_shared::{
    ErrorResponse,
    event_log::error::{category, kind},
};
use serde_json::Value;

use crate::error::ErrorDetail;

/// パニックを 500 のエラーレスポンスに変換する
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "不明なパニック"
    };

    tracing::error!(
        error.category = category::INTERNAL,
        error.kind = kind::PANIC,
        "ハンドラがパニックしました: {}",
        message
    );

    let mut response = (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal_error()),
    )
        .into_response();
    let full = ErrorResponse::internal_error().with_detail(Value::String(message.to_string()));
    response.extensions_mut().insert(ErrorDetail(full));
    response
}

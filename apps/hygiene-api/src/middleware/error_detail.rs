//! # エラー診断情報ミドルウェア
//!
//! [`ErrorDetail`] 拡張を持つエラーレスポンスについて、
//! 公開が許可されていれば診断情報付きのボディに差し替える。
//! 許可されていなければ拡張を取り除くだけ。

use axum::{
    Json,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ErrorDetail;

/// `detail` を公開するかどうかを State で受け取るミドルウェア
pub async fn expose_error_detail(
    State(expose): State<bool>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let Some(ErrorDetail(full)) = response.extensions_mut().remove::<ErrorDetail>() else {
        return response;
    };
    if !expose {
        return response;
    }

    (response.status(), Json(full)).into_response()
}

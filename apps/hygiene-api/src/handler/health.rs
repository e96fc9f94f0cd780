//! # ヘルスチェックハンドラ
//!
//! - `GET /api/health`: プロセスの生存確認（バックエンドには触れない）
//! - `GET /api/health/ready`: バックエンドへの軽量な select で疎通を確認する
//!
//! レスポンス型は [`hygiene_shared::HealthResponse`] /
//! [`hygiene_shared::ReadinessResponse`] を参照。

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use hygiene_shared::{ApiResponse, CheckStatus, HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// サービス名
pub const SERVICE_NAME: &str = "jtai-hygiene";

/// ヘルスチェックエンドポイント
pub async fn health_check() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::new(HealthResponse::healthy(
        SERVICE_NAME,
        env!("CARGO_PKG_VERSION"),
        Utc::now(),
    )))
}

/// Readiness Check エンドポイント
///
/// バックエンドに到達できなければ 503 を返す。
pub async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ApiResponse<ReadinessResponse>>) {
    let reachable = match state.backend.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Readiness Check: バックエンドに接続できません: {}", e);
            false
        }
    };

    let response = ReadinessResponse::default().with_check("backend", CheckStatus::from(reachable));
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ApiResponse {
            ok:   response.is_ready(),
            data: response,
        }),
    )
}

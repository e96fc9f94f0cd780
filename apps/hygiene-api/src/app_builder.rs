//! # アプリケーション構築
//!
//! 依存（State）の組み立てとルーター構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。
//!
//! ## ルート
//!
//! | メソッド | パス | 認証 |
//! |----------|------|------|
//! | GET | `/api/health`, `/api/health/ready` | なし |
//! | POST | `/api/auth/login` | パスワード |
//! | POST | `/api/report_submit` | なし |
//! | GET/POST | `/api/admin/*`, `POST /api/admin` | 管理トークン |
//!
//! メソッドが合わないリクエストは `METHOD_NOT_ALLOWED`（405）のエンベロープを返す。

use std::sync::Arc;

use axum::{
    Json,
    Router,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post},
};
use hygiene_domain::clock::SystemClock;
use hygiene_infra::{
    Argon2PasswordChecker,
    InfraError,
    backend::{BackendClient, PostgrestClient},
    repository::{
        PostgrestChecklistRepository,
        PostgrestMembershipRepository,
        PostgrestOrgRepository,
        PostgrestReportRepository,
        PostgrestSiteRepository,
        PostgrestUserRepository,
    },
};
use hygiene_shared::{
    ErrorResponse,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    config::AppConfig,
    handler::{
        admin_dispatch,
        checklist_create,
        checklist_list,
        health_check,
        login,
        org_create,
        org_list,
        org_owner_create,
        readiness_check,
        report_list,
        report_submit,
        site_list,
        site_upsert,
        user_set_password,
    },
    middleware::{expose_error_detail, handle_panic, require_admin},
    state::{AppState, Repositories},
};

/// 本番用の依存を組み立てる
///
/// 全リポジトリで 1 つの [`PostgrestClient`]（= 1 つの HTTP コネクションプール）を共有する。
pub fn build_state(config: AppConfig) -> Result<AppState, InfraError> {
    let backend: Arc<dyn BackendClient> = Arc::new(PostgrestClient::new(config.backend_config())?);

    let repositories = Repositories {
        orgs:       Arc::new(PostgrestOrgRepository::new(backend.clone())),
        users:      Arc::new(PostgrestUserRepository::new(backend.clone())),
        members:    Arc::new(PostgrestMembershipRepository::new(backend.clone())),
        checklists: Arc::new(PostgrestChecklistRepository::new(backend.clone())),
        sites:      Arc::new(PostgrestSiteRepository::new(backend.clone())),
        reports:    Arc::new(PostgrestReportRepository::new(backend.clone())),
    };

    Ok(AppState::new(
        config,
        backend,
        repositories,
        Arc::new(Argon2PasswordChecker::new()),
        Arc::new(SystemClock),
    ))
}

/// 405 Method Not Allowed のエンベロープ
async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::method_not_allowed()),
    )
}

/// ルーターを構築する
pub fn build_app(state: Arc<AppState>) -> Router {
    let expose = state.config.expose_error_detail;

    // 管理 API（Bearer トークン必須）
    // route_layer により、ルートに一致したリクエストだけを検証する
    let admin = Router::new()
        .route("/api/admin", post(admin_dispatch))
        .route("/api/admin/org_create", post(org_create))
        .route("/api/admin/org_list", get(org_list))
        .route("/api/admin/org_owner_create", post(org_owner_create))
        .route("/api/admin/user_set_password", post(user_set_password))
        .route("/api/admin/checklist_create", post(checklist_create))
        .route("/api/admin/checklist_list", get(checklist_list))
        .route("/api/admin/site_upsert", post(site_upsert))
        .route("/api/admin/site_list", get(site_list))
        .route("/api/admin/report_list", get(report_list))
        .route_layer(from_fn_with_state(state.clone(), require_admin));

    // Request ID + TraceLayer により、すべての HTTP リクエストに request_id が付与されログに自動注入される
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/health/ready", get(readiness_check))
        .route("/api/auth/login", post(login))
        .route("/api/report_submit", post(report_submit))
        .merge(admin)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(from_fn_with_state(expose, expose_error_detail))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}

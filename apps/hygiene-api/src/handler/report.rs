//! # 点検レポート送信ハンドラ
//!
//! - `POST /api/report_submit`（認証不要）
//!
//! `site_name` 未指定時は `JTAI`。`area` と `status` は必須。

use std::sync::Arc;

use axum::{Json, extract::State};
use hygiene_domain::report::{HygieneReport, NewReport, ReportArea, ReportStatus};
use hygiene_shared::ApiResponse;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extract::JsonBody, state::AppState};

/// レポート送信リクエスト
#[derive(Debug, Default, Deserialize)]
pub struct ReportSubmitRequest {
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub area:      Option<String>,
    #[serde(default)]
    pub status:    Option<String>,
    #[serde(default)]
    pub note:      Option<String>,
}

/// レポート送信レスポンス
#[derive(Debug, Serialize)]
pub struct ReportSubmitResponse {
    pub report: HygieneReport,
}

/// POST /api/report_submit
pub async fn report_submit(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<ReportSubmitRequest>,
) -> Result<Json<ApiResponse<ReportSubmitResponse>>, ApiError> {
    let area = ReportArea::new(req.area.unwrap_or_default())?;
    let status = ReportStatus::new(req.status.unwrap_or_default())?;
    let report = NewReport::new(req.site_name.as_deref(), area, status, req.note.as_deref());

    let report = state.repositories.reports.insert(&report).await?;
    Ok(Json(ApiResponse::new(ReportSubmitResponse { report })))
}

//! # 点検レポート一覧
//!
//! - `GET /api/admin/report_list`: 作成日時の降順（既定 20 件）
//!
//! `hygiene_reports` に組織の列がないため、`org_id` は受け付けるが絞り込みには使わない。

use std::sync::Arc;

use axum::{Json, extract::State};
use hygiene_domain::{report::HygieneReport, value_objects::ListLimit};
use hygiene_shared::ApiResponse;
use serde::Serialize;

use super::ListParams;
use crate::{error::ApiError, extract::QueryParams, state::AppState};

#[derive(Debug, Serialize)]
pub struct ReportListResponse {
    pub reports: Vec<HygieneReport>,
}

pub async fn list_reports(
    state: &AppState,
    params: ListParams,
) -> Result<ReportListResponse, ApiError> {
    if params.org_id.as_deref().is_some_and(|s| !s.trim().is_empty()) {
        tracing::debug!("report_list: org_id は絞り込みに使用しません");
    }
    let limit = ListLimit::from_value(params.limit.as_ref(), ListLimit::DEFAULT_REPORTS);

    let reports = state.repositories.reports.list(limit).await?;
    Ok(ReportListResponse { reports })
}

/// GET /api/admin/report_list
pub async fn report_list(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<Json<ApiResponse<ReportListResponse>>, ApiError> {
    Ok(Json(ApiResponse::new(list_reports(&state, params).await?)))
}

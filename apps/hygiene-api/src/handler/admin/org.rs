//! # 組織の作成・一覧
//!
//! - `POST /api/admin/org_create`: `org_name`（または `name`）と `org_code` で作成。コードは小文字化
//! - `GET /api/admin/org_list`: 作成日時の降順（既定 50 件）

use std::sync::Arc;

use axum::{Json, extract::State};
use hygiene_domain::{
    org::{NewOrg, Org, OrgCode, OrgName},
    value_objects::{ActiveFlag, ListLimit},
};
use hygiene_shared::{ApiResponse, event_log::event, log_business_event};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ListParams;
use crate::{
    error::ApiError,
    extract::{JsonBody, QueryParams},
    state::AppState,
};

/// 組織作成リクエスト
#[derive(Debug, Default, Deserialize)]
pub struct CreateOrgRequest {
    #[serde(default)]
    pub org_name:  Option<String>,
    /// `org_name` の別名
    #[serde(default)]
    pub name:      Option<String>,
    #[serde(default)]
    pub org_code:  Option<String>,
    #[serde(default)]
    pub is_active: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct OrgResponse {
    pub org: Org,
}

#[derive(Debug, Serialize)]
pub struct OrgListResponse {
    pub orgs: Vec<Org>,
}

/// 組織を作成する
pub async fn create_org(state: &AppState, req: CreateOrgRequest) -> Result<OrgResponse, ApiError> {
    let name = req
        .org_name
        .filter(|s| !s.trim().is_empty())
        .or(req.name)
        .unwrap_or_default();
    let name = OrgName::new(name)?;
    let code = OrgCode::new(req.org_code.unwrap_or_default())?;
    let new_org = NewOrg::new(name, code, ActiveFlag::from_input(req.is_active.as_ref()));

    let org = state.repositories.orgs.insert(&new_org).await?;

    log_business_event!(
        event.category = event::category::PROVISIONING,
        event.action = event::action::ORG_CREATED,
        event.entity_type = event::entity_type::ORG,
        event.entity_id = %org.id,
        event.result = event::result::SUCCESS,
        "組織を作成しました"
    );
    Ok(OrgResponse { org })
}

/// 組織一覧を取得する
pub async fn list_orgs(state: &AppState, params: ListParams) -> Result<OrgListResponse, ApiError> {
    let limit = ListLimit::from_value(params.limit.as_ref(), ListLimit::DEFAULT_LISTS);
    let orgs = state.repositories.orgs.list(limit).await?;
    Ok(OrgListResponse { orgs })
}

/// POST /api/admin/org_create
pub async fn org_create(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateOrgRequest>,
) -> Result<Json<ApiResponse<OrgResponse>>, ApiError> {
    Ok(Json(ApiResponse::new(create_org(&state, req).await?)))
}

/// GET /api/admin/org_list
pub async fn org_list(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<Json<ApiResponse<OrgListResponse>>, ApiError> {
    Ok(Json(ApiResponse::new(list_orgs(&state, params).await?)))
}

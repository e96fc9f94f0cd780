//! # 拠点の登録・一覧
//!
//! `site_upsert` は名前の重複を確認せず、常に新しい行を挿入する。

use std::sync::Arc;

use axum::{Json, extract::State};
use hygiene_domain::{
    org::OrgId,
    site::{NewSite, Site, SiteName},
    value_objects::{ActiveFlag, ListLimit},
};
use hygiene_shared::ApiResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ListParams;
use crate::{
    error::ApiError,
    extract::{JsonBody, QueryParams},
    state::AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct UpsertSiteRequest {
    #[serde(default)]
    pub org_id:    Option<String>,
    #[serde(default)]
    pub name:      Option<String>,
    #[serde(default)]
    pub is_active: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct SiteResponse {
    pub site: Site,
}

#[derive(Debug, Serialize)]
pub struct SiteListResponse {
    pub sites: Vec<Site>,
}

pub async fn upsert_site(state: &AppState, req: UpsertSiteRequest) -> Result<SiteResponse, ApiError> {
    let org_id = OrgId::parse("org_id", req.org_id.as_deref().unwrap_or_default())?;
    let name = SiteName::new(req.name.unwrap_or_default())?;
    let site = NewSite::new(org_id, name, ActiveFlag::from_input(req.is_active.as_ref()));

    let site = state.repositories.sites.insert(&site).await?;
    Ok(SiteResponse { site })
}

pub async fn list_sites(state: &AppState, params: ListParams) -> Result<SiteListResponse, ApiError> {
    let org_id = params.required_org_id()?;
    let limit = ListLimit::from_value(params.limit.as_ref(), ListLimit::DEFAULT_LISTS);

    let sites = state.repositories.sites.list_by_org(&org_id, limit).await?;
    Ok(SiteListResponse { sites })
}

/// POST /api/admin/site_upsert
pub async fn site_upsert(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<UpsertSiteRequest>,
) -> Result<Json<ApiResponse<SiteResponse>>, ApiError> {
    Ok(Json(ApiResponse::new(upsert_site(&state, req).await?)))
}

/// GET /api/admin/site_list
pub async fn site_list(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<Json<ApiResponse<SiteListResponse>>, ApiError> {
    Ok(Json(ApiResponse::new(list_sites(&state, params).await?)))
}

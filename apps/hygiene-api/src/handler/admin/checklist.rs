//! # チェックリストの作成・一覧

use std::sync::Arc;

use axum::{Json, extract::State};
use hygiene_domain::{
    checklist::{Checklist, ChecklistName, NewChecklist},
    org::OrgId,
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
pub struct CreateChecklistRequest {
    #[serde(default)]
    pub org_id:      Option<String>,
    #[serde(default)]
    pub name:        Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active:   Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ChecklistResponse {
    pub checklist: Checklist,
}

#[derive(Debug, Serialize)]
pub struct ChecklistListResponse {
    pub checklists: Vec<Checklist>,
}

pub async fn create_checklist(
    state: &AppState,
    req: CreateChecklistRequest,
) -> Result<ChecklistResponse, ApiError> {
    let org_id = OrgId::parse("org_id", req.org_id.as_deref().unwrap_or_default())?;
    let name = ChecklistName::new(req.name.unwrap_or_default())?;
    let checklist = NewChecklist::new(
        org_id,
        name,
        req.description.as_deref(),
        ActiveFlag::from_input(req.is_active.as_ref()),
    );

    let checklist = state.repositories.checklists.insert(&checklist).await?;
    Ok(ChecklistResponse { checklist })
}

pub async fn list_checklists(
    state: &AppState,
    params: ListParams,
) -> Result<ChecklistListResponse, ApiError> {
    let org_id = params.required_org_id()?;
    let limit = ListLimit::from_value(params.limit.as_ref(), ListLimit::DEFAULT_LISTS);

    let checklists = state
        .repositories
        .checklists
        .list_by_org(&org_id, limit)
        .await?;
    Ok(ChecklistListResponse { checklists })
}

/// POST /api/admin/checklist_create
pub async fn checklist_create(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateChecklistRequest>,
) -> Result<Json<ApiResponse<ChecklistResponse>>, ApiError> {
    Ok(Json(ApiResponse::new(create_checklist(&state, req).await?)))
}

/// GET /api/admin/checklist_list
pub async fn checklist_list(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<Json<ApiResponse<ChecklistListResponse>>, ApiError> {
    Ok(Json(ApiResponse::new(list_checklists(&state, params).await?)))
}

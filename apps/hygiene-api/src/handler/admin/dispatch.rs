//! # 管理 API ディスパッチ
//!
//! - `POST /api/admin`: `{ "action": "<name>", "data": { ... } }`
//!
//! `data` は各ルートのリクエストと同じ形。`data` 省略時は `{}`。
//! `action` が空なら `BAD_REQUEST`、未知なら `UNKNOWN_ACTION`。

use std::{str::FromStr, sync::Arc};

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use hygiene_shared::ApiResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{EnumString, IntoStaticStr};

use super::{checklist, org, owner, report, site, user};
use crate::{
    error::ApiError,
    extract::{JsonBody, from_data},
    state::AppState,
};

/// 管理アクション
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum AdminAction {
    OrgCreate,
    OrgList,
    OrgOwnerCreate,
    UserSetPassword,
    ChecklistCreate,
    ChecklistList,
    SiteUpsert,
    SiteList,
    ReportList,
}

/// ディスパッチリクエスト
#[derive(Debug, Default, Deserialize)]
pub struct DispatchRequest {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub data:   Value,
}

fn ok<T: Serialize>(data: T) -> Response {
    Json(ApiResponse::new(data)).into_response()
}

/// アクションを実行する
pub async fn dispatch(state: &AppState, req: DispatchRequest) -> Result<Response, ApiError> {
    let action = req.action.as_deref().map(str::trim).unwrap_or_default();
    if action.is_empty() {
        return Err(ApiError::Validation("action required".to_string()));
    }
    let action =
        AdminAction::from_str(action).map_err(|_| ApiError::UnknownAction(action.to_string()))?;
    let action_name: &'static str = action.into();
    tracing::debug!(action = action_name, "管理アクションを実行します");

    let data = req.data;
    let response = match action {
        AdminAction::OrgCreate => ok(org::create_org(state, from_data(data)?).await?),
        AdminAction::OrgList => ok(org::list_orgs(state, from_data(data)?).await?),
        AdminAction::OrgOwnerCreate => ok(owner::create_owner(state, from_data(data)?).await?),
        AdminAction::UserSetPassword => ok(user::set_password(state, from_data(data)?).await?),
        AdminAction::ChecklistCreate => {
            ok(checklist::create_checklist(state, from_data(data)?).await?)
        }
        AdminAction::ChecklistList => {
            ok(checklist::list_checklists(state, from_data(data)?).await?)
        }
        AdminAction::SiteUpsert => ok(site::upsert_site(state, from_data(data)?).await?),
        AdminAction::SiteList => ok(site::list_sites(state, from_data(data)?).await?),
        AdminAction::ReportList => ok(report::list_reports(state, from_data(data)?).await?),
    };
    Ok(response)
}

/// POST /api/admin
pub async fn admin_dispatch(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<DispatchRequest>,
) -> Result<Response, ApiError> {
    dispatch(&state, req).await
}

//! # 組織オーナー作成
//!
//! - `POST /api/admin/org_owner_create`
//!
//! 処理本体は [`crate::usecase::ProvisioningUseCase`]。

use std::sync::Arc;

use axum::{Json, extract::State};
use hygiene_domain::{org::OrgRef, user::Username, value_objects::optional_text};
use hygiene_shared::ApiResponse;
use serde::Deserialize;

use crate::{
    error::ApiError,
    extract::JsonBody,
    state::AppState,
    usecase::{OwnerInput, ProvisionedOwner},
};

/// オーナー作成リクエスト
///
/// 組織は `org_id` または `org_code` で指定する（両方あれば `org_id` を使う）。
#[derive(Debug, Default, Deserialize)]
pub struct CreateOwnerRequest {
    #[serde(default)]
    pub org_id:       Option<String>,
    #[serde(default)]
    pub org_code:     Option<String>,
    #[serde(default)]
    pub username:     Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// 組織オーナーを用意する
pub async fn create_owner(
    state: &AppState,
    req: CreateOwnerRequest,
) -> Result<ProvisionedOwner, ApiError> {
    let org = OrgRef::resolve(req.org_id.as_deref(), req.org_code.as_deref())?;
    let username = Username::new(req.username.unwrap_or_default())?;
    let input = OwnerInput {
        org,
        username,
        display_name: optional_text(req.display_name.as_deref()),
    };

    state.provisioning.provision_owner(input).await
}

/// POST /api/admin/org_owner_create
pub async fn org_owner_create(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateOwnerRequest>,
) -> Result<Json<ApiResponse<ProvisionedOwner>>, ApiError> {
    Ok(Json(ApiResponse::new(create_owner(&state, req).await?)))
}

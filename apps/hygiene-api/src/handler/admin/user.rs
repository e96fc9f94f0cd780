//! # ユーザーのパスワード設定
//!
//! - `POST /api/admin/user_set_password`: `{username, new_password}`
//!
//! レスポンスにハッシュは含めない。

use std::sync::Arc;

use axum::{Json, extract::State};
use hygiene_domain::{
    password::NewPassword,
    user::{PublicUser, Username},
};
use hygiene_shared::ApiResponse;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extract::JsonBody, state::AppState};

/// パスワード設定リクエスト
#[derive(Debug, Default, Deserialize)]
pub struct SetPasswordRequest {
    #[serde(default)]
    pub username:     Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: PublicUser,
}

/// パスワードを設定する
pub async fn set_password(
    state: &AppState,
    req: SetPasswordRequest,
) -> Result<UserResponse, ApiError> {
    let username = Username::new(req.username.unwrap_or_default())?;
    let new_password = NewPassword::new(req.new_password.as_deref().unwrap_or_default())?;

    let user = state.password.set_password(&username, &new_password).await?;
    Ok(UserResponse { user })
}

/// POST /api/admin/user_set_password
pub async fn user_set_password(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<SetPasswordRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    Ok(Json(ApiResponse::new(set_password(&state, req).await?)))
}

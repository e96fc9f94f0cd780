//! # ログインハンドラ
//!
//! - `POST /api/auth/login`
//!
//! ユーザー名は trim して小文字化、パスワードは trim してから検証する。

use std::sync::Arc;

use axum::{Json, extract::State};
use hygiene_domain::{password::PlainPassword, user::Username};
use hygiene_shared::ApiResponse;
use serde::Deserialize;

use crate::{error::ApiError, extract::JsonBody, state::AppState, usecase::LoginResult};

/// ログインリクエスト
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResult>>, ApiError> {
    let username = Username::new(req.username.unwrap_or_default())?;
    let password = PlainPassword::required(req.password.as_deref().unwrap_or_default())?;

    let result = state.login.login(&username, &password).await?;
    Ok(Json(ApiResponse::new(result)))
}

//! # UserRepository
//!
//! ユーザー（`users` テーブル）の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **ユーザー名で検索**: ユーザー名は小文字で一意
//! - **パッチは ID 指定**: パスワードハッシュと最終ログイン日時のみ更新する

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hygiene_domain::{
    password::PasswordHash,
    user::{NewUser, User, UserId, Username},
};
use serde_json::json;

use crate::{
    backend::{BackendClient, Query, Table},
    error::InfraError,
};

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザー名で検索する
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(user))`: ユーザーが見つかった場合
    /// - `Ok(None)`: ユーザーが見つからない場合
    /// - `Err(_)`: バックエンドエラー
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, InfraError>;

    /// ユーザーを作成する
    async fn insert(&self, user: &NewUser) -> Result<User, InfraError>;

    /// パスワードハッシュを更新し、更新後の行を返す
    async fn update_password(&self, id: &UserId, hash: &PasswordHash) -> Result<User, InfraError>;

    /// 最終ログイン日時を更新する
    async fn update_last_login(&self, id: &UserId, at: DateTime<Utc>) -> Result<(), InfraError>;
}

/// PostgREST 実装の UserRepository
#[derive(Clone)]
pub struct PostgrestUserRepository {
    client: Arc<dyn BackendClient>,
}

impl PostgrestUserRepository {
    pub fn new(client: Arc<dyn BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserRepository for PostgrestUserRepository {
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, InfraError> {
        let query = Query::table(Table::Users)
            .eq("username", username.as_str())
            .select("*");
        self.client.select(&query).await?.into_first()
    }

    async fn insert(&self, user: &NewUser) -> Result<User, InfraError> {
        let rows = serde_json::to_value([user])?;
        self.client.insert(Table::Users, rows).await?.into_single()
    }

    async fn update_password(&self, id: &UserId, hash: &PasswordHash) -> Result<User, InfraError> {
        let query = Query::table(Table::Users).eq("id", id.to_string());
        self.client
            .patch(&query, json!({ "password_hash": hash.as_str() }))
            .await?
            .into_single()
    }

    async fn update_last_login(&self, id: &UserId, at: DateTime<Utc>) -> Result<(), InfraError> {
        let query = Query::table(Table::Users).eq("id", id.to_string());
        self.client
            .patch(&query, json!({ "last_login_at": at.to_rfc3339() }))
            .await?
            .error_for_status()?;
        Ok(())
    }
}

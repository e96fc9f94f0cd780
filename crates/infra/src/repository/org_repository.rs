//! # OrgRepository
//!
//! 組織（`orgs` テーブル）の永続化を担当するリポジトリ。

use std::sync::Arc;

use async_trait::async_trait;
use hygiene_domain::{
    org::{NewOrg, Org, OrgCode, OrgId},
    value_objects::ListLimit,
};

use crate::{
    backend::{BackendClient, Query, Table},
    error::InfraError,
};

/// 組織リポジトリトレイト
#[async_trait]
pub trait OrgRepository: Send + Sync {
    /// 組織を作成する
    async fn insert(&self, org: &NewOrg) -> Result<Org, InfraError>;

    /// 作成日時の降順で一覧を取得する
    async fn list(&self, limit: ListLimit) -> Result<Vec<Org>, InfraError>;

    /// ID で組織を検索する
    async fn find_by_id(&self, id: &OrgId) -> Result<Option<Org>, InfraError>;

    /// 組織コード（小文字）で組織を検索する
    async fn find_by_code(&self, code: &OrgCode) -> Result<Option<Org>, InfraError>;
}

/// PostgREST 実装の OrgRepository
#[derive(Clone)]
pub struct PostgrestOrgRepository {
    client: Arc<dyn BackendClient>,
}

impl PostgrestOrgRepository {
    pub fn new(client: Arc<dyn BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrgRepository for PostgrestOrgRepository {
    async fn insert(&self, org: &NewOrg) -> Result<Org, InfraError> {
        let rows = serde_json::to_value([org])?;
        self.client.insert(Table::Orgs, rows).await?.into_single()
    }

    async fn list(&self, limit: ListLimit) -> Result<Vec<Org>, InfraError> {
        let query = Query::table(Table::Orgs)
            .select("*")
            .order_desc("created_at")
            .limit(limit.get());
        self.client.select(&query).await?.into_rows()
    }

    async fn find_by_id(&self, id: &OrgId) -> Result<Option<Org>, InfraError> {
        let query = Query::table(Table::Orgs)
            .eq("id", id.to_string())
            .select("*");
        self.client.select(&query).await?.into_first()
    }

    async fn find_by_code(&self, code: &OrgCode) -> Result<Option<Org>, InfraError> {
        let query = Query::table(Table::Orgs)
            .eq("code", code.as_str())
            .select("*");
        self.client.select(&query).await?.into_first()
    }
}

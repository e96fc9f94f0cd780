//! # SiteRepository
//!
//! 拠点（`sites` テーブル）の永続化を担当するリポジトリ。

use std::sync::Arc;

use async_trait::async_trait;
use hygiene_domain::{
    org::OrgId,
    site::{NewSite, Site},
    value_objects::ListLimit,
};

use crate::{
    backend::{BackendClient, Query, Table},
    error::InfraError,
};

/// 拠点リポジトリトレイト
#[async_trait]
pub trait SiteRepository: Send + Sync {
    async fn insert(&self, site: &NewSite) -> Result<Site, InfraError>;

    /// 組織の拠点を作成日時の降順で取得する
    async fn list_by_org(&self, org_id: &OrgId, limit: ListLimit)
    -> Result<Vec<Site>, InfraError>;
}

/// PostgREST 実装の SiteRepository
#[derive(Clone)]
pub struct PostgrestSiteRepository {
    client: Arc<dyn BackendClient>,
}

impl PostgrestSiteRepository {
    pub fn new(client: Arc<dyn BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SiteRepository for PostgrestSiteRepository {
    async fn insert(&self, site: &NewSite) -> Result<Site, InfraError> {
        let rows = serde_json::to_value([site])?;
        self.client.insert(Table::Sites, rows).await?.into_single()
    }

    async fn list_by_org(
        &self,
        org_id: &OrgId,
        limit: ListLimit,
    ) -> Result<Vec<Site>, InfraError> {
        let query = Query::table(Table::Sites)
            .eq("org_id", org_id.to_string())
            .order_desc("created_at")
            .limit(limit.get());
        self.client.select(&query).await?.into_rows()
    }
}

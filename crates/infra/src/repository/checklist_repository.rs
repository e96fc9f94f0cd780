//! # ChecklistRepository
//!
//! チェックリスト（`checklists` テーブル）の永続化を担当するリポジトリ。

use std::sync::Arc;

use async_trait::async_trait;
use hygiene_domain::{
    checklist::{Checklist, NewChecklist},
    org::OrgId,
    value_objects::ListLimit,
};

use crate::{
    backend::{BackendClient, Query, Table},
    error::InfraError,
};

/// チェックリストリポジトリトレイト
#[async_trait]
pub trait ChecklistRepository: Send + Sync {
    async fn insert(&self, checklist: &NewChecklist) -> Result<Checklist, InfraError>;

    /// 組織のチェックリストを作成日時の降順で取得する
    async fn list_by_org(
        &self,
        org_id: &OrgId,
        limit: ListLimit,
    ) -> Result<Vec<Checklist>, InfraError>;
}

/// PostgREST 実装の ChecklistRepository
#[derive(Clone)]
pub struct PostgrestChecklistRepository {
    client: Arc<dyn BackendClient>,
}

impl PostgrestChecklistRepository {
    pub fn new(client: Arc<dyn BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChecklistRepository for PostgrestChecklistRepository {
    async fn insert(&self, checklist: &NewChecklist) -> Result<Checklist, InfraError> {
        let rows = serde_json::to_value([checklist])?;
        self.client
            .insert(Table::Checklists, rows)
            .await?
            .into_single()
    }

    async fn list_by_org(
        &self,
        org_id: &OrgId,
        limit: ListLimit,
    ) -> Result<Vec<Checklist>, InfraError> {
        let query = Query::table(Table::Checklists)
            .eq("org_id", org_id.to_string())
            .order_desc("created_at")
            .limit(limit.get());
        self.client.select(&query).await?.into_rows()
    }
}

//! # ReportRepository
//!
//! 衛生点検レポート（`hygiene_reports` テーブル）の永続化を担当するリポジトリ。
//!
//! テーブルに組織の列がないため、一覧は組織で絞り込まない。

use std::sync::Arc;

use async_trait::async_trait;
use hygiene_domain::{
    report::{HygieneReport, NewReport},
    value_objects::ListLimit,
};

use crate::{
    backend::{BackendClient, Query, Table},
    error::InfraError,
};

/// 一覧で取得する列
const REPORT_COLUMNS: &str = "id,created_at,site_name,area,status,note";

/// レポートリポジトリトレイト
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn insert(&self, report: &NewReport) -> Result<HygieneReport, InfraError>;

    /// 作成日時の降順で取得する
    async fn list(&self, limit: ListLimit) -> Result<Vec<HygieneReport>, InfraError>;
}

/// PostgREST 実装の ReportRepository
#[derive(Clone)]
pub struct PostgrestReportRepository {
    client: Arc<dyn BackendClient>,
}

impl PostgrestReportRepository {
    pub fn new(client: Arc<dyn BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReportRepository for PostgrestReportRepository {
    async fn insert(&self, report: &NewReport) -> Result<HygieneReport, InfraError> {
        let rows = serde_json::to_value([report])?;
        self.client
            .insert(Table::HygieneReports, rows)
            .await?
            .into_single()
    }

    async fn list(&self, limit: ListLimit) -> Result<Vec<HygieneReport>, InfraError> {
        let query = Query::table(Table::HygieneReports)
            .select(REPORT_COLUMNS)
            .order_desc("created_at")
            .limit(limit.get());
        self.client.select(&query).await?.into_rows()
    }
}

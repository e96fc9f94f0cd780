//! # 衛生点検レポート
//!
//! 現場から提出される点検結果を定義する。
//!
//! レポートは組織と紐付かない（`hygiene_reports` テーブルに `org_id` 列がない）。
//! 一覧取得で `org_id` を受け取っても絞り込みには使えない。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::optional_text;

/// 拠点名が未指定のときの既定値
pub const DEFAULT_SITE_NAME: &str = "JTAI";

define_uuid_id! {
    /// レポート ID
    pub struct ReportId;
}

define_required_text! {
    /// 点検エリア
    pub struct ReportArea {
        field: "area",
        lowercase: false,
    }
}

define_required_text! {
    /// 点検ステータス（例: ok / ng）
    pub struct ReportStatus {
        field: "status",
        lowercase: false,
    }
}

/// 衛生点検レポートエンティティ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HygieneReport {
    pub id:         ReportId,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub site_name:  Option<String>,
    pub area:       String,
    pub status:     String,
    #[serde(default)]
    pub note:       Option<String>,
}

/// レポートの提出入力
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReport {
    pub site_name: String,
    pub area:      ReportArea,
    pub status:    ReportStatus,
    pub note:      Option<String>,
}

impl NewReport {
    pub fn new(
        site_name: Option<&str>,
        area: ReportArea,
        status: ReportStatus,
        note: Option<&str>,
    ) -> Self {
        Self {
            site_name: optional_text(site_name).unwrap_or_else(|| DEFAULT_SITE_NAME.to_string()),
            area,
            status,
            note: optional_text(note),
        }
    }
}

//! # チェックリスト
//!
//! 組織ごとの衛生点検チェックリストを定義する。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    org::OrgId,
    value_objects::{ActiveFlag, optional_text},
};

define_uuid_id! {
    /// チェックリスト ID
    pub struct ChecklistId;
}

define_required_text! {
    /// チェックリスト名
    pub struct ChecklistName {
        field: "name",
        lowercase: false,
    }
}

/// チェックリストエンティティ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
    pub id:          ChecklistId,
    pub org_id:      OrgId,
    pub name:        String,
    #[serde(default)]
    pub description: Option<String>,
    /// 未設定（`null`）の行もそのまま読む
    #[serde(default)]
    pub is_active:   Option<bool>,
    pub created_at:  DateTime<Utc>,
}

/// チェックリストの作成入力
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewChecklist {
    pub org_id:      OrgId,
    pub name:        ChecklistName,
    pub description: Option<String>,
    pub is_active:   bool,
}

impl NewChecklist {
    pub fn new(
        org_id: OrgId,
        name: ChecklistName,
        description: Option<&str>,
        is_active: ActiveFlag,
    ) -> Self {
        Self {
            org_id,
            name,
            description: optional_text(description),
            is_active: is_active.get(),
        }
    }
}

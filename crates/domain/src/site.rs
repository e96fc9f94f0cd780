//! # 拠点
//!
//! 点検対象となる施設・拠点を定義する。作成は常に新規行の追加となる。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{org::OrgId, value_objects::ActiveFlag};

define_uuid_id! {
    /// 拠点 ID
    pub struct SiteId;
}

define_required_text! {
    /// 拠点名
    pub struct SiteName {
        field: "name",
        lowercase: false,
    }
}

/// 拠点エンティティ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id:         SiteId,
    pub org_id:     OrgId,
    pub name:       String,
    /// 未設定（`null`）の行もそのまま読む
    #[serde(default)]
    pub is_active:  Option<bool>,
    pub created_at: DateTime<Utc>,
}

/// 拠点の作成入力
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSite {
    pub org_id:    OrgId,
    pub name:      SiteName,
    pub is_active: bool,
}

impl NewSite {
    pub fn new(org_id: OrgId, name: SiteName, is_active: ActiveFlag) -> Self {
        Self {
            org_id,
            name,
            is_active: is_active.get(),
        }
    }
}

//! # 組織（テナント）
//!
//! マルチテナントの単位となる組織エンティティと、その識別に使う値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 備考 |
//! |---|------------|------|
//! | [`Org`] | 組織 | `code` は小文字で一意 |
//! | [`OrgCode`] | 組織コード | 入力は小文字化して扱う |
//! | [`OrgRef`] | 組織の指定方法 | ID 優先、なければコード |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DomainError, value_objects::ActiveFlag};

define_uuid_id! {
    /// 組織 ID
    pub struct OrgId;
}

define_required_text! {
    /// 組織名
    pub struct OrgName {
        field: "org_name",
        lowercase: false,
    }
}

define_required_text! {
    /// 組織コード（小文字）
    pub struct OrgCode {
        field: "org_code",
        lowercase: true,
    }
}

/// 組織エンティティ
///
/// バックエンドの `orgs` テーブルの行に対応する。
/// `code` 列が導入される前に作成された組織は `code` を持たない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Org {
    pub id:         OrgId,
    pub name:       String,
    #[serde(default)]
    pub code:       Option<String>,
    /// 未設定（`null`）の行もそのまま読む
    #[serde(default)]
    pub is_active:  Option<bool>,
    pub created_at: DateTime<Utc>,
}

/// 組織の作成入力
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrg {
    pub name:      OrgName,
    pub code:      OrgCode,
    pub is_active: bool,
}

impl NewOrg {
    pub fn new(name: OrgName, code: OrgCode, is_active: ActiveFlag) -> Self {
        Self {
            name,
            code,
            is_active: is_active.get(),
        }
    }
}

/// 組織の指定方法
///
/// オーナー作成時の組織解決に使う。`org_id` が指定されていればそれを優先し、
/// なければ `org_code` を使う。どちらもなければバリデーションエラー。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrgRef {
    Id(OrgId),
    Code(OrgCode),
}

impl OrgRef {
    pub fn resolve(org_id: Option<&str>, org_code: Option<&str>) -> Result<Self, DomainError> {
        let org_id = org_id.map(str::trim).filter(|s| !s.is_empty());
        let org_code = org_code.map(str::trim).filter(|s| !s.is_empty());

        match (org_id, org_code) {
            (Some(id), _) => Ok(Self::Id(OrgId::parse("org_id", id)?)),
            (None, Some(code)) => Ok(Self::Code(OrgCode::new(code)?)),
            (None, None) => Err(DomainError::Validation(
                "org_id or org_code required".to_string(),
            )),
        }
    }
}

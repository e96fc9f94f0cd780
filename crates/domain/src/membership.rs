//! # 組織メンバーシップ
//!
//! ユーザーと組織の所属関係を定義する。(org_id, user_id) ごとに最大 1 行。

use serde::{Deserialize, Serialize};

use crate::{org::OrgId, user::UserId};

/// オーナー作成時に付与するロール
pub const OWNER_ROLE: &str = "owner";

define_uuid_id! {
    /// メンバーシップ ID
    pub struct MemberId;
}

/// メンバーシップエンティティ
///
/// `status` はバックエンド側のデフォルト（active）に任せるため、作成直後でも値を持つ。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgMember {
    pub id:      MemberId,
    pub org_id:  OrgId,
    pub user_id: UserId,
    pub role:    String,
    #[serde(default)]
    pub status:  Option<String>,
}

/// メンバーシップの作成入力
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMembership {
    pub org_id:  OrgId,
    pub user_id: UserId,
    pub role:    &'static str,
}

impl NewMembership {
    /// オーナーとしてのメンバーシップを作成する
    pub fn owner(org_id: OrgId, user_id: UserId) -> Self {
        Self {
            org_id,
            user_id,
            role: OWNER_ROLE,
        }
    }
}

/// ログイン応答に含める所属組織の要約
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgSummary {
    pub id:        OrgId,
    pub name:      String,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// 組織情報を埋め込んだメンバーシップ
///
/// バックエンドのリソース埋め込み（`orgs(id,name,is_active)`）の結果に対応する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipWithOrg {
    pub org_id: OrgId,
    pub role:   String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub orgs:   Option<OrgSummary>,
}

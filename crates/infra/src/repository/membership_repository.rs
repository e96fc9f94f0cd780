//! # MembershipRepository
//!
//! 組織メンバーシップ（`org_members` テーブル）の永続化を担当するリポジトリ。

use std::sync::Arc;

use async_trait::async_trait;
use hygiene_domain::{
    membership::{MembershipWithOrg, NewMembership, OrgMember},
    org::OrgId,
    user::UserId,
};

use crate::{
    backend::{BackendClient, Query, Table},
    error::InfraError,
};

/// ログイン応答用に取得する列（所属組織を埋め込む）
const MEMBERSHIP_WITH_ORG_COLUMNS: &str = "org_id,role,status,orgs(id,name,is_active)";

/// メンバーシップリポジトリトレイト
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// (組織, ユーザー) でメンバーシップを検索する
    async fn find(&self, org_id: &OrgId, user_id: &UserId)
    -> Result<Option<OrgMember>, InfraError>;

    /// メンバーシップを作成する
    async fn insert(&self, membership: &NewMembership) -> Result<OrgMember, InfraError>;

    /// ユーザーの所属一覧を組織情報付きで取得する
    async fn list_with_org_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<MembershipWithOrg>, InfraError>;
}

/// PostgREST 実装の MembershipRepository
#[derive(Clone)]
pub struct PostgrestMembershipRepository {
    client: Arc<dyn BackendClient>,
}

impl PostgrestMembershipRepository {
    pub fn new(client: Arc<dyn BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MembershipRepository for PostgrestMembershipRepository {
    async fn find(
        &self,
        org_id: &OrgId,
        user_id: &UserId,
    ) -> Result<Option<OrgMember>, InfraError> {
        let query = Query::table(Table::OrgMembers)
            .eq("org_id", org_id.to_string())
            .eq("user_id", user_id.to_string())
            .select("*");
        self.client.select(&query).await?.into_first()
    }

    async fn insert(&self, membership: &NewMembership) -> Result<OrgMember, InfraError> {
        let rows = serde_json::to_value([membership])?;
        self.client
            .insert(Table::OrgMembers, rows)
            .await?
            .into_single()
    }

    async fn list_with_org_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<MembershipWithOrg>, InfraError> {
        let query = Query::table(Table::OrgMembers)
            .eq("user_id", user_id.to_string())
            .select(MEMBERSHIP_WITH_ORG_COLUMNS);
        self.client.select(&query).await?.into_rows()
    }
}

//! # 組織オーナーのプロビジョニング
//!
//! 既存の組織に対してオーナーユーザーを用意する。
//! 以下の 3 段階を順に実行し、どこかで失敗したらその時点で中断する。
//!
//! 1. 組織の解決（ID 優先、なければコード）。存在しなければ `ORG_NOT_FOUND`。組織は作成しない
//! 2. ユーザーの検索、なければ仮ハッシュで作成
//! 3. 所属の検索、なければ `owner` ロールで作成
//!
//! 同じ入力で繰り返し呼んでも結果は変わらない。
//! 同時実行時の重複はバックエンドの一意制約に任せている。

use std::sync::Arc;

use hygiene_domain::{
    clock::Clock,
    membership::{NewMembership, OrgMember},
    org::{Org, OrgRef},
    password::PasswordHash,
    user::{NewUser, PublicUser, User, Username},
};
use hygiene_infra::repository::{MembershipRepository, OrgRepository, UserRepository};
use hygiene_shared::{event_log::event, log_business_event};
use serde::Serialize;

use crate::error::ApiError;

/// プロビジョニング入力
#[derive(Debug, Clone)]
pub struct OwnerInput {
    pub org:          OrgRef,
    pub username:     Username,
    pub display_name: Option<String>,
}

/// プロビジョニング結果
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionedOwner {
    pub org:    Org,
    pub owner:  PublicUser,
    pub member: OrgMember,
}

/// プロビジョニングユースケース
pub struct ProvisioningUseCase {
    orgs:    Arc<dyn OrgRepository>,
    users:   Arc<dyn UserRepository>,
    members: Arc<dyn MembershipRepository>,
    clock:   Arc<dyn Clock>,
}

impl ProvisioningUseCase {
    pub fn new(
        orgs: Arc<dyn OrgRepository>,
        users: Arc<dyn UserRepository>,
        members: Arc<dyn MembershipRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            orgs,
            users,
            members,
            clock,
        }
    }

    /// 組織オーナーを用意する
    pub async fn provision_owner(&self, input: OwnerInput) -> Result<ProvisionedOwner, ApiError> {
        let org = self.resolve_org(&input.org).await?;
        let user = self.find_or_create_user(&input).await?;
        let member = self.find_or_create_member(&org, &user).await?;

        Ok(ProvisionedOwner {
            org,
            owner: user.to_public(),
            member,
        })
    }

    async fn resolve_org(&self, org_ref: &OrgRef) -> Result<Org, ApiError> {
        let org = match org_ref {
            OrgRef::Id(id) => self.orgs.find_by_id(id).await?,
            OrgRef::Code(code) => self.orgs.find_by_code(code).await?,
        };
        org.ok_or_else(|| ApiError::OrgNotFound(org_ref.clone()))
    }

    async fn find_or_create_user(&self, input: &OwnerInput) -> Result<User, ApiError> {
        if let Some(user) = self.users.find_by_username(&input.username).await? {
            return Ok(user);
        }

        // 仮ハッシュはどのパスワードとも一致しないため、
        // パスワード設定が済むまでログインできない
        let new_user = NewUser {
            username:      input.username.clone(),
            password_hash: PasswordHash::placeholder(self.clock.now()),
            display_name:  input.display_name.clone(),
        };
        let user = self.users.insert(&new_user).await?;

        log_business_event!(
            event.category = event::category::PROVISIONING,
            event.action = event::action::USER_CREATED,
            event.entity_type = event::entity_type::USER,
            event.entity_id = %user.id,
            event.result = event::result::SUCCESS,
            "オーナーユーザーを作成しました"
        );
        Ok(user)
    }

    async fn find_or_create_member(&self, org: &Org, user: &User) -> Result<OrgMember, ApiError> {
        if let Some(member) = self.members.find(&org.id, &user.id).await? {
            return Ok(member);
        }

        let member = self
            .members
            .insert(&NewMembership::owner(org.id, user.id))
            .await?;

        log_business_event!(
            event.category = event::category::PROVISIONING,
            event.action = event::action::MEMBER_CREATED,
            event.entity_type = event::entity_type::ORG_MEMBER,
            event.entity_id = %member.id,
            event.result = event::result::SUCCESS,
            org_id = %org.id,
            user_id = %user.id,
            "組織オーナーの所属を作成しました"
        );
        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use hygiene_domain::{
        clock::FixedClock,
        org::{OrgCode, OrgId},
    };
    use hygiene_infra::mock::{MockMembershipRepository, MockOrgRepository, MockUserRepository};
    use pretty_assertions::assert_eq;

    use super::*;

    struct Fixture {
        orgs:    MockOrgRepository,
        users:   MockUserRepository,
        members: MockMembershipRepository,
        sut:     ProvisioningUseCase,
    }

    fn fixture() -> Fixture {
        let orgs = MockOrgRepository::new();
        let users = MockUserRepository::new();
        let members = MockMembershipRepository::new();
        let sut = ProvisioningUseCase::new(
            Arc::new(orgs.clone()),
            Arc::new(users.clone()),
            Arc::new(members.clone()),
            Arc::new(FixedClock::new(Utc::now())),
        );
        Fixture {
            orgs,
            users,
            members,
            sut,
        }
    }

    fn acme() -> Org {
        Org {
            id:         OrgId::new(),
            name:       "Acme".to_string(),
            code:       Some("acme".to_string()),
            is_active:  Some(true),
            created_at: Utc::now(),
        }
    }

    fn input_by_code(code: &str) -> OwnerInput {
        OwnerInput {
            org:          OrgRef::Code(OrgCode::new(code).unwrap()),
            username:     Username::new("owner@acme.test").unwrap(),
            display_name: Some("Owner".to_string()),
        }
    }

    #[tokio::test]
    async fn test_ユーザーと所属を新規作成する() {
        // Given
        let f = fixture();
        let org = acme();
        f.orgs.add(org.clone());

        // When
        let result = f.sut.provision_owner(input_by_code("ACME")).await.unwrap();

        // Then
        assert_eq!(result.org, org);
        assert_eq!(result.owner.username, "owner@acme.test");
        assert_eq!(result.owner.display_name.as_deref(), Some("Owner"));
        assert_eq!(result.member.role, "owner");
        assert_eq!(result.member.org_id, org.id);
        assert_eq!(result.member.user_id, result.owner.id);

        let created = &f.users.rows()[0];
        assert!(created.password_hash.as_ref().unwrap().is_placeholder());
    }

    #[tokio::test]
    async fn test_2回呼んでも同じユーザーと所属を返す() {
        // Given
        let f = fixture();
        f.orgs.add(acme());

        // When
        let first = f.sut.provision_owner(input_by_code("acme")).await.unwrap();
        let second = f.sut.provision_owner(input_by_code("acme")).await.unwrap();

        // Then
        assert_eq!(first.org.id, second.org.id);
        assert_eq!(first.owner.id, second.owner.id);
        assert_eq!(first.member.id, second.member.id);
        assert_eq!(f.users.rows().len(), 1);
        assert_eq!(f.members.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_組織idが優先される() {
        let f = fixture();
        let org = acme();
        f.orgs.add(org.clone());
        let input = OwnerInput {
            org: OrgRef::resolve(Some(org.id.to_string().as_str()), Some("other")).unwrap(),
            ..input_by_code("acme")
        };

        let result = f.sut.provision_owner(input).await.unwrap();

        assert_eq!(result.org.id, org.id);
    }

    #[tokio::test]
    async fn test_組織がなければエラーで何も作成しない() {
        let f = fixture();

        let result = f.sut.provision_owner(input_by_code("missing")).await;

        assert!(matches!(
            result,
            Err(ApiError::OrgNotFound(OrgRef::Code(code))) if code.as_str() == "missing"
        ));
        assert_eq!(f.users.call_count(), 0);
        assert_eq!(f.members.call_count(), 0);
        assert!(f.orgs.rows().is_empty());
    }

    #[tokio::test]
    async fn test_ユーザー検索の失敗で中断する() {
        let f = fixture();
        f.orgs.add(acme());
        f.users.set_unavailable();

        let result = f.sut.provision_owner(input_by_code("acme")).await;

        assert!(matches!(result, Err(ApiError::Backend(_))));
        assert_eq!(f.members.call_count(), 0);
    }

    #[tokio::test]
    async fn test_仮ハッシュは呼び出しごとに異なる() {
        let f = fixture();
        f.orgs.add(acme());

        f.sut.provision_owner(input_by_code("acme")).await.unwrap();
        let other = OwnerInput {
            username: Username::new("second@acme.test").unwrap(),
            ..input_by_code("acme")
        };
        f.sut.provision_owner(other).await.unwrap();

        let rows = f.users.rows();
        assert_ne!(rows[0].password_hash, rows[1].password_hash);
    }
}

//! # テスト用モック
//!
//! リポジトリのテストで使用する記録型の [`MockBackendClient`] と、
//! ユースケース・ハンドラのテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! hygiene-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! [`MockPasswordChecker`] は Argon2 を使わずに `hashed:<平文>` 形式で照合する。
//!
//! すべてのモックは呼び出し回数を記録する。`set_unavailable()` を呼ぶと
//! 以降の呼び出しはネットワークエラーを返す。

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hygiene_domain::{
    checklist::{Checklist, ChecklistId, NewChecklist},
    membership::{MemberId, MembershipWithOrg, NewMembership, OrgMember},
    org::{NewOrg, Org, OrgCode, OrgId},
    password::{PasswordHash, PasswordVerifyResult, PlainPassword},
    report::{HygieneReport, NewReport, ReportId},
    site::{NewSite, Site, SiteId},
    user::{NewUser, User, UserId, Username},
    value_objects::ListLimit,
};
use serde_json::Value;

use crate::{
    backend::{BackendClient, BackendResponse, Query, Table},
    error::InfraError,
    password::PasswordChecker,
    repository::{
        ChecklistRepository,
        MembershipRepository,
        OrgRepository,
        ReportRepository,
        SiteRepository,
        UserRepository,
    },
};

// ===== MockBackendClient =====

/// 記録された呼び出し
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path:   String,
    pub body:   Option<Value>,
}

/// 応答をキューで返し、呼び出しを記録するバックエンドクライアント
///
/// キューが空のときは `200 []` を返す。
#[derive(Clone, Default)]
pub struct MockBackendClient {
    replies: Arc<Mutex<VecDeque<Result<BackendResponse, String>>>>,
    calls:   Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockBackendClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 次の応答を追加する
    pub fn reply(&self, status: u16, data: Value) {
        self.replies.lock().unwrap().push_back(Ok(BackendResponse {
            ok: (200..300).contains(&status),
            status,
            data,
        }));
    }

    /// 次の呼び出しをネットワークエラーにする
    pub fn reply_network_error(&self, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(
        &self,
        method: &'static str,
        path: String,
        body: Option<Value>,
    ) -> Result<BackendResponse, InfraError> {
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall { method, path, body });
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(InfraError::network(message)),
            None => Ok(BackendResponse {
                ok:     true,
                status: 200,
                data:   Value::Array(Vec::new()),
            }),
        }
    }
}

#[async_trait]
impl BackendClient for MockBackendClient {
    async fn select(&self, query: &Query) -> Result<BackendResponse, InfraError> {
        self.record("GET", query.to_path(), None)
    }

    async fn insert(&self, table: Table, rows: Value) -> Result<BackendResponse, InfraError> {
        self.record("POST", table.as_str().to_string(), Some(rows))
    }

    async fn patch(&self, query: &Query, body: Value) -> Result<BackendResponse, InfraError> {
        self.record("PATCH", query.to_path(), Some(body))
    }
}

// ===== インメモリリポジトリ共通 =====

struct MockState<T> {
    rows:            Vec<T>,
    calls:           usize,
    last_limit:      Option<u32>,
    unavailable:     bool,
    failing_updates: bool,
}

impl<T> Default for MockState<T> {
    fn default() -> Self {
        Self {
            rows:            Vec::new(),
            calls:           0,
            last_limit:      None,
            unavailable:     false,
            failing_updates: false,
        }
    }
}

impl<T> MockState<T> {
    /// 呼び出しを記録し、利用不可ならエラーを返す
    fn enter(&mut self) -> Result<(), InfraError> {
        self.calls += 1;
        if self.unavailable {
            return Err(InfraError::network("connection refused"));
        }
        Ok(())
    }
}

macro_rules! mock_repository_common {
    ($Name:ident, $Row:ty) => {
        #[derive(Clone, Default)]
        pub struct $Name {
            state: Arc<Mutex<MockState<$Row>>>,
        }

        impl $Name {
            pub fn new() -> Self {
                Self::default()
            }

            /// 行を直接追加する
            pub fn add(&self, row: $Row) {
                self.state.lock().unwrap().rows.push(row);
            }

            /// 保持している行
            pub fn rows(&self) -> Vec<$Row> {
                self.state.lock().unwrap().rows.clone()
            }

            /// 呼び出し回数
            pub fn call_count(&self) -> usize {
                self.state.lock().unwrap().calls
            }

            /// 最後の一覧取得で渡された件数
            pub fn last_limit(&self) -> Option<u32> {
                self.state.lock().unwrap().last_limit
            }

            /// 以降の呼び出しをネットワークエラーにする
            pub fn set_unavailable(&self) {
                self.state.lock().unwrap().unavailable = true;
            }
        }
    };
}

/// 作成日時の降順に並べ、件数で切り詰める
fn newest_first<T: Clone>(
    rows: &[T],
    created_at: impl Fn(&T) -> DateTime<Utc>,
    limit: ListLimit,
) -> Vec<T> {
    let mut rows = rows.to_vec();
    rows.sort_by_key(|row| std::cmp::Reverse(created_at(row)));
    rows.truncate(limit.get() as usize);
    rows
}

// ===== MockOrgRepository =====

mock_repository_common!(MockOrgRepository, Org);

#[async_trait]
impl OrgRepository for MockOrgRepository {
    async fn insert(&self, org: &NewOrg) -> Result<Org, InfraError> {
        let mut state = self.state.lock().unwrap();
        state.enter()?;
        let row = Org {
            id:         OrgId::new(),
            name:       org.name.as_str().to_string(),
            code:       Some(org.code.as_str().to_string()),
            is_active:  Some(org.is_active),
            created_at: Utc::now(),
        };
        state.rows.push(row.clone());
        Ok(row)
    }

    async fn list(&self, limit: ListLimit) -> Result<Vec<Org>, InfraError> {
        let mut state = self.state.lock().unwrap();
        state.enter()?;
        state.last_limit = Some(limit.get());
        Ok(newest_first(&state.rows, |o| o.created_at, limit))
    }

    async fn find_by_id(&self, id: &OrgId) -> Result<Option<Org>, InfraError> {
        let mut state = self.state.lock().unwrap();
        state.enter()?;
        Ok(state.rows.iter().find(|o| &o.id == id).cloned())
    }

    async fn find_by_code(&self, code: &OrgCode) -> Result<Option<Org>, InfraError> {
        let mut state = self.state.lock().unwrap();
        state.enter()?;
        Ok(state
            .rows
            .iter()
            .find(|o| o.code.as_deref() == Some(code.as_str()))
            .cloned())
    }
}

// ===== MockUserRepository =====

mock_repository_common!(MockUserRepository, User);

impl MockUserRepository {
    /// 最終ログイン日時の更新だけを失敗させる
    pub fn fail_last_login_update(&self) {
        self.state.lock().unwrap().failing_updates = true;
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, InfraError> {
        let mut state = self.state.lock().unwrap();
        state.enter()?;
        Ok(state
            .rows
            .iter()
            .find(|u| u.username == username.as_str())
            .cloned())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, InfraError> {
        let mut state = self.state.lock().unwrap();
        state.enter()?;
        let row = User {
            id:            UserId::new(),
            username:      user.username.as_str().to_string(),
            password_hash: Some(user.password_hash.clone()),
            display_name:  user.display_name.clone(),
            is_active:     Some(true),
            last_login_at: None,
        };
        state.rows.push(row.clone());
        Ok(row)
    }

    async fn update_password(&self, id: &UserId, hash: &PasswordHash) -> Result<User, InfraError> {
        let mut state = self.state.lock().unwrap();
        state.enter()?;
        let user = state
            .rows
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| InfraError::unexpected("バックエンドが行を返しませんでした"))?;
        user.password_hash = Some(hash.clone());
        Ok(user.clone())
    }

    async fn update_last_login(&self, id: &UserId, at: DateTime<Utc>) -> Result<(), InfraError> {
        let mut state = self.state.lock().unwrap();
        state.enter()?;
        if state.failing_updates {
            return Err(InfraError::backend(500, Value::String("patch failed".to_string())));
        }
        if let Some(user) = state.rows.iter_mut().find(|u| &u.id == id) {
            user.last_login_at = Some(at);
        }
        Ok(())
    }
}

// ===== MockMembershipRepository =====

mock_repository_common!(MockMembershipRepository, OrgMember);

#[async_trait]
impl MembershipRepository for MockMembershipRepository {
    async fn find(
        &self,
        org_id: &OrgId,
        user_id: &UserId,
    ) -> Result<Option<OrgMember>, InfraError> {
        let mut state = self.state.lock().unwrap();
        state.enter()?;
        Ok(state
            .rows
            .iter()
            .find(|m| &m.org_id == org_id && &m.user_id == user_id)
            .cloned())
    }

    async fn insert(&self, membership: &NewMembership) -> Result<OrgMember, InfraError> {
        let mut state = self.state.lock().unwrap();
        state.enter()?;
        let row = OrgMember {
            id:      MemberId::new(),
            org_id:  membership.org_id,
            user_id: membership.user_id,
            role:    membership.role.to_string(),
            status:  Some("active".to_string()),
        };
        state.rows.push(row.clone());
        Ok(row)
    }

    async fn list_with_org_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<MembershipWithOrg>, InfraError> {
        let mut state = self.state.lock().unwrap();
        state.enter()?;
        Ok(state
            .rows
            .iter()
            .filter(|m| &m.user_id == user_id)
            .map(|m| MembershipWithOrg {
                org_id: m.org_id,
                role:   m.role.clone(),
                status: m.status.clone(),
                orgs:   None,
            })
            .collect())
    }
}

// ===== MockChecklistRepository =====

mock_repository_common!(MockChecklistRepository, Checklist);

#[async_trait]
impl ChecklistRepository for MockChecklistRepository {
    async fn insert(&self, checklist: &NewChecklist) -> Result<Checklist, InfraError> {
        let mut state = self.state.lock().unwrap();
        state.enter()?;
        let row = Checklist {
            id:          ChecklistId::new(),
            org_id:      checklist.org_id,
            name:        checklist.name.as_str().to_string(),
            description: checklist.description.clone(),
            is_active:   Some(checklist.is_active),
            created_at:  Utc::now(),
        };
        state.rows.push(row.clone());
        Ok(row)
    }

    async fn list_by_org(
        &self,
        org_id: &OrgId,
        limit: ListLimit,
    ) -> Result<Vec<Checklist>, InfraError> {
        let mut state = self.state.lock().unwrap();
        state.enter()?;
        state.last_limit = Some(limit.get());
        let rows: Vec<_> = state
            .rows
            .iter()
            .filter(|c| &c.org_id == org_id)
            .cloned()
            .collect();
        Ok(newest_first(&rows, |c| c.created_at, limit))
    }
}

// ===== MockSiteRepository =====

mock_repository_common!(MockSiteRepository, Site);

#[async_trait]
impl SiteRepository for MockSiteRepository {
    async fn insert(&self, site: &NewSite) -> Result<Site, InfraError> {
        let mut state = self.state.lock().unwrap();
        state.enter()?;
        let row = Site {
            id:         SiteId::new(),
            org_id:     site.org_id,
            name:       site.name.as_str().to_string(),
            is_active:  Some(site.is_active),
            created_at: Utc::now(),
        };
        state.rows.push(row.clone());
        Ok(row)
    }

    async fn list_by_org(
        &self,
        org_id: &OrgId,
        limit: ListLimit,
    ) -> Result<Vec<Site>, InfraError> {
        let mut state = self.state.lock().unwrap();
        state.enter()?;
        state.last_limit = Some(limit.get());
        let rows: Vec<_> = state
            .rows
            .iter()
            .filter(|s| &s.org_id == org_id)
            .cloned()
            .collect();
        Ok(newest_first(&rows, |s| s.created_at, limit))
    }
}

// ===== MockReportRepository =====

mock_repository_common!(MockReportRepository, HygieneReport);

#[async_trait]
impl ReportRepository for MockReportRepository {
    async fn insert(&self, report: &NewReport) -> Result<HygieneReport, InfraError> {
        let mut state = self.state.lock().unwrap();
        state.enter()?;
        let row = HygieneReport {
            id:         ReportId::new(),
            created_at: Utc::now(),
            site_name:  Some(report.site_name.clone()),
            area:       report.area.as_str().to_string(),
            status:     report.status.as_str().to_string(),
            note:       report.note.clone(),
        };
        state.rows.push(row.clone());
        Ok(row)
    }

    async fn list(&self, limit: ListLimit) -> Result<Vec<HygieneReport>, InfraError> {
        let mut state = self.state.lock().unwrap();
        state.enter()?;
        state.last_limit = Some(limit.get());
        Ok(newest_first(&state.rows, |r| r.created_at, limit))
    }
}

// ===== MockPasswordChecker =====

/// `hashed:<平文>` を正しいハッシュとみなすパスワードチェッカー
#[derive(Clone, Default)]
pub struct MockPasswordChecker {
    verify_calls: Arc<Mutex<usize>>,
}

impl MockPasswordChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 平文に対応するハッシュ
    pub fn hash_of(plain: &str) -> PasswordHash {
        PasswordHash::new(format!("hashed:{plain}"))
    }

    /// ダミー検証を含む検証の実行回数
    pub fn verify_calls(&self) -> usize {
        *self.verify_calls.lock().unwrap()
    }
}

impl PasswordChecker for MockPasswordChecker {
    fn verify(&self, password: &PlainPassword, hash: &PasswordHash) -> PasswordVerifyResult {
        *self.verify_calls.lock().unwrap() += 1;
        if hash.is_placeholder() {
            return PasswordVerifyResult::Mismatch;
        }
        (Self::hash_of(password.as_str()) == *hash).into()
    }

    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
        Ok(Self::hash_of(password.as_str()))
    }
}

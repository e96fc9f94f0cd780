//! # アプリケーション状態
//!
//! 起動時に一度だけ組み立て、全ハンドラで共有する依存の集まり。
//! 中身はすべて不変の `Arc` で、リクエスト間で可変状態は持たない。

use std::sync::Arc;

use hygiene_domain::clock::Clock;
use hygiene_infra::{
    PasswordChecker,
    backend::BackendClient,
    repository::{
        ChecklistRepository,
        MembershipRepository,
        OrgRepository,
        ReportRepository,
        SiteRepository,
        UserRepository,
    },
};

use crate::{
    config::AppConfig,
    usecase::{LoginUseCase, PasswordUseCase, ProvisioningUseCase},
};

/// エンティティごとのリポジトリ
#[derive(Clone)]
pub struct Repositories {
    pub orgs:       Arc<dyn OrgRepository>,
    pub users:      Arc<dyn UserRepository>,
    pub members:    Arc<dyn MembershipRepository>,
    pub checklists: Arc<dyn ChecklistRepository>,
    pub sites:      Arc<dyn SiteRepository>,
    pub reports:    Arc<dyn ReportRepository>,
}

/// 全ハンドラの共有状態
pub struct AppState {
    pub config:       AppConfig,
    /// Readiness Check 用
    pub backend:      Arc<dyn BackendClient>,
    pub repositories: Repositories,
    pub login:        LoginUseCase,
    pub provisioning: ProvisioningUseCase,
    pub password:     PasswordUseCase,
}

impl AppState {
    /// 依存からユースケースを組み立てる
    pub fn new(
        config: AppConfig,
        backend: Arc<dyn BackendClient>,
        repositories: Repositories,
        password_checker: Arc<dyn PasswordChecker>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let login = LoginUseCase::new(
            repositories.users.clone(),
            repositories.members.clone(),
            password_checker.clone(),
            clock.clone(),
        );
        let provisioning = ProvisioningUseCase::new(
            repositories.orgs.clone(),
            repositories.users.clone(),
            repositories.members.clone(),
            clock,
        );
        let password = PasswordUseCase::new(repositories.users.clone(), password_checker);

        Self {
            config,
            backend,
            repositories,
            login,
            provisioning,
            password,
        }
    }
}

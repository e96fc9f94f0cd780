//! # ログインユースケース
//!
//! ユーザー名とパスワードを検証し、所属組織の一覧を返す。
//! セッションやトークンは発行しない。
//!
//! ## 判定順序
//!
//! 1. ユーザー検索（見つからなければダミー検証の後 `INVALID_CREDENTIALS`）
//! 2. パスワード検証（不一致・仮ハッシュは `INVALID_CREDENTIALS`）
//! 3. 無効化チェック（`ACCOUNT_DISABLED`）
//! 4. 所属一覧の取得
//! 5. 最終ログイン日時の更新（失敗しても成功として返す）
//!
//! 無効化状態は正しいパスワードを持つ呼び出し元にだけ明かされる。

use std::sync::Arc;

use hygiene_domain::{
    clock::Clock,
    membership::MembershipWithOrg,
    password::PlainPassword,
    user::{PublicUser, Username},
};
use hygiene_infra::{
    PasswordChecker,
    repository::{MembershipRepository, UserRepository},
};
use hygiene_shared::{
    event_log::{
        error::{category, kind},
        event,
    },
    log_business_event,
};
use serde::Serialize;

use crate::error::ApiError;

/// ログイン結果
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub user:        PublicUser,
    pub memberships: Vec<MembershipWithOrg>,
}

/// ログインユースケース
pub struct LoginUseCase {
    users:            Arc<dyn UserRepository>,
    members:          Arc<dyn MembershipRepository>,
    password_checker: Arc<dyn PasswordChecker>,
    clock:            Arc<dyn Clock>,
}

impl LoginUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        members: Arc<dyn MembershipRepository>,
        password_checker: Arc<dyn PasswordChecker>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            members,
            password_checker,
            clock,
        }
    }

    /// 資格情報を検証してログインする
    ///
    /// ## タイミング攻撃対策
    ///
    /// ユーザーが存在しない場合やハッシュ未設定の場合もダミーハッシュで検証し、
    /// 処理時間を均一化する。
    pub async fn login(
        &self,
        username: &Username,
        password: &PlainPassword,
    ) -> Result<LoginResult, ApiError> {
        let user = self.users.find_by_username(username).await?;

        let Some(user) = user else {
            self.password_checker.dummy_verify(password);
            log_business_event!(
                event.category = event::category::AUTH,
                event.action = event::action::LOGIN_FAILURE,
                event.result = event::result::FAILURE,
                event.reason = "user_not_found",
                "ログイン失敗: ユーザーが存在しません"
            );
            return Err(ApiError::InvalidCredentials);
        };

        let verified = match &user.password_hash {
            Some(hash) => self.password_checker.verify(password, hash).is_match(),
            None => {
                self.password_checker.dummy_verify(password);
                false
            }
        };
        if !verified {
            log_business_event!(
                event.category = event::category::AUTH,
                event.action = event::action::LOGIN_FAILURE,
                event.entity_type = event::entity_type::USER,
                event.entity_id = %user.id,
                event.result = event::result::FAILURE,
                event.reason = "password_mismatch",
                "ログイン失敗: パスワード不一致"
            );
            return Err(ApiError::InvalidCredentials);
        }

        if user.is_disabled() {
            log_business_event!(
                event.category = event::category::AUTH,
                event.action = event::action::LOGIN_FAILURE,
                event.entity_type = event::entity_type::USER,
                event.entity_id = %user.id,
                event.result = event::result::FAILURE,
                event.reason = "account_disabled",
                "ログイン失敗: アカウントが無効です"
            );
            return Err(ApiError::AccountDisabled);
        }

        let memberships = self.members.list_with_org_by_user(&user.id).await?;

        if let Err(e) = self
            .users
            .update_last_login(&user.id, self.clock.now())
            .await
        {
            tracing::warn!(
                error.category = category::EXTERNAL_SERVICE,
                error.kind = kind::LAST_LOGIN_UPDATE,
                user_id = %user.id,
                "最終ログイン日時の更新に失敗しました: {}",
                e
            );
        }

        log_business_event!(
            event.category = event::category::AUTH,
            event.action = event::action::LOGIN_SUCCESS,
            event.entity_type = event::entity_type::USER,
            event.entity_id = %user.id,
            event.result = event::result::SUCCESS,
            "ログイン成功"
        );

        Ok(LoginResult {
            user: user.to_public(),
            memberships,
        })
    }
}

//! # パスワード設定ユースケース
//!
//! 管理者がユーザーのパスワードを設定する。プロビジョニング直後の
//! 仮ハッシュはこの操作で置き換えるまでログインに使えない。

use std::sync::Arc;

use hygiene_domain::{
    password::NewPassword,
    user::{PublicUser, Username},
};
use hygiene_infra::{PasswordChecker, repository::UserRepository};
use hygiene_shared::{event_log::event, log_business_event};

use crate::error::ApiError;

/// パスワード設定ユースケース
pub struct PasswordUseCase {
    users:            Arc<dyn UserRepository>,
    password_checker: Arc<dyn PasswordChecker>,
}

impl PasswordUseCase {
    pub fn new(users: Arc<dyn UserRepository>, password_checker: Arc<dyn PasswordChecker>) -> Self {
        Self {
            users,
            password_checker,
        }
    }

    /// パスワードをハッシュ化して保存する
    ///
    /// ユーザーが存在しなければ `USER_NOT_FOUND`。
    pub async fn set_password(
        &self,
        username: &Username,
        new_password: &NewPassword,
    ) -> Result<PublicUser, ApiError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        let hash = self
            .password_checker
            .hash(new_password.as_plain())
            .map_err(|e| ApiError::Internal(format!("パスワードのハッシュ化に失敗しました: {e}")))?;
        let updated = self.users.update_password(&user.id, &hash).await?;

        log_business_event!(
            event.category = event::category::AUTH,
            event.action = event::action::PASSWORD_SET,
            event.entity_type = event::entity_type::USER,
            event.entity_id = %updated.id,
            event.result = event::result::SUCCESS,
            "パスワードを設定しました"
        );

        Ok(updated.to_public())
    }
}

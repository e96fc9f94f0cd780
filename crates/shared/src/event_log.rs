//! # 構造化ログのフィールド規約
//!
//! 監査に使う出来事（ログイン、オーナー作成など）は [`log_business_event!`] で、
//! 失敗は `tracing::error!` / `warn!` に `error.category` と `error.kind` を付けて出す。
//! フィールド値は下の定数から選ぶ。
//!
//! ```text
//! jq 'select(.["event.kind"] == "business_event" and .["event.result"] == "failure")'
//! ```

/// 監査対象の出来事を `info` レベルで出力する
///
/// `event.kind = "business_event"` は自動で付く。呼び出し側は少なくとも
/// `event.category` / `event.action` / `event.result` を渡す。
///
/// ```ignore
/// log_business_event!(
///     event.category = event::category::AUTH,
///     event.action = event::action::LOGIN_SUCCESS,
///     event.entity_type = event::entity_type::USER,
///     event.entity_id = %user.id,
///     event.result = event::result::SUCCESS,
///     "ログインしました"
/// );
/// ```
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const AUTH: &str = "auth";
        pub const PROVISIONING: &str = "provisioning";
    }

    /// イベントアクション
    pub mod action {
        // 認証
        pub const LOGIN_SUCCESS: &str = "auth.login_success";
        pub const LOGIN_FAILURE: &str = "auth.login_failure";
        pub const PASSWORD_SET: &str = "auth.password_set";

        // プロビジョニング
        pub const USER_CREATED: &str = "provisioning.user_created";
        pub const MEMBER_CREATED: &str = "provisioning.member_created";
        pub const ORG_CREATED: &str = "provisioning.org_created";
    }

    /// エンティティ種別
    pub mod entity_type {
        pub const ORG: &str = "org";
        pub const USER: &str = "user";
        pub const ORG_MEMBER: &str = "org_member";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// 設定不備（環境変数の未設定など）
        pub const CONFIGURATION: &str = "configuration";
        /// 外部サービス呼び出し（REST バックエンド）
        pub const EXTERNAL_SERVICE: &str = "external_service";
        /// アプリケーション内部
        pub const INTERNAL: &str = "internal";
    }

    /// エラー種別
    pub mod kind {
        pub const BACKEND: &str = "backend";
        pub const PANIC: &str = "panic";
        pub const USER_LOOKUP: &str = "user_lookup";
        pub const PASSWORD_VERIFICATION: &str = "password_verification";
        pub const LAST_LOGIN_UPDATE: &str = "last_login_update";
    }
}

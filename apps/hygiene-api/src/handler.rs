//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュールで re-export し、フラットな API を提供
//! - 複数のバックエンド呼び出しを伴う処理は usecase 層に委譲
//!
//! ## ハンドラ一覧
//!
//! - `health`: ヘルスチェック
//! - `auth`: ログイン
//! - `report`: 点検レポート送信（公開）
//! - `admin`: 管理 API（Bearer トークン必須）

pub mod admin;
pub mod auth;
pub mod health;
pub mod report;

pub use admin::{
    admin_dispatch,
    checklist_create,
    checklist_list,
    org_create,
    org_list,
    org_owner_create,
    report_list,
    site_list,
    site_upsert,
    user_set_password,
};
pub use auth::login;
pub use health::{health_check, readiness_check};
pub use report::report_submit;

//! # ユースケース層
//!
//! 複数のバックエンド呼び出しを順序立てて組み合わせる処理を実装する。
//! 1 回の呼び出しで完結する CRUD はハンドラから直接リポジトリを使う。
//!
//! - `auth`: ログイン（資格情報の検証）
//! - `password`: パスワード設定
//! - `provisioning`: 組織オーナーのプロビジョニング

pub mod auth;
pub mod password;
pub mod provisioning;

pub use auth::{LoginResult, LoginUseCase};
pub use password::PasswordUseCase;
pub use provisioning::{OwnerInput, ProvisionedOwner, ProvisioningUseCase};

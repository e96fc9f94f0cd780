//! # JTAI Hygiene インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **REST バックエンド接続**: PostgREST 規約の REST インターフェースへの HTTP 呼び出し
//! - **リポジトリ実装**: エンティティごとの永続化操作
//! - **パスワード**: Argon2id による検証とハッシュ生成
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`backend`] - REST バックエンドクライアントとクエリビルダー
//! - [`error`] - インフラ層エラー定義
//! - [`password`] - パスワード検証・ハッシュ化
//! - [`repository`] - リポジトリ実装
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use std::{sync::Arc, time::Duration};
//!
//! use hygiene_infra::backend::{BackendConfig, PostgrestClient};
//! use hygiene_infra::repository::PostgrestOrgRepository;
//!
//! let client = PostgrestClient::new(BackendConfig {
//!     base_url:    Some("https://example.supabase.co".to_string()),
//!     service_key: Some(service_key),
//!     timeout:     Duration::from_secs(10),
//! })?;
//! let orgs = PostgrestOrgRepository::new(Arc::new(client));
//! ```

pub mod backend;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod password;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
pub use password::{Argon2PasswordChecker, PasswordChecker};

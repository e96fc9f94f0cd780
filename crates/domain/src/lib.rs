//! # JTAI Hygiene ドメイン層
//!
//! 衛生点検アプリケーションのドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: バックエンドのテーブル行に対応する型（例: Org, User）
//! - **値オブジェクト**: 生成時に検証・正規化される入力値（例: Username, OrgCode, ListLimit）
//! - **ドメインエラー**: 入力値の検証失敗を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（REST バックエンド、ハッシュ実装）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`org`] / [`user`] / [`membership`] - テナントとアカウント
//! - [`checklist`] / [`site`] / [`report`] - 点検リソース
//! - [`password`] - パスワード関連の値オブジェクトと仮ハッシュ
//! - [`value_objects`] - 一覧件数・有効フラグなどの共通値
//! - [`clock`] - 時刻プロバイダ

#[macro_use]
mod macros;

pub mod checklist;
pub mod clock;
pub mod error;
pub mod membership;
pub mod org;
pub mod password;
pub mod report;
pub mod site;
pub mod user;
pub mod value_objects;

pub use error::DomainError;

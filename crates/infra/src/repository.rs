//! # リポジトリ実装
//!
//! エンティティごとの永続化操作を [`BackendClient`](crate::backend::BackendClient)
//! 経由の REST 呼び出しとして実装する。
//!
//! ## 設計方針
//!
//! - **トレイトで定義**: ユースケース・ハンドラはトレイト経由で利用し、テストではモックに差し替える
//! - **1 操作 1 呼び出し**: 各メソッドはバックエンドへの呼び出しを 1 回だけ行う
//! - **挿入は配列で送る**: `return=representation` で返る配列の先頭を結果とする

pub mod checklist_repository;
pub mod membership_repository;
pub mod org_repository;
pub mod report_repository;
pub mod site_repository;
pub mod user_repository;

pub use checklist_repository::{ChecklistRepository, PostgrestChecklistRepository};
pub use membership_repository::{MembershipRepository, PostgrestMembershipRepository};
pub use org_repository::{OrgRepository, PostgrestOrgRepository};
pub use report_repository::{PostgrestReportRepository, ReportRepository};
pub use site_repository::{PostgrestSiteRepository, SiteRepository};
pub use user_repository::{PostgrestUserRepository, UserRepository};

//! # JTAI Hygiene 共有ユーティリティ
//!
//! このクレートは、衛生点検 API 全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, api）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum への依存は持たない（`IntoResponse` 変換は API 層の責務）

pub mod envelope;
pub mod event_log;
pub mod health;
pub mod observability;

pub use envelope::{ApiResponse, ErrorResponse};
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};

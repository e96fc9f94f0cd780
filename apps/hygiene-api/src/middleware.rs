//! # ミドルウェア
//!
//! - `admin_auth`: 管理 API の Bearer トークン検証
//! - `error_detail`: エラーレスポンスへの診断情報の差し込み
//! - `panic`: パニック時のエラーレスポンス

mod admin_auth;
mod error_detail;
mod panic;

pub use admin_auth::{extract_bearer_token, require_admin};
pub use error_detail::expose_error_detail;
pub use panic::handle_panic;

//! # 管理 API ハンドラ
//!
//! すべて `require_admin` ミドルウェアの内側で動く。
//!
//! 各操作は「入力 → レスポンス」の関数（`create_org` など）として実装し、
//! 個別ルートのハンドラと `POST /api/admin` のディスパッチの両方から呼ぶ。
//!
//! | ルート | 操作 |
//! |--------|------|
//! | `POST /api/admin/org_create` | [`org::create_org`] |
//! | `GET /api/admin/org_list` | [`org::list_orgs`] |
//! | `POST /api/admin/org_owner_create` | [`owner::create_owner`] |
//! | `POST /api/admin/user_set_password` | [`user::set_password`] |
//! | `POST /api/admin/checklist_create` | [`checklist::create_checklist`] |
//! | `GET /api/admin/checklist_list` | [`checklist::list_checklists`] |
//! | `POST /api/admin/site_upsert` | [`site::upsert_site`] |
//! | `GET /api/admin/site_list` | [`site::list_sites`] |
//! | `GET /api/admin/report_list` | [`report::list_reports`] |
//! | `POST /api/admin` | [`dispatch::admin_dispatch`] |

pub mod checklist;
pub mod dispatch;
pub mod org;
pub mod owner;
pub mod report;
pub mod site;
pub mod user;

pub use checklist::{checklist_create, checklist_list};
pub use dispatch::admin_dispatch;
pub use org::{org_create, org_list};
pub use owner::org_owner_create;
pub use report::report_list;
pub use site::{site_list, site_upsert};
pub use user::user_set_password;

use hygiene_domain::org::OrgId;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;

/// 一覧取得の共通パラメータ
///
/// クエリ文字列では文字列、ディスパッチの JSON では数値も受け付けるため
/// `limit` は JSON 値のまま受け取る。
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub org_id: Option<String>,
    #[serde(default)]
    pub limit:  Option<Value>,
}

impl ListParams {
    /// 必須の `org_id` を取り出す
    pub(crate) fn required_org_id(&self) -> Result<OrgId, ApiError> {
        Ok(OrgId::parse("org_id", self.org_id.as_deref().unwrap_or_default())?)
    }
}

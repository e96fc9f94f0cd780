//! # ヘルスチェックのレスポンス型
//!
//! どちらも [`ApiResponse`](crate::ApiResponse) に包んで返す。
//!
//! - Liveness: `{ "ok": true, "service": ..., "version": ..., "ts": ... }`
//! - Readiness: `{ "ok": <ready>, "status": "ready" | "not_ready", "checks": { "backend": "ok" } }`

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Liveness レスポンス
///
/// ```
/// use hygiene_shared::HealthResponse;
///
/// let response = HealthResponse::healthy("jtai-hygiene", "0.1.0", chrono::Utc::now());
/// assert_eq!(response.service, "jtai-hygiene");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub service: String,
    /// `CARGO_PKG_VERSION`
    pub version: String,
    pub ts:      DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy(service: impl Into<String>, version: impl Into<String>, ts: DateTime<Utc>) -> Self {
        Self {
            service: service.into(),
            version: version.into(),
            ts,
        }
    }
}

/// 依存先ごとの確認結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Error,
}

impl From<bool> for CheckStatus {
    fn from(reachable: bool) -> Self {
        if reachable { Self::Ok } else { Self::Error }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    Ready,
    NotReady,
}

/// Readiness レスポンス
///
/// `checks` が空、またはすべて [`CheckStatus::Ok`] のときだけ `ready`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: ReadinessStatus,
    pub checks: BTreeMap<String, CheckStatus>,
}

impl Default for ReadinessResponse {
    fn default() -> Self {
        Self {
            status: ReadinessStatus::Ready,
            checks: BTreeMap::new(),
        }
    }
}

impl ReadinessResponse {
    /// 確認結果を 1 件追加する
    ///
    /// ```
    /// use hygiene_shared::{CheckStatus, ReadinessResponse};
    ///
    /// let response = ReadinessResponse::default().with_check("backend", CheckStatus::Error);
    /// assert!(!response.is_ready());
    /// ```
    pub fn with_check(mut self, name: impl Into<String>, status: CheckStatus) -> Self {
        if status == CheckStatus::Error {
            self.status = ReadinessStatus::NotReady;
        }
        self.checks.insert(name.into(), status);
        self
    }

    pub fn is_ready(&self) -> bool {
        self.status == ReadinessStatus::Ready
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::ApiResponse;

    #[test]
    fn test_livenessはエンベロープのトップレベルに展開される() {
        let ts = "2025-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let response = ApiResponse::new(HealthResponse::healthy("jtai-hygiene", "0.1.0", ts));

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "ok": true,
                "service": "jtai-hygiene",
                "version": "0.1.0",
                "ts": "2025-01-01T00:00:00Z"
            })
        );
    }

    #[test]
    fn test_バックエンドに到達できればready() {
        let response = ReadinessResponse::default().with_check("backend", true.into());

        assert!(response.is_ready());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "status": "ready", "checks": { "backend": "ok" } })
        );
    }

    #[test]
    fn test_ひとつでも失敗すればnot_readyのまま戻らない() {
        let response = ReadinessResponse::default()
            .with_check("backend", CheckStatus::Error)
            .with_check("other", CheckStatus::Ok);

        assert!(!response.is_ready());
        assert_eq!(
            serde_json::to_value(&response).unwrap()["status"],
            json!("not_ready")
        );
    }
}

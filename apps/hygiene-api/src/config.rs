//! # API サーバー設定
//!
//! 環境変数からサーバーの設定を読み込む。
//!
//! バックエンドの接続情報と管理トークンは起動時には必須ではない。
//! 未設定のまま該当エンドポイントが呼ばれたときに `CONFIG_ERROR` を返す。

use std::{env, time::Duration};

use hygiene_infra::backend::BackendConfig;
use thiserror::Error;

/// バックエンド呼び出しのデフォルトタイムアウト（秒）
const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 10;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} の値が不正です: {value}")]
    Invalid { name: &'static str, value: String },
}

/// API サーバーの設定
#[derive(Clone)]
pub struct AppConfig {
    /// バインドアドレス
    pub host:                String,
    /// ポート番号
    pub port:                u16,
    /// バックエンドのベース URL（`SUPABASE_URL`）
    pub supabase_url:        Option<String>,
    /// バックエンドのサービスキー（`SUPABASE_SERVICE_ROLE_KEY`）
    pub service_key:         Option<String>,
    /// 管理 API の Bearer トークン（`ADMIN_TOKEN`）
    pub admin_token:         Option<String>,
    /// バックエンド呼び出しのタイムアウト
    pub backend_timeout:     Duration,
    /// エラーレスポンスに `detail` を含めるか
    ///
    /// `EXPOSE_ERROR_DETAIL=true` のときだけ有効。
    pub expose_error_detail: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("supabase_url", &self.supabase_url)
            .field("service_key", &self.service_key.as_ref().map(|_| "[REDACTED]"))
            .field("admin_token", &self.admin_token.as_ref().map(|_| "[REDACTED]"))
            .field("backend_timeout", &self.backend_timeout)
            .field("expose_error_detail", &self.expose_error_detail)
            .finish()
    }
}

impl AppConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の取得関数から設定を読み込む
    ///
    /// テストでは環境変数を書き換えずにこちらを使う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match get("APP_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "APP_PORT",
                value,
            })?,
            None => 3000,
        };

        let timeout_secs = match get("BACKEND_TIMEOUT_SECS") {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "BACKEND_TIMEOUT_SECS",
                        value,
                    });
                }
            },
            None => DEFAULT_BACKEND_TIMEOUT_SECS,
        };

        Ok(Self {
            host: get("APP_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            supabase_url: get("SUPABASE_URL"),
            service_key: get("SUPABASE_SERVICE_ROLE_KEY"),
            admin_token: get("ADMIN_TOKEN"),
            backend_timeout: Duration::from_secs(timeout_secs),
            expose_error_detail: get("EXPOSE_ERROR_DETAIL")
                .is_some_and(|v| v.eq_ignore_ascii_case("true")),
        })
    }

    /// バックエンドクライアント用の設定
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            base_url:    self.supabase_url.clone(),
            service_key: self.service_key.clone(),
            timeout:     self.backend_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_未設定ならデフォルト値になる() {
        let config = load(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.supabase_url, None);
        assert_eq!(config.admin_token, None);
        assert_eq!(config.backend_timeout, Duration::from_secs(10));
        assert!(!config.expose_error_detail);
    }

    #[test]
    fn test_空白だけの値は未設定として扱う() {
        let config = load(&[("ADMIN_TOKEN", "   "), ("SUPABASE_URL", "")]).unwrap();

        assert_eq!(config.admin_token, None);
        assert_eq!(config.supabase_url, None);
    }

    #[test]
    fn test_値は前後の空白を除いて読み込む() {
        let config = load(&[
            ("APP_PORT", " 8080 "),
            ("ADMIN_TOKEN", " secret "),
            ("BACKEND_TIMEOUT_SECS", "3"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.admin_token.as_deref(), Some("secret"));
        assert_eq!(config.backend_timeout, Duration::from_secs(3));
    }

    #[rstest]
    #[case("APP_PORT", "abc")]
    #[case("APP_PORT", "70000")]
    #[case("BACKEND_TIMEOUT_SECS", "0")]
    #[case("BACKEND_TIMEOUT_SECS", "-1")]
    fn test_不正な値は起動時エラーになる(#[case] name: &'static str, #[case] value: &str) {
        let result = load(&[(name, value)]);

        assert_eq!(
            result.unwrap_err(),
            ConfigError::Invalid {
                name,
                value: value.to_string(),
            }
        );
    }

    #[rstest]
    #[case("true", true)]
    #[case("TRUE", true)]
    #[case("1", false)]
    #[case("false", false)]
    fn test_expose_error_detailはtrueのときだけ有効(#[case] value: &str, #[case] expected: bool) {
        let config = load(&[("EXPOSE_ERROR_DETAIL", value)]).unwrap();

        assert_eq!(config.expose_error_detail, expected);
    }

    #[test]
    fn test_debug出力に秘密情報を含めない() {
        let config = load(&[("ADMIN_TOKEN", "secret-admin"), ("SUPABASE_SERVICE_ROLE_KEY", "secret-key")])
            .unwrap();

        let debug = format!("{config:?}");

        assert!(!debug.contains("secret-admin"));
        assert!(!debug.contains("secret-key"));
    }
}

//! # REST バックエンドクライアント
//!
//! ホスティングされたリレーショナルバックエンドの自動生成 REST インターフェース
//! （PostgREST 規約）への通信を担当する。
//!
//! ## リクエスト形式
//!
//! - URL: `{SUPABASE_URL}/rest/v1/<table>?<query>`
//! - ヘッダー: `apikey` と `authorization: Bearer <サービスキー>`
//! - ボディ送信時のみ `content-type: application/json` と `prefer: return=representation`
//!
//! ## レスポンス
//!
//! ステータスに関わらず [`BackendResponse`]（`{ok, status, data}`）として返す。
//! ボディは JSON として解釈し、失敗した場合は生テキストを JSON 文字列として保持する。
//! レスポンスを受け取れなかった場合（接続失敗・タイムアウト）のみ `Err` になる。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Method,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use strum::IntoStaticStr;

use crate::InfraError;

/// バックエンドのテーブル
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Table {
    Orgs,
    Users,
    OrgMembers,
    Checklists,
    Sites,
    HygieneReports,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// PostgREST クエリのビルダー
///
/// パラメータは追加した順にクエリ文字列へ並ぶ。
///
/// # 使用例
///
/// ```rust
/// use hygiene_infra::backend::{Query, Table};
///
/// let query = Query::table(Table::Orgs)
///     .eq("code", "acme")
///     .select("*")
///     .limit(1);
/// assert_eq!(query.to_path(), "orgs?code=eq.acme&select=*&limit=1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    table:  Table,
    params: Vec<(String, String)>,
}

impl Query {
    pub fn table(table: Table) -> Self {
        Self {
            table,
            params: Vec::new(),
        }
    }

    /// 取得する列（リソース埋め込みを含む）
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    /// 等価フィルタ（値は URL エンコードする）
    pub fn eq(mut self, column: &str, value: impl AsRef<str>) -> Self {
        self.params.push((
            column.to_string(),
            format!("eq.{}", urlencoding::encode(value.as_ref())),
        ));
        self
    }

    /// 降順ソート
    pub fn order_desc(mut self, column: &str) -> Self {
        self.params.push(("order".to_string(), format!("{column}.desc")));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.params.push(("limit".to_string(), limit.to_string()));
        self
    }

    pub fn table_name(&self) -> &'static str {
        self.table.as_str()
    }

    /// `/rest/v1/` 以降のパスを組み立てる
    pub fn to_path(&self) -> String {
        if self.params.is_empty() {
            return self.table_name().to_string();
        }
        let query = self
            .params
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.table_name(), query)
    }
}

/// バックエンドからの応答
#[derive(Debug, Clone, PartialEq)]
pub struct BackendResponse {
    /// 2xx かどうか
    pub ok:     bool,
    pub status: u16,
    /// レスポンスボディ
    pub data:   Value,
}

impl BackendResponse {
    /// ステータスと生のボディから作成する
    pub fn from_body(status: u16, body: &str) -> Self {
        let data =
            serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()));
        Self {
            ok: (200..300).contains(&status),
            status,
            data,
        }
    }

    /// 2xx 以外なら [`InfraError`] に変換し、2xx ならボディを返す
    pub fn error_for_status(self) -> Result<Value, InfraError> {
        if self.ok {
            Ok(self.data)
        } else {
            Err(InfraError::backend(self.status, self.data))
        }
    }

    /// 行の配列として解釈する
    ///
    /// 配列でない単一オブジェクトは 1 要素として扱い、`null` は空とみなす。
    pub fn into_rows<T: DeserializeOwned>(self) -> Result<Vec<T>, InfraError> {
        match self.error_for_status()? {
            Value::Null => Ok(Vec::new()),
            rows @ Value::Array(_) => Ok(serde_json::from_value(rows)?),
            row => Ok(vec![serde_json::from_value(row)?]),
        }
    }

    /// 先頭の行を返す（なければ `None`）
    pub fn into_first<T: DeserializeOwned>(self) -> Result<Option<T>, InfraError> {
        Ok(self.into_rows::<T>()?.into_iter().next())
    }

    /// 挿入・更新の結果として 1 行を返す
    ///
    /// `return=representation` で行が返らなかった場合はエラー。
    pub fn into_single<T: DeserializeOwned>(self) -> Result<T, InfraError> {
        self.into_first()?
            .ok_or_else(|| InfraError::unexpected("バックエンドが行を返しませんでした"))
    }
}

/// REST バックエンドクライアントトレイト
///
/// テスト時にスタブを使用できるようトレイトで定義。
/// 呼び出しはリクエスト内で逐次に行い、リトライはしない。
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// `GET /rest/v1/<query>`
    async fn select(&self, query: &Query) -> Result<BackendResponse, InfraError>;

    /// `POST /rest/v1/<table>`（行の配列を送る）
    async fn insert(&self, table: Table, rows: Value) -> Result<BackendResponse, InfraError>;

    /// `PATCH /rest/v1/<query>`
    async fn patch(&self, query: &Query, body: Value) -> Result<BackendResponse, InfraError>;

    /// 疎通確認（1 行だけ取得する）
    async fn ping(&self) -> Result<(), InfraError> {
        let query = Query::table(Table::Orgs).select("id").limit(1);
        self.select(&query).await?.error_for_status()?;
        Ok(())
    }
}

/// バックエンド接続設定
///
/// URL とサービスキーは起動時には必須ではなく、未設定のまま呼び出すと
/// 設定エラー（[`InfraError::config`]）になる。
#[derive(Clone)]
pub struct BackendConfig {
    pub base_url:    Option<String>,
    pub service_key: Option<String>,
    pub timeout:     Duration,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("base_url", &self.base_url)
            .field("service_key", &self.service_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// PostgREST 実装の BackendClient
#[derive(Debug)]
pub struct PostgrestClient {
    config: BackendConfig,
    client: reqwest::Client,
}

impl PostgrestClient {
    /// 新しいクライアントを作成する
    ///
    /// 接続・リクエストのタイムアウトには `config.timeout` を使う。
    pub fn new(config: BackendConfig) -> Result<Self, InfraError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, client })
    }

    fn credentials(&self) -> Result<(&str, &str), InfraError> {
        let base_url = self
            .config
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| InfraError::config("SUPABASE_URL"))?;
        let service_key = self
            .config
            .service_key
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| InfraError::config("SUPABASE_SERVICE_ROLE_KEY"))?;
        Ok((base_url.trim_end_matches('/'), service_key))
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<BackendResponse, InfraError> {
        let (base_url, service_key) = self.credentials()?;
        let url = format!("{base_url}/rest/v1/{path}");

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("apikey", service_key)
            .header(AUTHORIZATION, format!("Bearer {service_key}"));

        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .header("prefer", "return=representation")
                .body(serde_json::to_vec(&body)?);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        let response = BackendResponse::from_body(status, &text);
        if !response.ok {
            tracing::debug!(%method, path, status, "バックエンドが 2xx 以外を返しました");
        }
        Ok(response)
    }
}

#[async_trait]
impl BackendClient for PostgrestClient {
    async fn select(&self, query: &Query) -> Result<BackendResponse, InfraError> {
        self.send(Method::GET, &query.to_path(), None).await
    }

    async fn insert(&self, table: Table, rows: Value) -> Result<BackendResponse, InfraError> {
        self.send(Method::POST, table.as_str(), Some(rows)).await
    }

    async fn patch(&self, query: &Query, body: Value) -> Result<BackendResponse, InfraError> {
        self.send(Method::PATCH, &query.to_path(), Some(body)).await
    }
}

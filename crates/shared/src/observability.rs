//! # Observability 基盤
//!
//! - `LOG_FORMAT`（`json` / `pretty`）と `RUST_LOG` によるサブスクライバーの初期化
//! - `InfraError` が捕捉する `SpanTrace` のための `ErrorLayer` の登録
//! - UUID v7 の Request ID 生成と、それを含むリクエストスパン
//!
//! JSON 出力ではイベントのフィールドをトップレベルに展開するため、
//! `jq 'select(.request_id == "...")'` のように 1 リクエスト分のログを抽出できる。

/// Request ID を運ぶ HTTP ヘッダー名
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_LOG_FILTER: &str = "info,hygiene=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 JSON（本番環境向け）
    Json,
    /// 人間向けの複数行表示（開発環境向け）
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値から決定する
    ///
    /// 大文字小文字と前後の空白は無視する。未設定は `Pretty`、
    /// 解釈できない値も `Pretty` にして stderr に警告を出す
    /// （サブスクライバー初期化前なので `tracing` は使えない）。
    pub fn from_value(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::default();
        };
        if raw.eq_ignore_ascii_case("json") {
            Self::Json
        } else if raw.eq_ignore_ascii_case("pretty") {
            Self::Pretty
        } else {
            eprintln!("WARNING: LOG_FORMAT={raw:?} は不明な値です。pretty で出力します");
            Self::Pretty
        }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// `app` スパンの `service` フィールドに入るサービス名
    pub service_name: String,
    pub log_format:   LogFormat,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
        }
    }

    /// 任意の参照関数から設定を読み取る
    pub fn from_lookup(
        service_name: impl Into<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        Self::new(service_name, LogFormat::from_value(lookup("LOG_FORMAT").as_deref()))
    }

    /// 環境変数から設定を読み取る
    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::from_lookup(service_name, |name| std::env::var(name).ok())
    }
}

/// グローバルなサブスクライバーを登録する
///
/// プロセスにつき 1 回だけ呼ぶこと（2 回目はパニックする）。
/// サービス名は呼び出し元で `info_span!("app", service = ...)` に入れる。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) {
    use tracing_subscriber::{
        EnvFilter,
        Layer as _,
        fmt,
        layer::SubscriberExt,
        util::SubscriberInitExt,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let output = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => fmt::layer().with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .with(tracing_error::ErrorLayer::default())
        .init();
}

/// Request ID を UUID v7 で採番する
///
/// 時刻順に並ぶため、ログをまたいだ前後関係を ID だけで追える。
#[cfg(feature = "observability")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

#[cfg(feature = "observability")]
impl tower_http::request_id::MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(
        &mut self,
        _request: &http::Request<B>,
    ) -> Option<tower_http::request_id::RequestId> {
        let id = uuid::Uuid::now_v7().hyphenated().to_string();
        http::HeaderValue::try_from(id)
            .ok()
            .map(tower_http::request_id::RequestId::new)
    }
}

/// `TraceLayer::make_span_with` に渡すリクエストスパン
///
/// `SetRequestIdLayer` の内側に置くこと。外側では `request_id` が `-` になる。
/// クエリ文字列は `limit` や `org_id` 程度だが、ログにはパスだけを残す。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    )
}

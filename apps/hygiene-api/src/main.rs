//! # JTAI Hygiene API サーバー
//!
//! 管理画面と点検端末から呼ばれる API サーバー。
//! データは PostgREST 互換のバックエンドに保存する。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `APP_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `APP_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `SUPABASE_URL` | **Yes** | バックエンドのベース URL |
//! | `SUPABASE_SERVICE_ROLE_KEY` | **Yes** | バックエンドのサービスキー |
//! | `ADMIN_TOKEN` | **Yes** | 管理 API の Bearer トークン |
//! | `BACKEND_TIMEOUT_SECS` | No | バックエンド呼び出しのタイムアウト秒（デフォルト: `10`） |
//! | `EXPOSE_ERROR_DETAIL` | No | `true` でエラーレスポンスに詳細を含める |
//! | `LOG_FORMAT` | No | `json` または `pretty` |
//!
//! 必須の値が未設定でも起動はする。該当するリクエストが `CONFIG_ERROR` を返す。
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p hygiene-api
//! ```

use std::sync::Arc;

use hygiene_api::{
    app_builder::{build_app, build_state},
    config::AppConfig,
};
use hygiene_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// サーバーのエントリーポイント
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. 依存の組み立てとルーターの構築
/// 5. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 本番環境では .env ファイルは使用せず、環境変数を直接設定する
    dotenvy::dotenv().ok();

    init_tracing(&TracingConfig::from_env("hygiene-api"));
    let _tracing_guard = tracing::info_span!("app", service = "hygiene-api").entered();

    let config = AppConfig::from_env()?;
    if config.admin_token.is_none() {
        tracing::warn!("ADMIN_TOKEN が未設定です。管理 API は CONFIG_ERROR を返します");
    }

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("衛生点検 API サーバーを起動します: {}", addr);

    let state = Arc::new(build_state(config)?);
    let app = build_app(state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("衛生点検 API サーバーが起動しました: {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

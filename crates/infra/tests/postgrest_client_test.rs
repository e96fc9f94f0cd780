//! PostgrestClient の統合テスト
//!
//! プロセス内に axum でバックエンドのモックサーバーを立て、
//! 実際の HTTP 通信でパス・ヘッダー・ボディを検証する。
//!
//! 実行方法:
//! ```bash
//! cargo test -p hygiene-infra --test postgrest_client_test
//! ```

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
};
use hygiene_infra::{
    InfraErrorKind,
    backend::{BackendClient, BackendConfig, PostgrestClient, Query, Table},
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

const SERVICE_KEY: &str = "service-role-key";

/// モックサーバーが受け取ったリクエスト
#[derive(Debug, Clone)]
struct Captured {
    method:  Method,
    uri:     String,
    headers: HeaderMap,
    body:    Vec<u8>,
}

#[derive(Clone)]
struct MockServer {
    captured: Arc<Mutex<Vec<Captured>>>,
    status:   StatusCode,
    body:     &'static str,
}

async fn capture(
    State(server): State<MockServer>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    server.captured.lock().unwrap().push(Captured {
        method,
        uri: uri.to_string(),
        headers,
        body: body.to_vec(),
    });
    (server.status, server.body)
}

/// モックサーバーを起動し、ベース URL と記録先を返す
async fn spawn_backend(
    status: StatusCode,
    body: &'static str,
) -> (String, Arc<Mutex<Vec<Captured>>>) {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let server = MockServer {
        captured: captured.clone(),
        status,
        body,
    };
    let app = Router::new().fallback(capture).with_state(server);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), captured)
}

fn client_for(base_url: &str) -> PostgrestClient {
    PostgrestClient::new(BackendConfig {
        base_url:    Some(format!("{base_url}/")),
        service_key: Some(SERVICE_KEY.to_string()),
        timeout:     Duration::from_secs(5),
    })
    .unwrap()
}

#[tokio::test]
async fn test_selectは認証ヘッダーを付けてボディなしで送る() {
    // Given
    let (base_url, captured) = spawn_backend(StatusCode::OK, r#"[{"id": 1}]"#).await;
    let sut = client_for(&base_url);
    let query = Query::table(Table::Users)
        .eq("username", "owner@acme.test")
        .select("*");

    // When
    let response = sut.select(&query).await.unwrap();

    // Then
    assert!(response.ok);
    assert_eq!(response.data, json!([{ "id": 1 }]));

    let captured = captured.lock().unwrap();
    let request = &captured[0];
    assert_eq!(request.method, Method::GET);
    assert_eq!(
        request.uri,
        "/rest/v1/users?username=eq.owner%40acme.test&select=*"
    );
    assert_eq!(request.headers["apikey"], SERVICE_KEY);
    assert_eq!(
        request.headers["authorization"],
        format!("Bearer {SERVICE_KEY}")
    );
    assert!(request.headers.get("content-type").is_none());
    assert!(request.headers.get("prefer").is_none());
    assert!(request.body.is_empty());
}

#[tokio::test]
async fn test_insertは行の配列をrepresentation付きで送る() {
    // Given
    let (base_url, captured) = spawn_backend(StatusCode::CREATED, r#"[{"id": 2}]"#).await;
    let sut = client_for(&base_url);
    let rows = json!([{ "site_name": "JTAI", "area": "Lobby", "status": "ok", "note": null }]);

    // When
    let response = sut.insert(Table::HygieneReports, rows.clone()).await.unwrap();

    // Then
    assert_eq!(response.status, 201);

    let captured = captured.lock().unwrap();
    let request = &captured[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.uri, "/rest/v1/hygiene_reports");
    assert_eq!(request.headers["content-type"], "application/json");
    assert_eq!(request.headers["prefer"], "return=representation");
    let sent: Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(sent, rows);
}

#[tokio::test]
async fn test_patchはフィルタ付きのパスに送る() {
    // Given
    let (base_url, captured) = spawn_backend(StatusCode::OK, "[]").await;
    let sut = client_for(&base_url);
    let query = Query::table(Table::Users).eq("id", "0193a5b0-7c1e-7000-8000-0000000000aa");

    // When
    sut.patch(&query, json!({ "last_login_at": "2025-01-01T00:00:00+00:00" }))
        .await
        .unwrap();

    // Then
    let captured = captured.lock().unwrap();
    assert_eq!(captured[0].method, Method::PATCH);
    assert_eq!(
        captured[0].uri,
        "/rest/v1/users?id=eq.0193a5b0-7c1e-7000-8000-0000000000aa"
    );
}

#[tokio::test]
async fn test_2xx以外はokがfalseの応答として返る() {
    // Given
    let (base_url, _) = spawn_backend(
        StatusCode::CONFLICT,
        r#"{"code":"23505","message":"duplicate key"}"#,
    )
    .await;
    let sut = client_for(&base_url);

    // When
    let response = sut
        .insert(Table::Orgs, json!([{ "name": "Acme", "code": "acme" }]))
        .await
        .unwrap();

    // Then
    assert!(!response.ok);
    assert_eq!(response.status, 409);
    assert_eq!(response.data["code"], "23505");
}

#[tokio::test]
async fn test_json以外のボディは文字列として返る() {
    let (base_url, _) = spawn_backend(StatusCode::BAD_GATEWAY, "upstream down").await;
    let sut = client_for(&base_url);

    let response = sut.select(&Query::table(Table::Orgs)).await.unwrap();

    assert_eq!(response.data, json!("upstream down"));
}

#[tokio::test]
async fn test_pingは2xxなら成功する() {
    let (base_url, captured) = spawn_backend(StatusCode::OK, "[]").await;
    let sut = client_for(&base_url);

    sut.ping().await.unwrap();

    assert_eq!(
        captured.lock().unwrap()[0].uri,
        "/rest/v1/orgs?select=id&limit=1"
    );
}

#[tokio::test]
async fn test_接続できなければネットワークエラー() {
    // Given: 何も待ち受けていないポート
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let sut = client_for(&format!("http://{addr}"));

    // When
    let err = sut.select(&Query::table(Table::Orgs)).await.unwrap_err();

    // Then
    assert!(matches!(err.kind(), InfraErrorKind::Network(_)));
}

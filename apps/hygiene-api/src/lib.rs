//! # JTAI Hygiene API ライブラリ
//!
//! 施設衛生点検システムの管理・認証 API のコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app_builder`: 依存の組み立てとルーター構築
//! - `config`: 環境変数からの設定読み込み
//! - `error`: API エラーとエラーエンベロープへの変換
//! - `extract`: JSON ボディ・クエリの抽出
//! - `handler`: HTTP ハンドラ
//! - `middleware`: 管理トークン認証・エラー詳細・パニック処理
//! - `state`: ハンドラ共有の状態
//! - `usecase`: ログイン・オーナー作成・パスワード設定

pub mod app_builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod middleware;
pub mod state;
pub mod usecase;

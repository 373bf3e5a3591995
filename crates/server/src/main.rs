//! # Docsign Server
//!
//! 署名済みドキュメントの中継・登録サーバー。
//!
//! ## 役割
//! - 署名済みPDFを運用者と署名者にメール送信
//! - 送信成功した署名をJSONファイルに記録
//! - 署名IDまたはコンテンツハッシュによる照会
//!
//! ## API エンドポイント
//! - `POST /submit-signature` — 署名済みPDFの送信と登録
//! - `GET /test-notification` — テストメール送信
//! - `GET /validate/{key}` — 署名レコードの照会
//! - `GET /`, `GET /validar` — 静的HTMLページ

mod config;
mod endpoints;
mod error;
mod mailer;
mod store;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::{AppState, Config};
use crate::mailer::SmtpMailer;
use crate::store::{JsonFileStore, RecordStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let mailer = SmtpMailer::from_config(&config)?;

    let store = JsonFileStore::new(config.records_path.clone());
    // 起動時に読み込み、ファイルが無ければ作成しておく
    let existing = store.load_entries().len();
    tracing::info!(
        path = %store.path().display(),
        records = existing,
        "レコードファイルを読み込み"
    );

    let state = Arc::new(AppState {
        operator_address: config.email_user.clone(),
        mailer: Box::new(mailer),
        store: Arc::new(store),
        pages_dir: config.pages_dir.clone(),
    });

    let app = endpoints::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("サーバーを {} で起動します", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! # サーバーエンドポイント
//!
//! - `POST /submit-signature` — 署名済みPDFの送信と登録
//! - `GET /test-notification` — テストメール送信
//! - `GET /validate/{key}` — 署名IDまたはハッシュによる照会
//! - `GET /`, `GET /validar` — 静的HTMLページ

pub mod pages;
pub mod submit_signature;
pub mod test_notification;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;

pub use pages::{handle_signature_page, handle_validation_page};
pub use submit_signature::handle_submit_signature;
pub use test_notification::handle_test_notification;
pub use validate::handle_validate;

use crate::config::{AppState, MAX_BODY_BYTES};

/// 全ルートを組み立てる。
pub fn router(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route("/", get(handle_signature_page))
        .route("/validar", get(handle_validation_page))
        .route("/submit-signature", post(handle_submit_signature))
        .route("/test-notification", get(handle_test_notification))
        .route("/validate/{key}", get(handle_validate))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

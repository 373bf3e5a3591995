//! # 静的HTMLページ
//!
//! 署名フォーム (`GET /`) と照会ページ (`GET /validar`) を設定ディレクトリから返す。

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::config::AppState;

const SIGNATURE_PAGE: &str = "procuracao_assinatura.html";
const VALIDATION_PAGE: &str = "validar.html";

/// GET / — 署名フォーム
pub async fn handle_signature_page(State(state): State<Arc<AppState>>) -> Response {
    serve_page(&state, SIGNATURE_PAGE).await
}

/// GET /validar — 照会ページ
pub async fn handle_validation_page(State(state): State<Arc<AppState>>) -> Response {
    serve_page(&state, VALIDATION_PAGE).await
}

async fn serve_page(state: &AppState, file_name: &str) -> Response {
    let path = state.pages_dir.join(file_name);
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "HTMLページの読み込みに失敗");
            (StatusCode::NOT_FOUND, "Página não encontrada.").into_response()
        }
    }
}

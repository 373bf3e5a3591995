//! # GET /validate/{key}
//!
//! 署名IDまたはコンテンツハッシュによる署名レコードの照会。

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use docsign_types::ValidateResponse;

use crate::config::AppState;
use crate::error::AppError;

/// 一致するレコードがない場合のメッセージ
pub(crate) const NOT_FOUND_MESSAGE: &str = "Assinatura não encontrada para este ID ou hash.";

/// GET /validate/{key} — 署名レコードの照会。
///
/// 挿入順で最初に一致したレコードを返す。一致がなければ404。
pub async fn handle_validate(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<ValidateResponse>, AppError> {
    let store = Arc::clone(&state.store);
    let found = tokio::task::spawn_blocking(move || store.find(&key)).await?;

    match found {
        Some(record) => Ok(Json(ValidateResponse { ok: true, record })),
        None => Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string())),
    }
}

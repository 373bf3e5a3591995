//! # サーバーエラー型
//!
//! 全エンドポイントで共通のエラー型。
//! `BadRequest` / `PayloadTooLarge` / `NotFound` はそのまま呼び出し元に返し、
//! それ以外はログに記録したうえで汎用の500応答にまとめる。

use axum::http::StatusCode;
use axum::Json;
use docsign_types::{ErrorResponse, NotFoundResponse};

/// 内部エラー時に呼び出し元へ返す汎用メッセージ
pub const GENERIC_SUBMIT_ERROR: &str = "Erro ao enviar ou registrar assinatura.";

/// サーバーエラー型。
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 不正なリクエスト（必須項目の欠落、パース失敗）
    #[error("{0}")]
    BadRequest(String),
    /// リクエストボディがサイズ上限を超えた
    #[error("{0}")]
    PayloadTooLarge(String),
    /// 照会キーに一致するレコードがない
    #[error("{0}")]
    NotFound(String),
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    Transport(String),
    /// レコードファイルの読み書きに失敗
    #[error("ストレージ操作に失敗: {0}")]
    Storage(String),
    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl From<crate::mailer::MailError> for AppError {
    fn from(e: crate::mailer::MailError) -> Self {
        AppError::Transport(e.to_string())
    }
}

impl From<crate::store::StoreError> for AppError {
    fn from(e: crate::store::StoreError) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("ブロッキングタスクの実行に失敗: {e}"))
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::BadRequest(error) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse { ok: false, error }),
            )
                .into_response(),
            AppError::PayloadTooLarge(error) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(ErrorResponse { ok: false, error }),
            )
                .into_response(),
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(NotFoundResponse { ok: false, message }),
            )
                .into_response(),
            AppError::Transport(_) | AppError::Storage(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "リクエスト処理に失敗");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        ok: false,
                        error: GENERIC_SUBMIT_ERROR.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

//! # GET /test-notification
//!
//! 添付なしのテストメールを運用者アドレスにのみ送信する。レコードは作成しない。

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;

use crate::config::AppState;
use crate::mailer::OutgoingMail;

pub(crate) const TEST_SUCCESS: &str =
    "E-mail de teste enviado com sucesso! Veja sua caixa de entrada.";
pub(crate) const TEST_FAILURE: &str =
    "Erro ao enviar e-mail de teste. Veja o console do servidor.";

/// GET /test-notification — 送信設定の疎通確認。
///
/// 応答はプレーンテキスト。
pub async fn handle_test_notification(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, &'static str) {
    let mail = OutgoingMail {
        from_name: "Teste Assinatura".to_string(),
        to: vec![state.operator_address.clone()],
        subject: "Teste de envio de e-mail (sem PDF)".to_string(),
        body: "Se você recebeu este e-mail, o servidor está autorizado a enviar e-mails."
            .to_string(),
        attachment: None,
    };

    match state.mailer.send(mail).await {
        Ok(message_id) => {
            tracing::info!(message_id = %message_id, "テストメールを送信");
            (StatusCode::OK, TEST_SUCCESS)
        }
        Err(e) => {
            tracing::error!(error = %e, "テストメールの送信に失敗");
            (StatusCode::INTERNAL_SERVER_ERROR, TEST_FAILURE)
        }
    }
}

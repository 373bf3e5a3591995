//! 署名送信のメインハンドラ。

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use docsign_types::{NewSignatureRecord, SubmitSignatureRequest, SubmitSignatureResponse};

use super::message;
use super::{ATTACHMENT_NAME, MISSING_FIELDS, PAYLOAD_TOO_LARGE, SENDER_NAME};
use crate::config::AppState;
use crate::error::AppError;
use crate::mailer::{MailAttachment, OutgoingMail};

/// パディングの有無を問わないBase64エンジン（Standard）
const LENIENT_B64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// 検証済みの送信内容。
#[derive(Debug)]
struct Submission {
    pdf: Vec<u8>,
    record: NewSignatureRecord,
}

/// POST /submit-signature — 署名済みPDFの送信と登録。
///
/// 1. 必須項目の検証（失敗時は副作用なしで400）
/// 2. PDFのBase64デコード
/// 3. 運用者 + 署名者へのメール送信
/// 4. 送信成功後にレコードを追記
///
/// 送信・保存いずれの失敗も汎用の500にまとめる。送信済みで保存に失敗した場合も区別しない。
pub async fn handle_submit_signature(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SubmitSignatureRequest>, JsonRejection>,
) -> Result<Json<SubmitSignatureResponse>, AppError> {
    let Json(body) = payload.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(PAYLOAD_TOO_LARGE.to_string())
        } else {
            AppError::BadRequest(format!("Corpo da requisição inválido: {}", e.body_text()))
        }
    })?;

    let Submission { pdf, mut record } = validate(body)?;

    let mail = OutgoingMail {
        from_name: SENDER_NAME.to_string(),
        to: message::recipients(&state.operator_address, record.client_email.as_deref()),
        subject: message::subject(&record.client_name, record.signature_id.as_deref()),
        body: message::body(&record),
        attachment: Some(MailAttachment {
            filename: ATTACHMENT_NAME.to_string(),
            content_type: "application/pdf".to_string(),
            bytes: pdf,
        }),
    };

    let message_id = state.mailer.send(mail).await?;
    tracing::info!(
        message_id = %message_id,
        hash = %record.hash,
        "署名通知メールを送信"
    );

    record.email_message_id = Some(message_id.clone());
    let store = Arc::clone(&state.store);
    let saved_record = tokio::task::spawn_blocking(move || store.append(record)).await??;

    Ok(Json(SubmitSignatureResponse {
        ok: true,
        message_id,
        saved_record,
    }))
}

/// 空文字列を未指定として扱う。
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// 必須項目を検証し、PDFをデコードする。
fn validate(body: SubmitSignatureRequest) -> Result<Submission, AppError> {
    let (Some(pdf_base64), Some(client_name), Some(hash), Some(timestamp)) = (
        non_empty(body.pdf_base64),
        non_empty(body.client_name),
        non_empty(body.hash),
        non_empty(body.timestamp),
    ) else {
        return Err(AppError::BadRequest(MISSING_FIELDS.to_string()));
    };

    let pdf = decode_pdf(&pdf_base64)
        .map_err(|e| AppError::BadRequest(format!("pdfBase64 inválido: {e}")))?;

    let geo = body
        .geo
        .filter(|g| !g.is_null() && g.as_str() != Some(""));

    Ok(Submission {
        pdf,
        record: NewSignatureRecord {
            signature_id: non_empty(body.signature_id),
            hash,
            client_name,
            client_email: non_empty(body.client_email),
            timestamp,
            cpf: non_empty(body.cpf),
            identity_document: non_empty(body.identity_document),
            address: non_empty(body.address),
            nationality: non_empty(body.nationality),
            marital_status: non_empty(body.marital_status),
            profession: non_empty(body.profession),
            geo,
            email_message_id: None,
        },
    })
}

/// PDFのBase64をデコードする。
///
/// 空白・改行は無視し、`data:...;base64,` 形式のプレフィックスがあれば取り除く。
fn decode_pdf(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let data = match encoded.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => encoded,
    };
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    LENIENT_B64.decode(compact)
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn request() -> SubmitSignatureRequest {
        SubmitSignatureRequest {
            pdf_base64: Some("JVBERi0xLjQ=".to_string()),
            client_name: Some("Ana Silva".to_string()),
            hash: Some("abc123".to_string()),
            timestamp: Some("2024-01-01T10:00:00Z".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_minimal() {
        let submission = validate(request()).unwrap();
        assert_eq!(submission.pdf, b"%PDF-1.4");
        assert_eq!(submission.record.hash, "abc123");
        assert_eq!(submission.record.signature_id, None);
        assert_eq!(submission.record.email_message_id, None);
    }

    #[test]
    fn test_validate_empty_required_field() {
        let mut req = request();
        req.timestamp = Some(String::new());
        assert!(matches!(validate(req), Err(AppError::BadRequest(m)) if m == MISSING_FIELDS));
    }

    #[test]
    fn test_validate_empty_optionals_become_none() {
        let mut req = request();
        req.client_email = Some(String::new());
        req.geo = Some(serde_json::Value::Null);
        req.profession = Some("Advogada".to_string());

        let record = validate(req).unwrap().record;
        assert_eq!(record.client_email, None);
        assert_eq!(record.geo, None);
        assert_eq!(record.profession.as_deref(), Some("Advogada"));
    }

    #[test]
    fn test_decode_pdf_lenient() {
        assert_eq!(decode_pdf("JVBERi0xLjQ").unwrap(), b"%PDF-1.4");
        assert_eq!(decode_pdf("JVBE\nRi0x\r\nLjQ=").unwrap(), b"%PDF-1.4");
        assert_eq!(
            decode_pdf("data:application/pdf;base64,JVBERi0xLjQ=").unwrap(),
            b"%PDF-1.4"
        );
        assert!(decode_pdf("!!!not base64!!!").is_err());
    }
}

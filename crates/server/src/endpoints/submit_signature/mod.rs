//! # POST /submit-signature
//!
//! 署名済みPDFを運用者と署名者にメール送信し、送信成功後にレコードを保存する。
//!
//! ## モジュール構成
//! - `handler`: メインハンドラ（入力検証・送信・保存）
//! - `message`: 通知メールの件名・本文・宛先

mod handler;
mod message;


pub use handler::handle_submit_signature;

/// 必須項目が欠落している場合のエラーメッセージ
pub(crate) const MISSING_FIELDS: &str = "Dados obrigatórios faltando.";
/// ボディがサイズ上限を超えた場合のエラーメッセージ
pub(crate) const PAYLOAD_TOO_LARGE: &str = "Documento excede o tamanho máximo permitido.";
/// 通知メールの送信元表示名
pub(crate) const SENDER_NAME: &str = "Assinatura Digital";
/// 添付ファイル名
pub(crate) const ATTACHMENT_NAME: &str = "documento_assinado.pdf";

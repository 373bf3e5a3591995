//! # Docsign 共有型定義
//!
//! 署名送信フォームとサーバー間、およびレコードファイル上で使われる
//! データ構造をRust構造体として提供する。
//!
//! ## 命名規則
//! - JSON上のフィールド名はフロントエンドが使用するポルトガル語名
//!   (`nomeCliente`, `dataHora` 等) をそのまま用いる。
//! - Rust側のフィールド名は英語名とし、`#[serde(rename)]` で対応付ける。

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// 署名レコード
// ---------------------------------------------------------------------------

/// 署名1件ごとに永続化されるレコード。
///
/// `hash` / `client_name` / `timestamp` は常に存在する。
/// その他の任意フィールドは未指定時に `null` として保存される。
/// 他のリビジョンが書き込んだ未知のキーは `extra` に保持され、再保存時にそのまま書き戻される。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureRecord {
    /// 呼び出し元が付与する署名ID（一意性は保証しない）
    #[serde(rename = "idAssinatura", default)]
    pub signature_id: Option<String>,
    /// 署名済みドキュメントのコンテンツハッシュ
    pub hash: String,
    /// 署名者名
    #[serde(rename = "nomeCliente")]
    pub client_name: String,
    /// 署名者のメールアドレス
    #[serde(rename = "emailCliente", default)]
    pub client_email: Option<String>,
    /// 呼び出し元が送信した署名日時（文字列のまま保持）
    #[serde(rename = "dataHora")]
    pub timestamp: String,
    /// サーバーが書き込み時に付与するRFC 3339形式のUTC時刻
    #[serde(rename = "criadoEm")]
    pub created_at: String,
    /// CPF番号
    #[serde(rename = "cpfCliente", default)]
    pub cpf: Option<String>,
    /// 身分証明書番号
    #[serde(rename = "docIdCliente", default)]
    pub identity_document: Option<String>,
    /// 住所
    #[serde(rename = "enderecoCliente", default)]
    pub address: Option<String>,
    /// 国籍
    #[serde(rename = "nacionalidade", default)]
    pub nationality: Option<String>,
    /// 婚姻状況
    #[serde(rename = "estadoCivil", default)]
    pub marital_status: Option<String>,
    /// 職業
    #[serde(rename = "profissao", default)]
    pub profession: Option<String>,
    /// 位置情報（フロントエンドが送った値をそのまま保持）
    #[serde(default)]
    pub geo: Option<serde_json::Value>,
    /// 送信メールのMessage-ID
    #[serde(rename = "messageIdEmail", default)]
    pub email_message_id: Option<String>,
    /// 既知フィールド以外のキー
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SignatureRecord {
    /// `key` が署名IDまたはコンテンツハッシュと一致するか。
    pub fn matches_key(&self, key: &str) -> bool {
        self.signature_id.as_deref() == Some(key) || self.hash == key
    }
}

/// ストアへの追記要求。`created_at` はストアが付与する。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewSignatureRecord {
    pub signature_id: Option<String>,
    pub hash: String,
    pub client_name: String,
    pub client_email: Option<String>,
    pub timestamp: String,
    pub cpf: Option<String>,
    pub identity_document: Option<String>,
    pub address: Option<String>,
    pub nationality: Option<String>,
    pub marital_status: Option<String>,
    pub profession: Option<String>,
    pub geo: Option<serde_json::Value>,
    pub email_message_id: Option<String>,
}

impl NewSignatureRecord {
    /// 作成時刻を付与してレコード化する。
    pub fn into_record(self, created_at: String) -> SignatureRecord {
        SignatureRecord {
            signature_id: self.signature_id,
            hash: self.hash,
            client_name: self.client_name,
            client_email: self.client_email,
            timestamp: self.timestamp,
            created_at,
            cpf: self.cpf,
            identity_document: self.identity_document,
            address: self.address,
            nationality: self.nationality,
            marital_status: self.marital_status,
            profession: self.profession,
            geo: self.geo,
            email_message_id: self.email_message_id,
            extra: serde_json::Map::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// POST /submit-signature
// ---------------------------------------------------------------------------

/// 署名送信リクエスト。
///
/// 必須項目 (`pdfBase64`, `nomeCliente`, `hash`, `dataHora`) も `Option` で受け、
/// 欠落の判定はハンドラ側で行う（400を返すため）。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitSignatureRequest {
    /// Base64エンコードされた署名済みPDF
    #[serde(rename = "pdfBase64", default)]
    pub pdf_base64: Option<String>,
    #[serde(rename = "nomeCliente", default)]
    pub client_name: Option<String>,
    #[serde(rename = "emailCliente", default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(rename = "dataHora", default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub geo: Option<serde_json::Value>,
    #[serde(rename = "cpfCliente", default)]
    pub cpf: Option<String>,
    #[serde(rename = "docIdCliente", default)]
    pub identity_document: Option<String>,
    #[serde(rename = "enderecoCliente", default)]
    pub address: Option<String>,
    #[serde(rename = "idAssinatura", default)]
    pub signature_id: Option<String>,
    #[serde(rename = "nacionalidade", default)]
    pub nationality: Option<String>,
    #[serde(rename = "estadoCivil", default)]
    pub marital_status: Option<String>,
    #[serde(rename = "profissao", default)]
    pub profession: Option<String>,
}

/// 署名送信成功レスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitSignatureResponse {
    /// 常に `true`
    pub ok: bool,
    /// 送信メールのMessage-ID
    #[serde(rename = "messageId")]
    pub message_id: String,
    /// 保存されたレコード
    #[serde(rename = "registroSalvo")]
    pub saved_record: SignatureRecord,
}

// ---------------------------------------------------------------------------
// GET /validate/{key}
// ---------------------------------------------------------------------------

/// 署名照会成功レスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub ok: bool,
    #[serde(rename = "registro")]
    pub record: SignatureRecord,
}

// ---------------------------------------------------------------------------
// エラーレスポンス
// ---------------------------------------------------------------------------

/// 送信系エンドポイントのエラーレスポンス (`{ok:false, error}`)。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

/// 照会系エンドポイントのエラーレスポンス (`{ok:false, mensagem}`)。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotFoundResponse {
    pub ok: bool,
    #[serde(rename = "mensagem")]
    pub message: String,
}

//! # 通知メール送信
//!
//! 送信トランスポートを抽象化するインターフェース。
//! SMTP実装は `smtp` サブモジュールを参照。

pub mod smtp;

pub use smtp::SmtpMailer;

/// 送信メールに添付するバイナリ。
#[derive(Debug, Clone)]
pub struct MailAttachment {
    /// 添付ファイル名
    pub filename: String,
    /// MIMEタイプ（例: `application/pdf`）
    pub content_type: String,
    /// 内容
    pub bytes: Vec<u8>,
}

/// 送信するメール1通。送信元アドレスはトランスポート側のアカウントを使う。
#[derive(Debug, Clone)]
pub struct OutgoingMail {
    /// 送信元の表示名
    pub from_name: String,
    /// 宛先アドレス一覧
    pub to: Vec<String>,
    pub subject: String,
    /// プレーンテキスト本文
    pub body: String,
    pub attachment: Option<MailAttachment>,
}

/// メール送信エラー。呼び出し元からは区別せずに扱われる。
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// アドレスの形式が不正
    #[error("不正なメールアドレス ({address}): {reason}")]
    InvalidAddress { address: String, reason: String },
    /// メッセージの組み立てに失敗
    #[error("メッセージの構築に失敗: {0}")]
    Build(String),
    /// SMTP送信に失敗（タイムアウト、認証失敗、ネットワークエラー等）
    #[error("SMTP送信に失敗: {0}")]
    Transport(String),
}

/// 通知メール送信の抽象インターフェース。
///
/// 再試行は行わない。トランスポートの失敗はそのまま返す。
#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    /// メールを送信し、付与したMessage-IDを返す。
    async fn send(&self, mail: OutgoingMail) -> Result<String, MailError>;
}

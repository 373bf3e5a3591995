//! # SMTP メール送信実装
//!
//! 起動時に一度だけ構成したSMTPトランスポート（認証情報付き、TLS必須）で送信する。

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{MailError, Mailer, OutgoingMail};
use crate::config::Config;

/// 暗黙的TLS（SMTPS）のポート
const SMTPS_PORT: u16 = 465;

/// SMTPによるメール送信実装。
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    /// 送信元アドレス（認証アカウント）
    sender: Address,
}

impl SmtpMailer {
    /// SMTPトランスポートを構築する。
    ///
    /// ポート465は暗黙的TLS、それ以外はSTARTTLS必須で接続する。
    pub fn new(host: &str, port: u16, username: &str, password: &str) -> Result<Self, MailError> {
        let sender = parse_address(username)?;

        let builder = if port == SMTPS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        }
        .map_err(|e| MailError::Transport(format!("SMTPトランスポートの構築に失敗: {e}")))?;

        let transport = builder
            .port(port)
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();

        Ok(Self { transport, sender })
    }

    /// 設定から構築する。
    pub fn from_config(config: &Config) -> Result<Self, MailError> {
        tracing::info!(
            smtp_host = %config.smtp_host,
            smtp_port = config.smtp_port,
            sender = %config.email_user,
            "SMTPトランスポートを設定"
        );
        Self::new(
            &config.smtp_host,
            config.smtp_port,
            &config.email_user,
            &config.email_pass,
        )
    }
}

#[async_trait::async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<String, MailError> {
        let message_id = new_message_id(&self.sender);
        let message = build_message(&self.sender, mail, &message_id)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(message_id)
    }
}

/// `<uuid@送信元ドメイン>` 形式のMessage-IDを生成する。
fn new_message_id(sender: &Address) -> String {
    format!("<{}@{}>", uuid::Uuid::new_v4(), sender.domain())
}

fn parse_address(address: &str) -> Result<Address, MailError> {
    address
        .trim()
        .parse()
        .map_err(|e: lettre::address::AddressError| MailError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

/// 送信メッセージを組み立てる。添付がある場合は multipart/mixed とする。
fn build_message(
    sender: &Address,
    mail: OutgoingMail,
    message_id: &str,
) -> Result<Message, MailError> {
    let mut builder = Message::builder()
        .from(Mailbox::new(Some(mail.from_name), sender.clone()))
        .subject(mail.subject)
        .message_id(Some(message_id.to_string()));
    for to in &mail.to {
        builder = builder.to(Mailbox::new(None, parse_address(to)?));
    }

    let text = SinglePart::plain(mail.body);
    let message = match mail.attachment {
        Some(attachment) => {
            let content_type = ContentType::parse(&attachment.content_type)
                .map_err(|e| MailError::Build(format!("不正なContent-Type: {e}")))?;
            let part = Attachment::new(attachment.filename).body(attachment.bytes, content_type);
            builder.multipart(MultiPart::mixed().singlepart(text).singlepart(part))
        }
        None => builder.singlepart(text),
    };

    message.map_err(|e| MailError::Build(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mailer::MailAttachment;

    fn sender() -> Address {
        "ops@example.com".parse().unwrap()
    }

    fn mail(to: Vec<&str>, attachment: Option<MailAttachment>) -> OutgoingMail {
        OutgoingMail {
            from_name: "Assinatura Digital".to_string(),
            to: to.into_iter().map(str::to_string).collect(),
            subject: "Documento assinado - Ana Silva".to_string(),
            body: "Documento assinado eletronicamente.".to_string(),
            attachment,
        }
    }

    #[test]
    fn test_message_id_uses_sender_domain() {
        let id = new_message_id(&sender());
        assert!(id.starts_with('<'));
        assert!(id.ends_with("@example.com>"));
        assert_ne!(id, new_message_id(&sender()));
    }

    /// 添付付きメッセージのヘッダと添付ファイル名を確認
    #[test]
    fn test_build_message_with_attachment() {
        let attachment = MailAttachment {
            filename: "documento_assinado.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: b"%PDF-1.4".to_vec(),
        };
        let message = build_message(
            &sender(),
            mail(vec!["ops@example.com", "ana@example.com"], Some(attachment)),
            "<fixed@example.com>",
        )
        .unwrap();

        let formatted = String::from_utf8_lossy(&message.formatted()).to_string();
        assert!(formatted.contains("Message-ID: <fixed@example.com>"));
        assert!(formatted.contains("ana@example.com"));
        assert!(formatted.contains("multipart/mixed"));
        assert!(formatted.contains("documento_assinado.pdf"));
        assert_eq!(message.envelope().to().len(), 2);
    }

    #[test]
    fn test_build_message_without_attachment() {
        let message = build_message(
            &sender(),
            mail(vec!["ops@example.com"], None),
            "<plain@example.com>",
        )
        .unwrap();

        let formatted = String::from_utf8_lossy(&message.formatted()).to_string();
        assert!(!formatted.contains("multipart/mixed"));
        assert_eq!(message.envelope().to().len(), 1);
    }

    #[test]
    fn test_invalid_recipient_is_rejected() {
        let result = build_message(&sender(), mail(vec!["not an address"], None), "<x@y>");
        assert!(matches!(result, Err(MailError::InvalidAddress { .. })));
    }

    #[test]
    fn test_invalid_account_is_rejected() {
        assert!(matches!(
            SmtpMailer::new("smtp.example.com", 465, "no-at-sign", "pw"),
            Err(MailError::InvalidAddress { .. })
        ));
    }
}

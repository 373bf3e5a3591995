//! # サーバー設定・共有状態
//!
//! 環境変数からの設定読み込みとサーバーの共有状態の定義。

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use crate::mailer::Mailer;
use crate::store::RecordStore;

/// `EMAIL_USER` 未設定時のプレースホルダ。実運用では必ず環境変数で上書きする。
const PLACEHOLDER_EMAIL_USER: &str = "seu-email-aqui@gmail.com";
/// `EMAIL_PASS` 未設定時のプレースホルダ。
const PLACEHOLDER_EMAIL_PASS: &str = "sua-senha-de-app-aqui";

/// リクエストボディの上限（15 MiB）
pub const MAX_BODY_BYTES: usize = 15 * 1024 * 1024;

/// 起動時に一度だけ読み込まれる設定。
#[derive(Debug, Clone)]
pub struct Config {
    /// 送信元アカウント（運用者宛先を兼ねる）
    pub email_user: String,
    /// 送信元アカウントのパスワード（アプリパスワード）
    pub email_pass: String,
    /// SMTPサーバーのホスト名
    pub smtp_host: String,
    /// SMTPサーバーのポート（暗黙的TLS）
    pub smtp_port: u16,
    /// 署名レコードを保存するJSONファイル
    pub records_path: PathBuf,
    /// 静的HTMLページのディレクトリ
    pub pages_dir: PathBuf,
    /// 待ち受けポート
    pub port: u16,
}

impl Config {
    /// 環境変数から構築する。
    ///
    /// 数値として解釈できないポート指定は起動エラーとする。
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のキー参照関数から構築する。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let email_user = lookup("EMAIL_USER").unwrap_or_else(|| {
            tracing::warn!("EMAIL_USERが未設定です。プレースホルダを使用します（開発環境用）");
            PLACEHOLDER_EMAIL_USER.to_string()
        });
        let email_pass = lookup("EMAIL_PASS").unwrap_or_else(|| {
            tracing::warn!("EMAIL_PASSが未設定です。プレースホルダを使用します（開発環境用）");
            PLACEHOLDER_EMAIL_PASS.to_string()
        });

        let smtp_host = lookup("SMTP_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string());
        let smtp_port = parse_port(lookup("SMTP_PORT"), "SMTP_PORT", 465)?;
        let port = parse_port(lookup("PORT"), "PORT", 3000)?;

        let records_path = lookup("RECORDS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("assinaturas.json"));
        let pages_dir = lookup("PAGES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            email_user,
            email_pass,
            smtp_host,
            smtp_port,
            records_path,
            pages_dir,
            port,
        })
    }
}

fn parse_port(value: Option<String>, name: &str, default: u16) -> anyhow::Result<u16> {
    match value {
        Some(v) => v
            .trim()
            .parse()
            .with_context(|| format!("{name}はポート番号である必要があります: {v}")),
        None => Ok(default),
    }
}

/// サーバーの共有状態。
pub struct AppState {
    /// 運用者のメールアドレス。全ての通知の宛先に含まれる。
    pub operator_address: String,
    /// メール送信（トレイトで抽象化）
    pub mailer: Box<dyn Mailer>,
    /// 署名レコードストア（ブロッキングプールへ渡すため `Arc`）
    pub store: Arc<dyn RecordStore>,
    /// 静的HTMLページのディレクトリ
    pub pages_dir: PathBuf,
}

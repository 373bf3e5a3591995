//! # エンドポイントテスト用共通ヘルパー
//!
//! 送信内容を記録するモックMailerと、一時ディレクトリ上のストアを持つ共有状態。

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::config::AppState;
use crate::mailer::{MailError, Mailer, OutgoingMail};
use crate::store::JsonFileStore;

/// テストで使う運用者アドレス
pub const OPERATOR: &str = "ops@example.com";

/// 送信したメールを記録するモックMailer。
/// `fail` が真の場合は送信せずトランスポートエラーを返す。
pub struct RecordingMailer {
    pub sent: Arc<Mutex<Vec<OutgoingMail>>>,
    pub fail: bool,
}

#[async_trait::async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<String, MailError> {
        if self.fail {
            return Err(MailError::Transport("connection timed out".to_string()));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(mail);
        Ok(format!("<test-{}@example.com>", sent.len()))
    }
}

/// テスト用AppStateを構築するヘルパー。送信記録への参照も返す。
pub fn test_state(dir: &Path, fail: bool) -> (Arc<AppState>, Arc<Mutex<Vec<OutgoingMail>>>) {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let state = Arc::new(AppState {
        operator_address: OPERATOR.to_string(),
        mailer: Box::new(RecordingMailer {
            sent: Arc::clone(&sent),
            fail,
        }),
        store: Arc::new(JsonFileStore::new(dir.join("assinaturas.json"))),
        pages_dir: dir.to_path_buf(),
    });
    (state, sent)
}

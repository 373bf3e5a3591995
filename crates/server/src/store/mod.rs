//! # 署名レコードストア
//!
//! 署名レコードの永続化を抽象化するインターフェース。
//! JSONファイル実装は `json_file` サブモジュールを参照。
//!
//! 追記は常にコレクション全体の読み込み→追加→全体書き戻しで行う。
//! 並行リクエスト間のロックは行わない（後勝ち）。
//!
//! 保存単位はJSON値のまま扱う。`SignatureRecord` として解釈できない
//! エントリ（他リビジョンが書き込んだ型の異なるレコード等）も、
//! 照会からは除外されるが追記時にそのまま書き戻される。

pub mod json_file;

pub use json_file::JsonFileStore;

use docsign_types::{NewSignatureRecord, SignatureRecord};
use serde_json::Value;

/// ストアの下位層エラー。
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// ファイルI/Oに失敗
    #[error("レコードファイルのI/Oに失敗: {0}")]
    Io(#[from] std::io::Error),
    /// JSONのシリアライズ・パースに失敗
    #[error("レコードのJSON変換に失敗: {0}")]
    Json(#[from] serde_json::Error),
}

/// 署名レコードストアの抽象インターフェース。
///
/// 全操作は同期I/Oで行う。非同期ハンドラからは `spawn_blocking` 経由で呼び出す。
pub trait RecordStore: Send + Sync {
    /// 全エントリを挿入順のJSON値で返す。
    ///
    /// 読み込みに失敗した場合はエラーをログに記録し、空のコレクションを返す。
    fn load_entries(&self) -> Vec<Value>;

    /// 全エントリを書き戻す。失敗はログに記録し、呼び出し元には伝播しない。
    fn save_entries(&self, entries: &[Value]);

    /// `SignatureRecord` として解釈できる全レコードを挿入順で返す。
    fn load(&self) -> Vec<SignatureRecord> {
        self.load_entries()
            .into_iter()
            .filter_map(|entry| to_record(entry).ok())
            .collect()
    }

    /// コレクション全体をレコードで置き換える。
    fn save(&self, records: &[SignatureRecord]) {
        match records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(entries) => self.save_entries(&entries),
            Err(e) => tracing::error!(error = %e, "レコードのシリアライズに失敗"),
        }
    }

    /// 作成時刻を付与してレコードを末尾に追加し、追加したレコードを返す。
    ///
    /// 既存エントリは解釈できないものも含めてそのまま保持する。
    fn append(&self, new: NewSignatureRecord) -> Result<SignatureRecord, StoreError> {
        let mut entries = self.load_entries();
        let record = new.into_record(now_rfc3339());
        entries.push(serde_json::to_value(&record)?);
        self.save_entries(&entries);
        Ok(record)
    }

    /// 署名IDまたはハッシュが `key` と一致する最初のレコードを返す。
    fn find(&self, key: &str) -> Option<SignatureRecord> {
        self.load_entries()
            .into_iter()
            .filter_map(|entry| to_record(entry).ok())
            .find(|r| r.matches_key(key))
    }
}

/// JSON値を `SignatureRecord` に変換する。型が合わないエントリはログに残す。
fn to_record(entry: Value) -> Result<SignatureRecord, serde_json::Error> {
    serde_json::from_value(entry).inspect_err(|e| {
        tracing::warn!(error = %e, "SignatureRecordとして解釈できないエントリをスキップ");
    })
}

/// 現在時刻をミリ秒精度のRFC 3339 (UTC, `Z` 表記) で返す。
pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

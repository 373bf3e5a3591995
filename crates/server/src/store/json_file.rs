//! # JSONファイル レコードストア
//!
//! 単一のJSONファイル（レコードの配列）を唯一の正とするストア実装。
//! 読み書きのたびにファイルを開き直し、メモリ上のキャッシュは持たない。

use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{RecordStore, StoreError};

/// 単一JSONファイルによるレコードストア。
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// 新しいJsonFileStoreを作成する。ファイルは初回読み込み時に作成される。
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// バックエンドのファイルパス
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ファイルを読み込む。存在しない場合は空配列で初期化する。
    ///
    /// 各エントリは型を問わずJSON値として読み込む。配列として解釈できない場合のみエラー。
    fn read_entries(&self) -> Result<Vec<Value>, StoreError> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "レコードファイルが存在しないため初期化します");
            self.write_entries(&[])?;
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// コレクション全体を整形済みJSON（2スペースインデント）で上書きする。
    fn write_entries(&self, entries: &[Value]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn load_entries(&self) -> Vec<Value> {
        match self.read_entries() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "レコードの読み込みに失敗。空のコレクションとして扱います"
                );
                Vec::new()
            }
        }
    }

    fn save_entries(&self, entries: &[Value]) {
        if let Err(e) = self.write_entries(entries) {
            tracing::error!(
                path = %self.path.display(),
                error = %e,
                count = entries.len(),
                "レコードの保存に失敗"
            );
        }
    }
}

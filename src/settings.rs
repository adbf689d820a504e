//! Settings Module
//!
//! 実行をまたいで保存される設定を管理するモジュール。
//! JSON形式で`~/.config/reviewdoc/settings.json`に永続化されます。
//!
//! レポート生成パスは設定を実行開始時に一度だけ読み取り、実行中は
//! 再読み込みしません（読み取り専用スナップショット）。設定を変更するのは
//! `set-period` / `set-folder`の設定アクションのみです。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ReportError;

/// 永続化される設定
///
/// 4つの文字列値の設定を保持します。いずれも未設定（None）でありえます。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// データソース（レビューが入力されたワークブック）のパス
    pub source: Option<String>,

    /// 出力先フォルダのパス
    pub destination: Option<String>,

    /// レポート対象の年（例: "2024"）
    pub target_year: Option<String>,

    /// レポート対象の月（例: "6"）
    pub target_month: Option<String>,
}

impl Settings {
    /// デフォルトの設定ファイルパスを返す
    ///
    /// ユーザー設定ディレクトリが解決できない環境ではカレントディレクトリ
    /// 直下のファイル名にフォールバックします。
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("reviewdoc").join("settings.json"))
            .unwrap_or_else(|| PathBuf::from("reviewdoc-settings.json"))
    }

    /// 設定ファイルを読み込む
    ///
    /// ファイルが存在しない場合はデフォルト（すべて未設定）を返します。
    /// 存在するが読めない・JSONとして不正な場合はエラーです。
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&raw)?;
        Ok(settings)
    }

    /// 設定ファイルに保存する
    ///
    /// 親ディレクトリが存在しない場合は作成します。
    pub fn save(&self, path: &Path) -> Result<(), ReportError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw)?;
        Ok(())
    }
}

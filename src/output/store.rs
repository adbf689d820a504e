//! Folder Store
//!
//! レポートドキュメントの配置先（出力先フォルダ）を提供するモジュール。
//! 期間名のサブフォルダを冪等に検索・作成し、レンダリング済みの
//! ドキュメントをその中に書き出します。

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::api::ReportFormat;
use crate::document::ReportDocument;
use crate::error::ReportError;
use crate::output::DocumentRenderer;
use crate::period::TargetPeriod;

/// 作成されたレポートの所在
///
/// ユーザーへの完了報告に使用されます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHandle {
    /// ドキュメントタイトル
    pub title: String,

    /// 書き出されたファイルのパス
    pub path: PathBuf,
}

/// 出力先フォルダストア
///
/// 設定された出力先フォルダ配下へのドキュメント配置を担当します。
/// ルートフォルダ自体は事前に存在しなければなりません（存在しない場合は
/// `Lookup`エラーで、実行は出力なしで中断されます）。
#[derive(Debug, Clone)]
pub struct FolderStore {
    /// 出力先のルートフォルダ
    root: PathBuf,
}

impl FolderStore {
    /// 出力先フォルダを開く
    ///
    /// # 発生し得るエラー
    ///
    /// * `ReportError::Lookup`: パスが存在しない、またはディレクトリでない場合
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ReportError> {
        let root = root.into();

        if !root.is_dir() {
            return Err(ReportError::Lookup {
                resource: root.display().to_string(),
                message: "指定されたフォルダが見つかりません".to_string(),
            });
        }

        Ok(Self { root })
    }

    /// ルートフォルダのパスを返す
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// ドキュメントをレンダリングして期間サブフォルダに配置する
    ///
    /// サブフォルダは期間の表示ラベル（例: `2024年6月`）を正確な名前として
    /// 検索され、既存のものがあれば再利用、なければ一度だけ作成されます。
    /// 同時実行の検索・作成競合は対象外です（手動起動で実質直列のため）。
    ///
    /// # 戻り値
    ///
    /// * `Ok(ReportHandle)` - 書き出されたドキュメントの所在
    /// * `Err(ReportError::Assembly)` - フォルダ作成またはファイル書き込みに
    ///   失敗した場合
    pub fn place(
        &self,
        document: &ReportDocument,
        period: &TargetPeriod,
        format: ReportFormat,
    ) -> Result<ReportHandle, ReportError> {
        let subfolder = self.root.join(period.label());

        if subfolder.is_dir() {
            debug!(path = %subfolder.display(), "既存の期間フォルダを再利用します");
        } else {
            fs::create_dir(&subfolder).map_err(|e| {
                ReportError::Assembly(format!(
                    "期間フォルダを作成できません ({}): {}",
                    subfolder.display(),
                    e
                ))
            })?;
        }

        let file_name = format!("{}.{}", document.title, format.extension());
        let path = subfolder.join(file_name);

        let renderer = DocumentRenderer::from_format(format);
        let mut buffer = Vec::new();
        renderer.render(document, &mut buffer)?;

        fs::write(&path, buffer).map_err(|e| {
            ReportError::Assembly(format!(
                "ドキュメントを書き出せません ({}): {}",
                path.display(),
                e
            ))
        })?;

        info!(path = %path.display(), "ドキュメントを作成しました");

        Ok(ReportHandle {
            title: document.title.clone(),
            path,
        })
    }
}

//! Output Module
//!
//! Strategy Patternによる出力形式の抽象化と、レポートの配置先
//! （フォルダストア）を提供するモジュール。

mod renderers;
mod store;

use std::io::Write;

use crate::api::ReportFormat;
use crate::document::ReportDocument;
use crate::error::ReportError;

pub use renderers::{HtmlRenderer, MarkdownRenderer};
pub use store::{FolderStore, ReportHandle};

/// ドキュメントレンダラー（Strategy Pattern）
///
/// 各出力形式（Markdown, HTML）をenumとして表現します。
/// ブロックツリーの走査と出力先への書き出しのみを担当し、
/// 内容の組み立てには関与しません。
#[derive(Debug, Clone, Copy)]
pub enum DocumentRenderer {
    Markdown,
    Html,
}

impl DocumentRenderer {
    /// 出力形式からレンダラーを生成
    pub fn from_format(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Markdown => DocumentRenderer::Markdown,
            ReportFormat::Html => DocumentRenderer::Html,
        }
    }

    /// ドキュメントを指定された形式で出力する
    ///
    /// # 引数
    ///
    /// * `document` - 組み立て済みのレポートドキュメント
    /// * `writer` - 出力先のライター
    pub fn render<W: Write>(
        &self,
        document: &ReportDocument,
        writer: &mut W,
    ) -> Result<(), ReportError> {
        match self {
            DocumentRenderer::Markdown => MarkdownRenderer.render(document, writer),
            DocumentRenderer::Html => HtmlRenderer.render(document, writer),
        }
    }

    /// ドキュメントを文字列にレンダリングする
    pub fn render_to_string(&self, document: &ReportDocument) -> Result<String, ReportError> {
        let mut buffer = Vec::new();
        self.render(document, &mut buffer)?;

        String::from_utf8(buffer).map_err(|e| {
            ReportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }
}

//! Output Renderers Implementation
//!
//! 各出力形式のレンダリング実装を提供するモジュール。

use std::io::Write;

use crate::document::{Block, ReportDocument};
use crate::error::ReportError;

/// 改ページを表すHTMLブロック
///
/// ページ付きメディア（印刷・PDF化）で実際の改ページとして解釈されます。
const PAGE_BREAK_DIV: &str = r#"<div style="page-break-before: always;"></div>"#;

/// Markdown形式のレンダラー
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    /// ドキュメントツリーをMarkdownとして出力する
    ///
    /// フォント指定はMarkdownでは表現できないため、先頭のコメントとして
    /// 保持します。各段落は1行として出力され、改ページはHTMLブロックで
    /// 表現されます。
    pub fn render<W: Write>(
        &self,
        document: &ReportDocument,
        writer: &mut W,
    ) -> Result<(), ReportError> {
        writeln!(
            writer,
            "<!-- font-family: {}; heading: {}pt; body: {}pt -->",
            document.font.family, document.font.heading_size, document.font.body_size
        )?;
        writeln!(writer)?;

        for block in &document.blocks {
            match block {
                Block::Heading1(text) => {
                    writeln!(writer, "# {}", text)?;
                    writeln!(writer)?;
                }
                Block::Heading2(text) => {
                    writeln!(writer, "## {}", text)?;
                    writeln!(writer)?;
                }
                Block::Paragraph(text) => writeln!(writer, "{}", text)?,
                Block::Divider => writeln!(writer, "---")?,
                Block::PageBreak => {
                    writeln!(writer)?;
                    writeln!(writer, "{}", PAGE_BREAK_DIV)?;
                    writeln!(writer)?;
                }
            }
        }

        writer.flush()?;
        Ok(())
    }
}

/// HTML形式のレンダラー
pub struct HtmlRenderer;

impl HtmlRenderer {
    /// ドキュメントツリーをHTMLとして出力する
    ///
    /// フォントファミリーは`<body>`に、サイズは見出し・本文の各ブロックに
    /// インラインスタイルとして適用されます。ファミリーはドキュメント全体で
    /// 単一です。
    pub fn render<W: Write>(
        &self,
        document: &ReportDocument,
        writer: &mut W,
    ) -> Result<(), ReportError> {
        let font = &document.font;

        writeln!(writer, "<!DOCTYPE html>")?;
        writeln!(writer, "<html>")?;
        writeln!(writer, "<head>")?;
        writeln!(writer, "<meta charset=\"utf-8\">")?;
        writeln!(writer, "<title>{}</title>", escape_html(&document.title))?;
        writeln!(writer, "</head>")?;
        writeln!(
            writer,
            "<body style=\"font-family: '{}'; font-size: {}pt;\">",
            font.family, font.body_size
        )?;

        for block in &document.blocks {
            match block {
                Block::Heading1(text) => writeln!(
                    writer,
                    "<h1 style=\"font-size: {}pt; text-align: center;\">{}</h1>",
                    font.heading_size,
                    escape_html(text)
                )?,
                Block::Heading2(text) => writeln!(
                    writer,
                    "<h2 style=\"font-size: {}pt;\">{}</h2>",
                    font.heading_size,
                    escape_html(text)
                )?,
                Block::Paragraph(text) => {
                    if text.is_empty() {
                        writeln!(writer, "<p>&nbsp;</p>")?;
                    } else {
                        writeln!(writer, "<p>{}</p>", escape_html(text))?;
                    }
                }
                Block::Divider => writeln!(writer, "<hr>")?,
                Block::PageBreak => writeln!(writer, "{}", PAGE_BREAK_DIV)?,
            }
        }

        writeln!(writer, "</body>")?;
        writeln!(writer, "</html>")?;
        writer.flush()?;
        Ok(())
    }
}

/// HTML特殊文字をエスケープ
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

//! Document Module
//!
//! レポートドキュメントの中間表現（不変のブロックツリー）を定義する
//! モジュール。内容の組み立てと出力先バックエンドへのレンダリングを
//! 分離し、内容ロジックをバックエンドなしで検証可能にします。

use crate::period::TargetPeriod;
use crate::types::ShopSection;

/// ドキュメントを構成するブロック
///
/// レンダラーはこの列を順に走査して出力します。
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// 見出しレベル1（ドキュメントタイトル）
    Heading1(String),

    /// 見出しレベル2（店舗名）
    Heading2(String),

    /// 本文ブロック（空文字列は空行として出力される）
    Paragraph(String),

    /// エントリ間の区切り線
    Divider,

    /// 改ページ
    ///
    /// セクションの間にのみ現れる。先頭・末尾には決して現れない。
    PageBreak,
}

/// ドキュメント全体のフォント指定
///
/// ファミリーはドキュメント全体で単一。見出しと本文はサイズのみ異なります。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    /// フォントファミリー
    pub family: String,

    /// 見出しブロックのサイズ（pt）
    pub heading_size: u8,

    /// 本文ブロックのサイズ（pt）
    pub body_size: u8,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Noto Sans".to_string(),
            heading_size: 16,
            body_size: 12,
        }
    }
}

/// 組み立て済みのレポートドキュメント
///
/// タイトル・フォント指定・ブロック列を保持する不変の中間表現。
/// セクションは元のシート順のまま現れ、隣接するセクションの間には
/// ちょうど1つの改ページが入ります。
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    /// ドキュメントタイトル（例: `【2024年6月】全店舗口コミレポート`）
    pub title: String,

    /// フォント指定
    pub font: FontSpec,

    /// ブロック列
    pub blocks: Vec<Block>,
}

impl ReportDocument {
    /// 期間の表示ラベルからドキュメントタイトルを組み立てる
    pub fn title_for(period: &TargetPeriod) -> String {
        format!("【{}】全店舗口コミレポート", period.label())
    }

    /// セクション列からドキュメントを組み立てる
    ///
    /// # 戻り値
    ///
    /// * `Some(ReportDocument)` - セクションが1つ以上ある場合
    /// * `None` - セクションが0の場合。ドキュメントは作成されず、
    ///   呼び出し側は「対象期間のデータなし」として扱う（エラーではない）
    pub fn compose(
        period: &TargetPeriod,
        sections: &[ShopSection],
        font: FontSpec,
    ) -> Option<Self> {
        if sections.is_empty() {
            return None;
        }

        let title = Self::title_for(period);
        let mut blocks = vec![Block::Heading1(title.clone())];

        for (idx, section) in sections.iter().enumerate() {
            if idx > 0 {
                blocks.push(Block::PageBreak);
            }

            blocks.push(Block::Heading2(format!(
                "【{}】口コミデータ",
                section.shop_name
            )));
            blocks.push(Block::Divider);

            for (entry_idx, entry) in section.entries.iter().enumerate() {
                if entry_idx > 0 {
                    blocks.push(Block::Paragraph(String::new()));
                    blocks.push(Block::Divider);
                }

                blocks.push(Block::Paragraph(entry.display_date.clone()));
                blocks.push(Block::Paragraph(entry.star_display.clone()));

                if !entry.author.is_empty() {
                    blocks.push(Block::Paragraph(format!("投稿者: {}", entry.author)));
                }

                blocks.push(Block::Paragraph(String::new()));
                blocks.push(Block::Paragraph(entry.content.clone()));
            }
        }

        Some(Self {
            title,
            font,
            blocks,
        })
    }
}

//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// 対象年月が未設定の場合のフォールバック方式
///
/// 保存された設定に有効な対象年月がない場合、どの月をレポート対象と
/// するかを指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum PeriodFallback {
    /// 実行時点の当月を対象とする（デフォルト）
    ///
    /// 例: 2024年6月15日に実行した場合、対象は2024年6月。
    #[default]
    CurrentMonth,

    /// 実行時点の前月を対象とする
    ///
    /// 月初に前月分のレポートをまとめる運用向け。
    /// 例: 2024年6月1日に実行した場合、対象は2024年5月。
    /// 1月に実行した場合は前年12月に正しく繰り下がります。
    PreviousMonth,
}

/// レポートドキュメントの出力形式
///
/// 組み立てたドキュメントツリーをどの形式でレンダリングするかを指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum ReportFormat {
    /// Markdown形式（デフォルト）
    ///
    /// 見出しは`#`/`##`、改ページは`page-break-before`スタイル付きの
    /// divブロックとして出力します。フォント指定はフロントマターの
    /// コメントとして保持されます。
    ///
    /// # 出力例
    ///
    /// ```markdown
    /// # 【2024年6月】全店舗口コミレポート
    ///
    /// ## 【渋谷店】口コミデータ
    /// ```
    #[default]
    Markdown,

    /// HTML形式
    ///
    /// 見出しは`<h1>`/`<h2>`、フォントファミリー・サイズはインライン
    /// スタイルとして全ブロックに適用されます。改ページはCSSの
    /// `page-break-before`で表現されます。
    Html,
}

impl ReportFormat {
    /// 出力ファイルの拡張子を返す
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Markdown => "md",
            ReportFormat::Html => "html",
        }
    }
}

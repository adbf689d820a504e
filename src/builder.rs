//! Builder Module
//!
//! Fluent Builder APIを提供し、`ReportGenerator`インスタンスを段階的に
//! 構築する。

use std::io::{Read, Seek};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::api::{PeriodFallback, ReportFormat};
use crate::document::{FontSpec, ReportDocument};
use crate::error::ReportError;
use crate::extract::build_section;
use crate::output::{FolderStore, ReportHandle};
use crate::parser::WorkbookParser;
use crate::period::TargetPeriod;
use crate::settings::Settings;
use crate::types::ShopSection;

/// レポート生成の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct GenerationConfig {
    /// 明示的に指定された対象年月（未検証の生値）
    pub period: Option<(i32, u32)>,

    /// 対象年月が未設定の場合のフォールバック方式
    pub fallback: PeriodFallback,

    /// 出力形式
    pub format: ReportFormat,

    /// フォント指定
    pub font: FontSpec,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            period: None,
            fallback: PeriodFallback::CurrentMonth,
            format: ReportFormat::Markdown,
            font: FontSpec::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `ReportGenerator`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみを
/// オーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use reviewdoc::{PeriodFallback, ReportBuilder, ReportFormat};
///
/// # fn main() -> Result<(), reviewdoc::ReportError> {
/// let generator = ReportBuilder::new()
///     .with_period(2024, 6)
///     .with_format(ReportFormat::Markdown)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ReportBuilder {
    /// 内部設定（構築中）
    config: GenerationConfig,
}

impl ReportBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 対象年月: 保存された設定、なければ実行時点の当月
    /// - 出力形式: Markdown
    /// - フォント: Noto Sans（見出し16pt、本文12pt）
    pub fn new() -> Self {
        Self {
            config: GenerationConfig::default(),
        }
    }

    /// 対象年月を明示的に指定する
    ///
    /// 指定した場合、保存された設定とフォールバックの両方より優先されます。
    /// 範囲の検証は`build()`時に行われます。
    pub fn with_period(mut self, year: i32, month: u32) -> Self {
        self.config.period = Some((year, month));
        self
    }

    /// 対象年月が未設定の場合のフォールバック方式を指定する
    pub fn with_fallback(mut self, fallback: PeriodFallback) -> Self {
        self.config.fallback = fallback;
        self
    }

    /// 出力形式を指定する
    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.config.format = format;
        self
    }

    /// フォント指定をオーバーライドする
    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.config.font = font;
        self
    }

    /// 設定を検証し、`ReportGenerator`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `ReportError::Config`: 明示指定された年月が範囲外、または
    ///   フォントファミリーが空の場合
    pub fn build(self) -> Result<ReportGenerator, ReportError> {
        // 1. 明示指定された対象年月の検証
        if let Some((year, month)) = self.config.period {
            TargetPeriod::new(year, month)?;
        }

        // 2. フォント指定の検証
        if self.config.font.family.trim().is_empty() {
            return Err(ReportError::Config(
                "フォントファミリーが指定されていません".to_string(),
            ));
        }

        Ok(ReportGenerator::new(self.config))
    }
}

/// 1回の実行の結果
///
/// 「対象期間のデータなし」はエラーではなく、期待される空結果の状態として
/// エラーと区別されます。
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// レポートが作成された
    Created(ReportHandle),

    /// 対象期間に一致するデータが1件もなかった（ドキュメントは作成されない）
    NoData(TargetPeriod),
}

/// レポート生成処理のファサード
///
/// ワークブックからレビューを抽出し、レポートドキュメントを組み立てて
/// 出力先に配置するメインエントリーポイントです。
///
/// # 処理フロー
///
/// 1. 対象年月の解決（明示指定 → 保存された設定 → フォールバック）
/// 2. 各シートについて処理（ループ、シート順、シート単位でエラー隔離）
///    - データ行の読み取り
///    - 期間フィルタと表示用エントリへの変換
///    - セクションの構築（空なら生成しない）
/// 3. ドキュメントツリーの組み立て
/// 4. レンダリングと出力先への配置
#[derive(Debug)]
pub struct ReportGenerator {
    /// 生成設定
    config: GenerationConfig,
}

impl ReportGenerator {
    pub(crate) fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    /// 対象年月を解決する
    ///
    /// ビルダーで明示指定された年月（`build()`で検証済み）が最優先。
    /// なければ保存された設定とフォールバック方式から解決します。
    pub fn resolve_period(&self, settings: &Settings, today: NaiveDate) -> TargetPeriod {
        if let Some((year, month)) = self.config.period {
            // build()で検証済みのため失敗しない
            if let Ok(period) = TargetPeriod::new(year, month) {
                return period;
            }
        }

        TargetPeriod::resolve(settings, self.config.fallback, today)
    }

    /// ワークブックからレポートドキュメントを組み立てる
    ///
    /// シート単位の失敗は捕捉してログに残し、該当シートをスキップして
    /// 処理を継続します。
    ///
    /// # 戻り値
    ///
    /// * `Ok(Some(ReportDocument))` - 1店舗以上のデータがあった場合
    /// * `Ok(None)` - 対象期間のデータが1件もなかった場合
    /// * `Err(ReportError)` - ワークブック自体が開けない場合
    pub fn compose<R: Read + Seek>(
        &self,
        input: R,
        period: &TargetPeriod,
    ) -> Result<Option<ReportDocument>, ReportError> {
        let mut parser = WorkbookParser::open(input)?;
        let sheet_names = parser.sheet_names();

        let mut sections: Vec<ShopSection> = Vec::new();
        for sheet_name in &sheet_names {
            match self.process_sheet(&mut parser, sheet_name, period) {
                Ok(Some(section)) => {
                    info!(
                        sheet = %sheet_name,
                        entries = section.entries.len(),
                        "対象月の口コミを抽出しました"
                    );
                    sections.push(section);
                }
                Ok(None) => {
                    info!(
                        sheet = %sheet_name,
                        period = %period.label(),
                        "対象月の口コミデータがありません。スキップします"
                    );
                }
                Err(e) => {
                    // シート単位で隔離し、残りのシートの処理を継続する
                    warn!(error = %e, "シートの処理に失敗したためスキップします");
                }
            }
        }

        Ok(ReportDocument::compose(
            period,
            &sections,
            self.config.font.clone(),
        ))
    }

    /// 1シートを処理してセクションを構築する（内部ヘルパーメソッド）
    fn process_sheet(
        &self,
        parser: &mut WorkbookParser,
        sheet_name: &str,
        period: &TargetPeriod,
    ) -> Result<Option<ShopSection>, ReportError> {
        let rows = parser
            .read_rows(sheet_name)
            .map_err(|e| ReportError::Sheet {
                sheet: sheet_name.to_string(),
                message: e.to_string(),
            })?;

        Ok(build_section(sheet_name, &rows, period))
    }

    /// レポートを生成して出力先に配置する
    ///
    /// # 戻り値
    ///
    /// * `Ok(RunOutcome::Created)` - レポートが作成された場合（所在を含む）
    /// * `Ok(RunOutcome::NoData)` - 対象期間のデータがなかった場合
    /// * `Err(ReportError)` - ワークブックが開けない、または配置に失敗した場合
    pub fn generate<R: Read + Seek>(
        &self,
        input: R,
        period: &TargetPeriod,
        store: &FolderStore,
    ) -> Result<RunOutcome, ReportError> {
        match self.compose(input, period)? {
            Some(document) => {
                let handle = store.place(&document, period, self.config.format)?;
                info!(
                    title = %handle.title,
                    path = %handle.path.display(),
                    "レポートを生成しました"
                );
                Ok(RunOutcome::Created(handle))
            }
            None => {
                info!(period = %period.label(), "対象期間のデータが見つかりませんでした");
                Ok(RunOutcome::NoData(*period))
            }
        }
    }

    /// レポートを文字列にレンダリングする（配置なし）
    ///
    /// # 戻り値
    ///
    /// * `Ok(Some(String))` - レンダリング済みドキュメント
    /// * `Ok(None)` - 対象期間のデータがなかった場合
    pub fn generate_to_string<R: Read + Seek>(
        &self,
        input: R,
        period: &TargetPeriod,
    ) -> Result<Option<String>, ReportError> {
        use crate::output::DocumentRenderer;

        match self.compose(input, period)? {
            Some(document) => {
                let renderer = DocumentRenderer::from_format(self.config.format);
                Ok(Some(renderer.render_to_string(&document)?))
            }
            None => Ok(None),
        }
    }
}

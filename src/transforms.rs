//! Transforms Module
//!
//! データソースに対する2つの補助変換を提供するモジュール。
//!
//! - 機械翻訳されたレビュー本文から原文を抽出する変換
//! - 日付列のタイムゾーン表現をUTCからJSTに正規化する変換
//!
//! どちらの変換も元のワークブックを直接書き換えず、変換結果を
//! 新しいワークブックとして書き出します。

use std::io::{Read, Seek};
use std::path::Path;

use calamine::{Data, Range};
use chrono::{Duration, NaiveDateTime};
use rust_xlsxwriter::{Format, Workbook};
use tracing::{info, warn};

use crate::error::ReportError;
use crate::parser::WorkbookParser;

/// 原文を示すマーカー
const ORIGINAL_MARKER: &str = "(Original)";

/// 機械翻訳文を示すマーカー
const TRANSLATED_MARKER: &str = "(Translated by Google)";

/// JSTのUTCからのオフセット（時間）
const JST_OFFSET_HOURS: i64 = 9;

/// 機械翻訳されたレビュー本文から原文を抽出する
///
/// # 抽出規則（優先順）
///
/// 1. `(Original)`マーカーがあれば、その後ろの文章を抽出する
/// 2. なければ、`(Translated by Google)`マーカーの前の文章を抽出する
/// 3. どちらのマーカーもなければ、既に原文のみと見なして前後の空白のみ除去
pub fn extract_original_text(text: &str) -> String {
    if let Some(idx) = text.find(ORIGINAL_MARKER) {
        return text[idx + ORIGINAL_MARKER.len()..].trim().to_string();
    }

    if let Some(idx) = text.find(TRANSLATED_MARKER) {
        return text[..idx].trim().to_string();
    }

    text.trim().to_string()
}

/// UTC日時をJST日時に変換する
pub fn to_jst(utc: NaiveDateTime) -> NaiveDateTime {
    utc + Duration::hours(JST_OFFSET_HOURS)
}

/// 書き出し用のセル値
///
/// calamineのセル値を書き出し可能な形に一度だけ変換したもの。
#[derive(Debug, Clone, PartialEq)]
enum OutCell {
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Empty,
}

impl OutCell {
    fn from_data(data: &Data) -> Self {
        match data {
            Data::Int(i) => OutCell::Number(*i as f64),
            Data::Float(f) => OutCell::Number(*f),
            Data::String(s) => OutCell::Text(s.clone()),
            Data::Bool(b) => OutCell::Bool(*b),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(datetime) => OutCell::DateTime(datetime),
                None => OutCell::Text(data.to_string()),
            },
            Data::DateTimeIso(s) => OutCell::Text(s.clone()),
            Data::Error(e) => OutCell::Text(format!("{:?}", e)),
            Data::Empty => OutCell::Empty,
            other => OutCell::Text(other.to_string()),
        }
    }
}

/// 1シート分のセルグリッド
///
/// calamineの使用範囲は左上が(0,0)とは限らないため、シート内の
/// 絶対位置を保持します。
#[derive(Debug)]
struct SheetGrid {
    /// 使用範囲の先頭行（絶対、0始まり）
    start_row: u32,

    /// 使用範囲の先頭列（絶対、0始まり）
    start_col: u32,

    /// セル値（使用範囲内）
    cells: Vec<Vec<OutCell>>,
}

impl SheetGrid {
    fn from_range(range: &Range<Data>) -> Self {
        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        let cells = range
            .rows()
            .map(|row| row.iter().map(OutCell::from_data).collect())
            .collect();

        Self {
            start_row,
            start_col,
            cells,
        }
    }
}

/// 原文抽出変換の設定
#[derive(Debug, Clone)]
pub struct CommentExtractor {
    /// 口コミが入力されている列（絶対、0始まり）
    pub review_column: u32,

    /// 処理を開始する行（絶対、0始まり。通常はヘッダー行の次）
    pub start_row: u32,

    /// 処理から除外するシート名
    pub exclude_sheets: Vec<String>,
}

impl Default for CommentExtractor {
    fn default() -> Self {
        Self {
            review_column: 3,
            start_row: 1,
            exclude_sheets: vec![
                "設定".to_string(),
                "テンプレート".to_string(),
                "マスタ".to_string(),
            ],
        }
    }
}

impl CommentExtractor {
    fn applies_to(&self, sheet_name: &str) -> bool {
        !self.exclude_sheets.iter().any(|s| s == sheet_name)
    }

    /// グリッドの口コミ列に原文抽出を適用し、処理した行数を返す
    fn apply(&self, grid: &mut SheetGrid) -> usize {
        let Some(local_col) = self.review_column.checked_sub(grid.start_col) else {
            return 0;
        };

        let mut processed = 0;
        for (row_idx, row) in grid.cells.iter_mut().enumerate() {
            let absolute_row = grid.start_row + row_idx as u32;
            if absolute_row < self.start_row {
                continue;
            }

            if let Some(OutCell::Text(text)) = row.get_mut(local_col as usize) {
                *text = extract_original_text(text);
            }
            processed += 1;
        }

        processed
    }
}

/// 日付正規化変換の設定
#[derive(Debug, Clone)]
pub struct DateNormalizer {
    /// 日付が入力されている列（絶対、0始まり）
    pub date_column: u32,
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self { date_column: 0 }
    }
}

impl DateNormalizer {
    /// グリッドの日付列のUTC日時をJSTの`yyyy/MM/dd`文字列に変換し、
    /// 変換したセル数を返す
    ///
    /// 空セル・日付以外の値はそのまま維持されます。
    fn apply(&self, grid: &mut SheetGrid) -> usize {
        let Some(local_col) = self.date_column.checked_sub(grid.start_col) else {
            return 0;
        };

        let mut converted = 0;
        for row in grid.cells.iter_mut() {
            if let Some(cell) = row.get_mut(local_col as usize) {
                if let OutCell::DateTime(dt) = cell {
                    let jst = to_jst(*dt);
                    *cell = OutCell::Text(jst.format("%Y/%m/%d").to_string());
                    converted += 1;
                }
            }
        }

        converted
    }
}

/// ワークブック変換（Strategy Pattern）
///
/// 各補助変換をenumとして表現します。
#[derive(Debug, Clone)]
pub enum WorkbookTransform {
    /// レビュー本文から機械翻訳マーカーを取り除き原文を復元する
    ExtractOriginal(CommentExtractor),

    /// 日付列のUTC日時をJST表示に正規化する
    NormalizeDates(DateNormalizer),
}

impl WorkbookTransform {
    fn applies_to(&self, sheet_name: &str) -> bool {
        match self {
            WorkbookTransform::ExtractOriginal(extractor) => extractor.applies_to(sheet_name),
            WorkbookTransform::NormalizeDates(_) => true,
        }
    }

    fn apply(&self, grid: &mut SheetGrid) -> usize {
        match self {
            WorkbookTransform::ExtractOriginal(extractor) => extractor.apply(grid),
            WorkbookTransform::NormalizeDates(normalizer) => normalizer.apply(grid),
        }
    }

    /// 変換を全シートに適用し、結果を新しいワークブックとして書き出す
    ///
    /// 除外対象のシートは変換せずそのまま複製されます。シート単位の
    /// 読み取り失敗は捕捉してログに残し、該当シートをスキップして
    /// 処理を継続します。
    pub fn run<R: Read + Seek>(
        &self,
        input: R,
        output_path: &Path,
    ) -> Result<TransformSummary, ReportError> {
        let mut parser = WorkbookParser::open(input)?;
        let sheet_names = parser.sheet_names();

        let mut workbook = Workbook::new();
        let date_format = Format::new().set_num_format("yyyy/mm/dd");
        let mut summary = TransformSummary::default();

        for sheet_name in &sheet_names {
            let range = match parser.read_grid(sheet_name) {
                Ok(range) => range,
                Err(e) => {
                    warn!(sheet = %sheet_name, error = %e, "シートを読み取れないためスキップします");
                    summary.skipped_sheets.push(format!("{} (エラー)", sheet_name));
                    continue;
                }
            };

            let mut grid = SheetGrid::from_range(&range);

            if self.applies_to(sheet_name) {
                let processed = self.apply(&mut grid);
                if processed > 0 {
                    summary.processed_sheets += 1;
                    summary.total_rows += processed;
                    info!(sheet = %sheet_name, rows = processed, "シートを変換しました");
                } else {
                    summary.skipped_sheets.push(sheet_name.clone());
                }
            } else {
                info!(sheet = %sheet_name, "除外対象のシートです。変換せず複製します");
                summary.skipped_sheets.push(sheet_name.clone());
            }

            write_sheet(&mut workbook, sheet_name, &grid, &date_format)?;
        }

        workbook.save(output_path)?;
        Ok(summary)
    }
}

/// 1シート分のグリッドを出力ワークブックに書き出す
fn write_sheet(
    workbook: &mut Workbook,
    sheet_name: &str,
    grid: &SheetGrid,
    date_format: &Format,
) -> Result<(), ReportError> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (row_idx, row) in grid.cells.iter().enumerate() {
        let out_row = grid.start_row + row_idx as u32;

        for (col_idx, cell) in row.iter().enumerate() {
            let out_col = (grid.start_col + col_idx as u32) as u16;

            match cell {
                OutCell::Text(s) => {
                    if !s.is_empty() {
                        worksheet.write_string(out_row, out_col, s)?;
                    }
                }
                OutCell::Number(n) => {
                    worksheet.write_number(out_row, out_col, *n)?;
                }
                OutCell::Bool(b) => {
                    worksheet.write_boolean(out_row, out_col, *b)?;
                }
                OutCell::DateTime(dt) => {
                    worksheet.write_datetime_with_format(out_row, out_col, dt, date_format)?;
                }
                OutCell::Empty => {}
            }
        }
    }

    Ok(())
}

/// 変換処理の結果サマリー
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformSummary {
    /// 変換されたシート数
    pub processed_sheets: usize,

    /// 変換された行数の合計
    pub total_rows: usize,

    /// スキップされたシート名（除外対象・データなし・エラー）
    pub skipped_sheets: Vec<String>,
}

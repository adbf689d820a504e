//! Formatter Module
//!
//! 日付・評価セルの表示用フォーマット処理を提供するモジュール。

use chrono::{Datelike, NaiveDate};

use crate::types::{DateCell, RatingCell, RawRow, ReviewEntry};

/// 評価が空欄の場合のフォールバック表示
pub const NO_RATING_LABEL: &str = "(評価なし)";

/// 行フォーマッター
///
/// フィルタを通過した`RawRow`を表示用の`ReviewEntry`へ変換する
/// ファサードとして機能します。
#[derive(Debug, Default)]
pub struct RowFormatter {
    /// 日付フォーマッター
    date_formatter: DateFormatter,

    /// 星評価フォーマッター
    star_formatter: StarFormatter,
}

impl RowFormatter {
    /// 新しいRowFormatterインスタンスを生成
    pub fn new() -> Self {
        Self {
            date_formatter: DateFormatter,
            star_formatter: StarFormatter,
        }
    }

    /// 1行分の生データを表示用エントリに変換する
    ///
    /// 日付・評価の個々のフォールバック処理は各フォーマッターに委譲します。
    pub fn format_row(&self, row: &RawRow) -> ReviewEntry {
        ReviewEntry {
            display_date: self.date_formatter.display_cell(&row.date),
            star_display: self.star_formatter.stars(&row.rating),
            author: row.author.clone(),
            content: row.content.clone(),
        }
    }
}

/// 日付フォーマッター
///
/// 混在した表現（構造化日付・日付文字列）の日付セルを解釈し、
/// `M月D日`形式で表示します。
#[derive(Debug, Default)]
pub struct DateFormatter;

impl DateFormatter {
    /// 日付セルをカレンダー日付として解釈する
    ///
    /// # 戻り値
    ///
    /// * `Some(NaiveDate)` - 構造化日付、または`YYYY-MM-DD`/`YYYY/MM/DD`
    ///   形式（月・日は1〜2桁可）の文字列として解釈できた場合
    /// * `None` - 解釈できない場合。該当行は月フィルタの対象外となるが、
    ///   行の存在自体は維持される
    pub fn parse(&self, cell: &DateCell) -> Option<NaiveDate> {
        match cell {
            DateCell::Structured(date) => Some(*date),
            DateCell::Text(s) => parse_date_string(s),
            DateCell::Unrecognized(_) => None,
        }
    }

    /// 日付を`M月D日`形式で表示する（ゼロ埋めなし）
    ///
    /// 例: 2024-03-05 → `3月5日`
    pub fn display(&self, date: NaiveDate) -> String {
        format!("{}月{}日", date.month(), date.day())
    }

    /// 日付セルを表示用文字列に変換する
    ///
    /// 解釈できないセルは元の文字列をそのまま返します（パススルー）。
    pub fn display_cell(&self, cell: &DateCell) -> String {
        match cell {
            DateCell::Structured(date) => self.display(*date),
            DateCell::Text(s) => match parse_date_string(s) {
                Some(date) => self.display(date),
                None => s.clone(),
            },
            DateCell::Unrecognized(s) => s.clone(),
        }
    }
}

/// `YYYY-MM-DD`または`YYYY/MM/DD`形式の文字列をカレンダー日付として解釈する
///
/// 年は4桁、月・日は1〜2桁。区切りは`-`と`/`の混在を許容します。
/// 形式が合致しても暦上存在しない日付（13月など）はNoneです。
fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.split(['-', '/']).collect();
    if parts.len() != 3 {
        return None;
    }

    let (year_part, month_part, day_part) = (parts[0], parts[1], parts[2]);
    if year_part.len() != 4
        || month_part.is_empty()
        || month_part.len() > 2
        || day_part.is_empty()
        || day_part.len() > 2
    {
        return None;
    }
    if !parts
        .iter()
        .all(|p| p.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }

    let year = year_part.parse::<i32>().ok()?;
    let month = month_part.parse::<u32>().ok()?;
    let day = day_part.parse::<u32>().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// 星評価フォーマッター
///
/// 0〜5の評価値を星記号（★★★☆☆など）で表示します。
#[derive(Debug, Default)]
pub struct StarFormatter;

impl StarFormatter {
    /// 評価セルを星表示文字列に変換する
    ///
    /// # 変換規則
    ///
    /// * 0〜5の数値: 四捨五入（端数0.5は0から遠い方へ丸め）した数の★と、
    ///   残りの☆を並べる
    /// * 範囲外の数値・数値でない文字列: 元の値の文字列表現をそのまま返す
    /// * 空欄: `(評価なし)`
    pub fn stars(&self, cell: &RatingCell) -> String {
        match cell {
            RatingCell::Numeric(n) => {
                if n.is_nan() || *n < 0.0 || *n > 5.0 {
                    return n.to_string();
                }

                // f64::roundは端数0.5を0から遠い方へ丸める（3.5 → 4）
                let filled = n.round() as usize;
                format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
            }
            RatingCell::Text(s) => s.clone(),
            RatingCell::Missing => NO_RATING_LABEL.to_string(),
        }
    }
}

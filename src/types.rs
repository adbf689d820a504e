//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。
//! セルの生値は読み込み境界で一度だけタグ付きの型に解決し、
//! 下流では再判定しない。

use calamine::Data;
use chrono::NaiveDate;

/// 日付セルの値
///
/// データソースの日付列は、構造化された日時値・日付文字列・その他の値が
/// 混在して到着します。読み込み時に一度だけ分類します。
#[derive(Debug, Clone, PartialEq)]
pub enum DateCell {
    /// 構造化された日付値（シリアル日付由来）
    Structured(NaiveDate),

    /// 文字列として到着した日付候補（`YYYY-MM-DD`等の形式検証は後段）
    Text(String),

    /// 日付として解釈できない値（表示時はそのまま返す）
    Unrecognized(String),
}

impl DateCell {
    /// calamineのセル値から日付セルを分類する
    pub fn from_data(data: &Data) -> Self {
        match data {
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(datetime) => DateCell::Structured(datetime.date()),
                None => DateCell::Unrecognized(data.to_string()),
            },
            // ISO形式の日時文字列は文字列パス（YYYY-MM-DD前方一致）で処理する
            Data::DateTimeIso(s) => DateCell::Text(s.clone()),
            Data::String(s) => {
                if s.trim().is_empty() {
                    DateCell::Unrecognized(String::new())
                } else {
                    DateCell::Text(s.trim().to_string())
                }
            }
            Data::Empty => DateCell::Unrecognized(String::new()),
            other => DateCell::Unrecognized(other.to_string()),
        }
    }
}

/// 評価セルの値
#[derive(Debug, Clone, PartialEq)]
pub enum RatingCell {
    /// 数値評価（0〜5の範囲検証は表示時）
    Numeric(f64),

    /// 数値に解釈できない文字列（そのまま表示される）
    Text(String),

    /// 空欄（フォールバックラベルで表示される）
    Missing,
}

impl RatingCell {
    /// calamineのセル値から評価セルを分類する
    ///
    /// 数値として解釈できる文字列は`Numeric`に昇格します。
    pub fn from_data(data: &Data) -> Self {
        match data {
            Data::Int(i) => RatingCell::Numeric(*i as f64),
            Data::Float(f) => RatingCell::Numeric(*f),
            Data::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    RatingCell::Missing
                } else if let Ok(n) = trimmed.parse::<f64>() {
                    RatingCell::Numeric(n)
                } else {
                    RatingCell::Text(trimmed.to_string())
                }
            }
            Data::Empty => RatingCell::Missing,
            other => RatingCell::Text(other.to_string()),
        }
    }
}

/// データ行1行分の生データ
///
/// 固定4列レイアウト`(日付, 評価, 投稿者, 本文)`を1行読み取ったもの。
/// 行位置以外の同一性は持たず、1回の実行内で読み捨てられます。
#[derive(Debug, Clone)]
pub struct RawRow {
    /// 日付列（A列）
    pub date: DateCell,

    /// 評価列（B列）
    pub rating: RatingCell,

    /// 投稿者列（C列）。空欄の場合は空文字列
    pub author: String,

    /// 本文列（D列）
    pub content: String,
}

impl RawRow {
    /// calamineの1行分のセルからRawRowを構築する
    ///
    /// 4列に満たない行は不足分を空セルとして扱います。
    pub fn from_cells(cells: &[Data]) -> Self {
        let cell = |idx: usize| cells.get(idx).unwrap_or(&Data::Empty);

        Self {
            date: DateCell::from_data(cell(0)),
            rating: RatingCell::from_data(cell(1)),
            author: cell_text(cell(2)),
            content: cell_text(cell(3)),
        }
    }
}

/// セル値を表示用文字列として取り出す（前後の空白は除去）
fn cell_text(data: &Data) -> String {
    match data {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

/// 期間フィルタを通過した行の表示用データ
///
/// Row Filterが生成し、Report Assemblerが直ちに消費します。永続化されません。
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewEntry {
    /// 表示用日付（`3月5日`形式、またはパース不能時は元の文字列）
    pub display_date: String,

    /// 星表示（`★★★☆☆`等、またはフォールバック文字列）
    pub star_display: String,

    /// 投稿者名（空の場合は表示行を省略）
    pub author: String,

    /// 本文
    pub content: String,
}

/// 1シート（1店舗）分のレポート内容
///
/// エントリが空のセクションは構築しない。空シートはレポートに一切現れません。
#[derive(Debug, Clone, PartialEq)]
pub struct ShopSection {
    /// 店舗名（シート名）
    pub shop_name: String,

    /// 掲載順を保持したエントリ列
    pub entries: Vec<ReviewEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    // DateCell のテスト
    #[test]
    fn test_date_cell_from_string() {
        let cell = DateCell::from_data(&Data::String("2024-03-05".to_string()));
        assert_eq!(cell, DateCell::Text("2024-03-05".to_string()));
    }

    #[test]
    fn test_date_cell_from_string_trims() {
        let cell = DateCell::from_data(&Data::String("  2024/3/5  ".to_string()));
        assert_eq!(cell, DateCell::Text("2024/3/5".to_string()));
    }

    #[test]
    fn test_date_cell_from_empty() {
        assert_eq!(
            DateCell::from_data(&Data::Empty),
            DateCell::Unrecognized(String::new())
        );
        assert_eq!(
            DateCell::from_data(&Data::String("   ".to_string())),
            DateCell::Unrecognized(String::new())
        );
    }

    #[test]
    fn test_date_cell_from_number_is_unrecognized() {
        // 書式情報のない生の数値は日付と見なさない
        let cell = DateCell::from_data(&Data::Float(45658.0));
        assert!(matches!(cell, DateCell::Unrecognized(_)));
    }

    // RatingCell のテスト
    #[test]
    fn test_rating_cell_from_numbers() {
        assert_eq!(
            RatingCell::from_data(&Data::Int(4)),
            RatingCell::Numeric(4.0)
        );
        assert_eq!(
            RatingCell::from_data(&Data::Float(3.5)),
            RatingCell::Numeric(3.5)
        );
    }

    #[test]
    fn test_rating_cell_from_numeric_string() {
        assert_eq!(
            RatingCell::from_data(&Data::String("5".to_string())),
            RatingCell::Numeric(5.0)
        );
        assert_eq!(
            RatingCell::from_data(&Data::String(" 2.5 ".to_string())),
            RatingCell::Numeric(2.5)
        );
    }

    #[test]
    fn test_rating_cell_from_text() {
        assert_eq!(
            RatingCell::from_data(&Data::String("評価なし".to_string())),
            RatingCell::Text("評価なし".to_string())
        );
    }

    #[test]
    fn test_rating_cell_missing() {
        assert_eq!(RatingCell::from_data(&Data::Empty), RatingCell::Missing);
        assert_eq!(
            RatingCell::from_data(&Data::String("  ".to_string())),
            RatingCell::Missing
        );
    }

    // RawRow のテスト
    #[test]
    fn test_raw_row_from_cells() {
        let cells = vec![
            Data::String("2024-06-01".to_string()),
            Data::Int(5),
            Data::String(" 田中 ".to_string()),
            Data::String("とても良い店でした。".to_string()),
        ];
        let row = RawRow::from_cells(&cells);

        assert_eq!(row.date, DateCell::Text("2024-06-01".to_string()));
        assert_eq!(row.rating, RatingCell::Numeric(5.0));
        assert_eq!(row.author, "田中");
        assert_eq!(row.content, "とても良い店でした。");
    }

    #[test]
    fn test_raw_row_from_short_row() {
        // 4列に満たない行は不足分が空セル扱い
        let cells = vec![Data::String("2024-06-01".to_string())];
        let row = RawRow::from_cells(&cells);

        assert_eq!(row.rating, RatingCell::Missing);
        assert_eq!(row.author, "");
        assert_eq!(row.content, "");
    }

    #[test]
    fn test_raw_row_numeric_author_is_stringified() {
        let cells = vec![
            Data::Empty,
            Data::Empty,
            Data::Int(42),
            Data::String("本文".to_string()),
        ];
        let row = RawRow::from_cells(&cells);
        assert_eq!(row.author, "42");
    }
}

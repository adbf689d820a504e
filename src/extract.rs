//! Extract Module
//!
//! 生データ行の期間フィルタリングと表示用エントリへの変換を提供する
//! モジュール。

use tracing::debug;

use crate::formatter::{DateFormatter, RowFormatter};
use crate::period::TargetPeriod;
use crate::types::{RawRow, ReviewEntry, ShopSection};

/// 対象期間に一致する行を選別し、表示用エントリ列に変換する
///
/// # 変換規則
///
/// * 日付が解釈できない行はスキップ（エラーにはしない）
/// * 解釈できた日付の年・月が`period`と一致する行のみ残す
/// * 行の順序は入力のまま維持される（安定フィルタ、再ソートなし）
///
/// 投稿者・本文は読み込み境界でトリム済み。投稿者が空の行は
/// エントリの投稿者フィールドが空文字列になり、表示時に行ごと省略されます。
pub fn filter_and_format(rows: &[RawRow], period: &TargetPeriod) -> Vec<ReviewEntry> {
    let date_formatter = DateFormatter;
    let row_formatter = RowFormatter::new();
    let mut skipped_unparseable = 0usize;

    let entries: Vec<ReviewEntry> = rows
        .iter()
        .filter(|row| match date_formatter.parse(&row.date) {
            Some(date) => period.contains(date),
            None => {
                skipped_unparseable += 1;
                false
            }
        })
        .map(|row| row_formatter.format_row(row))
        .collect();

    if skipped_unparseable > 0 {
        debug!(
            skipped = skipped_unparseable,
            "日付を解釈できない行をスキップしました"
        );
    }

    entries
}

/// 1シート分の行からセクションを構築する
///
/// # 戻り値
///
/// * `Some(ShopSection)` - 対象期間のエントリが1件以上ある場合
/// * `None` - エントリが0件の場合。ヘッダーのみのシートと対象月の
///   データがないシートは同一に扱われ、どちらもセクションを生成しない
pub fn build_section(
    shop_name: &str,
    rows: &[RawRow],
    period: &TargetPeriod,
) -> Option<ShopSection> {
    let entries = filter_and_format(rows, period);
    if entries.is_empty() {
        return None;
    }

    Some(ShopSection {
        shop_name: shop_name.to_string(),
        entries,
    })
}

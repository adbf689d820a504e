//! Period Module
//!
//! レポート対象の年月（期間）の解決と検証を提供するモジュール。

use chrono::{Datelike, NaiveDate};

use crate::api::PeriodFallback;
use crate::error::ReportError;
use crate::settings::Settings;

/// 年の有効範囲
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 2000..=2100;

/// レポート対象の年月
///
/// 1回の実行の開始時に解決され、以後は不変です。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetPeriod {
    /// 対象年（2000〜2100）
    pub year: i32,

    /// 対象月（1〜12）
    pub month: u32,
}

impl TargetPeriod {
    /// 年月を検証して期間を生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `ReportError::Config`: 年が2000〜2100の範囲外、または月が1〜12の範囲外
    pub fn new(year: i32, month: u32) -> Result<Self, ReportError> {
        if !YEAR_RANGE.contains(&year) {
            return Err(ReportError::Config(format!(
                "有効な年を指定してください（2000〜2100）: {}",
                year
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(ReportError::Config(format!(
                "有効な月を指定してください（1〜12）: {}",
                month
            )));
        }

        Ok(Self { year, month })
    }

    /// 保存された設定から対象期間を解決する
    ///
    /// 年・月の両方が保存されており、それぞれ単独で有効な場合のみ採用します。
    /// それ以外の場合は`fallback`に従い、`today`の当月または前月に
    /// フォールバックします。
    ///
    /// # 引数
    ///
    /// * `settings` - 読み取り専用の設定スナップショット
    /// * `fallback` - 未設定時のフォールバック方式
    /// * `today` - 実行時点の日付（ローカルタイムゾーン）
    pub fn resolve(
        settings: &Settings,
        fallback: PeriodFallback,
        today: NaiveDate,
    ) -> Self {
        if let (Some(year_str), Some(month_str)) =
            (&settings.target_year, &settings.target_month)
        {
            let parsed = year_str
                .trim()
                .parse::<i32>()
                .ok()
                .zip(month_str.trim().parse::<u32>().ok());
            if let Some((year, month)) = parsed {
                if let Ok(period) = Self::new(year, month) {
                    return period;
                }
            }
        }

        match fallback {
            PeriodFallback::CurrentMonth => Self {
                year: today.year(),
                month: today.month(),
            },
            PeriodFallback::PreviousMonth => Self::previous_month_of(today),
        }
    }

    /// 指定日の前月の期間を返す（1月は前年12月に繰り下がる）
    fn previous_month_of(today: NaiveDate) -> Self {
        if today.month() == 1 {
            Self {
                year: today.year() - 1,
                month: 12,
            }
        } else {
            Self {
                year: today.year(),
                month: today.month() - 1,
            }
        }
    }

    /// 期間の表示ラベルを返す（例: `2024年6月`）
    ///
    /// レポートタイトルと出力先サブフォルダ名の両方に使用されます。
    pub fn label(&self) -> String {
        format!("{}年{}月", self.year, self.month)
    }

    /// 日付がこの期間に含まれるかを判定する
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

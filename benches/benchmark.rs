//! パフォーマンスベンチマーク
//!
//! レビュー抽出からレポート組み立てまでのパイプラインの処理速度を測定する。
//! フィクスチャはrust_xlsxwriterでメモリ上に生成する。

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::io::Cursor;

use reviewdoc::{ReportBuilder, TargetPeriod};
use rust_xlsxwriter::Workbook;

/// 指定した店舗数・行数のレビューワークブックを生成する
///
/// 各シートの行は3分の1が対象月（2024年6月）、3分の1が前月、
/// 3分の1が日付不正になるように散らす。
fn generate_workbook(sheets: usize, rows_per_sheet: usize) -> Vec<u8> {
    let mut workbook = Workbook::new();

    for sheet_idx in 0..sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(&format!("店舗{:02}", sheet_idx)).unwrap();

        sheet.write_string(0, 0, "日付").unwrap();
        sheet.write_string(0, 1, "評価").unwrap();
        sheet.write_string(0, 2, "投稿者").unwrap();
        sheet.write_string(0, 3, "口コミ").unwrap();

        for row_idx in 0..rows_per_sheet {
            let row = (row_idx + 1) as u32;
            let date = match row_idx % 3 {
                0 => format!("2024-06-{:02}", (row_idx % 28) + 1),
                1 => format!("2024-05-{:02}", (row_idx % 28) + 1),
                _ => "不正な日付".to_string(),
            };
            sheet.write_string(row, 0, &date).unwrap();
            sheet
                .write_number(row, 1, ((row_idx % 6) as f64) * 0.9)
                .unwrap();
            sheet
                .write_string(row, 2, &format!("投稿者{}", row_idx))
                .unwrap();
            sheet
                .write_string(row, 3, "ランチで利用しました。店員の対応が丁寧でした。")
                .unwrap();
        }
    }

    workbook.save_to_buffer().unwrap()
}

/// 小規模ワークブック（5店舗 × 100行）のパイプライン速度
fn benchmark_small_workbook(c: &mut Criterion) {
    let data = generate_workbook(5, 100);
    let period = TargetPeriod::new(2024, 6).unwrap();
    let generator = ReportBuilder::new().with_period(2024, 6).build().unwrap();

    let mut group = c.benchmark_group("small_workbook");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("generate_5_sheets_100_rows", |b| {
        b.iter(|| {
            let input = Cursor::new(black_box(&data));
            let output = generator
                .generate_to_string(black_box(input), black_box(&period))
                .unwrap();
            black_box(output)
        });
    });

    group.finish();
}

/// 中規模ワークブック（20店舗 × 2000行）のパイプライン速度
fn benchmark_medium_workbook(c: &mut Criterion) {
    let data = generate_workbook(20, 2000);
    let period = TargetPeriod::new(2024, 6).unwrap();
    let generator = ReportBuilder::new().with_period(2024, 6).build().unwrap();

    let mut group = c.benchmark_group("medium_workbook");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.sample_size(10);

    group.bench_function("generate_20_sheets_2000_rows", |b| {
        b.iter(|| {
            let input = Cursor::new(black_box(&data));
            let output = generator
                .generate_to_string(black_box(input), black_box(&period))
                .unwrap();
            black_box(output)
        });
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(std::time::Duration::from_secs(20))
        .warm_up_time(std::time::Duration::from_secs(3));
    targets = benchmark_small_workbook, benchmark_medium_workbook
}

criterion_main!(benches);

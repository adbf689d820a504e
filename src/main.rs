//! reviewdoc CLI
//!
//! 口コミレポート生成ツールのコマンドラインインターフェース。
//! レポート生成・対象年月の設定・出力先フォルダの設定の3つの操作と、
//! 2つの補助変換（原文抽出・日付正規化）を提供します。

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use chrono::{Datelike, Local};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use reviewdoc::{
    CommentExtractor, DateNormalizer, FolderStore, PeriodFallback, ReportBuilder, ReportError,
    ReportFormat, RunOutcome, Settings, TargetPeriod, TransformSummary, WorkbookTransform,
};

#[derive(Parser, Debug)]
#[command(name = "reviewdoc", version, about = "口コミレポート生成ツール")]
struct Cli {
    /// 設定ファイルのパス（デフォルト: ユーザー設定ディレクトリ配下）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 口コミデータを抽出してレポートドキュメントを生成する
    Generate {
        /// データソースのワークブック（未指定なら保存された設定を使用）
        #[arg(long)]
        source: Option<PathBuf>,

        /// 出力先フォルダ（未指定なら保存された設定を使用）
        #[arg(long)]
        dest: Option<PathBuf>,

        /// 対象年（--monthと併用）
        #[arg(long)]
        year: Option<i32>,

        /// 対象月（--yearと併用）
        #[arg(long)]
        month: Option<u32>,

        /// 出力形式
        #[arg(long, value_enum, default_value_t = FormatArg::Md)]
        format: FormatArg,

        /// 対象年月が未設定の場合、当月ではなく前月を対象にする
        #[arg(long)]
        previous_month: bool,
    },

    /// レポート対象の年月を設定して保存する
    SetPeriod {
        /// 対象年（未指定なら対話的に入力）
        #[arg(long)]
        year: Option<String>,

        /// 対象月（未指定なら対話的に入力）
        #[arg(long)]
        month: Option<String>,
    },

    /// 出力先フォルダを設定して保存する
    SetFolder {
        /// 出力先フォルダのパス（未指定なら対話的に入力）
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// レビュー本文から機械翻訳マーカーを取り除き原文を復元する
    ExtractOriginal {
        /// 変換結果の出力先ワークブック
        output: PathBuf,

        /// データソースのワークブック（未指定なら保存された設定を使用）
        #[arg(long)]
        source: Option<PathBuf>,
    },

    /// 日付列のUTC日時をJST表示（yyyy/MM/dd）に正規化する
    NormalizeDates {
        /// 変換結果の出力先ワークブック
        output: PathBuf,

        /// データソースのワークブック（未指定なら保存された設定を使用）
        #[arg(long)]
        source: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Md,
    Html,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Md => ReportFormat::Markdown,
            FormatArg::Html => ReportFormat::Html,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let settings_path = cli
        .config
        .clone()
        .unwrap_or_else(Settings::default_path);

    if let Err(e) = run(cli, &settings_path) {
        error!(error = %e, "処理中にエラーが発生しました");
        eprintln!("エラー: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli, settings_path: &std::path::Path) -> Result<(), ReportError> {
    match cli.command {
        Commands::Generate {
            source,
            dest,
            year,
            month,
            format,
            previous_month,
        } => generate(settings_path, source, dest, year, month, format, previous_month),
        Commands::SetPeriod { year, month } => set_period(settings_path, year, month),
        Commands::SetFolder { path } => set_folder(settings_path, path),
        Commands::ExtractOriginal { output, source } => {
            let transform = WorkbookTransform::ExtractOriginal(CommentExtractor::default());
            run_transform(settings_path, source, &output, &transform)
        }
        Commands::NormalizeDates { output, source } => {
            let transform = WorkbookTransform::NormalizeDates(DateNormalizer::default());
            run_transform(settings_path, source, &output, &transform)
        }
    }
}

/// レポート生成アクション
fn generate(
    settings_path: &std::path::Path,
    source: Option<PathBuf>,
    dest: Option<PathBuf>,
    year: Option<i32>,
    month: Option<u32>,
    format: FormatArg,
    previous_month: bool,
) -> Result<(), ReportError> {
    // 設定は実行開始時に一度だけ読み取り、以後は再読み込みしない
    let settings = Settings::load(settings_path)?;

    let source_path = resolve_source(&settings, source)?;
    let dest_path = dest
        .or_else(|| settings.destination.as_ref().map(PathBuf::from))
        .ok_or_else(|| {
            ReportError::Config(
                "出力先フォルダが設定されていません。set-folderで設定してください".to_string(),
            )
        })?;
    let store = FolderStore::open(dest_path)?;

    let mut builder = ReportBuilder::new().with_format(format.into());
    if previous_month {
        builder = builder.with_fallback(PeriodFallback::PreviousMonth);
    }
    match (year, month) {
        (Some(y), Some(m)) => builder = builder.with_period(y, m),
        (None, None) => {}
        _ => {
            return Err(ReportError::Config(
                "--yearと--monthは両方指定してください".to_string(),
            ))
        }
    }
    let generator = builder.build()?;

    let period = generator.resolve_period(&settings, Local::now().date_naive());
    info!(period = %period.label(), "「{}」のデータを出力します", period.label());

    let input = File::open(&source_path)?;
    match generator.generate(input, &period, &store)? {
        RunOutcome::Created(handle) => {
            println!(
                "成功: 全店舗まとめドキュメント「{}」を生成しました。",
                handle.title
            );
            println!("場所: {}", handle.path.display());
        }
        RunOutcome::NoData(period) => {
            println!(
                "対象期間({})のデータが見つかりませんでした。",
                period.label()
            );
        }
    }

    Ok(())
}

/// 対象年月の設定アクション
///
/// 未指定の項目は対話的に入力を求めます。空欄の入力は現在の設定値を
/// 維持します。
fn set_period(
    settings_path: &std::path::Path,
    year: Option<String>,
    month: Option<String>,
) -> Result<(), ReportError> {
    let mut settings = Settings::load(settings_path)?;
    let today = Local::now().date_naive();

    let current_year = settings
        .target_year
        .clone()
        .unwrap_or_else(|| today.year().to_string());
    let current_month = settings
        .target_month
        .clone()
        .unwrap_or_else(|| today.month().to_string());

    let year_input = match year {
        Some(value) => value,
        None => prompt(&format!(
            "出力する年を入力してください（現在の設定: {}、空欄で変更しない）",
            current_year
        ))?,
    };
    let year_value = if year_input.trim().is_empty() {
        current_year
    } else {
        year_input.trim().to_string()
    };

    let month_input = match month {
        Some(value) => value,
        None => prompt(&format!(
            "出力する月を入力してください（現在の設定: {}、空欄で変更しない）",
            current_month
        ))?,
    };
    let month_value = if month_input.trim().is_empty() {
        current_month
    } else {
        month_input.trim().to_string()
    };

    // 範囲検証（2000〜2100年、1〜12月）
    let year_num = year_value.parse::<i32>().map_err(|_| {
        ReportError::Config(format!("有効な年を入力してください（2000〜2100）: {}", year_value))
    })?;
    let month_num = month_value.parse::<u32>().map_err(|_| {
        ReportError::Config(format!("有効な月を入力してください（1〜12）: {}", month_value))
    })?;
    let period = TargetPeriod::new(year_num, month_num)?;

    settings.target_year = Some(year_value);
    settings.target_month = Some(month_value);
    settings.save(settings_path)?;

    info!(period = %period.label(), "対象年月を保存しました");
    println!("成功: 出力対象を {} に設定しました。", period.label());
    Ok(())
}

/// 出力先フォルダの設定アクション
///
/// 指定されたパスは実在の確認（ルックアップ）に成功した場合のみ保存されます。
fn set_folder(
    settings_path: &std::path::Path,
    path: Option<PathBuf>,
) -> Result<(), ReportError> {
    let folder = match path {
        Some(value) => value,
        None => {
            let input = prompt("出力先フォルダのパスを入力してください")?;
            if input.is_empty() {
                return Err(ReportError::Config(
                    "フォルダパスが入力されていません".to_string(),
                ));
            }
            PathBuf::from(input)
        }
    };

    // 実在確認に失敗した場合は保存しない
    let store = FolderStore::open(&folder)?;

    let mut settings = Settings::load(settings_path)?;
    settings.destination = Some(store.root().display().to_string());
    settings.save(settings_path)?;

    info!(path = %store.root().display(), "出力先フォルダを保存しました");
    println!("成功: 出力先フォルダを保存しました。");
    Ok(())
}

/// 補助変換アクション（原文抽出・日付正規化）
fn run_transform(
    settings_path: &std::path::Path,
    source: Option<PathBuf>,
    output: &std::path::Path,
    transform: &WorkbookTransform,
) -> Result<(), ReportError> {
    let settings = Settings::load(settings_path)?;
    let source_path = resolve_source(&settings, source)?;

    let input = File::open(&source_path)?;
    let summary = transform.run(input, output)?;

    print_summary(&summary, output);
    Ok(())
}

fn print_summary(summary: &TransformSummary, output: &std::path::Path) {
    println!("処理完了！");
    println!("処理されたシート数: {}", summary.processed_sheets);
    println!("処理された総行数: {}行", summary.total_rows);
    if !summary.skipped_sheets.is_empty() {
        println!("スキップされたシート:");
        for sheet in &summary.skipped_sheets {
            println!("  {}", sheet);
        }
    }
    println!("出力先: {}", output.display());
}

/// データソースのパスを解決し、実在を確認する
fn resolve_source(
    settings: &Settings,
    source: Option<PathBuf>,
) -> Result<PathBuf, ReportError> {
    let path = source
        .or_else(|| settings.source.as_ref().map(PathBuf::from))
        .ok_or_else(|| {
            ReportError::Config(
                "データソースが設定されていません。--sourceで指定してください".to_string(),
            )
        })?;

    if !path.is_file() {
        return Err(ReportError::Lookup {
            resource: path.display().to_string(),
            message: "データソースのワークブックが見つかりません".to_string(),
        });
    }

    Ok(path)
}

/// 対話的に1行の入力を求める
fn prompt(message: &str) -> Result<String, ReportError> {
    print!("{}: ", message);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

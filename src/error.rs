//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// reviewdocクレート全体で使用するエラー型
///
/// このエラー型は、ワークブックの読み込み、レビュー抽出、レポート生成処理中に
/// 発生するすべてのエラーを統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（ファイル読み込み・書き込み失敗など）
/// - `Workbook`: Excelファイルの解析中に発生したエラー（calamine由来）
/// - `Json`: 設定ファイルのシリアライズ/デシリアライズエラー
/// - `WorkbookWrite`: 変換後ワークブックの書き込みエラー（rust_xlsxwriter由来）
/// - `Config`: 設定の検証に失敗したエラー（年・月の範囲外、出力先未設定など）
/// - `Lookup`: データソースまたは出力先が実在のリソースに解決できないエラー
/// - `Sheet`: 1シートの処理中に発生したエラー（シート単位でスキップされる）
/// - `Assembly`: レポートドキュメントの生成・配置に失敗したエラー
///
/// 行単位の不正データ（パースできない日付、範囲外の評価値）はエラー値に
/// しません。該当行の除外またはフォールバック表示で処理を継続します。
///
/// # 使用例
///
/// ```rust,no_run
/// use reviewdoc::ReportError;
/// use std::fs::File;
///
/// fn open_source(path: &str) -> Result<(), ReportError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     // ... 処理 ...
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum ReportError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Excelワークブックの解析中に発生したエラー
    ///
    /// calamineクレートがExcelファイルを解析する際に発生したエラーです。
    /// ファイル形式が不正、破損したファイルなどが原因となります。
    #[error("Failed to parse workbook: {0}")]
    Workbook(#[from] calamine::Error),

    /// 設定ファイルのJSON変換エラー
    #[error("Settings JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 変換後ワークブックの書き込みエラー
    #[error("Failed to write workbook: {0}")]
    WorkbookWrite(#[from] rust_xlsxwriter::XlsxError),

    /// 設定の検証に失敗したエラー
    ///
    /// 必須設定の欠落、または範囲・形式の検証失敗です。実行に対して致命的で、
    /// 出力は一切生成されません。
    ///
    /// 例: 出力先フォルダが未設定、対象年が2000〜2100の範囲外。
    #[error("Configuration error: {0}")]
    Config(String),

    /// リソースの解決に失敗したエラー
    ///
    /// データソースまたは出力先フォルダの識別子が、実在するリソースに
    /// 解決できなかった場合に発生します。実行に対して致命的です。
    #[error("Lookup failed for {resource}: {message}")]
    Lookup {
        /// 解決できなかったリソースの識別子
        resource: String,
        /// 失敗の原因メッセージ
        message: String,
    },

    /// 1シートの処理中に発生したエラー
    ///
    /// 呼び出し側でシート単位に捕捉され、該当シートをスキップして
    /// 残りのシートの処理を継続します。実行全体は中断しません。
    #[error("Failed to process sheet '{sheet}': {message}")]
    Sheet {
        /// エラーが発生したシート名
        sheet: String,
        /// エラーの詳細メッセージ
        message: String,
    },

    /// レポートドキュメントの生成・配置に失敗したエラー
    ///
    /// ドキュメントの作成に対して致命的ですが、すでにログ出力された
    /// シート単位の処理結果を巻き戻すことはありません。
    #[error("Report assembly failed: {0}")]
    Assembly(String),
}

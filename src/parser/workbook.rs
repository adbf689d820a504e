//! Workbook Parser
//!
//! calamineを使用したExcelワークブック読み込みの実装。
//! シート一覧の取得と、固定4列レイアウトのデータ行の抽出を提供します。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets, Xlsx};
use std::io::{Cursor, Read, Seek};

use crate::error::ReportError;
use crate::security::SecurityConfig;
use crate::types::RawRow;

/// ワークブックパーサー
///
/// calamineのラッパーとして、ワークブックレベルの操作を提供します。
/// 1行目はヘッダー行として扱い、データとしては決して読み取りません。
pub struct WorkbookParser {
    /// calamineのワークブック（XLSX形式のみサポート）
    workbook: Xlsx<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// ワークブックを開く
    ///
    /// 入力全体をメモリに読み込んでから解析します。サイズ上限を超える
    /// 入力は拒否されます。
    ///
    /// # 引数
    ///
    /// * `reader` - Excelファイルを読み込むためのリーダー（Read + Seekトレイトを実装）
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - 読み込みに成功した場合
    /// * `Err(ReportError)` - サイズ超過、形式不正、XLSX以外の形式の場合
    pub fn open<R: Read + Seek>(mut reader: R) -> Result<Self, ReportError> {
        let security_config = SecurityConfig::default();

        let mut buffer = Vec::new();
        let bytes_read = reader.read_to_end(&mut buffer)?;

        if bytes_read as u64 > security_config.max_input_file_size {
            return Err(ReportError::Config(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                bytes_read, security_config.max_input_file_size
            )));
        }

        let sheets =
            open_workbook_auto_from_rs(Cursor::new(buffer)).map_err(ReportError::Workbook)?;
        let workbook = match sheets {
            Sheets::Xlsx(workbook) => workbook,
            _ => {
                return Err(ReportError::Config(
                    "Only XLSX format is supported".to_string(),
                ))
            }
        };

        Ok(Self { workbook })
    }

    /// すべてのシート名を、ワークブック内の順序のまま取得する
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// 1シートのデータ行を読み取る
    ///
    /// 1行目（ヘッダー）を読み飛ばし、2行目以降を固定4列レイアウト
    /// `(日付, 評価, 投稿者, 本文)`の`RawRow`として返します。
    /// セル値のタグ付き分類はこの境界で一度だけ行われます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<RawRow>)` - データ行のリスト（ヘッダーのみのシートは空）
    /// * `Err(ReportError::Workbook)` - シートの読み取りに失敗した場合
    pub fn read_rows(&mut self, sheet_name: &str) -> Result<Vec<RawRow>, ReportError> {
        let range = self
            .workbook
            .worksheet_range(sheet_name)
            .map_err(|e| ReportError::Workbook(e.into()))?;

        let rows = range
            .rows()
            .skip(1) // ヘッダー行
            .map(RawRow::from_cells)
            .collect();

        Ok(rows)
    }

    /// 1シートの全セル範囲を読み取る（補助変換用）
    ///
    /// ヘッダーを含む全行・全列をそのまま返します。
    pub fn read_grid(&mut self, sheet_name: &str) -> Result<Range<Data>, ReportError> {
        self.workbook
            .worksheet_range(sheet_name)
            .map_err(|e| ReportError::Workbook(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_rejects_non_workbook_input() {
        let not_a_workbook: Vec<u8> = vec![0, 1, 2, 3];
        let result = WorkbookParser::open(Cursor::new(not_a_workbook));
        assert!(result.is_err());
    }

    #[test]
    fn test_open_rejects_empty_input() {
        let result = WorkbookParser::open(Cursor::new(Vec::new()));
        assert!(result.is_err());
    }
}

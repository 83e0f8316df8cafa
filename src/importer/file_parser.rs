// ==========================================
// 商品目录对账导出 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls/.xlsm/.ods) / CSV (.csv)
// 约定: 第一行为表头（跳过），完全空白的行跳过
//       列按位置读取，行号为表格中的 1 起行号
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::source_traits::FileParser;
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::debug;

// ==========================================
// RawRow - 原始行
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub row_number: usize,
    pub cells: Vec<String>,
}

impl RawRow {
    /// 读取指定列（TRIM 后为空 → None）
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells
            .get(index)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn is_blank(&self) -> bool {
        self.cells.iter().all(|v| v.trim().is_empty())
    }
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_rows(&self, file_path: &Path, _sheet: Option<&str>) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let row = RawRow {
                // 表头占第 1 行
                row_number: idx + 2,
                cells: record.iter().map(|v| v.to_string()).collect(),
            };

            if row.is_blank() {
                continue;
            }
            rows.push(row);
        }

        debug!(file = %file_path.display(), rows = rows.len(), "CSV 解析完成");
        Ok(rows)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_rows(&self, file_path: &Path, sheet: Option<&str>) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if !matches!(ext.as_str(), "xlsx" | "xls" | "xlsm" | "ods") {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        let sheet_names = workbook.sheet_names();
        let sheet_name = match sheet {
            Some(name) => {
                if !sheet_names.iter().any(|n| n == name) {
                    return Err(ImportError::SheetNotFound {
                        file: file_path.display().to_string(),
                        sheet: name.to_string(),
                    });
                }
                name.to_string()
            }
            None => sheet_names.first().cloned().ok_or_else(|| {
                ImportError::ExcelParseError("Excel 文件无工作表".to_string())
            })?,
        };

        let range = workbook.worksheet_range(&sheet_name)?;

        // 区域可能不从 A1 开始，补齐偏移以保持列位置
        let (start_row, start_col) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        let mut rows = Vec::new();
        for (idx, data_row) in range.rows().enumerate() {
            let row_number = start_row + idx + 1;
            // 表头行
            if row_number == 1 {
                continue;
            }

            let mut cells = vec![String::new(); start_col];
            cells.extend(data_row.iter().map(|cell| cell.to_string()));
            let row = RawRow { row_number, cells };

            if row.is_blank() {
                continue;
            }
            rows.push(row);
        }

        debug!(
            file = %file_path.display(),
            sheet = %sheet_name,
            rows = rows.len(),
            "Excel 解析完成"
        );
        Ok(rows)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_raw_rows(&self, file_path: &Path, sheet: Option<&str>) -> ImportResult<Vec<RawRow>> {
        match extension_of(file_path).as_str() {
            "csv" => CsvParser.parse_to_raw_rows(file_path, sheet),
            "xlsx" | "xls" | "xlsm" | "ods" => ExcelParser.parse_to_raw_rows(file_path, sheet),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}

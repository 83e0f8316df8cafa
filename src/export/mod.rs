// ==========================================
// 商品目录对账导出 - 写出层
// ==========================================

pub mod error;
pub mod json_writer;
pub mod report;

pub use error::{ExportError, ExportResult};
pub use json_writer::{
    CatalogWriter, JsonCatalogWriter, WrittenFiles, CATEGORIES_FILE, PRODUCTS_FILE, REPORT_FILE,
};
pub use report::{summary_lines, CategorySummaryLine, ExportReport, SourceCounts};

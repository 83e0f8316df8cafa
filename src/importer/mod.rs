// ==========================================
// 商品目录对账导出 - 数据源层
// ==========================================
// 职责: 外部数据读取，生成原始片段（不做合并）
// 支持: SQLite 商品库, Excel/CSV 价目表与品牌表, 本地图片目录
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod db_source;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod image_resolver;
pub mod source_traits;
pub mod spreadsheet_source;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use db_source::DbSource;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ExcelParser, RawRow, UniversalFileParser};
pub use image_resolver::{LocalImageResolver, NoLocalImages};
pub use spreadsheet_source::{BrandFile, PricelistFile};

// 重导出 Trait 接口
pub use source_traits::{
    BrandSource, CategorySource, DbProductSource, FileParser, ImageResolver, PricelistSource,
};

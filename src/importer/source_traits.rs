// ==========================================
// 商品目录对账导出 - 数据源 Trait
// ==========================================
// 职责: 定义引擎所需的数据源与图片解析接口（不包含实现）
// 约定: 加载失败即运行级失败，调用方不得使用部分结果
// ==========================================

use crate::domain::{Category, DbProductRecord, PricelistRecord};
use crate::importer::error::ImportResult;
use crate::importer::file_parser::RawRow;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 表格文件 → 原始行（跳过表头与空行）
// 实现者: ExcelParser, CsvParser
pub trait FileParser: Send + Sync {
    /// # 参数
    /// - file_path: 文件路径
    /// - sheet: 工作表名（CSV 忽略；None → 第一个工作表）
    fn parse_to_raw_rows(&self, file_path: &Path, sheet: Option<&str>)
        -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// CategorySource Trait
// ==========================================
// 实现者: DbSource
pub trait CategorySource: Send + Sync {
    /// 加载全部类目（product_count 置 0）
    fn load_categories(&self) -> ImportResult<Vec<Category>>;
}

// ==========================================
// DbProductSource Trait
// ==========================================
// 实现者: DbSource
pub trait DbProductSource: Send + Sync {
    /// 加载数据库商品片段（键: 规范化 SKU）
    fn load_db_products(&self) -> ImportResult<BTreeMap<String, DbProductRecord>>;
}

// ==========================================
// PricelistSource Trait
// ==========================================
// 实现者: PricelistFile
pub trait PricelistSource: Send + Sync {
    /// 加载价目表（文件顺序，无 SKU 的行已跳过）
    fn load_pricelist(&self) -> ImportResult<Vec<PricelistRecord>>;
}

// ==========================================
// BrandSource Trait
// ==========================================
// 实现者: BrandFile
pub trait BrandSource: Send + Sync {
    /// 加载品牌映射（键: 规范化 SKU）
    fn load_brands(&self) -> ImportResult<HashMap<String, String>>;
}

// ==========================================
// ImageResolver Trait
// ==========================================
// 用途: SKU → 本地图片路径（有序）
// 约定: 目录不存在/不可读 → 空列表，不报错
// 实现者: LocalImageResolver, NoLocalImages
pub trait ImageResolver: Send + Sync {
    fn resolve(&self, sku: &str) -> Vec<String>;
}

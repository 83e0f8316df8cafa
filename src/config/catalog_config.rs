// ==========================================
// 商品目录对账导出 - 导出配置
// ==========================================
// 存储: JSON 配置文件（所有段均有默认值）
// ==========================================

use crate::config::override_tables::OverrideTables;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 价目表“未找到”占位值
pub const DEFAULT_ABSENT_MARKER: &str = "Nav atrasts";

/// 本地图片识别的扩展名
pub const DEFAULT_IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

// ==========================================
// CatalogConfig - 顶层配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    pub sources: SourcesConfig,
    pub images: ImagesConfig,
    pub output: OutputConfig,
    pub merge: MergeConfig,
    pub overrides: OverrideTables,
}

// ==========================================
// 数据源
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// SQLite 商品库
    pub db_path: PathBuf,

    /// 价目表（.xlsx/.xls/.csv）
    pub pricelist_path: PathBuf,

    /// 价目表工作表名（None → 第一个工作表）
    pub pricelist_sheet: Option<String>,

    /// 品牌映射表
    pub brands_path: PathBuf,

    /// 品牌工作表名
    pub brands_sheet: Option<String>,

    pub pricelist_columns: PricelistColumns,
    pub brand_columns: BrandColumns,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("data/products.db"),
            pricelist_path: PathBuf::from("data/LAB20 CATALOGUE PRICELIST cenu analīze.xlsx"),
            pricelist_sheet: Some("Verifica".to_string()),
            brands_path: PathBuf::from("data/laborpro_nextcloud_catalog.xlsx"),
            brands_sheet: Some("Catalog".to_string()),
            pricelist_columns: PricelistColumns::default(),
            brand_columns: BrandColumns::default(),
        }
    }
}

/// 价目表列位置（0 起）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricelistColumns {
    pub sku: usize,
    pub name_lv: usize,
    pub name_en: usize,
    pub chapter: usize,
    pub price: usize, // CATALOGUE PRICE（不含增值税）
    pub ean: usize,
}

impl Default for PricelistColumns {
    fn default() -> Self {
        Self {
            sku: 0,
            name_lv: 1,
            name_en: 2,
            chapter: 3,
            price: 5,
            ean: 7,
        }
    }
}

/// 品牌表列位置（0 起）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandColumns {
    pub sku: usize,
    pub brand: usize,
}

impl Default for BrandColumns {
    fn default() -> Self {
        Self { sku: 0, brand: 1 }
    }
}

// ==========================================
// 本地图片
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// 本地图片根目录（按 SKU 分子目录）；None → 只用数据库远程 URL
    pub local_dir: Option<PathBuf>,

    /// 输出路径前缀
    pub url_prefix: String,

    pub extensions: Vec<String>,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            local_dir: Some(PathBuf::from("public/images/products")),
            url_prefix: "/images/products".to_string(),
            extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

// ==========================================
// 输出
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
        }
    }
}

// ==========================================
// 合并策略
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// 视为“缺失”的占位文本
    pub absent_markers: Vec<String>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            absent_markers: vec![DEFAULT_ABSENT_MARKER.to_string()],
        }
    }
}

// ==========================================
// 商品目录对账导出 - 运行报告
// ==========================================
// 内容: 运行 ID + 生成时间 + 数据源计数 + 合并统计 + 类目汇总
// 说明: 报告不参与目录的逐字节确定性（含 UUID/时间戳）
// ==========================================

use crate::domain::{Catalog, CatalogSources};
use crate::engine::{ReconcileOutcome, ReconcileStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 数据源计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCounts {
    pub categories: usize,
    pub db_products: usize,
    pub pricelist_rows: usize,
    pub brands: usize,
}

impl SourceCounts {
    pub fn from_sources(sources: &CatalogSources) -> Self {
        Self {
            categories: sources.categories.len(),
            db_products: sources.db_products.len(),
            pricelist_rows: sources.pricelist.len(),
            brands: sources.brands.len(),
        }
    }
}

/// 类目汇总行（"08 Krāsošana: 12"）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummaryLine {
    pub number: String,
    pub name_lv: String,
    pub product_count: usize,
}

impl fmt::Display for CategorySummaryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.number, self.name_lv, self.product_count)
    }
}

/// 按类目顺序生成汇总行
pub fn summary_lines(catalog: &Catalog) -> Vec<CategorySummaryLine> {
    catalog
        .categories
        .iter()
        .map(|c| CategorySummaryLine {
            number: c.number.clone(),
            name_lv: c.name_lv.clone(),
            product_count: c.product_count,
        })
        .collect()
}

// ==========================================
// ExportReport - 导出报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportReport {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub dry_run: bool,
    pub sources: SourceCounts,
    pub stats: ReconcileStats,
    pub categories_written: usize,
    pub products_written: usize,
    pub summary: Vec<CategorySummaryLine>,
}

impl ExportReport {
    pub fn new(sources: &CatalogSources, outcome: &ReconcileOutcome, dry_run: bool) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            dry_run,
            sources: SourceCounts::from_sources(sources),
            stats: outcome.stats.clone(),
            categories_written: outcome.catalog.categories.len(),
            products_written: outcome.catalog.products.len(),
            summary: summary_lines(&outcome.catalog),
        }
    }
}

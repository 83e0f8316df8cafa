// ==========================================
// 商品目录对账导出 - 目录聚合
// ==========================================
// CatalogSources: 引擎输入（全部数据源的内存快照）
// Catalog: 引擎输出（已排序、已计数、只读）
// ==========================================

use crate::domain::category::Category;
use crate::domain::product::{CanonicalProduct, DbProductRecord, PricelistRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// 数据源快照（全部加载完成后才进入合并）
#[derive(Debug, Clone, Default)]
pub struct CatalogSources {
    pub categories: Vec<Category>,
    /// 规范化 SKU → 数据库片段（BTreeMap 保证补充遍历顺序确定）
    pub db_products: BTreeMap<String, DbProductRecord>,
    /// 价目表行（文件顺序）
    pub pricelist: Vec<PricelistRecord>,
    /// 规范化 SKU → 品牌名
    pub brands: HashMap<String, String>,
}

/// 成品目录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>, // 按 number 升序
    pub products: Vec<CanonicalProduct>, // 按 (category_id, sku) 升序
}

impl Catalog {
    pub fn category_by_id(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn total_product_count(&self) -> usize {
        self.categories.iter().map(|c| c.product_count).sum()
    }
}

// ==========================================
// 商品目录对账导出 - 领域类型定义
// ==========================================
// 职责: SKU 规范化、类目归属规则、商品来源
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 类目 ID（对齐 categories.id）
pub type CategoryId = i64;

/// 规范化 SKU（TRIM + UPPER）
///
/// 只处理首尾空白与大小写，内部空白（含不间断空格）原样保留。
pub fn normalize_sku(raw: &str) -> String {
    raw.trim().to_uppercase()
}

// ==========================================
// 类目归属规则 (Category Rule)
// ==========================================
// 顺序即优先级: 精确覆写 > 规范化覆写 > 章节映射 > 数据库类目
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryRule {
    SkuOverrideExact,      // 人工覆写表（源记录原样 SKU）
    SkuOverrideNormalized, // 人工覆写表（规范化 SKU）
    Chapter,               // 价目表章节映射
    Database,              // 数据库记录自带类目
}

impl fmt::Display for CategoryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryRule::SkuOverrideExact => write!(f, "SKU_OVERRIDE_EXACT"),
            CategoryRule::SkuOverrideNormalized => write!(f, "SKU_OVERRIDE_NORMALIZED"),
            CategoryRule::Chapter => write!(f, "CHAPTER"),
            CategoryRule::Database => write!(f, "DATABASE"),
        }
    }
}

// ==========================================
// 商品来源 (Product Origin)
// ==========================================
// 主遍历来自价目表，补充遍历来自数据库
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductOrigin {
    Pricelist,
    Database,
}

impl fmt::Display for ProductOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductOrigin::Pricelist => write!(f, "PRICELIST"),
            ProductOrigin::Database => write!(f, "DATABASE"),
        }
    }
}

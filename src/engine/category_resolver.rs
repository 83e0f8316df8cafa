// ==========================================
// 商品目录对账导出 - 类目归属解析
// ==========================================
// 优先级（高 → 低）:
// 1. SKU 覆写表，按源记录原样 SKU
// 2. SKU 覆写表，按规范化 SKU（容忍空白/大小写漂移）
// 3. 价目表章节映射（仅存在价目表片段时）
// 4. 数据库记录自带类目
// 全部落空 → None（调用方剔除商品并计数）
// ==========================================

use crate::config::OverrideTables;
use crate::domain::{CategoryId, CategoryRule};

/// 类目解析结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCategory {
    pub category_id: CategoryId,
    pub rule: CategoryRule,
}

/// 参与解析的商品线索
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryClues<'a> {
    pub source_sku: &'a str,     // 源记录原样 SKU
    pub normalized_sku: &'a str, // TRIM + UPPER
    pub chapter: Option<&'a str>,
    pub db_category_id: Option<CategoryId>,
}

pub struct CategoryResolver<'a> {
    tables: &'a OverrideTables,
}

impl<'a> CategoryResolver<'a> {
    pub fn new(tables: &'a OverrideTables) -> Self {
        Self { tables }
    }

    pub fn resolve(&self, clues: &CategoryClues<'_>) -> Option<ResolvedCategory> {
        let hit = |rule: CategoryRule, id: Option<CategoryId>| {
            id.filter(|id| *id > 0)
                .map(|category_id| ResolvedCategory { category_id, rule })
        };

        hit(
            CategoryRule::SkuOverrideExact,
            self.tables.sku_override(clues.source_sku),
        )
        .or_else(|| {
            hit(
                CategoryRule::SkuOverrideNormalized,
                self.tables.sku_override(clues.normalized_sku),
            )
        })
        .or_else(|| {
            hit(
                CategoryRule::Chapter,
                clues.chapter.and_then(|c| self.tables.chapter_category(c)),
            )
        })
        .or_else(|| hit(CategoryRule::Database, clues.db_category_id))
    }
}

// ==========================================
// 商品目录对账导出 - 合并诊断统计
// ==========================================

use crate::domain::{CategoryId, CategoryRule, ProductOrigin};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 剔除原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DropReason {
    /// 四级来源均无类目
    UnresolvedCategory,
    /// 解析到的类目不在类目表中
    UnknownCategory { category_id: CategoryId },
}

/// 被剔除的商品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedProduct {
    pub sku: String,
    pub origin: ProductOrigin,
    pub reason: DropReason,
}

/// 合并过程统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconcileStats {
    pub primary_emitted: usize,
    pub supplemental_emitted: usize,
    /// 价目表内同一 SKU 的后续行覆盖前行的次数
    pub duplicate_pricelist_rows: usize,
    /// 补充遍历中因已出现在价目表而跳过的数据库 SKU
    pub already_consumed: usize,
    /// 每个规范化 SKU 至多一条，且均未出现在输出中
    pub dropped: Vec<DroppedProduct>,
    pub rule_usage: BTreeMap<CategoryRule, usize>,
    pub local_image_products: usize,
    pub remote_image_products: usize,
}

impl ReconcileStats {
    pub fn record_drop(&mut self, sku: &str, origin: ProductOrigin, reason: DropReason) {
        self.dropped.push(DroppedProduct {
            sku: sku.to_string(),
            origin,
            reason,
        });
    }

    pub fn record_rule(&mut self, rule: CategoryRule) {
        *self.rule_usage.entry(rule).or_insert(0) += 1;
    }

    pub fn unresolved_count(&self) -> usize {
        self.dropped
            .iter()
            .filter(|d| d.reason == DropReason::UnresolvedCategory)
            .count()
    }

    pub fn unknown_category_count(&self) -> usize {
        self.dropped
            .iter()
            .filter(|d| matches!(d.reason, DropReason::UnknownCategory { .. }))
            .count()
    }
}

// ==========================================
// 商品目录对账导出 - 商品领域模型
// ==========================================
// 职责: 各数据源原始片段 + 合并后的规范商品
// 对齐: products.json（店面消费契约，字段名不可改）
// ==========================================

use crate::domain::types::CategoryId;
use serde::{Deserialize, Serialize};

// ==========================================
// DbProductRecord - 数据库商品片段
// ==========================================
// 来源: products + product_images
// 特点: 人工维护的拉脱维亚语长文案，更新慢
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DbProductRecord {
    pub sku: String,                     // 数据库中原样存储的 SKU
    pub name_lv: Option<String>,         // 拉脱维亚语名称
    pub description_lv: Option<String>,  // 拉脱维亚语描述
    pub price: Option<f64>,              // 数据库价格（兜底）
    pub category_id: Option<CategoryId>, // 数据库类目（最低优先级）
    pub images: Vec<String>,             // 远程图片 URL（按 sort_order）
}

// ==========================================
// PricelistRecord - 价目表商品片段
// ==========================================
// 来源: 价目表工作簿（刷新最频繁）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricelistRecord {
    pub sku: String,             // 已 TRIM 的 SKU（保留大小写）
    pub name_lv: Option<String>, // 价目表拉脱维亚语名称
    pub name_en: Option<String>, // 英文名称
    pub price: Option<f64>,      // 目录价（不含增值税）
    pub ean: Option<String>,     // EAN 条码
    pub chapter: Option<String>, // 两位章节号
    pub row_number: usize,       // 源文件行号（诊断用）
}

// ==========================================
// CanonicalProduct - 规范商品
// ==========================================
// 不变量: 每个规范化 SKU 仅一条；category_id 必须指向已存在类目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalProduct {
    pub id: usize, // 排序后重新分配的位置序号（1..N）
    pub sku: String,
    pub name_lv: String,
    pub name_en: String,
    pub description_lv: String,
    pub price: Option<f64>,
    #[serde(rename = "categoryId")]
    pub category_id: CategoryId,
    #[serde(rename = "categorySlug")]
    pub category_slug: String,
    pub brand: String,
    pub ean: String,
    pub images: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_product_field_names() {
        let product = CanonicalProduct {
            id: 1,
            sku: "E341".to_string(),
            name_lv: "Disks".to_string(),
            name_en: "Disc".to_string(),
            description_lv: String::new(),
            price: None,
            category_id: 15,
            category_slug: "pedikirs".to_string(),
            brand: String::new(),
            ean: String::new(),
            images: vec![],
        };

        let json = serde_json::to_value(&product).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                "id",
                "sku",
                "name_lv",
                "name_en",
                "description_lv",
                "price",
                "categoryId",
                "categorySlug",
                "brand",
                "ean",
                "images"
            ]
        );
        assert!(json["price"].is_null());
    }
}

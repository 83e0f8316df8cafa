// ==========================================
// 商品目录对账导出 - 目录校验
// ==========================================
// 职责: 写出前复核组装结果的全部不变量
// 输出: 违规列表（空列表 = 可写出）
// ==========================================

use crate::domain::{normalize_sku, Catalog, CategoryId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::warn;

/// 目录违规
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CatalogViolation {
    #[error("SKU 重复: {sku}")]
    DuplicateSku { sku: String },

    #[error("类目 ID 重复: {category_id}")]
    DuplicateCategoryId { category_id: CategoryId },

    #[error("商品 {sku} 引用了不存在的类目 {category_id}")]
    UnknownCategory { sku: String, category_id: CategoryId },

    #[error("商品 {sku} 类目 slug 不一致: 期望 {expected}, 实际 {actual}")]
    SlugMismatch {
        sku: String,
        expected: String,
        actual: String,
    },

    #[error("类目 {category_id} 商品数不一致: 记录 {recorded}, 实际 {actual}")]
    CountMismatch {
        category_id: CategoryId,
        recorded: usize,
        actual: usize,
    },

    #[error("类目商品数合计 {total} 与商品总数 {products} 不一致")]
    TotalMismatch { total: usize, products: usize },

    #[error("商品 ID 不连续: 位置 {position} 的 ID 为 {id}")]
    NonSequentialId { position: usize, id: usize },

    #[error("商品排序错误: {previous} 之后出现 {sku}")]
    ProductOrder { previous: String, sku: String },

    #[error("类目排序错误: {previous} 之后出现 {number}")]
    CategoryOrder { previous: String, number: String },
}

// ==========================================
// CatalogValidator
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct CatalogValidator;

impl CatalogValidator {
    pub fn new() -> Self {
        Self
    }

    /// 校验目录，返回全部违规
    pub fn validate(&self, catalog: &Catalog) -> Vec<CatalogViolation> {
        let mut violations = Vec::new();

        self.check_categories(catalog, &mut violations);
        self.check_products(catalog, &mut violations);
        self.check_counts(catalog, &mut violations);

        for violation in &violations {
            warn!(%violation, "目录校验未通过");
        }
        violations
    }

    fn check_categories(&self, catalog: &Catalog, out: &mut Vec<CatalogViolation>) {
        let mut seen = HashSet::new();
        for category in &catalog.categories {
            if !seen.insert(category.id) {
                out.push(CatalogViolation::DuplicateCategoryId {
                    category_id: category.id,
                });
            }
        }

        for pair in catalog.categories.windows(2) {
            if pair[0].sort_key() > pair[1].sort_key() {
                out.push(CatalogViolation::CategoryOrder {
                    previous: pair[0].number.clone(),
                    number: pair[1].number.clone(),
                });
            }
        }
    }

    fn check_products(&self, catalog: &Catalog, out: &mut Vec<CatalogViolation>) {
        let slugs: HashMap<CategoryId, &str> = catalog
            .categories
            .iter()
            .map(|c| (c.id, c.slug.as_str()))
            .collect();
        let mut seen = HashSet::new();

        for (idx, product) in catalog.products.iter().enumerate() {
            if product.id != idx + 1 {
                out.push(CatalogViolation::NonSequentialId {
                    position: idx + 1,
                    id: product.id,
                });
            }

            if !seen.insert(normalize_sku(&product.sku)) {
                out.push(CatalogViolation::DuplicateSku {
                    sku: product.sku.clone(),
                });
            }

            match slugs.get(&product.category_id) {
                None => out.push(CatalogViolation::UnknownCategory {
                    sku: product.sku.clone(),
                    category_id: product.category_id,
                }),
                Some(slug) if *slug != product.category_slug => {
                    out.push(CatalogViolation::SlugMismatch {
                        sku: product.sku.clone(),
                        expected: slug.to_string(),
                        actual: product.category_slug.clone(),
                    })
                }
                Some(_) => {}
            }
        }

        for pair in catalog.products.windows(2) {
            let previous = (pair[0].category_id, &pair[0].sku);
            let current = (pair[1].category_id, &pair[1].sku);
            if previous > current {
                out.push(CatalogViolation::ProductOrder {
                    previous: pair[0].sku.clone(),
                    sku: pair[1].sku.clone(),
                });
            }
        }
    }

    fn check_counts(&self, catalog: &Catalog, out: &mut Vec<CatalogViolation>) {
        let mut actual: HashMap<CategoryId, usize> = HashMap::new();
        for product in &catalog.products {
            *actual.entry(product.category_id).or_insert(0) += 1;
        }

        for category in &catalog.categories {
            let count = actual.get(&category.id).copied().unwrap_or(0);
            if category.product_count != count {
                out.push(CatalogViolation::CountMismatch {
                    category_id: category.id,
                    recorded: category.product_count,
                    actual: count,
                });
            }
        }

        let total = catalog.total_product_count();
        if total != catalog.products.len() {
            out.push(CatalogViolation::TotalMismatch {
                total,
                products: catalog.products.len(),
            });
        }
    }
}

// ==========================================
// 商品目录对账导出 - 目录合并引擎
// ==========================================
// 流程: 主遍历（价目表）→ 补充遍历（数据库独有 SKU）→ 组装
// 红线: 纯内存计算，不做 I/O（图片解析经注入的 ImageResolver）
// 红线: 每个规范化 SKU 仅产出一条；无类目即剔除，不产出占位类目
// 红线: 价目表中出现过的 SKU 不进入补充遍历（即使主遍历剔除）
// ==========================================

use crate::config::{CatalogConfig, OverrideTables};
use crate::domain::{
    normalize_sku, CanonicalProduct, Catalog, CatalogSources, CategoryId, CategoryRule,
    DbProductRecord, PricelistRecord, ProductOrigin,
};
use crate::engine::assembler::assemble;
use crate::engine::category_resolver::{CategoryClues, CategoryResolver};
use crate::engine::field_merge::MergePolicy;
use crate::engine::stats::{DropReason, DroppedProduct, ReconcileStats};
use crate::importer::ImageResolver;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, info, instrument};

/// 合并结果
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    pub catalog: Catalog,
    pub stats: ReconcileStats,
}

// 单个 SKU 的产出（附带诊断信息，组装前剥离）
struct Emitted {
    product: CanonicalProduct,
    rule: CategoryRule,
    local_images: bool,
}

// 主遍历结果：产出 + 价目表出现过的全部规范化 SKU
struct PrimaryPass {
    emitted: BTreeMap<String, Emitted>,
    seen: BTreeSet<String>,
}

// 单次合并共享的只读上下文
struct MergeContext<'a> {
    sources: &'a CatalogSources,
    slugs: HashMap<CategoryId, &'a str>,
    resolver: CategoryResolver<'a>,
    images: &'a dyn ImageResolver,
}

// 单个 SKU 的合并输入
struct Candidate<'a> {
    source_sku: &'a str,
    key: &'a str,
    pricelist: Option<&'a PricelistRecord>,
    db: Option<&'a DbProductRecord>,
    origin: ProductOrigin,
}

// ==========================================
// CatalogReconciler
// ==========================================
pub struct CatalogReconciler {
    tables: OverrideTables,
    policy: MergePolicy,
}

impl CatalogReconciler {
    /// # 参数
    /// - tables: 章节映射 + SKU 覆写（显式输入，便于替换测试）
    /// - policy: 字段合并策略
    pub fn new(tables: OverrideTables, policy: MergePolicy) -> Self {
        Self { tables, policy }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(
            config.overrides.clone(),
            MergePolicy::new(config.merge.absent_markers.iter().cloned()),
        )
    }

    pub fn tables(&self) -> &OverrideTables {
        &self.tables
    }

    /// 合并全部数据源
    ///
    /// 相同输入必然得到相同输出（含位置 ID）
    #[instrument(skip_all)]
    pub fn reconcile(
        &self,
        sources: &CatalogSources,
        images: &dyn ImageResolver,
    ) -> ReconcileOutcome {
        info!(
            categories = sources.categories.len(),
            db_products = sources.db_products.len(),
            pricelist_rows = sources.pricelist.len(),
            brands = sources.brands.len(),
            "开始合并目录"
        );

        let ctx = MergeContext {
            sources,
            slugs: sources
                .categories
                .iter()
                .map(|c| (c.id, c.slug.as_str()))
                .collect(),
            resolver: CategoryResolver::new(&self.tables),
            images,
        };
        let mut stats = ReconcileStats::default();

        // === 主遍历 ===
        let primary = self.primary_pass(&ctx, &mut stats);
        stats.primary_emitted = primary.emitted.len();

        // === 补充遍历 ===
        let supplemental = self.supplemental_pass(&ctx, &primary.seen, &mut stats);
        stats.supplemental_emitted = supplemental.len();

        let emitted: Vec<Emitted> = primary
            .emitted
            .into_values()
            .chain(supplemental)
            .collect();
        for item in &emitted {
            stats.record_rule(item.rule);
            if item.local_images {
                stats.local_image_products += 1;
            } else if !item.product.images.is_empty() {
                stats.remote_image_products += 1;
            }
        }

        let catalog = assemble(
            sources.categories.clone(),
            emitted.into_iter().map(|e| e.product),
        );

        info!(
            products = catalog.products.len(),
            primary = stats.primary_emitted,
            supplemental = stats.supplemental_emitted,
            dropped = stats.dropped.len(),
            duplicates = stats.duplicate_pricelist_rows,
            "目录合并完成"
        );

        ReconcileOutcome { catalog, stats }
    }

    /// 主遍历：价目表逐行；同一 SKU 后续可解析的行覆盖前行
    ///
    /// 剔除按规范化 SKU 记录一次，且仅当该 SKU 最终无产出
    fn primary_pass(&self, ctx: &MergeContext<'_>, stats: &mut ReconcileStats) -> PrimaryPass {
        let mut emitted = BTreeMap::new();
        let mut seen = BTreeSet::new();
        let mut rejected: BTreeMap<String, DroppedProduct> = BTreeMap::new();

        for pl in &ctx.sources.pricelist {
            let source_sku = pl.sku.trim();
            let key = normalize_sku(source_sku);
            if key.is_empty() {
                continue;
            }
            seen.insert(key.clone());

            let candidate = Candidate {
                source_sku,
                key: &key,
                pricelist: Some(pl),
                db: ctx.sources.db_products.get(&key),
                origin: ProductOrigin::Pricelist,
            };

            match self.build(ctx, &candidate, &pl.sku) {
                Ok(item) => {
                    if emitted.insert(key, item).is_some() {
                        debug!(sku = %source_sku, row_number = pl.row_number, "价目表重复 SKU，后行覆盖");
                        stats.duplicate_pricelist_rows += 1;
                    }
                }
                Err(reason) => {
                    rejected.insert(
                        key,
                        DroppedProduct {
                            sku: source_sku.to_string(),
                            origin: ProductOrigin::Pricelist,
                            reason,
                        },
                    );
                }
            }
        }

        stats.dropped.extend(
            rejected
                .into_iter()
                .filter(|(key, _)| !emitted.contains_key(key))
                .map(|(_, dropped)| dropped),
        );

        PrimaryPass { emitted, seen }
    }

    /// 补充遍历：仅处理价目表中完全未出现的数据库 SKU
    fn supplemental_pass(
        &self,
        ctx: &MergeContext<'_>,
        pricelist_keys: &BTreeSet<String>,
        stats: &mut ReconcileStats,
    ) -> Vec<Emitted> {
        let mut emitted = Vec::new();

        for (key, db) in &ctx.sources.db_products {
            if pricelist_keys.contains(key) {
                stats.already_consumed += 1;
                continue;
            }

            let candidate = Candidate {
                source_sku: db.sku.trim(),
                key,
                pricelist: None,
                db: Some(db),
                origin: ProductOrigin::Database,
            };

            match self.build(ctx, &candidate, &db.sku) {
                Ok(item) => emitted.push(item),
                Err(reason) => stats.record_drop(candidate.source_sku, candidate.origin, reason),
            }
        }

        emitted
    }

    /// 解析类目 + 合并字段；类目无法解析或不存在 → 剔除原因
    ///
    /// `raw_sku` 为源记录中未经处理的 SKU，仅用于精确覆写查找
    fn build(
        &self,
        ctx: &MergeContext<'_>,
        candidate: &Candidate<'_>,
        raw_sku: &str,
    ) -> Result<Emitted, DropReason> {
        let clues = CategoryClues {
            source_sku: raw_sku,
            normalized_sku: candidate.key,
            chapter: candidate.pricelist.and_then(|p| p.chapter.as_deref()),
            db_category_id: candidate.db.and_then(|d| d.category_id),
        };

        let resolved = match ctx.resolver.resolve(&clues) {
            Some(resolved) => resolved,
            None => {
                debug!(sku = %candidate.source_sku, origin = %candidate.origin, "无法解析类目，剔除");
                return Err(DropReason::UnresolvedCategory);
            }
        };

        let slug = match ctx.slugs.get(&resolved.category_id) {
            Some(slug) => *slug,
            None => {
                debug!(
                    sku = %candidate.source_sku,
                    category_id = resolved.category_id,
                    rule = %resolved.rule,
                    "类目不存在，剔除"
                );
                return Err(DropReason::UnknownCategory {
                    category_id: resolved.category_id,
                });
            }
        };

        let local = ctx.images.resolve(candidate.source_sku);
        let local_images = !local.is_empty();
        let brand = ctx.sources.brands.get(candidate.key).map(String::as_str);
        let fields = self
            .policy
            .merge(candidate.pricelist, candidate.db, brand, local);

        Ok(Emitted {
            product: CanonicalProduct {
                id: 0,
                sku: candidate.source_sku.to_string(),
                name_lv: fields.name_lv,
                name_en: fields.name_en,
                description_lv: fields.description_lv,
                price: fields.price,
                category_id: resolved.category_id,
                category_slug: slug.to_string(),
                brand: fields.brand,
                ean: fields.ean,
                images: fields.images,
            },
            rule: resolved.rule,
            local_images,
        })
    }
}

// ==========================================
// 商品目录对账导出 - 导出API
// ==========================================
// 流程: 加载全部数据源 → 合并 → 校验 → 写出（可选报告）
// 红线: 任一数据源加载失败或校验失败 → 中止，不写任何文件
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::CatalogConfig;
use crate::domain::CatalogSources;
use crate::engine::{CatalogReconciler, CatalogValidator, ReconcileOutcome};
use crate::export::{CatalogWriter, ExportReport, JsonCatalogWriter, WrittenFiles};
use crate::importer::{
    BrandFile, BrandSource, CategorySource, DbProductSource, DbSource, ImageResolver,
    LocalImageResolver, PricelistFile, PricelistSource,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, instrument};

/// 导出选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// 仅合并 + 校验，不写文件
    pub dry_run: bool,
    /// 额外写出 export_report.json
    pub write_report: bool,
}

/// 导出结果
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub report: ExportReport,
    /// dry-run 时为 None
    pub written: Option<WrittenFiles>,
    pub report_path: Option<PathBuf>,
    pub elapsed_ms: u128,
}

// ==========================================
// ExportApi
// ==========================================
pub struct ExportApi {
    config: CatalogConfig,
    reconciler: CatalogReconciler,
    validator: CatalogValidator,
}

impl ExportApi {
    /// # 参数
    /// - config: 已校验的配置（见 ConfigManager）
    pub fn new(config: CatalogConfig) -> Self {
        let reconciler = CatalogReconciler::from_config(&config);
        Self {
            config,
            reconciler,
            validator: CatalogValidator::new(),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// 按配置加载全部数据源
    pub fn load_sources(&self) -> ApiResult<CatalogSources> {
        let sources = &self.config.sources;
        let db = DbSource::new(&sources.db_path);
        let pricelist = PricelistFile::new(
            &sources.pricelist_path,
            sources.pricelist_sheet.clone(),
            sources.pricelist_columns,
        );
        let brands = BrandFile::new(
            &sources.brands_path,
            sources.brands_sheet.clone(),
            sources.brand_columns,
        );

        Self::load_sources_with(&db, &db, &pricelist, &brands)
    }

    /// 从任意数据源实现加载（全部成功才返回）
    pub fn load_sources_with(
        categories: &dyn CategorySource,
        db_products: &dyn DbProductSource,
        pricelist: &dyn PricelistSource,
        brands: &dyn BrandSource,
    ) -> ApiResult<CatalogSources> {
        let sources = CatalogSources {
            categories: categories.load_categories()?,
            db_products: db_products.load_db_products()?,
            pricelist: pricelist.load_pricelist()?,
            brands: brands.load_brands()?,
        };

        info!(
            categories = sources.categories.len(),
            db_products = sources.db_products.len(),
            pricelist_rows = sources.pricelist.len(),
            brands = sources.brands.len(),
            "数据源加载完成"
        );
        Ok(sources)
    }

    /// 合并并校验
    pub fn build(
        &self,
        sources: &CatalogSources,
        images: &dyn ImageResolver,
    ) -> ApiResult<ReconcileOutcome> {
        let outcome = self.reconciler.reconcile(sources, images);

        let violations = self.validator.validate(&outcome.catalog);
        if !violations.is_empty() {
            return Err(ApiError::ValidationFailed { violations });
        }

        Ok(outcome)
    }

    /// 完整导出（使用配置中的数据源、图片目录与输出目录）
    #[instrument(skip(self))]
    pub fn export(&self, options: ExportOptions) -> ApiResult<ExportSummary> {
        let sources = self.load_sources()?;
        let images = LocalImageResolver::from_config(&self.config.images);
        let writer = JsonCatalogWriter::new(&self.config.output.dir);

        self.export_with(&sources, images.as_ref(), &writer, options)
    }

    /// 以给定数据源 / 图片解析 / 写出器执行导出
    pub fn export_with(
        &self,
        sources: &CatalogSources,
        images: &dyn ImageResolver,
        writer: &dyn CatalogWriter,
        options: ExportOptions,
    ) -> ApiResult<ExportSummary> {
        let started = Instant::now();

        let outcome = self.build(sources, images)?;
        let report = ExportReport::new(sources, &outcome, options.dry_run);

        let (written, report_path) = if options.dry_run {
            info!("dry-run: 跳过写出");
            (None, None)
        } else {
            let written = writer.write_catalog(&outcome.catalog)?;
            let report_path = if options.write_report {
                Some(writer.write_report(&report)?)
            } else {
                None
            };
            (Some(written), report_path)
        };

        let elapsed_ms = started.elapsed().as_millis();
        info!(
            run_id = %report.run_id,
            products = report.products_written,
            elapsed_ms = elapsed_ms as u64,
            "导出完成"
        );

        Ok(ExportSummary {
            report,
            written,
            report_path,
            elapsed_ms,
        })
    }
}

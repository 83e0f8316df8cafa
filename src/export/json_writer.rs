// ==========================================
// 商品目录对账导出 - JSON 目录写出
// ==========================================
// 产物: categories.json / products.json（可选 export_report.json）
// 格式: UTF-8，非 ASCII 原样输出，两空格缩进
// 红线: 先写 .tmp 再 rename，失败不留半截文件
// ==========================================

use crate::domain::Catalog;
use crate::export::error::{ExportError, ExportResult};
use crate::export::report::ExportReport;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CATEGORIES_FILE: &str = "categories.json";
pub const PRODUCTS_FILE: &str = "products.json";
pub const REPORT_FILE: &str = "export_report.json";

/// 已写出的目录文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub categories: PathBuf,
    pub products: PathBuf,
}

// ==========================================
// CatalogWriter Trait
// ==========================================
pub trait CatalogWriter {
    fn write_catalog(&self, catalog: &Catalog) -> ExportResult<WrittenFiles>;

    fn write_report(&self, report: &ExportReport) -> ExportResult<PathBuf>;
}

// ==========================================
// JsonCatalogWriter
// ==========================================
pub struct JsonCatalogWriter {
    output_dir: PathBuf,
}

impl JsonCatalogWriter {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn ensure_dir(&self) -> ExportResult<()> {
        fs::create_dir_all(&self.output_dir).map_err(|e| ExportError::OutputDirError {
            path: self.output_dir.clone(),
            message: e.to_string(),
        })
    }

    /// 序列化并写入 .tmp 旁路文件；失败时清理 .tmp
    fn stage<T: Serialize + ?Sized>(&self, file_name: &str, value: &T) -> ExportResult<StagedFile> {
        let staged = StagedFile {
            tmp: self.output_dir.join(format!("{}.tmp", file_name)),
            target: self.output_dir.join(file_name),
        };
        let body = serde_json::to_string_pretty(value)?;

        if let Err(e) = fs::write(&staged.tmp, body.as_bytes()) {
            staged.discard();
            return Err(write_error(&staged.tmp, e));
        }

        debug!(path = %staged.tmp.display(), bytes = body.len(), "临时文件已写入");
        Ok(staged)
    }

    /// 全部 .tmp 就绪后才依次替换目标文件
    fn commit(staged: Vec<StagedFile>) -> ExportResult<()> {
        let mut pending = staged.into_iter();

        while let Some(file) = pending.next() {
            if let Err(e) = fs::rename(&file.tmp, &file.target) {
                file.discard();
                pending.for_each(|rest| rest.discard());
                return Err(write_error(&file.target, e));
            }
        }

        Ok(())
    }
}

// 待替换的 .tmp 文件
struct StagedFile {
    tmp: PathBuf,
    target: PathBuf,
}

impl StagedFile {
    fn discard(&self) {
        if self.tmp.is_file() {
            let _ = fs::remove_file(&self.tmp);
        }
    }
}

fn write_error(path: &Path, e: std::io::Error) -> ExportError {
    ExportError::WriteError {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

impl CatalogWriter for JsonCatalogWriter {
    fn write_catalog(&self, catalog: &Catalog) -> ExportResult<WrittenFiles> {
        self.ensure_dir()?;

        // 两个文件都写好 .tmp 之后再替换，避免新类目配旧商品
        let categories = self.stage(CATEGORIES_FILE, &catalog.categories)?;
        let products = match self.stage(PRODUCTS_FILE, &catalog.products) {
            Ok(staged) => staged,
            Err(e) => {
                categories.discard();
                return Err(e);
            }
        };

        let written = WrittenFiles {
            categories: categories.target.clone(),
            products: products.target.clone(),
        };
        Self::commit(vec![categories, products])?;

        info!(
            output_dir = %self.output_dir.display(),
            categories = catalog.categories.len(),
            products = catalog.products.len(),
            "目录已写出"
        );

        Ok(written)
    }

    fn write_report(&self, report: &ExportReport) -> ExportResult<PathBuf> {
        self.ensure_dir()?;
        let staged = self.stage(REPORT_FILE, report)?;
        let path = staged.target.clone();
        Self::commit(vec![staged])?;
        info!(path = %path.display(), run_id = %report.run_id, "导出报告已写出");
        Ok(path)
    }
}

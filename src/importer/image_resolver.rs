// ==========================================
// 商品目录对账导出 - 本地图片解析
// ==========================================
// 目录结构: <local_dir>/<SKU>/<文件名>
// 输出格式: <url_prefix>/<SKU>/<文件名>（按文件名排序）
// ==========================================

use crate::config::ImagesConfig;
use crate::importer::source_traits::ImageResolver;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::warn;

// ==========================================
// LocalImageResolver
// ==========================================
pub struct LocalImageResolver {
    root: PathBuf,
    url_prefix: String,
    extensions: Vec<String>,
}

impl LocalImageResolver {
    pub fn new<P: AsRef<Path>>(root: P, url_prefix: &str, extensions: &[String]) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
            extensions: extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    /// 按配置创建；未配置本地目录时返回 NoLocalImages
    pub fn from_config(config: &ImagesConfig) -> Box<dyn ImageResolver> {
        match &config.local_dir {
            Some(dir) => Box::new(Self::new(dir, &config.url_prefix, &config.extensions)),
            None => Box::new(NoLocalImages),
        }
    }

    fn is_image(&self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.contains(&e.to_lowercase()))
            .unwrap_or(false)
    }
}

impl ImageResolver for LocalImageResolver {
    fn resolve(&self, sku: &str) -> Vec<String> {
        if !stays_under_root(sku) {
            warn!(sku = %sku, "SKU 含非法路径成分，跳过本地图片");
            return Vec::new();
        }

        let sku_dir = self.root.join(sku);
        if !sku_dir.is_dir() {
            return Vec::new();
        }

        let entries = match fs::read_dir(&sku_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %sku_dir.display(), error = %e, "图片目录不可读，忽略");
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| self.is_image(name))
            .collect();
        names.sort();

        names
            .into_iter()
            .map(|name| format!("{}/{}/{}", self.url_prefix, sku, name))
            .collect()
    }
}

/// SKU 只能由普通路径段组成（允许 "E355/B" 这类嵌套）
fn stays_under_root(sku: &str) -> bool {
    let path = Path::new(sku);
    path.components().next().is_some()
        && path.components().all(|c| matches!(c, Component::Normal(_)))
}

// ==========================================
// NoLocalImages - 不使用本地图片
// ==========================================
pub struct NoLocalImages;

impl ImageResolver for NoLocalImages {
    fn resolve(&self, _sku: &str) -> Vec<String> {
        Vec::new()
    }
}

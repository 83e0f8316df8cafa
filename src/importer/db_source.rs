// ==========================================
// 商品目录对账导出 - 数据库数据源
// ==========================================
// 表: categories / products / product_images
// 职责: 类目加载 + 商品片段加载（含远程图片 URL）
// ==========================================

use crate::db::{open_readonly_connection, table_exists};
use crate::domain::{normalize_sku, Category, CategoryId, DbProductRecord};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::source_traits::{CategorySource, DbProductSource};
use rusqlite::types::Value;
use rusqlite::Connection;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const REQUIRED_TABLES: [&str; 3] = ["categories", "products", "product_images"];

// ==========================================
// DbSource - SQLite 商品库
// ==========================================
pub struct DbSource {
    db_path: PathBuf,
    cleaner: DataCleaner,
}

impl DbSource {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
            cleaner: DataCleaner,
        }
    }

    /// 打开只读连接并确认所需表齐全
    fn connect(&self) -> ImportResult<Connection> {
        if !self.db_path.exists() {
            return Err(ImportError::FileNotFound(self.db_path.display().to_string()));
        }

        let conn = open_readonly_connection(&self.db_path)
            .map_err(|e| ImportError::DatabaseConnectionError(e.to_string()))?;

        for table in REQUIRED_TABLES {
            if !table_exists(&conn, table)? {
                return Err(ImportError::MissingTable(table.to_string()));
            }
        }

        Ok(conn)
    }

    /// 价格列可能是 REAL/INTEGER/TEXT，TEXT 需解析
    fn price_of(&self, value: Value, sku: &str) -> Option<f64> {
        match value {
            Value::Real(v) => Some(v),
            Value::Integer(v) => Some(v as f64),
            Value::Text(raw) => match self.cleaner.parse_price(&raw, 0, "products.price") {
                Ok(price) => price,
                Err(e) => {
                    warn!(sku = %sku, error = %e, "数据库价格无法解析，按缺失处理");
                    None
                }
            },
            _ => None,
        }
    }
}

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::Text(v) => Some(v),
        Value::Integer(v) => Some(v.to_string()),
        Value::Real(v) => Some(v.to_string()),
        _ => None,
    }
}

fn category_id_of(value: Value) -> Option<CategoryId> {
    match value {
        Value::Integer(v) => Some(v),
        Value::Text(v) => v.trim().parse::<CategoryId>().ok(),
        _ => None,
    }
}

impl CategorySource for DbSource {
    fn load_categories(&self) -> ImportResult<Vec<Category>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, name_en, name_lv, slug, sort_order FROM categories ORDER BY sort_order",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, CategoryId>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<i64>>(4)?,
            ))
        })?;

        let mut categories = Vec::new();
        for row in rows {
            let (id, name_en, name_lv, slug, sort_order) = row?;
            let sort_order = sort_order.unwrap_or_else(|| {
                warn!(category_id = id, "类目缺少 sort_order，使用 ID 作为编号");
                id
            });

            categories.push(Category {
                id,
                number: Category::format_number(sort_order),
                name_en: name_en.unwrap_or_default(),
                name_lv: name_lv.unwrap_or_default(),
                slug: slug.unwrap_or_default(),
                product_count: 0,
            });
        }

        info!(count = categories.len(), "数据库类目加载完成");
        Ok(categories)
    }
}

impl DbProductSource for DbSource {
    fn load_db_products(&self) -> ImportResult<BTreeMap<String, DbProductRecord>> {
        let conn = self.connect()?;

        // === 商品 ===
        let mut stmt = conn.prepare(
            "SELECT p.id, p.sku, p.name_lv, p.description_lv, p.price, p.category_id
             FROM products p
             ORDER BY p.sku",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, Value>(1)?,
                row.get::<_, Value>(2)?,
                row.get::<_, Value>(3)?,
                row.get::<_, Value>(4)?,
                row.get::<_, Value>(5)?,
            ))
        })?;

        let mut products = BTreeMap::new();
        for row in rows {
            let (sku, name_lv, description_lv, price, category_id) = row?;
            let sku = match text_of(sku).filter(|s| !s.trim().is_empty()) {
                Some(s) => s,
                None => continue,
            };

            let record = DbProductRecord {
                price: self.price_of(price, &sku),
                name_lv: text_of(name_lv),
                description_lv: text_of(description_lv),
                category_id: category_id_of(category_id),
                images: Vec::new(),
                sku,
            };

            // 同一规范化 SKU 多行时后者覆盖
            if let Some(previous) = products.insert(normalize_sku(&record.sku), record) {
                debug!(sku = %previous.sku, "数据库存在重复 SKU，后一行覆盖");
            }
        }

        // === 远程图片 ===
        let mut stmt = conn.prepare(
            "SELECT p.sku, pi.image_url, pi.sort_order
             FROM product_images pi
             JOIN products p ON pi.product_id = p.id
             ORDER BY p.sku, pi.sort_order",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, Value>(0)?, row.get::<_, Value>(1)?))
        })?;

        let mut image_count = 0usize;
        for row in rows {
            let (sku, url) = row?;
            let (sku, url) = match (text_of(sku), text_of(url)) {
                (Some(sku), Some(url)) if !url.trim().is_empty() => (sku, url),
                _ => continue,
            };
            if let Some(product) = products.get_mut(&normalize_sku(&sku)) {
                product.images.push(url);
                image_count += 1;
            }
        }

        info!(
            products = products.len(),
            images = image_count,
            "数据库商品加载完成"
        );
        Ok(products)
    }
}

// ==========================================
// 商品目录对账导出 - 字段映射器实现
// ==========================================
// 职责: 原始行（按列位置）→ 价目表片段 / 品牌映射
// 降级: 单字段无法解析 → 记 warn，字段置空，整行保留
// ==========================================

use crate::config::{BrandColumns, PricelistColumns};
use crate::domain::PricelistRecord;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::file_parser::RawRow;
use tracing::warn;

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 映射价目表行
    ///
    /// # 返回
    /// - Some(PricelistRecord): 映射结果
    /// - None: SKU 为空（该行不是商品行）
    pub fn map_pricelist_row(
        &self,
        row: &RawRow,
        columns: &PricelistColumns,
    ) -> Option<PricelistRecord> {
        let sku = self.cleaner.clean_sku(self.get_string(row, columns.sku))?;

        let price = match row.cell(columns.price) {
            None => None,
            Some(raw) => match self.cleaner.parse_price(raw, row.row_number, "price") {
                Ok(price) => price,
                Err(e) => {
                    warn!(row_number = row.row_number, sku = %sku, error = %e, "价格无法解析，按缺失处理");
                    None
                }
            },
        };

        Some(PricelistRecord {
            sku,
            name_lv: self.get_string(row, columns.name_lv),
            name_en: self.get_string(row, columns.name_en),
            price,
            ean: self.get_string(row, columns.ean),
            chapter: self
                .cleaner
                .normalize_chapter(self.get_string(row, columns.chapter)),
            row_number: row.row_number,
        })
    }

    /// 映射品牌行
    ///
    /// # 返回
    /// - Some((规范化 SKU, 品牌名))
    /// - None: SKU 或品牌为空
    pub fn map_brand_row(&self, row: &RawRow, columns: &BrandColumns) -> Option<(String, String)> {
        let sku = self.get_string(row, columns.sku)?;
        let brand = self.get_string(row, columns.brand)?;
        Some((self.cleaner.sku_key(&sku), brand))
    }

    /// 提取字符串字段（TRIM，空 → None）
    fn get_string(&self, row: &RawRow, index: usize) -> Option<String> {
        row.cell(index).map(|v| v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> RawRow {
        RawRow {
            row_number: 5,
            cells: cells.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_map_pricelist_row_default_layout() {
        let mapper = FieldMapper::new();
        let columns = PricelistColumns::default();
        let record = mapper
            .map_pricelist_row(
                &row(&[" E341 ", "Disks", "Disc", "8", "x", "12,5", "y", "4006540022223"]),
                &columns,
            )
            .unwrap();

        assert_eq!(record.sku, "E341");
        assert_eq!(record.name_lv.as_deref(), Some("Disks"));
        assert_eq!(record.name_en.as_deref(), Some("Disc"));
        assert_eq!(record.chapter.as_deref(), Some("08"));
        assert_eq!(record.price, Some(12.5));
        assert_eq!(record.ean.as_deref(), Some("4006540022223"));
        assert_eq!(record.row_number, 5);
    }

    #[test]
    fn test_map_pricelist_row_without_sku_is_skipped() {
        let mapper = FieldMapper::new();
        assert!(mapper
            .map_pricelist_row(&row(&["  ", "Disks"]), &PricelistColumns::default())
            .is_none());
    }

    #[test]
    fn test_malformed_price_keeps_record() {
        let mapper = FieldMapper::new();
        let record = mapper
            .map_pricelist_row(
                &row(&["B507", "", "Clipper", "03", "", "n/a"]),
                &PricelistColumns::default(),
            )
            .unwrap();

        assert_eq!(record.price, None);
        assert_eq!(record.name_lv, None);
        assert_eq!(record.name_en.as_deref(), Some("Clipper"));
        assert_eq!(record.ean, None);
    }

    #[test]
    fn test_map_brand_row() {
        let mapper = FieldMapper::new();
        let columns = BrandColumns::default();
        assert_eq!(
            mapper.map_brand_row(&row(&[" e341 ", " Kiepe "]), &columns),
            Some(("E341".to_string(), "Kiepe".to_string()))
        );
        assert_eq!(mapper.map_brand_row(&row(&["E341", ""]), &columns), None);
    }
}

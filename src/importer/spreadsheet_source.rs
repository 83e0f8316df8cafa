// ==========================================
// 商品目录对账导出 - 表格数据源
// ==========================================
// PricelistFile: 价目表（英文名/价格/EAN/章节）
// BrandFile: 品牌映射表（SKU → 品牌）
// ==========================================

use crate::config::{BrandColumns, PricelistColumns};
use crate::domain::PricelistRecord;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::source_traits::{BrandSource, FileParser, PricelistSource};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

// ==========================================
// PricelistFile
// ==========================================
pub struct PricelistFile {
    path: PathBuf,
    sheet: Option<String>,
    columns: PricelistColumns,
    parser: Box<dyn FileParser>,
    mapper: FieldMapper,
}

impl PricelistFile {
    pub fn new<P: AsRef<Path>>(path: P, sheet: Option<String>, columns: PricelistColumns) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            sheet,
            columns,
            parser: Box::new(UniversalFileParser),
            mapper: FieldMapper::new(),
        }
    }
}

impl PricelistSource for PricelistFile {
    fn load_pricelist(&self) -> ImportResult<Vec<PricelistRecord>> {
        let rows = self
            .parser
            .parse_to_raw_rows(&self.path, self.sheet.as_deref())?;
        let total_rows = rows.len();

        let records: Vec<PricelistRecord> = rows
            .iter()
            .filter_map(|row| self.mapper.map_pricelist_row(row, &self.columns))
            .collect();

        info!(
            file = %self.path.display(),
            rows = total_rows,
            records = records.len(),
            "价目表加载完成"
        );
        Ok(records)
    }
}

// ==========================================
// BrandFile
// ==========================================
pub struct BrandFile {
    path: PathBuf,
    sheet: Option<String>,
    columns: BrandColumns,
    parser: Box<dyn FileParser>,
    mapper: FieldMapper,
}

impl BrandFile {
    pub fn new<P: AsRef<Path>>(path: P, sheet: Option<String>, columns: BrandColumns) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            sheet,
            columns,
            parser: Box::new(UniversalFileParser),
            mapper: FieldMapper::new(),
        }
    }
}

impl BrandSource for BrandFile {
    fn load_brands(&self) -> ImportResult<HashMap<String, String>> {
        let rows = self
            .parser
            .parse_to_raw_rows(&self.path, self.sheet.as_deref())?;

        // 重复 SKU 时后一行覆盖
        let brands: HashMap<String, String> = rows
            .iter()
            .filter_map(|row| self.mapper.map_brand_row(row, &self.columns))
            .collect();

        info!(file = %self.path.display(), brands = brands.len(), "品牌映射加载完成");
        Ok(brands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::error::ImportError;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_pricelist_from_csv() {
        let file = csv_file(
            "CODE,LV,EN,CHAPTER,X,PRICE,Y,EAN\n\
             E341,Nav atrasts,Pedicure disc,8,,2.5,,4006540022223\n\
             ,orphan,,,,,,\n\
             B507,,Clipper,3,,19.9,,\n",
        );

        let source = PricelistFile::new(file.path(), None, PricelistColumns::default());
        let records = source.load_pricelist().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sku, "E341");
        assert_eq!(records[0].chapter.as_deref(), Some("08"));
        // 占位值保持原样，由合并策略判定
        assert_eq!(records[0].name_lv.as_deref(), Some("Nav atrasts"));
        assert_eq!(records[1].price, Some(19.9));
        assert_eq!(records[1].row_number, 4);
    }

    #[test]
    fn test_load_brands_last_row_wins() {
        let file = csv_file("SKU,BRAND\ne341,Kiepe\nB507,\nE341,Sibel\n");

        let brands = BrandFile::new(file.path(), None, BrandColumns::default())
            .load_brands()
            .unwrap();

        assert_eq!(brands.len(), 1);
        assert_eq!(brands["E341"], "Sibel");
    }

    #[test]
    fn test_missing_pricelist_is_fatal() {
        let source = PricelistFile::new("missing.xlsx", Some("Verifica".into()), PricelistColumns::default());
        assert!(matches!(
            source.load_pricelist(),
            Err(ImportError::FileNotFound(_))
        ));
    }
}

// ==========================================
// Excel 数据源集成测试
// ==========================================
// 测试目标: 默认配置下经 .xlsx 工作表加载价目表与品牌表
// ==========================================


use catalog_export::api::{ApiError, ExportApi, ExportOptions};
use catalog_export::config::PricelistColumns;
use catalog_export::export::PRODUCTS_FILE;
use catalog_export::importer::{ImportError, PricelistFile, PricelistSource};
use test_helpers::{create_xlsx_fixture, find_product, read_json};

#[test]
fn test_pricelist_xlsx_numeric_cells() {
    let fixture = create_xlsx_fixture().expect("创建测试数据失败");
    let source = PricelistFile::new(
        &fixture.pricelist_path,
        Some("Verifica".to_string()),
        PricelistColumns::default(),
    );

    let records = source.load_pricelist().expect("价目表加载失败");
    assert_eq!(records.len(), 3);

    let disc = &records[0];
    assert_eq!(disc.sku, "E341");
    assert_eq!(disc.chapter.as_deref(), Some("08"));
    assert_eq!(disc.price, Some(2.5));
    assert_eq!(disc.ean.as_deref(), Some("4006540022223"));
    assert_eq!(disc.row_number, 2);
}

#[test]
fn test_missing_sheet_aborts_export() {
    let fixture = create_xlsx_fixture().expect("创建测试数据失败");
    let mut config = fixture.config();
    config.sources.pricelist_sheet = Some("Verifikacija".to_string());

    let result = ExportApi::new(config).export(ExportOptions::default());
    assert!(matches!(
        result,
        Err(ApiError::Import(ImportError::SheetNotFound { .. }))
    ));
    assert!(!fixture.output_dir.join(PRODUCTS_FILE).exists());
}

#[test]
fn test_export_from_xlsx_sources() {
    let fixture = create_xlsx_fixture().expect("创建测试数据失败");
    let summary = ExportApi::new(fixture.config())
        .export(ExportOptions::default())
        .expect("导出失败");
    assert_eq!(summary.report.products_written, 3);

    let products = read_json(&fixture.output_dir.join(PRODUCTS_FILE));
    let disc = find_product(&products, "E341").unwrap();
    assert_eq!(disc["categoryId"], 15);
    assert_eq!(disc["ean"], "4006540022223");
    assert_eq!(disc["price"], 2.5);

    let dye = find_product(&products, "B900").unwrap();
    assert_eq!(dye["categoryId"], 9);
    assert_eq!(dye["brand"], "Sibel");
    assert!(find_product(&products, "X777").is_none());
}

// ==========================================
// 导出流程端到端测试
// ==========================================
// 测试目标: 配置 → 数据源加载 → 合并 → 校验 → 写出
// ==========================================


use catalog_export::api::{ApiError, ExportApi, ExportOptions};
use catalog_export::config::ConfigManager;
use catalog_export::export::{CATEGORIES_FILE, PRODUCTS_FILE, REPORT_FILE};
use catalog_export::importer::ImportError;
use catalog_export::logging;
use std::fs;
use test_helpers::{create_fixture, find_product, read_json};

fn run_export(api: &ExportApi) -> catalog_export::api::ExportSummary {
    api.export(ExportOptions {
        dry_run: false,
        write_report: true,
    })
    .expect("导出失败")
}

#[test]
fn test_export_writes_both_files() {
    logging::init_test();
    let fixture = create_fixture().expect("创建测试数据失败");
    let api = ExportApi::new(fixture.config());

    let summary = run_export(&api);

    assert!(fixture.output_dir.join(CATEGORIES_FILE).exists());
    assert!(fixture.output_dir.join(PRODUCTS_FILE).exists());
    assert!(fixture.output_dir.join(REPORT_FILE).exists());
    assert_eq!(summary.report.products_written, 3);
    assert_eq!(summary.report.categories_written, 4);
    assert_eq!(summary.report.stats.dropped.len(), 2);
}

#[test]
fn test_categories_sorted_and_counted() {
    let fixture = create_fixture().expect("创建测试数据失败");
    run_export(&ExportApi::new(fixture.config()));

    let categories = read_json(&fixture.output_dir.join(CATEGORIES_FILE));
    let numbers: Vec<&str> = categories
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["number"].as_str().unwrap())
        .collect();
    assert_eq!(numbers, vec!["01", "08", "14", "20"]);

    let counts: Vec<u64> = categories
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["productCount"].as_u64().unwrap())
        .collect();
    assert_eq!(counts, vec![0, 1, 1, 1]);

    let products = read_json(&fixture.output_dir.join(PRODUCTS_FILE));
    assert_eq!(
        counts.iter().sum::<u64>() as usize,
        products.as_array().unwrap().len()
    );
}

#[test]
fn test_override_beats_chapter() {
    let fixture = create_fixture().expect("创建测试数据失败");
    run_export(&ExportApi::new(fixture.config()));

    let products = read_json(&fixture.output_dir.join(PRODUCTS_FILE));
    let disc = find_product(&products, "E341").expect("E341 缺失");
    assert_eq!(disc["categoryId"], 15);
    assert_eq!(disc["categorySlug"], "pedikirs");
    assert_eq!(disc["name_lv"], "Pedikīra disks");
    assert_eq!(disc["name_en"], "Pedicure disc");
    assert_eq!(disc["price"], 2.5);
    assert_eq!(disc["ean"], "4006540022223");
}

#[test]
fn test_local_images_beat_db_urls() {
    let fixture = create_fixture().expect("创建测试数据失败");
    run_export(&ExportApi::new(fixture.config()));

    let products = read_json(&fixture.output_dir.join(PRODUCTS_FILE));
    let disc = find_product(&products, "E341").unwrap();
    assert_eq!(
        disc["images"],
        serde_json::json!(["/images/products/E341/A.jpg", "/images/products/E341/B.png"])
    );

    // 无本地图片 → 数据库 URL（按 sort_order）
    let gloves = find_product(&products, "G100").unwrap();
    assert_eq!(
        gloves["images"],
        serde_json::json!(["http://x/g100-1.jpg", "http://x/g100-2.jpg"])
    );
}

#[test]
fn test_db_only_product_has_empty_pricelist_fields() {
    let fixture = create_fixture().expect("创建测试数据失败");
    run_export(&ExportApi::new(fixture.config()));

    let products = read_json(&fixture.output_dir.join(PRODUCTS_FILE));
    let gloves = find_product(&products, "G100").expect("G100 缺失");
    assert_eq!(gloves["categoryId"], 11);
    assert_eq!(gloves["name_en"], "");
    assert_eq!(gloves["ean"], "");
    assert_eq!(gloves["brand"], "");
    assert_eq!(gloves["price"], 4.2);
}

#[test]
fn test_unresolvable_products_absent() {
    let fixture = create_fixture().expect("创建测试数据失败");
    run_export(&ExportApi::new(fixture.config()));

    let products = read_json(&fixture.output_dir.join(PRODUCTS_FILE));
    assert!(find_product(&products, "X777").is_none());
    assert!(find_product(&products, "ORPHAN").is_none());
}

#[test]
fn test_brand_and_ids() {
    let fixture = create_fixture().expect("创建测试数据失败");
    run_export(&ExportApi::new(fixture.config()));

    let products = read_json(&fixture.output_dir.join(PRODUCTS_FILE));
    let dye = find_product(&products, "B900").unwrap();
    assert_eq!(dye["brand"], "Sibel");
    assert_eq!(dye["categoryId"], 9);
    assert_eq!(dye["price"], 6.9);
    assert_eq!(dye["description_lv"], "");

    let skus: Vec<(u64, &str)> = products
        .as_array()
        .unwrap()
        .iter()
        .map(|p| (p["id"].as_u64().unwrap(), p["sku"].as_str().unwrap()))
        .collect();
    assert_eq!(skus, vec![(1, "B900"), (2, "G100"), (3, "E341")]);
}

#[test]
fn test_two_runs_are_byte_identical() {
    let fixture = create_fixture().expect("创建测试数据失败");
    let api = ExportApi::new(fixture.config());

    run_export(&api);
    let categories_a = fs::read(fixture.output_dir.join(CATEGORIES_FILE)).unwrap();
    let products_a = fs::read(fixture.output_dir.join(PRODUCTS_FILE)).unwrap();

    run_export(&api);
    let categories_b = fs::read(fixture.output_dir.join(CATEGORIES_FILE)).unwrap();
    let products_b = fs::read(fixture.output_dir.join(PRODUCTS_FILE)).unwrap();

    assert_eq!(categories_a, categories_b);
    assert_eq!(products_a, products_b);
}

#[test]
fn test_non_ascii_written_literally() {
    let fixture = create_fixture().expect("创建测试数据失败");
    run_export(&ExportApi::new(fixture.config()));

    let text = fs::read_to_string(fixture.output_dir.join(CATEGORIES_FILE)).unwrap();
    assert!(text.contains("Krāsošana"));
    assert!(!text.contains("\\u"));
    assert!(text.starts_with("[\n  {\n"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let fixture = create_fixture().expect("创建测试数据失败");
    let api = ExportApi::new(fixture.config());

    let summary = api
        .export(ExportOptions {
            dry_run: true,
            write_report: true,
        })
        .unwrap();

    assert!(summary.written.is_none());
    assert!(!fixture.output_dir.exists());
}

#[test]
fn test_missing_source_aborts_before_write() {
    let fixture = create_fixture().expect("创建测试数据失败");
    let mut config = fixture.config();
    config.sources.brands_path = fixture.dir.path().join("missing.xlsx");
    let api = ExportApi::new(config);

    let result = api.export(ExportOptions::default());
    assert!(matches!(
        result,
        Err(ApiError::Import(ImportError::FileNotFound(_)))
    ));
    assert!(!fixture.output_dir.exists());
}

#[test]
fn test_config_file_round_trip_through_manager() {
    let fixture = create_fixture().expect("创建测试数据失败");
    let path = fixture.dir.path().join("catalog.json");
    fs::write(&path, serde_json::to_string_pretty(&fixture.config()).unwrap()).unwrap();

    let manager = ConfigManager::from_file(&path).expect("配置加载失败");
    let api = ExportApi::new(manager.into_config());
    let summary = run_export(&api);
    assert_eq!(summary.report.products_written, 3);
}

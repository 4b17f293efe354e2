// ==========================================
// 合成数据生成器集成测试
// ==========================================
// 测试范围:
// 1. 种子可复现
// 2. 产物写出 → 读回一致
// 3. 故意注入的异常（重复、负销量、稀疏覆盖）保留在产物中
// ==========================================


use retail_demand_analytics::domain::artifact::TabularArtifact;
use retail_demand_analytics::domain::PosSaleRow;
use retail_demand_analytics::generator::{
    default_products, default_seasonality, generate_catalog, ArtifactWriter, GeneratorError,
    SeriesGenerator,
};
use retail_demand_analytics::importer::ArtifactReader;
use test_helpers::{small_generator_config, TestDataDir};

#[test]
fn test_same_seed_same_dataset_可复现() {
    let products = default_products();

    let mut a = SeriesGenerator::new(small_generator_config(7)).expect("配置无效");
    let mut b = SeriesGenerator::new(small_generator_config(7)).expect("配置无效");
    let first = a.generate_dataset(&products, default_seasonality);
    let second = b.generate_dataset(&products, default_seasonality);
    assert_eq!(first, second, "相同种子应生成完全相同的数据集");

    let mut c = SeriesGenerator::new(small_generator_config(8)).expect("配置无效");
    let third = c.generate_dataset(&products, default_seasonality);
    assert_ne!(first.pos, third.pos, "不同种子应生成不同的 POS 序列");
}

#[test]
fn test_catalog_pack_sizes_and_legacy_flag() {
    let catalog = generate_catalog();
    assert_eq!(catalog.len(), 5);

    let ipa = catalog.iter().find(|e| e.sku == "BEER_IPA_4PK").expect("缺少 IPA");
    assert_eq!(ipa.pack_size, "4PK");
    assert!(ipa.active_flag);

    let legacy = catalog.iter().find(|e| e.sku == "UNKNOWN_SKU_999").expect("缺少停产产品");
    assert_eq!(legacy.pack_size, "4PK");
    assert_eq!(legacy.category, "Legacy");
    assert!(!legacy.active_flag);

    assert!(catalog.iter().filter(|e| e.sku.contains("6PK")).all(|e| e.pack_size == "6PK"));
}

#[test]
fn test_pos_series_keeps_injected_anomalies() {
    let mut generator = SeriesGenerator::new(small_generator_config(42)).expect("配置无效");
    let products = default_products();
    let stores = generator.config().stores.clone();
    let pos = generator.generate_pos_series(14, &stores, &products, default_seasonality);

    // 0 销量行全部丢弃
    assert!(pos.iter().all(|r| r.units_sold != 0));

    // 前 20 行在末尾重复出现
    let n = pos.len();
    assert!(n > 40);
    assert_eq!(pos[..20], pos[n - 20..]);

    // 促销行价格为原价的 8 折
    for row in pos.iter().filter(|r| r.promo_flag) {
        let base = products
            .iter()
            .find(|p| p.sku == row.sku)
            .expect("未知产品")
            .base_price;
        assert!((row.unit_price - (base * 0.8 * 100.0).round() / 100.0).abs() < 1e-9);
    }
}

#[test]
fn test_ecommerce_series_excludes_legacy() {
    let mut generator = SeriesGenerator::new(small_generator_config(42)).expect("配置无效");
    let ecom = generator.generate_ecommerce_series(30, &default_products());

    assert!(!ecom.is_empty());
    assert!(ecom.iter().all(|r| r.sku != "UNKNOWN_SKU_999"));
    assert!(ecom.iter().all(|r| (1..=20).contains(&r.units_sold)));
    // 30 天 × 4 个产品,按 0.7 抽样
    assert!(ecom.len() <= 120);
}

#[test]
fn test_written_dataset_reads_back_identically() {
    let dir = TestDataDir::new();
    let mut generator = SeriesGenerator::new(small_generator_config(3)).expect("配置无效");
    let dataset = generator.generate_dataset(&default_products(), default_seasonality);

    let writer = ArtifactWriter::create(&dir.paths.raw_dir).expect("无法创建原始目录");
    let summary = writer.write_dataset(&dataset).expect("写出失败");
    assert_eq!(summary.files.len(), 4);
    assert_eq!(summary.pos_rows, dataset.pos.len());

    let reader = ArtifactReader::new(&dir.paths.raw_dir);
    let catalog = reader.read_catalog().expect("目录读取失败");
    let pos = reader.read_pos().expect("POS 读取失败");
    let ecom = reader.read_ecommerce().expect("电商读取失败");
    let inventory = reader.read_inventory().expect("库存读取失败");

    assert_eq!(catalog.rows, dataset.catalog);
    assert_eq!(pos.rows, dataset.pos);
    assert_eq!(ecom.rows, dataset.ecommerce);
    assert_eq!(inventory.rows, dataset.inventory);
    assert!(pos.dq.is_clean(), "生成的产物不应有行级映射缺陷");

    let header = std::fs::read_to_string(dir.paths.raw_dir.join(PosSaleRow::FILE_NAME))
        .expect("读取失败")
        .lines()
        .next()
        .map(str::to_string);
    assert_eq!(
        header.as_deref(),
        Some("date,store_id,sku,units_sold,unit_price,promo_flag")
    );
}

#[test]
fn test_unwritable_destination_is_fatal() {
    let dir = TestDataDir::new();
    let blocker = dir.root.join("blocked");
    std::fs::write(&blocker, "not a directory").expect("写入失败");

    let result = ArtifactWriter::create(blocker.join("raw"));
    assert!(matches!(result, Err(GeneratorError::DestinationUnwritable { .. })));
}

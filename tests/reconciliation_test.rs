// ==========================================
// 对账与聚合引擎集成测试
// ==========================================
// 测试范围:
// 1. 目录结构统计
// 2. 预测/计划对账 + 合计
// 3. 模型精度 / 在售率
// 4. 日粒度销售事实（重复翻倍 / 显式去重）
// 5. 首周生产计划
// ==========================================


use retail_demand_analytics::domain::{EcommerceSaleRow, InventorySnapshot, PosSaleRow};
use retail_demand_analytics::engine::{
    aggregate_catalog_mix, aggregate_model_accuracy, aggregate_totals, build_daily_sales,
    compute_availability, format_accuracy, join_forecast_to_plan, plan_first_week, Availability,
    DedupPolicy, PlannerConfig,
};
use test_helpers::{catalog_entry, date, forecast_point, metric_row, plan_row};

#[test]
fn test_catalog_mix_计数排序() {
    let entries = vec![
        catalog_entry("BEER_LAGER_6PK", "Beer", "6PK", true),
        catalog_entry("BEER_IPA_4PK", "Beer", "4PK", true),
        catalog_entry("UNKNOWN_SKU_999", "Legacy", "4PK", false),
    ];

    let mix = aggregate_catalog_mix(&entries);
    let categories: Vec<(String, usize)> = mix
        .categories
        .into_iter()
        .map(|e| (e.label, e.count))
        .collect();
    assert_eq!(
        categories,
        vec![("Beer".to_string(), 2), ("Legacy".to_string(), 1)]
    );
    assert_eq!(mix.beer_pack_sizes.len(), 2);
}

#[test]
fn test_forecast_plan_join_合计() {
    let day = date(2025, 1, 6);
    let forecast = vec![
        forecast_point(day, "BEER_LAGER_6PK", 10.0),
        forecast_point(date(2025, 1, 7), "BEER_LAGER_6PK", 15.0),
    ];
    let plan = vec![plan_row("BEER_LAGER_6PK", 30.0, 50.0), plan_row("ALE_PALE_6PK", 8.0, 0.0)];

    let rows = join_forecast_to_plan(&forecast, &plan);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].forecasted_sales, 25.0);
    assert_eq!(rows[0].planned_sales, 30.0);
    assert_eq!(rows[0].variance, 5.0);

    // 无预测的计划行按 0
    assert_eq!(rows[1].sku, "ALE_PALE_6PK");
    assert_eq!(rows[1].forecasted_sales, 0.0);
    assert_eq!(rows[1].variance, 8.0);

    let totals = aggregate_totals(&rows);
    assert_eq!(totals.forecasted_sales, 25.0);
    assert_eq!(totals.planned_sales, 38.0);
    assert_eq!(totals.suggested_production, 50.0);
    assert_eq!(totals.variance, 13.0);
}

#[test]
fn test_model_accuracy_百分比() {
    let metrics = vec![metric_row("A", Some(0.10)), metric_row("B", Some(0.20))];
    assert_eq!(format_accuracy(aggregate_model_accuracy(&metrics)), "15.0");
    assert_eq!(aggregate_model_accuracy(&[]), None);
}

#[test]
fn test_availability_不可计算() {
    assert_eq!(compute_availability(Some(0), Some(0)), Availability::NotComputable);
    assert_eq!(compute_availability(Some(20), Some(5)).to_string(), "25.0%");
}

#[test]
fn test_daily_sales_重复行翻倍与去重() {
    let row = PosSaleRow {
        date: date(2025, 1, 6),
        store_id: "S001".to_string(),
        sku: "BEER_LAGER_6PK".to_string(),
        units_sold: 6,
        unit_price: 10.99,
        promo_flag: false,
    };
    let returns = PosSaleRow {
        units_sold: -2,
        store_id: "S002".to_string(),
        ..row.clone()
    };
    let ecom = EcommerceSaleRow {
        date: date(2025, 1, 6),
        sku: "BEER_LAGER_6PK".to_string(),
        units_sold: 3,
        unit_price: 10.99,
        discount: 1.10,
    };
    let pos = vec![row.clone(), row, returns];

    let kept = build_daily_sales(&pos, std::slice::from_ref(&ecom), DedupPolicy::KeepAll);
    assert_eq!(kept.len(), 2);
    assert_eq!(kept[0].units_sold, 10, "6 + 6 - 2,负销量不截断");

    let deduped = build_daily_sales(&pos, &[ecom], DedupPolicy::DropExact);
    assert_eq!(deduped[0].units_sold, 4);
    assert!((deduped[1].revenue - (3.0 * 10.99 - 1.10)).abs() < 1e-9);
}

#[test]
fn test_first_week_plan_起订量取整() {
    let forecast = vec![
        forecast_point(date(2025, 1, 6), "BEER_IPA_4PK", 40.0),
        forecast_point(date(2025, 1, 9), "BEER_IPA_4PK", 30.0),
        forecast_point(date(2025, 1, 14), "BEER_IPA_4PK", 500.0),
    ];
    let inventory = vec![InventorySnapshot {
        date: date(2025, 1, 5),
        sku: "BEER_IPA_4PK".to_string(),
        on_hand: 20,
        on_order: 10,
        lead_time_days: 14,
    }];
    let catalog = vec![catalog_entry("BEER_IPA_4PK", "Beer", "4PK", true)];

    let plan = plan_first_week(&forecast, &inventory, &catalog, &PlannerConfig::default());
    assert_eq!(plan.len(), 1);
    let row = &plan[0];
    assert_eq!(row.week_start, Some(date(2025, 1, 6)));
    assert_eq!(row.forecast_units, 70.0);
    // 70 + 14 - 30 = 54 → 100
    assert_eq!(row.suggested_production, 100.0);
    assert_eq!(row.notes, "Rounded to MOQ 50");
    assert_eq!(row.product_name, "BEER_IPA_4PK name");
}

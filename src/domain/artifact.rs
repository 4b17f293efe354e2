// ==========================================
// 零售需求分析看板 - 产物文件契约
// ==========================================
// 文件名与表头顺序是与展示层约定的外部契约,集中定义
// ==========================================

use crate::domain::{
    CatalogEntry, DailySalesFact, EcommerceSaleRow, ForecastMetricRow, ForecastPoint,
    InventorySnapshot, PosSaleRow, ProductionPlanRow,
};
use serde::Serialize;

/// 表格型产物（CSV,带表头）
///
/// HEADERS 顺序必须与结构体字段声明顺序一致（csv 按字段顺序序列化）
pub trait TabularArtifact: Serialize {
    const FILE_NAME: &'static str;
    const HEADERS: &'static [&'static str];
}

/// 已发布到看板目录的产品维表文件名
pub const DIM_PRODUCT_FILE: &str = "dim_product.csv";
/// 流水线运行报告
pub const PIPELINE_REPORT_FILE: &str = "pipeline_report.json";
/// 系列目录汇总
pub const COLLECTION_SUMMARY_FILE: &str = "collective_arts_summary.json";
/// 系列目录条目
pub const COLLECTION_CATALOG_FILE: &str = "collective_arts_catalog.json";
/// 数据质量报告
pub const DQ_REPORT_FILE: &str = "dq_report.json";

impl TabularArtifact for CatalogEntry {
    const FILE_NAME: &'static str = "sku_map.csv";
    const HEADERS: &'static [&'static str] =
        &["sku", "product_name", "category", "pack_size", "active_flag"];
}

impl TabularArtifact for PosSaleRow {
    const FILE_NAME: &'static str = "pos_sales.csv";
    const HEADERS: &'static [&'static str] =
        &["date", "store_id", "sku", "units_sold", "unit_price", "promo_flag"];
}

impl TabularArtifact for EcommerceSaleRow {
    const FILE_NAME: &'static str = "ecommerce_sales.csv";
    const HEADERS: &'static [&'static str] =
        &["date", "sku", "units_sold", "unit_price", "discount"];
}

impl TabularArtifact for InventorySnapshot {
    const FILE_NAME: &'static str = "inventory.csv";
    const HEADERS: &'static [&'static str] =
        &["date", "sku", "on_hand", "on_order", "lead_time_days"];
}

impl TabularArtifact for ForecastPoint {
    const FILE_NAME: &'static str = "forecast_daily.csv";
    const HEADERS: &'static [&'static str] = &[
        "date",
        "channel",
        "sku",
        "yhat",
        "yhat_lower",
        "yhat_upper",
        "model_version",
    ];
}

impl TabularArtifact for ProductionPlanRow {
    const FILE_NAME: &'static str = "production_plan_weekly.csv";
    const HEADERS: &'static [&'static str] = &[
        "week_start",
        "sku",
        "product_name",
        "forecast_units",
        "safety_stock",
        "on_hand",
        "suggested_production",
        "notes",
    ];
}

impl TabularArtifact for ForecastMetricRow {
    const FILE_NAME: &'static str = "forecast_metrics.csv";
    const HEADERS: &'static [&'static str] =
        &["channel", "sku", "mape_ml", "mape_baseline", "best_model"];
}

impl TabularArtifact for DailySalesFact {
    const FILE_NAME: &'static str = "fact_sales_daily.csv";
    const HEADERS: &'static [&'static str] =
        &["date", "channel", "sku", "units_sold", "revenue", "promo_flag"];
}

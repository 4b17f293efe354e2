// ==========================================
// 零售需求分析看板 - 引擎层
// ==========================================
// 职责: 跨源对账与指标聚合（纯函数,不做 IO）
// 红线: 输入缺失或为空时返回空结果/占位值,不报错
// 红线: 负销量与重复行原样参与聚合,不做隐式修正
// ==========================================

pub mod accuracy;
pub mod availability;
pub mod catalog_mix;
pub mod collection;
pub mod daily_sales;
pub mod planner;
pub mod reconcile;

// 重导出核心函数
pub use accuracy::{aggregate_model_accuracy, format_accuracy, top_metric_rows, TOP_METRIC_ROWS};
pub use availability::{compute_availability, Availability, PLACEHOLDER};
pub use catalog_mix::{aggregate_catalog_mix, summarize_catalog, CatalogMix, CatalogStats, CountEntry};
pub use collection::{
    collection_breakdown, format_collection_label, is_beer_like, sample_catalog_items,
    CollectionRow, SAMPLE_ITEM_COUNT,
};
pub use daily_sales::{build_daily_sales, DedupPolicy};
pub use planner::{plan_first_week, PlannerConfig};
pub use reconcile::{aggregate_totals, join_forecast_to_plan, CompensatedSum};

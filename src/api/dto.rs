// ==========================================
// 零售需求分析看板 - 视图模型
// ==========================================
// 职责: 各看板页面所需的聚合结果（可直接序列化为 JSON）
// ==========================================

use crate::domain::{
    CatalogEntry, CollectionCatalogItem, CollectionSummary, ForecastMetricRow, ForecastPoint,
    PipelineReport, ProductionPlanRow, ReconciledRow, ReconciledTotals,
};
use crate::engine::{Availability, CatalogMix, CatalogStats, CollectionRow};
use serde::Serialize;

/// 展示取整（四舍五入,.5 向正无穷）
pub fn display_round(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

// ==========================================
// 总览页
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct OverviewView {
    pub catalog: CatalogStats,
    pub avg_mape: Option<f64>,   // 百分比
    pub avg_mape_display: String, // "15.0" 或 "-"
    pub top_metrics: Vec<ForecastMetricRow>,
    pub pipeline_report: Option<PipelineReport>,
}

// ==========================================
// 目录页
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub stats: CatalogStats,
    pub mix: CatalogMix,
    pub beer_products: Vec<CatalogEntry>,
}

// ==========================================
// 销售 vs 计划页
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayTotals {
    pub forecasted_sales: i64,
    pub planned_sales: i64,
    pub suggested_production: i64,
    pub variance: i64,
}

impl From<&ReconciledTotals> for DisplayTotals {
    fn from(totals: &ReconciledTotals) -> Self {
        Self {
            forecasted_sales: display_round(totals.forecasted_sales),
            planned_sales: display_round(totals.planned_sales),
            suggested_production: display_round(totals.suggested_production),
            variance: display_round(totals.variance),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SalesPlanView {
    pub rows: Vec<ReconciledRow>,
    pub totals: ReconciledTotals,     // 精确合计
    pub totals_display: DisplayTotals, // 取整仅在展示层
}

// ==========================================
// 预测页
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct ForecastView {
    pub skus: Vec<String>, // 去重升序
    pub selected_sku: Option<String>,
    pub points: Vec<ForecastPoint>,
}

// ==========================================
// 生产计划页
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct PlanningView {
    pub rows: Vec<ProductionPlanRow>,
}

// ==========================================
// 系列目录页
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct CollectionView {
    pub summary: Option<CollectionSummary>,
    pub availability: Availability,
    pub availability_display: String,
    pub collections: Vec<CollectionRow>,
    pub sample_items: Vec<CollectionCatalogItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_matches_half_up() {
        assert_eq!(display_round(2.5), 3);
        assert_eq!(display_round(2.4), 2);
        assert_eq!(display_round(-2.5), -2);
        assert_eq!(display_round(-2.6), -3);
    }
}

// ==========================================
// 零售需求分析看板 - 预测/计划对账引擎
// ==========================================
// 职责: 预测全周期 yhat 按 SKU 汇总 → 关联计划行 → 合计
// 红线: 保持计划行顺序;未匹配预测按 0;合计不做中间舍入
// ==========================================

use crate::domain::{ForecastPoint, ProductionPlanRow, ReconciledRow, ReconciledTotals};
use std::collections::HashMap;
use tracing::{debug, instrument};

// ==========================================
// Neumaier 补偿求和
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    pub fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
    }

    pub fn value(&self) -> f64 {
        self.sum + self.compensation
    }
}

/// 预测 yhat 按 SKU 汇总（预测全周期）
pub fn forecast_totals_by_sku(forecast_points: &[ForecastPoint]) -> HashMap<&str, f64> {
    let mut sums: HashMap<&str, CompensatedSum> = HashMap::new();
    for point in forecast_points {
        sums.entry(point.sku.as_str()).or_default().add(point.yhat);
    }
    sums.into_iter().map(|(sku, s)| (sku, s.value())).collect()
}

/// 预测与计划关联
///
/// 输出与 `plan_rows` 一一对应且顺序一致;
/// 重复 SKU 的计划行各自携带该 SKU 的完整预测合计
#[instrument(skip_all, fields(forecast = forecast_points.len(), plan = plan_rows.len()))]
pub fn join_forecast_to_plan(
    forecast_points: &[ForecastPoint],
    plan_rows: &[ProductionPlanRow],
) -> Vec<ReconciledRow> {
    let forecast_by_sku = forecast_totals_by_sku(forecast_points);

    let rows: Vec<ReconciledRow> = plan_rows
        .iter()
        .map(|plan| {
            let forecasted_sales = forecast_by_sku.get(plan.sku.as_str()).copied().unwrap_or(0.0);
            let planned_sales = plan.forecast_units;
            ReconciledRow {
                sku: plan.sku.clone(),
                product_name: plan.product_name.clone(),
                forecasted_sales,
                planned_sales,
                suggested_production: plan.suggested_production,
                variance: planned_sales - forecasted_sales,
            }
        })
        .collect();

    let unmatched = rows
        .iter()
        .filter(|r| !forecast_by_sku.contains_key(r.sku.as_str()))
        .count();
    debug!(rows = rows.len(), unmatched, "对账完成");
    rows
}

/// 对账合计
pub fn aggregate_totals(reconciled_rows: &[ReconciledRow]) -> ReconciledTotals {
    let mut forecasted = CompensatedSum::default();
    let mut planned = CompensatedSum::default();
    let mut suggested = CompensatedSum::default();
    let mut variance = CompensatedSum::default();

    for row in reconciled_rows {
        forecasted.add(row.forecasted_sales);
        planned.add(row.planned_sales);
        suggested.add(row.suggested_production);
        variance.add(row.variance);
    }

    ReconciledTotals {
        forecasted_sales: forecasted.value(),
        planned_sales: planned.value(),
        suggested_production: suggested.value(),
        variance: variance.value(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(sku: &str, yhat: f64) -> ForecastPoint {
        ForecastPoint {
            date: NaiveDate::from_ymd_opt(2025, 1, 6),
            channel: "pos".to_string(),
            sku: sku.to_string(),
            yhat,
            yhat_lower: yhat * 0.8,
            yhat_upper: yhat * 1.2,
            model_version: "v1".to_string(),
        }
    }

    fn plan(sku: &str, forecast_units: f64, suggested: f64) -> ProductionPlanRow {
        ProductionPlanRow {
            week_start: NaiveDate::from_ymd_opt(2025, 1, 6),
            sku: sku.to_string(),
            product_name: format!("{} name", sku),
            forecast_units,
            safety_stock: 0.0,
            on_hand: 0.0,
            suggested_production: suggested,
            notes: String::new(),
        }
    }

    #[test]
    fn test_join_sums_full_horizon() {
        let rows = join_forecast_to_plan(&[point("A", 10.0), point("A", 15.0)], &[plan("A", 30.0, 50.0)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].forecasted_sales, 25.0);
        assert_eq!(rows[0].planned_sales, 30.0);
        assert_eq!(rows[0].variance, 5.0);
        assert_eq!(rows[0].suggested_production, 50.0);
    }

    #[test]
    fn test_join_unmatched_plan_row_gets_zero_and_keeps_order() {
        let rows = join_forecast_to_plan(
            &[point("B", 4.0)],
            &[plan("C", 12.0, 0.0), plan("B", 3.0, 0.0)],
        );
        assert_eq!(rows[0].sku, "C");
        assert_eq!(rows[0].forecasted_sales, 0.0);
        assert_eq!(rows[0].variance, 12.0);
        assert_eq!(rows[1].sku, "B");
        assert_eq!(rows[1].variance, -1.0);
    }

    #[test]
    fn test_join_empty_inputs() {
        assert!(join_forecast_to_plan(&[], &[]).is_empty());
        assert!(join_forecast_to_plan(&[point("A", 1.0)], &[]).is_empty());
    }

    #[test]
    fn test_totals_are_straight_sums() {
        let rows = join_forecast_to_plan(
            &[point("A", 10.0), point("B", 2.5)],
            &[plan("A", 12.0, 50.0), plan("B", 1.0, 0.0)],
        );
        let totals = aggregate_totals(&rows);
        assert_eq!(totals.forecasted_sales, 12.5);
        assert_eq!(totals.planned_sales, 13.0);
        assert_eq!(totals.suggested_production, 50.0);
        assert_eq!(totals.variance, 0.5);
        assert_eq!(aggregate_totals(&[]), ReconciledTotals::default());
    }

    #[test]
    fn test_compensated_sum_is_accurate() {
        let mut sum = CompensatedSum::default();
        for v in [1.0, 1e100, 1.0, -1e100] {
            sum.add(v);
        }
        assert_eq!(sum.value(), 2.0);

        let mut tenths = CompensatedSum::default();
        for _ in 0..10 {
            tenths.add(0.1);
        }
        assert_eq!(tenths.value(), 1.0);
    }
}

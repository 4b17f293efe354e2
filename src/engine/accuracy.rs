// ==========================================
// 零售需求分析看板 - 模型精度汇总
// ==========================================
// 口径: 平均 MAPE(%) = Σ mape_ml / 行数 × 100
// 缺失或非数值的 mape_ml 按 0 计入分子,行数仍计入分母
// ==========================================

use crate::domain::ForecastMetricRow;
use crate::engine::availability::PLACEHOLDER;
use crate::engine::reconcile::CompensatedSum;

/// 总览页展示的指标行数
pub const TOP_METRIC_ROWS: usize = 10;

/// 平均模型 MAPE（百分比）;无指标行返回 None
pub fn aggregate_model_accuracy(metric_rows: &[ForecastMetricRow]) -> Option<f64> {
    if metric_rows.is_empty() {
        return None;
    }
    let mut sum = CompensatedSum::default();
    for row in metric_rows {
        sum.add(row.mape_ml.unwrap_or(0.0));
    }
    Some(sum.value() / metric_rows.len() as f64 * 100.0)
}

/// 一位小数展示,不可计算时为占位符
pub fn format_accuracy(accuracy: Option<f64>) -> String {
    match accuracy {
        Some(value) => format!("{:.1}", value),
        None => PLACEHOLDER.to_string(),
    }
}

/// 前 n 行（保持文件顺序）
pub fn top_metric_rows(metrics: &[ForecastMetricRow], n: usize) -> Vec<ForecastMetricRow> {
    metrics.iter().take(n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(sku: &str, mape_ml: Option<f64>) -> ForecastMetricRow {
        ForecastMetricRow {
            channel: "pos".to_string(),
            sku: sku.to_string(),
            mape_ml,
            mape_baseline: Some(0.3),
            best_model: "ml".to_string(),
        }
    }

    #[test]
    fn test_mean_mape_percent() {
        let rows = vec![metric("A", Some(0.10)), metric("B", Some(0.20))];
        let accuracy = aggregate_model_accuracy(&rows);
        assert_eq!(format_accuracy(accuracy), "15.0");
        assert!((accuracy.unwrap() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_mape_counts_in_denominator() {
        let rows = vec![metric("A", Some(0.30)), metric("B", None)];
        let accuracy = aggregate_model_accuracy(&rows).unwrap();
        assert!((accuracy - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_rows_is_placeholder() {
        assert_eq!(aggregate_model_accuracy(&[]), None);
        assert_eq!(format_accuracy(None), "-");
    }

    #[test]
    fn test_top_metric_rows() {
        let rows: Vec<_> = (0..12).map(|i| metric(&format!("S{}", i), Some(0.1))).collect();
        let top = top_metric_rows(&rows, TOP_METRIC_ROWS);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].sku, "S0");
        assert_eq!(top_metric_rows(&rows[..3], TOP_METRIC_ROWS).len(), 3);
    }
}

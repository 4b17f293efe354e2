// ==========================================
// 零售需求分析看板 - 预测领域模型
// ==========================================
// 预测值由外部模型预先计算,本核心只读取并对账
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ForecastPoint - 预测点
// ==========================================
// 对齐: forecast_daily.csv
// channel 保留原始字符串（外部文件可能写 Retail/Ecommerce）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: Option<NaiveDate>,
    pub channel: String,
    pub sku: String,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
    pub model_version: String,
}

// ==========================================
// ForecastMetricRow - 预测精度指标行
// ==========================================
// 对齐: forecast_metrics.csv
// mape_* 缺失或非数值时为 None（聚合时按 0 计入）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastMetricRow {
    pub channel: String,
    pub sku: String,
    pub mape_ml: Option<f64>,
    pub mape_baseline: Option<f64>,
    pub best_model: String,
}

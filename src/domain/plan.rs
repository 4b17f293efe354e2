// ==========================================
// 零售需求分析看板 - 生产计划与对账模型
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ProductionPlanRow - 周生产计划行
// ==========================================
// 对齐: production_plan_weekly.csv
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionPlanRow {
    pub week_start: Option<NaiveDate>,
    pub sku: String,
    pub product_name: String,
    pub forecast_units: f64,       // 计划销量
    pub safety_stock: f64,         // 安全库存
    pub on_hand: f64,              // 在库
    pub suggested_production: f64, // 建议生产量
    pub notes: String,
}

// ==========================================
// ReconciledRow - 预测/计划对账行
// ==========================================
// 生命周期: 每次请求重新计算,不落盘,无独立身份
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledRow {
    pub sku: String,
    pub product_name: String,
    pub forecasted_sales: f64,     // 匹配预测点 yhat 之和（全周期求和）
    pub planned_sales: f64,        // 计划行 forecast_units
    pub suggested_production: f64,
    pub variance: f64,             // planned_sales − forecasted_sales
}

// ==========================================
// ReconciledTotals - 对账合计
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconciledTotals {
    pub forecasted_sales: f64,
    pub planned_sales: f64,
    pub suggested_production: f64,
    pub variance: f64,
}

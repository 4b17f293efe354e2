// ==========================================
// 零售需求分析看板 - 销售领域模型
// ==========================================
// 红线: units_sold 为有符号整数,负数代表注入的退货异常,
//       对账层不得擅自截断为 0
// 红线: 同一 (渠道, 日期, 门店, 产品) 允许出现多行,聚合时求和
// ==========================================

use crate::domain::types::Channel;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// PosSaleRow - 门店 POS 销售行
// ==========================================
// 对齐: pos_sales.csv（字段顺序即表头顺序）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosSaleRow {
    pub date: NaiveDate,
    pub store_id: String,
    pub sku: String,
    pub units_sold: i64,
    pub unit_price: f64,
    pub promo_flag: bool,
}

// ==========================================
// EcommerceSaleRow - 电商销售行
// ==========================================
// 对齐: ecommerce_sales.csv
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcommerceSaleRow {
    pub date: NaiveDate,
    pub sku: String,
    pub units_sold: i64,
    pub unit_price: f64,
    pub discount: f64, // 折扣金额（0 表示无折扣）
}

// ==========================================
// SalesObservation - 跨渠道统一销售观测
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesObservation {
    pub channel: Channel,
    pub date: NaiveDate,
    pub store_id: Option<String>, // 仅 POS 渠道有值
    pub sku: String,
    pub units_sold: i64,
    pub unit_price: f64,
    pub promo_flag: bool,
    pub discount: f64,
}

impl SalesObservation {
    /// 行收入口径: POS = 数量 × 单价; 电商 = 数量 × 单价 − 折扣
    pub fn revenue(&self) -> f64 {
        self.units_sold as f64 * self.unit_price - self.discount
    }
}

impl From<&PosSaleRow> for SalesObservation {
    fn from(row: &PosSaleRow) -> Self {
        Self {
            channel: Channel::Pos,
            date: row.date,
            store_id: Some(row.store_id.clone()),
            sku: row.sku.clone(),
            units_sold: row.units_sold,
            unit_price: row.unit_price,
            promo_flag: row.promo_flag,
            discount: 0.0,
        }
    }
}

impl From<&EcommerceSaleRow> for SalesObservation {
    fn from(row: &EcommerceSaleRow) -> Self {
        Self {
            channel: Channel::Ecommerce,
            date: row.date,
            store_id: None,
            sku: row.sku.clone(),
            units_sold: row.units_sold,
            unit_price: row.unit_price,
            promo_flag: false,
            discount: row.discount,
        }
    }
}

// ==========================================
// DailySalesFact - 日粒度销售事实
// ==========================================
// 键: (date, channel, sku)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySalesFact {
    pub date: NaiveDate,
    pub channel: Channel,
    pub sku: String,
    pub units_sold: i64,
    pub revenue: f64,
    pub promo_flag: bool,
}

// ==========================================
// 零售需求分析看板 - 启发式生产计划
// ==========================================
// 规则: 预测按周（周一起始）汇总 → 只取最早一周
// 安全库存 = 预测量 × safety_stock_ratio
// 净需求 = 预测量 + 安全库存 − (在库 + 在途)
// 建议生产 = ceil(max(0, 净需求) / MOQ) × MOQ
// ==========================================

use crate::domain::types::UNKNOWN_LABEL;
use crate::domain::{CatalogEntry, ForecastPoint, InventorySnapshot, ProductionPlanRow};
use crate::engine::reconcile::CompensatedSum;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{info, instrument, warn};

pub const DEFAULT_MOQ: f64 = 50.0;
pub const DEFAULT_SAFETY_STOCK_RATIO: f64 = 0.2;
pub const NOTE_LOW_STOCK: &str = "Low Stock";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub moq: f64,                // 最小起订量
    pub safety_stock_ratio: f64, // 安全库存比例
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            moq: DEFAULT_MOQ,
            safety_stock_ratio: DEFAULT_SAFETY_STOCK_RATIO,
        }
    }
}

/// 所在周的周一
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// 向上取整到 MOQ 的整数倍（MOQ 非正时不取整）
pub fn round_up_to_moq(quantity: f64, moq: f64) -> f64 {
    let quantity = quantity.max(0.0);
    if moq > 0.0 {
        (quantity / moq).ceil() * moq
    } else {
        quantity
    }
}

/// 首周生产计划（按 SKU 排序）
///
/// 无日期的预测点不参与分周;库存缺失按 0,目录缺失名称为 "Unknown"
#[instrument(skip_all, fields(forecast = forecast.len(), inventory = inventory.len()))]
pub fn plan_first_week(
    forecast: &[ForecastPoint],
    inventory: &[InventorySnapshot],
    catalog: &[CatalogEntry],
    config: &PlannerConfig,
) -> Vec<ProductionPlanRow> {
    // (week_start, sku) → Σ yhat,跨渠道
    let mut weekly: BTreeMap<(NaiveDate, &str), CompensatedSum> = BTreeMap::new();
    let mut undated = 0usize;
    for point in forecast {
        match point.date {
            Some(date) => weekly
                .entry((week_start(date), point.sku.as_str()))
                .or_default()
                .add(point.yhat),
            None => undated += 1,
        }
    }
    if undated > 0 {
        warn!(undated, "无日期的预测点已忽略");
    }

    let Some(first_week) = weekly.keys().next().map(|(week, _)| *week) else {
        info!("无可用预测,生产计划为空");
        return Vec::new();
    };

    // 库存快照: 同一 SKU 多行时取日期最新者
    let mut stock: HashMap<&str, &InventorySnapshot> = HashMap::new();
    for snapshot in inventory {
        stock
            .entry(snapshot.sku.as_str())
            .and_modify(|current| {
                if snapshot.date >= current.date {
                    *current = snapshot;
                }
            })
            .or_insert(snapshot);
    }
    let names: HashMap<&str, &str> = catalog
        .iter()
        .map(|e| (e.sku.as_str(), e.product_name.as_str()))
        .collect();

    let moq_note = format!("Rounded to MOQ {}", config.moq);

    let plan: Vec<ProductionPlanRow> = weekly
        .iter()
        .take_while(|((week, _), _)| *week == first_week)
        .map(|((week, sku), demand)| {
            let forecast_units = demand.value();
            let safety_stock = forecast_units * config.safety_stock_ratio;
            let (on_hand, on_order) = stock
                .get(sku)
                .map(|s| (s.on_hand as f64, s.on_order as f64))
                .unwrap_or((0.0, 0.0));

            let net_demand = forecast_units + safety_stock - (on_hand + on_order);
            let suggested_production = round_up_to_moq(net_demand, config.moq);

            let mut notes = Vec::new();
            if suggested_production > 0.0 {
                notes.push(moq_note.as_str());
            }
            if on_hand < safety_stock {
                notes.push(NOTE_LOW_STOCK);
            }

            ProductionPlanRow {
                week_start: Some(*week),
                sku: sku.to_string(),
                product_name: names.get(sku).copied().unwrap_or(UNKNOWN_LABEL).to_string(),
                forecast_units,
                safety_stock,
                on_hand,
                suggested_production,
                notes: notes.join("; "),
            }
        })
        .collect();

    info!(week = %first_week, rows = plan.len(), "首周生产计划已生成");
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn point(d: NaiveDate, channel: &str, sku: &str, yhat: f64) -> ForecastPoint {
        ForecastPoint {
            date: Some(d),
            channel: channel.to_string(),
            sku: sku.to_string(),
            yhat,
            yhat_lower: yhat,
            yhat_upper: yhat,
            model_version: "v1".to_string(),
        }
    }

    fn stock(sku: &str, on_hand: i64, on_order: i64) -> InventorySnapshot {
        InventorySnapshot {
            date: date(2025, 1, 5),
            sku: sku.to_string(),
            on_hand,
            on_order,
            lead_time_days: 7,
        }
    }

    #[test]
    fn test_week_start_is_monday() {
        assert_eq!(week_start(date(2025, 1, 8)), date(2025, 1, 6)); // 周三
        assert_eq!(week_start(date(2025, 1, 6)), date(2025, 1, 6));
        assert_eq!(week_start(date(2025, 1, 12)), date(2025, 1, 6)); // 周日
    }

    #[test]
    fn test_round_up_to_moq() {
        assert_eq!(round_up_to_moq(1.0, 50.0), 50.0);
        assert_eq!(round_up_to_moq(50.0, 50.0), 50.0);
        assert_eq!(round_up_to_moq(51.0, 50.0), 100.0);
        assert_eq!(round_up_to_moq(-10.0, 50.0), 0.0);
    }

    #[test]
    fn test_first_week_only_summed_across_channels() {
        let forecast = vec![
            point(date(2025, 1, 6), "pos", "A", 30.0),
            point(date(2025, 1, 7), "ecommerce", "A", 20.0),
            point(date(2025, 1, 13), "pos", "A", 999.0), // 第二周
            point(date(2025, 1, 8), "pos", "B", 10.0),
        ];
        let inventory = vec![stock("A", 10, 0), stock("B", 100, 0)];
        let catalog = vec![CatalogEntry {
            sku: "A".to_string(),
            product_name: "Product A".to_string(),
            category: "Beer".to_string(),
            pack_size: "6PK".to_string(),
            active_flag: true,
        }];

        let plan = plan_first_week(&forecast, &inventory, &catalog, &PlannerConfig::default());

        assert_eq!(plan.len(), 2);
        let a = &plan[0];
        assert_eq!(a.sku, "A");
        assert_eq!(a.week_start, Some(date(2025, 1, 6)));
        assert_eq!(a.forecast_units, 50.0);
        assert!((a.safety_stock - 10.0).abs() < 1e-9);
        // 50 + 10 - 10 = 50 → 50
        assert_eq!(a.suggested_production, 50.0);
        assert_eq!(a.notes, "Rounded to MOQ 50");
        assert_eq!(a.product_name, "Product A");

        let b = &plan[1];
        assert_eq!(b.suggested_production, 0.0);
        assert_eq!(b.notes, "");
        assert_eq!(b.product_name, UNKNOWN_LABEL);
    }

    #[test]
    fn test_missing_inventory_counts_as_zero_low_stock() {
        let forecast = vec![point(date(2025, 1, 6), "pos", "A", 20.0)];
        let plan = plan_first_week(&forecast, &[], &[], &PlannerConfig::default());
        // 20 + 4 - 0 = 24 → 50
        assert_eq!(plan[0].on_hand, 0.0);
        assert_eq!(plan[0].suggested_production, 50.0);
        assert_eq!(plan[0].notes, "Rounded to MOQ 50; Low Stock");
    }

    #[test]
    fn test_on_order_reduces_net_demand() {
        let forecast = vec![point(date(2025, 1, 6), "pos", "A", 20.0)];
        let plan = plan_first_week(&forecast, &[stock("A", 0, 30)], &[], &PlannerConfig::default());
        assert_eq!(plan[0].suggested_production, 0.0);
        assert_eq!(plan[0].notes, NOTE_LOW_STOCK);
    }

    #[test]
    fn test_empty_forecast_gives_empty_plan() {
        assert!(plan_first_week(&[], &[stock("A", 1, 1)], &[], &PlannerConfig::default()).is_empty());
    }
}

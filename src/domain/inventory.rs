// ==========================================
// 零售需求分析看板 - 库存快照
// ==========================================
// 每次运行每个产品一行,整体覆盖重写,不是时间序列
// 对齐: inventory.csv
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub date: NaiveDate,     // 快照日期
    pub sku: String,
    pub on_hand: i64,        // 在库数量
    pub on_order: i64,       // 在途数量
    pub lead_time_days: u32, // 补货提前期（天）
}

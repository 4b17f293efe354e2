// ==========================================
// 零售需求分析看板 - 产品目录领域模型
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ProductDefinition - 内置产品定义
// ==========================================
// 用途: 生成器的固定产品表（名称/品类/基准价/补货提前期）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDefinition {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub base_price: f64,     // 基准单价
    pub lead_time_days: u32, // 补货提前期（天）
}

impl ProductDefinition {
    pub fn new(sku: &str, name: &str, category: &str, base_price: f64, lead_time_days: u32) -> Self {
        Self {
            sku: sku.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            base_price,
            lead_time_days,
        }
    }
}

// ==========================================
// CatalogEntry - 产品目录条目
// ==========================================
// 生命周期: 生成器（或外部目录源）一次性创建,之后只读
// 对齐: sku_map.csv / dim_product.csv
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub sku: String,          // 产品唯一标识
    pub product_name: String, // 展示名称
    pub category: String,     // 品类（Beer / Legacy / ...）
    pub pack_size: String,    // 包装规格标签（6PK / 4PK）
    pub active_flag: bool,    // 是否在售
}

impl CatalogEntry {
    pub fn is_beer(&self) -> bool {
        self.category == crate::domain::types::CATEGORY_BEER
    }
}

// ==========================================
// 零售需求分析看板 - 生成器配置
// ==========================================
// 异常注入概率与倍数统一收敛在此,生成逻辑不写魔法数字
// ==========================================

use crate::generator::error::{GeneratorError, GeneratorResult};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// 默认历史天数
pub const DEFAULT_HISTORY_DAYS: u32 = 365;

/// 默认随机种子
pub const DEFAULT_SEED: u64 = 42;

/// 默认门店列表 S001..S005
pub fn default_stores() -> Vec<String> {
    (1..=5).map(|i| format!("S{:03}", i)).collect()
}

// ==========================================
// PosSeriesConfig - POS 序列参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosSeriesConfig {
    /// 基准日需求率（乘以季节系数后作为抖动中心）
    pub base_demand: f64,
    /// 销量取反（退货异常）概率
    pub negative_units_probability: f64,
    /// 促销概率
    pub promo_probability: f64,
    /// 促销销量放大倍数
    pub promo_units_factor: f64,
    /// 促销价格系数（0.8 = 八折）
    pub promo_price_factor: f64,
    /// 停产产品在 日×门店 组合中出现的概率
    pub legacy_inclusion_probability: f64,
    /// 生成结束后重复追加的前缀行数
    pub duplicate_prefix_rows: usize,
}

impl Default for PosSeriesConfig {
    fn default() -> Self {
        Self {
            base_demand: 5.0,
            negative_units_probability: 0.01,
            promo_probability: 0.10,
            promo_units_factor: 1.5,
            promo_price_factor: 0.8,
            legacy_inclusion_probability: 0.05,
            duplicate_prefix_rows: 20,
        }
    }
}

// ==========================================
// EcommerceSeriesConfig - 电商序列参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcommerceSeriesConfig {
    /// 日×产品 组合出现概率（稀疏）
    pub inclusion_probability: f64,
    pub min_units: i64,
    pub max_units: i64, // 闭区间上限
    pub discount_probability: f64,
    /// 折扣金额 = 单价 × discount_ratio
    pub discount_ratio: f64,
}

impl Default for EcommerceSeriesConfig {
    fn default() -> Self {
        Self {
            inclusion_probability: 0.7,
            min_units: 1,
            max_units: 20,
            discount_probability: 0.05,
            discount_ratio: 0.1,
        }
    }
}

// ==========================================
// InventoryConfig - 库存快照参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryConfig {
    pub max_on_hand: i64,  // 开区间上限
    pub max_on_order: i64, // 开区间上限
    pub on_order_probability: f64,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            max_on_hand: 200,
            max_on_order: 100,
            on_order_probability: 0.5,
        }
    }
}

// ==========================================
// GeneratorConfig - 生成器总配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub history_days: u32,
    /// 历史窗口结束日（不含）,同时作为库存快照日期
    pub end_date: NaiveDate,
    pub stores: Vec<String>,
    pub pos: PosSeriesConfig,
    pub ecommerce: EcommerceSeriesConfig,
    pub inventory: InventoryConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            history_days: DEFAULT_HISTORY_DAYS,
            end_date: chrono::Local::now().date_naive(),
            stores: default_stores(),
            pos: PosSeriesConfig::default(),
            ecommerce: EcommerceSeriesConfig::default(),
            inventory: InventoryConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// 历史窗口起始日; 超出日期可表示范围时为 None
    pub fn history_start(&self) -> Option<NaiveDate> {
        self.end_date
            .checked_sub_signed(Duration::days(i64::from(self.history_days)))
    }

    /// 校验概率、区间参数与历史窗口
    pub fn validate(&self) -> GeneratorResult<()> {
        let probabilities = [
            ("pos.negative_units_probability", self.pos.negative_units_probability),
            ("pos.promo_probability", self.pos.promo_probability),
            ("pos.legacy_inclusion_probability", self.pos.legacy_inclusion_probability),
            ("ecommerce.inclusion_probability", self.ecommerce.inclusion_probability),
            ("ecommerce.discount_probability", self.ecommerce.discount_probability),
            ("inventory.on_order_probability", self.inventory.on_order_probability),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(GeneratorError::InvalidConfig(format!(
                    "{} 必须位于 [0, 1]，实际 {}",
                    name, p
                )));
            }
        }

        if self.ecommerce.min_units > self.ecommerce.max_units {
            return Err(GeneratorError::InvalidConfig(format!(
                "电商销量区间无效: [{}, {}]",
                self.ecommerce.min_units, self.ecommerce.max_units
            )));
        }
        if self.inventory.max_on_hand <= 0 || self.inventory.max_on_order <= 0 {
            return Err(GeneratorError::InvalidConfig(
                "库存上限必须大于 0".to_string(),
            ));
        }
        if self.stores.is_empty() {
            return Err(GeneratorError::InvalidConfig("门店列表不能为空".to_string()));
        }
        if self.history_start().is_none() {
            return Err(GeneratorError::InvalidConfig(format!(
                "history_days 过大: 从 {} 回溯 {} 天超出日期范围",
                self.end_date, self.history_days
            )));
        }
        Ok(())
    }
}

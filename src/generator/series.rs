// ==========================================
// 零售需求分析看板 - 合成序列生成器
// ==========================================
// 红线: 输出故意不干净（重复行、负销量、稀疏覆盖）,
//       生成器不得"清洗"这些异常,下游鲁棒性正是靠它们验证
// 随机源: 单一 StdRng,由 seed 初始化并贯穿所有生成步骤
// ==========================================

use crate::domain::{
    CatalogEntry, EcommerceSaleRow, InventorySnapshot, PosSaleRow, ProductDefinition,
};
use crate::generator::catalog::{catalog_from_definitions, is_legacy_sku};
use crate::generator::config::GeneratorConfig;
use crate::generator::error::GeneratorResult;
use chrono::{Duration, NaiveDate};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// 四个关联数据集
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedDataset {
    pub catalog: Vec<CatalogEntry>,
    pub pos: Vec<PosSaleRow>,
    pub ecommerce: Vec<EcommerceSaleRow>,
    pub inventory: Vec<InventorySnapshot>,
}

/// 四舍五入到分
pub(crate) fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ==========================================
// SeriesGenerator
// ==========================================
pub struct SeriesGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl SeriesGenerator {
    /// 创建生成器（校验配置,按 seed 初始化随机源）
    pub fn new(config: GeneratorConfig) -> GeneratorResult<Self> {
        config.validate()?;
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn chance(&mut self, probability: f64) -> bool {
        let r: f64 = self.rng.gen();
        r < probability
    }

    /// 历史窗口日期: [end_date - history_days, end_date)
    ///
    /// 窗口起点超出日期范围时返回空序列（new 已对配置值校验）
    pub fn history_dates(&self, history_days: u32) -> Vec<NaiveDate> {
        let Some(start) = self
            .config
            .end_date
            .checked_sub_signed(Duration::days(i64::from(history_days)))
        else {
            tracing::warn!(history_days, end_date = %self.config.end_date, "历史窗口超出日期范围");
            return Vec::new();
        };
        (0..i64::from(history_days))
            .map(|i| start + Duration::days(i))
            .collect()
    }

    /// 生成 POS 销售序列
    ///
    /// 每个 日 × 门店 × 产品:
    /// - rate = base_demand × seasonality(date)
    /// - units = floor(rate + (u − 0.5) × rate),下限 0
    /// - 小概率销量取反（退货异常）
    /// - 小概率促销: 正销量放大,单价打折
    /// - 停产产品仅在少量组合中出现
    /// - 0 销量行丢弃
    ///
    /// 生成结束后将前 duplicate_prefix_rows 行再次追加（故意重复）
    pub fn generate_pos_series<F>(
        &mut self,
        history_days: u32,
        stores: &[String],
        products: &[ProductDefinition],
        seasonality: F,
    ) -> Vec<PosSaleRow>
    where
        F: Fn(NaiveDate) -> f64,
    {
        let cfg = self.config.pos.clone();
        let mut rows = Vec::new();

        for date in self.history_dates(history_days) {
            let rate = cfg.base_demand * seasonality(date);

            for store in stores {
                for product in products {
                    if is_legacy_sku(&product.sku) && !self.chance(cfg.legacy_inclusion_probability)
                    {
                        continue;
                    }

                    let jitter: f64 = self.rng.gen::<f64>() - 0.5;
                    let mut units = ((rate + jitter * rate).floor() as i64).max(0);

                    if self.chance(cfg.negative_units_probability) {
                        units = -units;
                    }

                    let mut price = product.base_price;
                    let promo = self.chance(cfg.promo_probability);
                    if promo {
                        if units > 0 {
                            units = (units as f64 * cfg.promo_units_factor).floor() as i64;
                        }
                        price *= cfg.promo_price_factor;
                    }

                    if units == 0 {
                        continue;
                    }

                    rows.push(PosSaleRow {
                        date,
                        store_id: store.clone(),
                        sku: product.sku.clone(),
                        units_sold: units,
                        unit_price: round_to_cents(price),
                        promo_flag: promo,
                    });
                }
            }
        }

        let duplicate_count = cfg.duplicate_prefix_rows.min(rows.len());
        let prefix: Vec<PosSaleRow> = rows[..duplicate_count].to_vec();
        rows.extend(prefix);

        tracing::debug!(
            rows = rows.len(),
            duplicated = duplicate_count,
            "POS 序列生成完成"
        );
        rows
    }

    /// 生成电商销售序列（单渠道,稀疏,不含停产产品）
    pub fn generate_ecommerce_series(
        &mut self,
        history_days: u32,
        products: &[ProductDefinition],
    ) -> Vec<EcommerceSaleRow> {
        let cfg = self.config.ecommerce.clone();
        let mut rows = Vec::new();

        for date in self.history_dates(history_days) {
            for product in products {
                if is_legacy_sku(&product.sku) {
                    continue;
                }
                if !self.chance(cfg.inclusion_probability) {
                    continue;
                }

                let units = self.rng.gen_range(cfg.min_units..=cfg.max_units);
                let discount = if self.chance(cfg.discount_probability) {
                    round_to_cents(product.base_price * cfg.discount_ratio)
                } else {
                    0.0
                };

                rows.push(EcommerceSaleRow {
                    date,
                    sku: product.sku.clone(),
                    units_sold: units,
                    unit_price: product.base_price,
                    discount,
                });
            }
        }

        tracing::debug!(rows = rows.len(), "电商序列生成完成");
        rows
    }

    /// 生成库存快照（每个产品一行,日期为窗口结束日）
    pub fn generate_inventory_snapshot(
        &mut self,
        products: &[ProductDefinition],
    ) -> Vec<InventorySnapshot> {
        let cfg = self.config.inventory.clone();
        let date = self.config.end_date;

        products
            .iter()
            .map(|product| {
                let on_hand = self.rng.gen_range(0..cfg.max_on_hand);
                let on_order = if self.chance(cfg.on_order_probability) {
                    self.rng.gen_range(0..cfg.max_on_order)
                } else {
                    0
                };
                InventorySnapshot {
                    date,
                    sku: product.sku.clone(),
                    on_hand,
                    on_order,
                    lead_time_days: product.lead_time_days,
                }
            })
            .collect()
    }

    /// 按配置一次性生成四个数据集
    pub fn generate_dataset<F>(
        &mut self,
        products: &[ProductDefinition],
        seasonality: F,
    ) -> GeneratedDataset
    where
        F: Fn(NaiveDate) -> f64,
    {
        let history_days = self.config.history_days;
        let stores = self.config.stores.clone();

        let catalog = catalog_from_definitions(products);
        let pos = self.generate_pos_series(history_days, &stores, products, seasonality);
        let ecommerce = self.generate_ecommerce_series(history_days, products);
        let inventory = self.generate_inventory_snapshot(products);

        GeneratedDataset {
            catalog,
            pos,
            ecommerce,
            inventory,
        }
    }
}

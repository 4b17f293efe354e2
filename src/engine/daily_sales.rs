// ==========================================
// 零售需求分析看板 - 日粒度销售事实构建
// ==========================================
// 键: (date, channel, sku)
// 聚合: units_sold 求和（带符号）/ revenue 求和 / promo_flag 取最大
// 去重: 默认保留重复行;仅在显式请求时剔除完全相同的源行
// ==========================================

use crate::domain::{Channel, DailySalesFact, EcommerceSaleRow, PosSaleRow, SalesObservation};
use crate::engine::reconcile::CompensatedSum;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DedupPolicy {
    /// 重复行全部计入（重复键的销量翻倍）
    #[default]
    KeepAll,
    /// 剔除完全相同的源行后再聚合
    DropExact,
}

// 完全相同判定用的行指纹（浮点按位比较）
type RowFingerprint = (Channel, NaiveDate, Option<String>, String, i64, u64, bool, u64);

fn fingerprint(obs: &SalesObservation) -> RowFingerprint {
    (
        obs.channel,
        obs.date,
        obs.store_id.clone(),
        obs.sku.clone(),
        obs.units_sold,
        obs.unit_price.to_bits(),
        obs.promo_flag,
        obs.discount.to_bits(),
    )
}

#[derive(Default)]
struct DailyBucket {
    units_sold: i64,
    revenue: CompensatedSum,
    promo_flag: bool,
}

/// 合并两个渠道的销售观测为日粒度事实,按 (date, channel, sku) 排序
#[instrument(skip(pos, ecommerce), fields(pos = pos.len(), ecommerce = ecommerce.len()))]
pub fn build_daily_sales(
    pos: &[PosSaleRow],
    ecommerce: &[EcommerceSaleRow],
    policy: DedupPolicy,
) -> Vec<DailySalesFact> {
    let observations = pos
        .iter()
        .map(SalesObservation::from)
        .chain(ecommerce.iter().map(SalesObservation::from));

    let mut seen: HashSet<RowFingerprint> = HashSet::new();
    let mut dropped = 0usize;
    let mut buckets: BTreeMap<(NaiveDate, Channel, String), DailyBucket> = BTreeMap::new();

    for obs in observations {
        if policy == DedupPolicy::DropExact && !seen.insert(fingerprint(&obs)) {
            dropped += 1;
            continue;
        }

        let bucket = buckets
            .entry((obs.date, obs.channel, obs.sku.clone()))
            .or_default();
        bucket.units_sold += obs.units_sold;
        bucket.revenue.add(obs.revenue());
        bucket.promo_flag |= obs.promo_flag;
    }

    debug!(facts = buckets.len(), dropped, ?policy, "日粒度销售事实已构建");

    buckets
        .into_iter()
        .map(|((date, channel, sku), bucket)| DailySalesFact {
            date,
            channel,
            sku,
            units_sold: bucket.units_sold,
            revenue: bucket.revenue.value(),
            promo_flag: bucket.promo_flag,
        })
        .collect()
}

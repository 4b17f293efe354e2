// ==========================================
// 零售需求分析看板 - 目录结构统计
// ==========================================
// 职责: 品类分布 / 啤酒包装规格分布 / 在售统计
// 排序: 计数降序,计数相同按标签升序
// ==========================================

use crate::domain::types::UNKNOWN_LABEL;
use crate::domain::CatalogEntry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::instrument;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMix {
    pub categories: Vec<CountEntry>,
    pub beer_pack_sizes: Vec<CountEntry>, // 仅统计 Beer 品类
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_products: usize,
    pub total_beers: usize,
    pub active_beers: usize,
    pub inactive_beers: usize,
}

/// 空白标签归入 "Unknown"
fn label_or_unknown(label: &str) -> &str {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        UNKNOWN_LABEL
    } else {
        trimmed
    }
}

fn to_count_entries(counts: HashMap<&str, usize>) -> Vec<CountEntry> {
    let mut entries: Vec<CountEntry> = counts
        .into_iter()
        .map(|(label, count)| CountEntry {
            label: label.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    entries
}

/// 品类与啤酒包装规格分布
#[instrument(skip(entries), fields(count = entries.len()))]
pub fn aggregate_catalog_mix(entries: &[CatalogEntry]) -> CatalogMix {
    let mut categories: HashMap<&str, usize> = HashMap::new();
    let mut pack_sizes: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        *categories.entry(label_or_unknown(&entry.category)).or_insert(0) += 1;
        if entry.is_beer() {
            *pack_sizes.entry(label_or_unknown(&entry.pack_size)).or_insert(0) += 1;
        }
    }

    CatalogMix {
        categories: to_count_entries(categories),
        beer_pack_sizes: to_count_entries(pack_sizes),
    }
}

/// 产品总数与啤酒在售/停售数
pub fn summarize_catalog(entries: &[CatalogEntry]) -> CatalogStats {
    entries
        .iter()
        .fold(CatalogStats {
            total_products: entries.len(),
            ..Default::default()
        }, |mut stats, entry| {
            if entry.is_beer() {
                stats.total_beers += 1;
                if entry.active_flag {
                    stats.active_beers += 1;
                } else {
                    stats.inactive_beers += 1;
                }
            }
            stats
        })
}

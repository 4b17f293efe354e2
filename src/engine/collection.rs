// ==========================================
// 零售需求分析看板 - 系列目录分析
// ==========================================
// 职责: 系列分布（总数/在售）/ 系列标签格式化 / 啤酒类样本条目
// 说明: 公开渠道无销量,在售数量作为销售代理指标
// ==========================================

use crate::domain::{CollectionCatalogItem, CollectionSummary};
use serde::{Deserialize, Serialize};

/// 系列页展示的样本条目数
pub const SAMPLE_ITEM_COUNT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRow {
    pub collection: String, // 格式化后的标签
    pub total: u64,
    pub available: u64,
}

/// "new-release" → "New Release"
pub fn format_collection_label(handle: &str) -> String {
    handle
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// 系列分布,按总数降序,总数相同按标签升序
///
/// 在售计数缺失的系列按 0
pub fn collection_breakdown(summary: &CollectionSummary) -> Vec<CollectionRow> {
    let Some(counts) = summary.collection_counts.as_ref() else {
        return Vec::new();
    };

    let mut rows: Vec<CollectionRow> = counts
        .iter()
        .map(|(handle, total)| CollectionRow {
            collection: format_collection_label(handle),
            total: *total,
            available: summary
                .collection_available_counts
                .as_ref()
                .and_then(|available| available.get(handle))
                .copied()
                .unwrap_or(0),
        })
        .collect();

    rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.collection.cmp(&b.collection)));
    rows
}

/// 产品类型或标签包含 beer / cider
pub fn is_beer_like(item: &CollectionCatalogItem) -> bool {
    let product_type = item.product_type.as_deref().unwrap_or("").to_lowercase();
    let tags = item.tags.join(" ").to_lowercase();
    ["beer", "cider"]
        .iter()
        .any(|kw| product_type.contains(kw) || tags.contains(kw))
}

/// 样本条目: 优先啤酒类,无啤酒类时退回全部条目
pub fn sample_catalog_items(items: &[CollectionCatalogItem], n: usize) -> Vec<CollectionCatalogItem> {
    let beer_like: Vec<&CollectionCatalogItem> = items.iter().filter(|i| is_beer_like(i)).collect();
    if beer_like.is_empty() {
        items.iter().take(n).cloned().collect()
    } else {
        beer_like.into_iter().take(n).cloned().collect()
    }
}

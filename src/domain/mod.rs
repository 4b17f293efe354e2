// ==========================================
// 零售需求分析看板 - 领域模型层
// ==========================================
// 职责: 定义产品目录、销售、库存、预测、计划等领域实体
// 红线: 不含文件读写逻辑,不含聚合逻辑
// ==========================================

pub mod artifact;
pub mod catalog;
pub mod dq;
pub mod forecast;
pub mod inventory;
pub mod plan;
pub mod report;
pub mod sales;
pub mod types;

// 重导出核心类型
pub use artifact::TabularArtifact;
pub use catalog::{CatalogEntry, ProductDefinition};
pub use dq::{DqLevel, DqReport, DqSummary, DqViolation};
pub use forecast::{ForecastMetricRow, ForecastPoint};
pub use inventory::InventorySnapshot;
pub use plan::{ProductionPlanRow, ReconciledRow, ReconciledTotals};
pub use report::{CollectionCatalogItem, CollectionSummary, PipelineReport};
pub use sales::{DailySalesFact, EcommerceSaleRow, PosSaleRow, SalesObservation};
pub use types::{Channel, CATEGORY_BEER, CATEGORY_LEGACY, UNKNOWN_LABEL};

// ==========================================
// 零售需求分析看板 - 核心库
// ==========================================
// 范围: 多渠道销售/库存合成数据生成 + 跨源对账与指标聚合
// 形态: 单线程、同步批处理,产物为平面 CSV / JSON 文件
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 系统配置
pub mod config;

// 生成层 - 合成数据
pub mod generator;

// 导入层 - 外部产物
pub mod importer;

// 引擎层 - 对账与聚合
pub mod engine;

// API 层 - 看板视图
pub mod api;

// 流水线层 - 批处理编排
pub mod pipeline;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    CatalogEntry, Channel, CollectionSummary, DailySalesFact, DqReport, EcommerceSaleRow,
    ForecastMetricRow, ForecastPoint, InventorySnapshot, PipelineReport, PosSaleRow,
    ProductionPlanRow, ReconciledRow, ReconciledTotals, SalesObservation,
};

// 配置
pub use config::{ConfigManager, PathsConfig};

// 生成器
pub use generator::{ArtifactWriter, GeneratorConfig, GeneratorError, SeriesGenerator};

// 导入
pub use importer::{ArtifactReader, ImportError};

// 引擎
pub use engine::{
    aggregate_catalog_mix, aggregate_model_accuracy, aggregate_totals, build_daily_sales,
    compute_availability, join_forecast_to_plan, plan_first_week, Availability, DedupPolicy,
    PlannerConfig,
};

// API
pub use api::{ApiError, DashboardApi};

// 流水线
pub use pipeline::{PipelineError, PipelineOrchestrator};

// ==========================================
// 系统常量
// ==========================================

/// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 系统名称
pub const APP_NAME: &str = "零售需求分析看板";

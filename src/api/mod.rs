// ==========================================
// 零售需求分析看板 - API 层
// ==========================================
// 职责: 提供看板页面接口,供 CLI / 展示层调用
// ==========================================

pub mod dashboard_api;
pub mod dto;
pub mod error;

// 重导出核心类型
pub use dashboard_api::DashboardApi;
pub use dto::{
    CatalogView, CollectionView, DisplayTotals, ForecastView, OverviewView, PlanningView,
    SalesPlanView,
};
pub use error::{ApiError, ApiResult};

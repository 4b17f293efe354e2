// ==========================================
// 零售需求分析看板 - 看板 API
// ==========================================
// 职责: 按页面读取所需产物 → 调用纯引擎 → 返回视图模型
// 资源: 每次调用只打开本页面需要的产物,读完即释放
// 降级: 可选产物缺失 → 空/占位视图;存在但不可读 → SourceUnreadable
// ==========================================

use crate::api::dto::{
    CatalogView, CollectionView, DisplayTotals, ForecastView, OverviewView, PlanningView,
    SalesPlanView,
};
use crate::api::error::{ApiError, ApiResult};
use crate::domain::artifact::{
    TabularArtifact, COLLECTION_CATALOG_FILE, COLLECTION_SUMMARY_FILE, DIM_PRODUCT_FILE,
    PIPELINE_REPORT_FILE,
};
use crate::domain::{
    CatalogEntry, CollectionCatalogItem, CollectionSummary, ForecastMetricRow, ForecastPoint,
    PipelineReport, ProductionPlanRow,
};
use crate::engine;
use crate::importer::{optional_table, ArtifactReader, ImportResult, Mapped};
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

// ==========================================
// DashboardApi - 看板 API
// ==========================================
pub struct DashboardApi {
    reader: ArtifactReader,
}

impl DashboardApi {
    /// 创建看板 API
    ///
    /// # 参数
    /// - data_dir: 已发布产物所在目录（通常为输出目录）
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            reader: ArtifactReader::new(data_dir),
        }
    }

    pub fn data_dir(&self) -> &Path {
        self.reader.dir()
    }

    // ==========================================
    // 读取辅助
    // ==========================================

    fn optional_rows<T>(&self, file_name: &str, result: ImportResult<Mapped<T>>) -> ApiResult<Vec<T>> {
        let mapped = optional_table(result, file_name)
            .map_err(|e| ApiError::unreadable(file_name, e))?;
        if !mapped.dq.is_clean() {
            debug!(
                file = file_name,
                warning = mapped.dq.summary.warning,
                info = mapped.dq.summary.info,
                "产物含行级缺陷,已按默认值展示"
            );
        }
        Ok(mapped.rows)
    }

    fn optional_document<T: DeserializeOwned>(&self, file_name: &str) -> ApiResult<Option<T>> {
        self.reader
            .read_optional_document(file_name)
            .map_err(|e| ApiError::unreadable(file_name, e))
    }

    fn catalog_rows(&self) -> ApiResult<Vec<CatalogEntry>> {
        self.optional_rows(DIM_PRODUCT_FILE, self.reader.read_catalog_file(DIM_PRODUCT_FILE))
    }

    fn forecast_rows(&self) -> ApiResult<Vec<ForecastPoint>> {
        self.optional_rows(ForecastPoint::FILE_NAME, self.reader.read_forecast())
    }

    fn plan_rows(&self) -> ApiResult<Vec<ProductionPlanRow>> {
        self.optional_rows(ProductionPlanRow::FILE_NAME, self.reader.read_plan())
    }

    fn metric_rows(&self) -> ApiResult<Vec<ForecastMetricRow>> {
        self.optional_rows(ForecastMetricRow::FILE_NAME, self.reader.read_metrics())
    }

    // ==========================================
    // 页面接口
    // ==========================================

    /// 总览: 目录统计 + 平均 MAPE + 前 10 条指标 + 流水线报告
    #[instrument(skip(self))]
    pub fn overview(&self) -> ApiResult<OverviewView> {
        let metrics = self.metric_rows()?;
        let pipeline_report: Option<PipelineReport> = self.optional_document(PIPELINE_REPORT_FILE)?;
        let catalog = self.catalog_rows()?;

        let avg_mape = engine::aggregate_model_accuracy(&metrics);
        Ok(OverviewView {
            catalog: engine::summarize_catalog(&catalog),
            avg_mape,
            avg_mape_display: engine::format_accuracy(avg_mape),
            top_metrics: engine::top_metric_rows(&metrics, engine::TOP_METRIC_ROWS),
            pipeline_report,
        })
    }

    /// 目录: 统计 + 品类/包装分布 + 啤酒产品列表
    #[instrument(skip(self))]
    pub fn catalog(&self) -> ApiResult<CatalogView> {
        let catalog = self.catalog_rows()?;
        Ok(CatalogView {
            stats: engine::summarize_catalog(&catalog),
            mix: engine::aggregate_catalog_mix(&catalog),
            beer_products: catalog.into_iter().filter(CatalogEntry::is_beer).collect(),
        })
    }

    /// 销售 vs 计划: 对账行 + 合计
    #[instrument(skip(self))]
    pub fn sales_plan(&self) -> ApiResult<SalesPlanView> {
        let plan = self.plan_rows()?;
        let forecast = self.forecast_rows()?;

        let rows = engine::join_forecast_to_plan(&forecast, &plan);
        let totals = engine::aggregate_totals(&rows);
        Ok(SalesPlanView {
            rows,
            totals_display: DisplayTotals::from(&totals),
            totals,
        })
    }

    /// 预测: SKU 列表 + 选定 SKU 的预测点（未指定时取第一个）
    ///
    /// # 返回
    /// - Err(InvalidInput): 指定的 SKU 不在预测中
    #[instrument(skip(self))]
    pub fn forecast(&self, sku: Option<&str>) -> ApiResult<ForecastView> {
        let forecast = self.forecast_rows()?;
        let skus: Vec<String> = forecast
            .iter()
            .map(|p| p.sku.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let selected_sku = match sku.map(str::trim).filter(|s| !s.is_empty()) {
            Some(requested) => {
                if !skus.iter().any(|s| s == requested) {
                    return Err(ApiError::InvalidInput(format!("预测中不存在 SKU: {}", requested)));
                }
                Some(requested.to_string())
            }
            None => skus.first().cloned(),
        };

        let points = match &selected_sku {
            Some(selected) => forecast.into_iter().filter(|p| &p.sku == selected).collect(),
            None => Vec::new(),
        };

        Ok(ForecastView {
            skus,
            selected_sku,
            points,
        })
    }

    /// 生产计划明细
    #[instrument(skip(self))]
    pub fn planning(&self) -> ApiResult<PlanningView> {
        Ok(PlanningView {
            rows: self.plan_rows()?,
        })
    }

    /// 系列目录: 汇总 + 在售率 + 系列分布 + 样本条目
    #[instrument(skip(self))]
    pub fn collection_catalog(&self) -> ApiResult<CollectionView> {
        let summary: Option<CollectionSummary> = self.optional_document(COLLECTION_SUMMARY_FILE)?;
        let items: Vec<CollectionCatalogItem> = self
            .optional_document(COLLECTION_CATALOG_FILE)?
            .unwrap_or_default();

        let availability = match &summary {
            Some(s) => engine::compute_availability(s.beer_like_total, s.beer_like_available),
            None => engine::Availability::NotComputable,
        };
        let collections = summary
            .as_ref()
            .map(engine::collection_breakdown)
            .unwrap_or_default();

        Ok(CollectionView {
            availability_display: availability.to_string(),
            availability,
            collections,
            sample_items: engine::sample_catalog_items(&items, engine::SAMPLE_ITEM_COUNT),
            summary,
        })
    }
}

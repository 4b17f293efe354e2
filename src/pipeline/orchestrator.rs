// ==========================================
// 零售需求分析看板 - 流水线编排器
// ==========================================
// 用途: 协调 生成 → 接入校验 → 转换 → 计划 → 报告 的执行顺序
// 红线: 严格串行;四个原始产物全部写出后才开始读取
// ==========================================

use crate::config::PathsConfig;
use crate::domain::artifact::{TabularArtifact, DIM_PRODUCT_FILE, DQ_REPORT_FILE, PIPELINE_REPORT_FILE};
use crate::domain::{
    CatalogEntry, DailySalesFact, DqReport, EcommerceSaleRow, ForecastPoint, InventorySnapshot,
    PipelineReport, PosSaleRow, ProductionPlanRow,
};
use crate::engine::{build_daily_sales, plan_first_week, DedupPolicy, PlannerConfig};
use crate::generator::{
    default_products, default_seasonality, ArtifactWriter, GenerationSummary, GeneratorConfig,
    SeriesGenerator,
};
use crate::importer::{ArtifactReader, DqValidator, ImportResult, Mapped};
use crate::pipeline::error::{PipelineError, PipelineResult};
use chrono::Utc;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

pub const STEP_GENERATE: &str = "generate";
pub const STEP_INGEST: &str = "ingest";
pub const STEP_TRANSFORM: &str = "transform";
pub const STEP_PLAN: &str = "plan";

// ==========================================
// IngestOutcome - 接入结果
// ==========================================
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub catalog: Vec<CatalogEntry>,
    pub pos: Vec<PosSaleRow>,
    pub ecommerce: Vec<EcommerceSaleRow>,
    pub inventory: Vec<InventorySnapshot>,
    pub dq: DqReport, // 行级映射缺陷 + 销售异常
}

#[derive(Debug, Clone)]
pub struct TransformOutcome {
    pub catalog_rows: usize,
    pub fact_rows: usize,
    pub files: Vec<PathBuf>,
}

// ==========================================
// PipelineOrchestrator - 流水线编排器
// ==========================================
pub struct PipelineOrchestrator {
    generator: GeneratorConfig,
    planner: PlannerConfig,
    paths: PathsConfig,
    dedup: DedupPolicy,
}

impl PipelineOrchestrator {
    pub fn new(generator: GeneratorConfig, planner: PlannerConfig, paths: PathsConfig) -> Self {
        Self {
            generator,
            planner,
            paths,
            dedup: DedupPolicy::KeepAll,
        }
    }

    /// 转换阶段的去重口径（默认保留重复行）
    pub fn with_dedup(mut self, dedup: DedupPolicy) -> Self {
        self.dedup = dedup;
        self
    }

    pub fn paths(&self) -> &PathsConfig {
        &self.paths
    }

    fn load<T>(&self, file_name: &str, result: ImportResult<Mapped<T>>) -> PipelineResult<Mapped<T>> {
        result.map_err(|e| PipelineError::import(file_name, e))
    }

    // ==========================================
    // 步骤 1: 生成原始数据
    // ==========================================
    pub fn run_generate(&self) -> PipelineResult<GenerationSummary> {
        let mut generator = SeriesGenerator::new(self.generator.clone())?;
        let dataset = generator.generate_dataset(&default_products(), default_seasonality);

        let writer = ArtifactWriter::create(&self.paths.raw_dir)?;
        let summary = writer.write_dataset(&dataset)?;

        info!(
            seed = self.generator.seed,
            pos = summary.pos_rows,
            ecommerce = summary.ecommerce_rows,
            inventory = summary.inventory_rows,
            "原始数据已生成"
        );
        Ok(summary)
    }

    // ==========================================
    // 步骤 2: 接入与校验
    // ==========================================
    pub fn run_ingest(&self) -> PipelineResult<IngestOutcome> {
        let reader = ArtifactReader::new(&self.paths.raw_dir);

        let catalog = self.load(CatalogEntry::FILE_NAME, reader.read_catalog())?;
        let pos = self.load(PosSaleRow::FILE_NAME, reader.read_pos())?;
        let ecommerce = self.load(EcommerceSaleRow::FILE_NAME, reader.read_ecommerce())?;
        let inventory = self.load(InventorySnapshot::FILE_NAME, reader.read_inventory())?;

        let mut dq = DqReport::default();
        dq.merge(catalog.dq);
        dq.merge(pos.dq);
        dq.merge(ecommerce.dq);
        dq.merge(inventory.dq);

        let validation = DqValidator::new(&catalog.rows).validate_sales(&pos.rows, &ecommerce.rows);
        // 总行数已由映射阶段计入
        dq.summary.negative_units += validation.summary.negative_units;
        dq.summary.unknown_skus += validation.summary.unknown_skus;
        for violation in validation.violations {
            dq.push(violation);
        }

        let writer = ArtifactWriter::create(&self.paths.output_dir)?;
        writer.write_json(DQ_REPORT_FILE, &dq)?;

        info!(
            warning = dq.summary.warning,
            info = dq.summary.info,
            negative_units = dq.summary.negative_units,
            "接入校验完成"
        );

        Ok(IngestOutcome {
            catalog: catalog.rows,
            pos: pos.rows,
            ecommerce: ecommerce.rows,
            inventory: inventory.rows,
            dq,
        })
    }

    // ==========================================
    // 步骤 3: 转换（产品维表 + 日粒度销售事实）
    // ==========================================
    pub fn run_transform(&self, ingest: &IngestOutcome) -> PipelineResult<TransformOutcome> {
        let facts: Vec<DailySalesFact> = build_daily_sales(&ingest.pos, &ingest.ecommerce, self.dedup);

        let writer = ArtifactWriter::create(&self.paths.output_dir)?;
        let files = vec![
            writer.write_as(DIM_PRODUCT_FILE, &ingest.catalog)?,
            writer.write(&facts)?,
        ];

        Ok(TransformOutcome {
            catalog_rows: ingest.catalog.len(),
            fact_rows: facts.len(),
            files,
        })
    }

    // ==========================================
    // 步骤 4: 首周生产计划
    // ==========================================
    /// 预测产物缺失时跳过（返回 None）
    pub fn run_plan(&self, ingest: &IngestOutcome) -> PipelineResult<Option<Vec<ProductionPlanRow>>> {
        let reader = ArtifactReader::new(&self.paths.output_dir);
        let forecast = match reader.read_forecast() {
            Ok(mapped) => mapped.rows,
            Err(e) if e.is_missing_file() => {
                warn!(
                    file = %reader.path_of(ForecastPoint::FILE_NAME).display(),
                    "预测产物缺失,跳过生产计划"
                );
                return Ok(None);
            }
            Err(e) => return Err(PipelineError::import(ForecastPoint::FILE_NAME, e)),
        };

        let plan = plan_first_week(&forecast, &ingest.inventory, &ingest.catalog, &self.planner);

        let writer = ArtifactWriter::create(&self.paths.output_dir)?;
        writer.write(&plan)?;
        Ok(Some(plan))
    }

    // ==========================================
    // 全流程
    // ==========================================
    pub fn run_all(&self) -> PipelineResult<PipelineReport> {
        let started_at = Utc::now();
        let clock = Instant::now();
        let mut steps = Vec::new();

        self.run_generate()?;
        steps.push(STEP_GENERATE);

        let ingest = self.run_ingest()?;
        steps.push(STEP_INGEST);

        self.run_transform(&ingest)?;
        steps.push(STEP_TRANSFORM);

        if self.run_plan(&ingest)?.is_some() {
            steps.push(STEP_PLAN);
        }

        let runtime_seconds = clock.elapsed().as_secs_f64();
        let report = PipelineReport::success(started_at, runtime_seconds, &steps);

        let writer = ArtifactWriter::create(&self.paths.output_dir)?;
        writer.write_json(PIPELINE_REPORT_FILE, &report)?;

        info!(runtime_seconds, steps = ?steps, "流水线完成");
        Ok(report)
    }
}

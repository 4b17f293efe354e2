// ==========================================
// 零售需求分析看板 - 流水线层
// ==========================================
// 职责: 批处理编排（单线程、同步、逐步写出产物）
// ==========================================

pub mod error;
pub mod orchestrator;

pub use error::{PipelineError, PipelineResult};
pub use orchestrator::{
    IngestOutcome, PipelineOrchestrator, TransformOutcome, STEP_GENERATE, STEP_INGEST, STEP_PLAN,
    STEP_TRANSFORM,
};

// ==========================================
// 零售需求分析看板 - 产物读取器
// ==========================================
// 职责: 按产物文件名定位 → 解析 → 映射
// 资源: 每个源在一次读取内独占打开、读完即关闭
// 可选产物: 缺失文件按空集 / None 降级,存在但不可读则报错
// ==========================================

use crate::domain::artifact::TabularArtifact;
use crate::domain::{
    CatalogEntry, EcommerceSaleRow, ForecastMetricRow, ForecastPoint, InventorySnapshot,
    PosSaleRow, ProductionPlanRow,
};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::{FieldMapper, Mapped};
use crate::importer::file_parser::{CsvParser, FileParser, JsonDocumentReader, RawRecord};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct ArtifactReader {
    dir: PathBuf,
    parser: CsvParser,
    mapper: FieldMapper,
}

impl ArtifactReader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            parser: CsvParser,
            mapper: FieldMapper::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    fn read_table<T>(
        &self,
        file_name: &str,
        map: impl FnOnce(&FieldMapper, &'static str, &[RawRecord]) -> Mapped<T>,
    ) -> ImportResult<Mapped<T>> {
        let path = self.path_of(file_name);
        let records = self.parser.parse_to_raw_records(&path)?;
        let mapped = map(&self.mapper, source_name(file_name), &records);
        debug!(
            file = %path.display(),
            raw = records.len(),
            rows = mapped.rows.len(),
            "产物已读取"
        );
        Ok(mapped)
    }

    /// 目录（sku_map.csv 或 dim_product.csv,由调用方指定文件名）
    pub fn read_catalog_file(&self, file_name: &str) -> ImportResult<Mapped<CatalogEntry>> {
        self.read_table(file_name, FieldMapper::map_catalog)
    }

    pub fn read_catalog(&self) -> ImportResult<Mapped<CatalogEntry>> {
        self.read_catalog_file(CatalogEntry::FILE_NAME)
    }

    pub fn read_pos(&self) -> ImportResult<Mapped<PosSaleRow>> {
        self.read_table(PosSaleRow::FILE_NAME, FieldMapper::map_pos)
    }

    pub fn read_ecommerce(&self) -> ImportResult<Mapped<EcommerceSaleRow>> {
        self.read_table(EcommerceSaleRow::FILE_NAME, FieldMapper::map_ecommerce)
    }

    pub fn read_inventory(&self) -> ImportResult<Mapped<InventorySnapshot>> {
        self.read_table(InventorySnapshot::FILE_NAME, FieldMapper::map_inventory)
    }

    pub fn read_forecast(&self) -> ImportResult<Mapped<ForecastPoint>> {
        self.read_table(ForecastPoint::FILE_NAME, FieldMapper::map_forecast)
    }

    pub fn read_plan(&self) -> ImportResult<Mapped<ProductionPlanRow>> {
        self.read_table(ProductionPlanRow::FILE_NAME, FieldMapper::map_plan)
    }

    pub fn read_metrics(&self) -> ImportResult<Mapped<ForecastMetricRow>> {
        self.read_table(ForecastMetricRow::FILE_NAME, FieldMapper::map_metrics)
    }

    /// JSON 文档（必需）
    pub fn read_document<T: DeserializeOwned>(&self, file_name: &str) -> ImportResult<T> {
        JsonDocumentReader.read(&self.path_of(file_name))
    }

    /// JSON 文档（可选,缺失返回 None）
    pub fn read_optional_document<T: DeserializeOwned>(
        &self,
        file_name: &str,
    ) -> ImportResult<Option<T>> {
        optional(self.read_document(file_name), file_name)
    }
}

/// 缺失文件降级为 None,其余错误原样返回
pub fn optional<T>(result: ImportResult<T>, file_name: &str) -> ImportResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_missing_file() => {
            info!(file = file_name, "可选产物缺失,按空视图处理");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// 缺失表格降级为空集
pub fn optional_table<T>(result: ImportResult<Mapped<T>>, file_name: &str) -> ImportResult<Mapped<T>> {
    Ok(optional(result, file_name)?.unwrap_or_else(|| Mapped {
        rows: Vec::new(),
        dq: Default::default(),
    }))
}

// pos_sales.csv → pos_sales
fn source_name(file_name: &str) -> &'static str {
    match file_name {
        "sku_map.csv" => "sku_map",
        "dim_product.csv" => "dim_product",
        "pos_sales.csv" => "pos_sales",
        "ecommerce_sales.csv" => "ecommerce_sales",
        "inventory.csv" => "inventory",
        "forecast_daily.csv" => "forecast_daily",
        "production_plan_weekly.csv" => "production_plan_weekly",
        "forecast_metrics.csv" => "forecast_metrics",
        _ => "artifact",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PipelineReport;
    use crate::importer::error::ImportError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_catalog_from_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("sku_map.csv"),
            "sku,product_name,category,pack_size,active_flag\n\
             BEER_LAGER_6PK,Classic Lager 6-Pack,Beer,6PK,true\n\
             UNKNOWN_SKU_999,Discontinued Brew,Legacy,6PK,false\n",
        )
        .unwrap();

        let reader = ArtifactReader::new(dir.path());
        let catalog = reader.read_catalog().unwrap();
        assert_eq!(catalog.rows.len(), 2);
        assert!(!catalog.rows[1].active_flag);
        assert!(catalog.dq.is_clean());
    }

    #[test]
    fn test_missing_table_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let reader = ArtifactReader::new(dir.path());
        let metrics = optional_table(reader.read_metrics(), "forecast_metrics.csv").unwrap();
        assert!(metrics.rows.is_empty());
    }

    #[test]
    fn test_optional_document_missing_vs_broken() {
        let dir = TempDir::new().unwrap();
        let reader = ArtifactReader::new(dir.path());

        let missing: Option<PipelineReport> =
            reader.read_optional_document("pipeline_report.json").unwrap();
        assert!(missing.is_none());

        fs::write(dir.path().join("pipeline_report.json"), "{ broken").unwrap();
        let broken: ImportResult<Option<PipelineReport>> =
            reader.read_optional_document("pipeline_report.json");
        assert!(matches!(broken, Err(ImportError::DocumentParseError { .. })));
    }
}

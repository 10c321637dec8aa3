//! Risk engine: the full batch run from raw records to a scored, audited
//! result.

use std::collections::BTreeMap;

use claimrisk_core::config::RiskConfig;
use claimrisk_core::errors::PipelineError;
use claimrisk_core::schema::coalesce_columns;
use claimrisk_core::types::Table;
use serde::Serialize;
use tracing::info;

use crate::kpi::{compute_kpis, Kpis};
use crate::quality::{quality_summary, ColumnQuality, QualityPipeline, QualityReport, QualitySettings};
use crate::scoring::{aggregate, AggregatorSettings, ScoredTable};

/// Everything one engine run produces.
#[derive(Debug, Clone, Serialize)]
pub struct EngineReport {
    pub quality: QualityReport,
    /// Quality metrics of the coalesced input, before cleaning.
    pub quality_summary: BTreeMap<String, ColumnQuality>,
    pub scored: ScoredTable,
    /// KPIs of the cleaned batch.
    pub kpis: Kpis,
}

/// Stateless between runs; holds only the resolved settings.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    pipeline: QualityPipeline,
    scoring: AggregatorSettings,
}

impl RiskEngine {
    pub fn new(config: RiskConfig) -> Result<Self, PipelineError> {
        RiskConfig::validate(&config)?;
        let pipeline = QualityPipeline::new(QualitySettings::from_config(&config))?;
        let scoring = AggregatorSettings::from_config(&config);
        scoring.validate()?;
        Ok(Self { pipeline, scoring })
    }

    pub fn quality_settings(&self) -> &QualitySettings {
        self.pipeline.settings()
    }

    pub fn scoring_settings(&self) -> &AggregatorSettings {
        &self.scoring
    }

    /// Coalesce headers, clean, score and summarize `table`.
    pub fn run(&self, table: &Table) -> Result<EngineReport, PipelineError> {
        let coalesced = coalesce_columns(table);
        let quality_summary = quality_summary(&coalesced);

        let quality = self.pipeline.run(&coalesced)?;
        let scored = aggregate(&quality.table, &self.scoring)?;
        let kpis = compute_kpis(&quality.table);

        info!(
            input_rows = table.len(),
            scored_rows = scored.len(),
            flagged = scored.flagged_count(),
            "engine run complete"
        );

        Ok(EngineReport {
            quality,
            quality_summary,
            scored,
            kpis,
        })
    }
}

use anyhow::Result;

use crate::config::DashboardConfig;
use crate::data::catalog::{base_name, dataset_path};
use crate::data::charts::{CategoricalChart, NumericChart, categorical_charts, numeric_charts};
use crate::data::loader::load_json;
use crate::data::model::Dataset;
use crate::data::normalize::normalize;
use crate::data::stats::Summary;
use crate::export::{ExportArtifact, ExportError};

// ---------------------------------------------------------------------------
// Render pass – one immutable snapshot of the selected dataset
// ---------------------------------------------------------------------------

/// Everything the page shows for one selection: built from disk in a single
/// pass, then only read.
#[derive(Debug, Clone)]
pub struct RenderPass {
    pub file_name: String,
    pub base_name: String,
    /// Dataset with display column names.
    pub dataset: Dataset,
    pub summary: Summary,
    pub categorical: Vec<CategoricalChart>,
    pub numeric: Vec<NumericChart>,
}

impl RenderPass {
    /// Load → normalize → summarize → chart specs.
    pub fn build(config: &DashboardConfig, file_name: &str) -> Result<Self> {
        let path = dataset_path(&config.data_dir, file_name);
        let dataset = normalize(load_json(&path)?);
        let summary = Summary::of(&dataset);
        let categorical = categorical_charts(&dataset, config.max_categories);
        let numeric = numeric_charts(&dataset);

        log::info!(
            "Loaded {file_name}: {} rows, {} columns, {} missing; {} bar / {} histogram charts",
            summary.rows,
            summary.columns,
            summary.missing,
            categorical.len(),
            numeric.len()
        );
        log::debug!("Columns of {file_name}: {:?}", dataset.column_names());

        Ok(RenderPass {
            file_name: file_name.to_string(),
            base_name: base_name(file_name, &config.extension).to_string(),
            dataset,
            summary,
            categorical,
            numeric,
        })
    }

    /// Number of rows the preview shows.
    pub fn preview_len(&self, cap: usize) -> usize {
        self.dataset.row_count.min(cap)
    }

    pub fn csv_artifact(&self) -> Result<ExportArtifact, ExportError> {
        ExportArtifact::csv(&self.dataset, &self.base_name)
    }

    pub fn xlsx_artifact(&self) -> Result<ExportArtifact, ExportError> {
        ExportArtifact::xlsx(&self.dataset, &self.base_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config_with(files: &[(&str, &str)]) -> (tempfile::TempDir, DashboardConfig) {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in files {
            std::fs::write(dir.path().join(name), body).unwrap();
        }
        let config = DashboardConfig::with_data_dir(dir.path());
        (dir, config)
    }

    #[test]
    fn village_example_end_to_end() {
        let (_dir, config) = config_with(&[(
            "villages.json",
            r#"[{"village_name":"A","pop":10},{"village_name":"B","pop":20},{"village_name":"A","pop":15}]"#,
        )]);
        let pass = RenderPass::build(&config, "villages.json").unwrap();

        assert_eq!(pass.base_name, "villages");
        assert_eq!(pass.dataset.column_names(), vec!["Village Name", "Pop"]);
        assert_eq!(
            pass.summary,
            Summary {
                rows: 3,
                columns: 2,
                missing: 0
            }
        );

        let village = pass
            .categorical
            .iter()
            .find(|c| c.column == "Village Name")
            .unwrap();
        assert_eq!(village.bars, vec![("A".to_string(), 2), ("B".to_string(), 1)]);

        assert_eq!(pass.numeric.len(), 1);
        assert_eq!(pass.numeric[0].column, "Pop");
        assert_eq!(pass.numeric[0].histogram.counts.iter().sum::<usize>(), 3);
        assert_eq!(pass.numeric[0].histogram.edges[0], 10.0);

        let csv = String::from_utf8(pass.csv_artifact().unwrap().bytes).unwrap();
        assert!(csv.starts_with("Village Name,Pop\nA,10\n"));
        assert_eq!(pass.xlsx_artifact().unwrap().file_name, "villages.xlsx");
    }

    #[test]
    fn empty_dataset_has_zero_metrics_and_no_charts() {
        let (_dir, config) = config_with(&[("empty.json", "[]")]);
        let pass = RenderPass::build(&config, "empty.json").unwrap();
        assert_eq!(pass.summary, Summary::default());
        assert_eq!(pass.preview_len(100), 0);
        assert!(pass.categorical.is_empty());
        assert!(pass.numeric.is_empty());
    }

    #[test]
    fn preview_is_capped() {
        let rows: Vec<String> = (0..150).map(|i| format!(r#"{{"n":{i}}}"#)).collect();
        let body = format!("[{}]", rows.join(","));
        let (_dir, config) = config_with(&[("big.json", &body)]);
        let pass = RenderPass::build(&config, "big.json").unwrap();
        assert_eq!(pass.preview_len(config.preview_rows), 100);
        assert_eq!(pass.summary.rows, 150);
    }

    #[test]
    fn malformed_file_fails_the_pass() {
        let (_dir, config) = config_with(&[("bad.json", "{not json")]);
        assert!(RenderPass::build(&config, "bad.json").is_err());
        assert!(RenderPass::build(&config, "missing.json").is_err());
    }
}

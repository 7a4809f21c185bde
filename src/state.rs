use crate::config::DashboardConfig;
use crate::data::catalog::list_datasets;
use crate::export::ExportArtifact;
use crate::pipeline::RenderPass;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Dataset file names found in the data directory, sorted.
    pub datasets: Vec<String>,

    /// Currently selected file name (None when there is nothing to select).
    pub selected: Option<String>,

    /// Result of the last render pass; an `Err` replaces the whole page.
    pub pass: Option<Result<RenderPass, String>>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Scan the data directory and render the first dataset, if any.
    pub fn new(config: DashboardConfig) -> Self {
        let mut state = Self {
            config,
            datasets: Vec::new(),
            selected: None,
            pass: None,
            status_message: None,
        };
        state.refresh();
        state
    }

    /// Re-scan the data directory and rebuild the current selection from disk.
    pub fn refresh(&mut self) {
        match list_datasets(&self.config.data_dir, &self.config.extension) {
            Ok(names) => self.datasets = names,
            Err(e) => {
                log::error!("Failed to list datasets: {e:#}");
                self.datasets.clear();
                self.selected = None;
                self.pass = Some(Err(format!("{e:#}")));
                return;
            }
        }

        if self.datasets.is_empty() {
            log::warn!(
                "No .{} datasets in {}",
                self.config.extension,
                self.config.data_dir.display()
            );
            self.selected = None;
            self.pass = None;
            return;
        }

        let keep = self
            .selected
            .as_ref()
            .filter(|name| self.datasets.contains(*name))
            .cloned();
        let name = keep.unwrap_or_else(|| self.datasets[0].clone());
        self.select(name);
    }

    /// Make `file_name` the active dataset and run a fresh render pass.
    pub fn select(&mut self, file_name: String) {
        self.pass = Some(RenderPass::build(&self.config, &file_name).map_err(|e| {
            log::error!("Failed to load {file_name}: {e:#}");
            format!("{e:#}")
        }));
        self.selected = Some(file_name);
        self.status_message = None;
    }

    /// The current pass, if it loaded.
    pub fn current(&self) -> Option<&RenderPass> {
        self.pass.as_ref().and_then(|p| p.as_ref().ok())
    }

    /// Let the user pick a destination and write the artifact there.
    pub fn save_artifact(&mut self, artifact: ExportArtifact) {
        let Some(path) = rfd::FileDialog::new()
            .set_title(format!("Save {}", artifact.file_name))
            .set_file_name(&artifact.file_name)
            .save_file()
        else {
            return;
        };

        self.status_message = Some(match artifact.save(&path) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(e) => {
                log::error!("Export failed: {e:#}");
                format!("Error: {e:#}")
            }
        });
    }
}

use std::path::PathBuf;

/// Dashboard settings. There are no flags or config files; everything is a
/// compiled-in default.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Directory scanned for datasets.
    pub data_dir: PathBuf,
    /// Dataset file extension, without the dot.
    pub extension: String,
    /// Rows shown in the preview table.
    pub preview_rows: usize,
    /// Most distinct values a column may have and still get a bar chart.
    pub max_categories: usize,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            extension: "json".to_string(),
            preview_rows: 100,
            max_categories: 25,
            window_size: [1280.0, 900.0],
            min_window_size: [640.0, 480.0],
        }
    }
}

impl DashboardConfig {
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }
}

/// The directory holding the executable, or the working directory if that
/// cannot be determined.
fn default_data_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

use std::sync::Arc;

use crate::shared::config::DashboardConfig;
use crate::shared::data::dataset::Dataset;

/// Shared, read-only state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub settings: Arc<DashboardConfig>,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, settings: DashboardConfig) -> Self {
        Self {
            dataset,
            settings: Arc::new(settings),
        }
    }
}

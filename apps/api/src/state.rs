use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::export::{ExportOptions, PageGeometry, RenderSurface};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Off-screen surface used by PDF export. Default: `MetricLayoutSurface`.
    pub surface: Arc<dyn RenderSurface>,
    pub page: PageGeometry,
    /// Held for the whole of an export; one export runs at a time.
    pub export_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: Config, surface: Arc<dyn RenderSurface>) -> Self {
        Self {
            config,
            surface,
            page: PageGeometry::A4,
            export_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            settle_delay: self.config.settle_delay,
            raster_scale: self.config.raster_scale,
            page: self.page,
        }
    }
}

use crate::config::Config;
use crate::document::PageGeometry;
use crate::intake::ExtractorRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; exports share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Page geometry for the page-format serializer (A4, 20mm margins).
    pub page_geometry: PageGeometry,
    /// Source-text extractors keyed by upload format.
    pub extractors: ExtractorRegistry,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let extractors = ExtractorRegistry::with_defaults(config.enable_docx_intake);
        AppState {
            config,
            page_geometry: PageGeometry::a4(),
            extractors,
        }
    }
}

// Application state for HTTP handlers
use crate::infrastructure::csv_store::CsvTurbineStore;
use std::sync::Arc;

pub struct AppState {
    pub store: Arc<CsvTurbineStore>,
}

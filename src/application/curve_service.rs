// Curve service - Use case for fetching and projecting a power curve
use crate::application::turbine_repository::{FetchError, TurbineRepository};
use crate::domain::curve::PowerCurve;
use crate::domain::query::TurbineQuery;
use std::sync::Arc;

/// Terminal result of one query attempt. Every failure is absorbed
/// here; nothing propagates past the service boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// Samples fetched and normalized; `skipped` counts rows dropped
    /// because a numeric field failed to parse.
    Curve { curve: PowerCurve, skipped: usize },
    NotFound,
    Failed(String),
}

#[derive(Clone)]
pub struct CurveService {
    repository: Arc<dyn TurbineRepository>,
}

impl CurveService {
    pub fn new(repository: Arc<dyn TurbineRepository>) -> Self {
        Self { repository }
    }

    pub async fn fetch_curve(&self, query: &TurbineQuery) -> QueryOutcome {
        match self.repository.fetch_samples(query).await {
            Ok(rows) => {
                let mut samples = Vec::with_capacity(rows.len());
                let mut skipped = 0;
                for row in &rows {
                    match row.normalize() {
                        Ok(sample) => samples.push(sample),
                        Err(err) => {
                            skipped += 1;
                            tracing::warn!(
                                turbine_id = %query.turbine_id,
                                datetime = %row.datetime,
                                %err,
                                "dropping malformed sample"
                            );
                        }
                    }
                }
                QueryOutcome::Curve {
                    curve: PowerCurve::project(&samples),
                    skipped,
                }
            }
            Err(FetchError::NotFound) => QueryOutcome::NotFound,
            Err(err) => {
                tracing::error!(turbine_id = %query.turbine_id, %err, "turbine data fetch failed");
                QueryOutcome::Failed(err.to_string())
            }
        }
    }
}

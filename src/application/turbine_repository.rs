// Repository trait for turbine measurement access
use crate::domain::query::TurbineQuery;
use crate::domain::sample::RawSample;
use async_trait::async_trait;
use thiserror::Error;

/// Everything that can go wrong between a validated query and a list of
/// raw samples. 404 is a recoverable "no data in range" condition, not
/// a failure.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no data for the turbine and time range")]
    NotFound,
    #[error("transport failure")]
    Transport(#[source] anyhow::Error),
    #[error("unexpected status {status}: {detail}")]
    UnexpectedStatus { status: u16, detail: String },
    #[error("malformed response body: {0}")]
    MalformedBody(String),
}

#[async_trait]
pub trait TurbineRepository: Send + Sync {
    /// Fetch the raw samples for one turbine within the query window,
    /// in measurement order.
    async fn fetch_samples(&self, query: &TurbineQuery) -> Result<Vec<RawSample>, FetchError>;
}

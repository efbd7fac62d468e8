// HTTP repository implementation against the turbine data service
use crate::application::turbine_repository::{FetchError, TurbineRepository};
use crate::domain::query::TurbineQuery;
use crate::domain::sample::RawSample;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpTurbineRepository {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct TurbineResponse {
    #[allow(dead_code)]
    turbine_id: String,
    data: Vec<RawSample>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

impl HttpTurbineRepository {
    /// The timeout keeps a hung connection from pinning the viewer in
    /// its loading state forever.
    pub fn new(base_url: &str, request_timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl TurbineRepository for HttpTurbineRepository {
    async fn fetch_samples(&self, query: &TurbineQuery) -> Result<Vec<RawSample>, FetchError> {
        let url = format!("{}/turbine/{}/data", self.base_url, query.turbine_id);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("start_time", query.start_param()),
                ("end_time", query.end_param()),
            ])
            .send()
            .await
            .map_err(|err| {
                FetchError::Transport(
                    anyhow::Error::new(err).context("sending turbine data request"),
                )
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            // The service reports failures as {"detail": ...}; fall back
            // to the raw body for anything else.
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.detail)
                .unwrap_or(body);
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                detail,
            });
        }

        let body: TurbineResponse = response
            .json()
            .await
            .map_err(|err| FetchError::MalformedBody(err.to_string()))?;
        Ok(body.data)
    }
}

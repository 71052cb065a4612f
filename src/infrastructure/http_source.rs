// HTTP implementation of the temperature source
use crate::application::temperature_source::TemperatureSource;
use crate::domain::temperature::{AccumulationSummary, TemperatureSample};
use crate::error::{ChartError, Endpoint};
use crate::infrastructure::config::ApiSettings;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpTemperatureSource {
    client: reqwest::Client,
    base_url: String,
    temperature_path: String,
    accumulation_path: String,
    reset_path: String,
}

impl HttpTemperatureSource {
    pub fn new(settings: &ApiSettings) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            temperature_path: settings.temperature_path.clone(),
            accumulation_path: settings.accumulation_path.clone(),
            reset_path: settings.reset_path.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        kind: Endpoint,
        path: &str,
    ) -> Result<T, ChartError> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| ChartError::Request { kind, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChartError::Fetch {
                kind,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| ChartError::Request { kind, source })?;

        serde_json::from_slice(&body).map_err(|source| ChartError::Parse { kind, source })
    }
}

#[async_trait]
impl TemperatureSource for HttpTemperatureSource {
    async fn fetch_temperatures(&self) -> Result<Vec<TemperatureSample>, ChartError> {
        self.get_json(Endpoint::Temperature, &self.temperature_path)
            .await
    }

    async fn fetch_accumulation(&self) -> Result<AccumulationSummary, ChartError> {
        self.get_json(Endpoint::Accumulation, &self.accumulation_path)
            .await
    }

    async fn reset(&self) -> Result<(), ChartError> {
        let kind = Endpoint::Reset;
        let url = self.url(&self.reset_path);
        tracing::debug!("DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|source| ChartError::Request { kind, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChartError::Fetch {
                kind,
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}

use async_trait::async_trait;
use reqwest::Method;
use tracing::instrument;

use crate::{
    ApiError,
    api::{ResourceKind, WeatherResource, resource_path},
    model::{DailyForecast, DailyWeather},
    transport::{RequestOptions, Transport},
};

const BASE_PATH: &str = "/api/v1/daily";

#[derive(Debug, Clone)]
pub struct DailyApi {
    transport: Transport,
}

impl DailyApi {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    #[instrument(skip(self), level = "info")]
    pub async fn get_by_ip(&self) -> Result<DailyWeather, ApiError> {
        self.transport.request(BASE_PATH, RequestOptions::get()).await
    }

    #[instrument(skip(self), level = "info")]
    pub async fn get_by_code(&self, code: &str) -> Result<DailyWeather, ApiError> {
        self.transport
            .request(&resource_path(BASE_PATH, Some(code)), RequestOptions::get())
            .await
    }

    /// Replace the daily forecast of a location. The body is the bare sequence.
    #[instrument(skip(self, forecasts), fields(days = forecasts.len()), level = "info")]
    pub async fn update(
        &self,
        code: &str,
        forecasts: &[DailyForecast],
    ) -> Result<DailyWeather, ApiError> {
        let options = RequestOptions::method(Method::PUT).json(forecasts)?;
        self.transport.request(&resource_path(BASE_PATH, Some(code)), options).await
    }
}

#[async_trait]
impl WeatherResource for DailyApi {
    type Snapshot = DailyWeather;

    const DEFAULT_ERROR: &'static str = "Failed to fetch daily weather";

    fn kind(&self) -> ResourceKind {
        ResourceKind::Daily
    }

    async fn by_ip(&self) -> Result<DailyWeather, ApiError> {
        self.get_by_ip().await
    }

    async fn by_code(&self, code: &str) -> Result<DailyWeather, ApiError> {
        self.get_by_code(code).await
    }
}

use async_trait::async_trait;
use reqwest::Method;
use tracing::instrument;

use crate::{
    ApiError,
    api::{ResourceKind, WeatherResource, resource_path},
    model::{FullWeather, FullWeatherUpdate},
    transport::{RequestOptions, Transport},
};

const BASE_PATH: &str = "/api/v1/full";

#[derive(Debug, Clone)]
pub struct FullApi {
    transport: Transport,
}

impl FullApi {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    #[instrument(skip(self), level = "info")]
    pub async fn get_by_ip(&self) -> Result<FullWeather, ApiError> {
        self.transport.request(BASE_PATH, RequestOptions::get()).await
    }

    #[instrument(skip(self), level = "info")]
    pub async fn get_by_code(&self, code: &str) -> Result<FullWeather, ApiError> {
        self.transport
            .request(&resource_path(BASE_PATH, Some(code)), RequestOptions::get())
            .await
    }

    #[instrument(skip(self, weather), level = "info")]
    pub async fn update(
        &self,
        code: &str,
        weather: &FullWeatherUpdate,
    ) -> Result<FullWeather, ApiError> {
        let options = RequestOptions::method(Method::PUT).json(weather)?;
        self.transport.request(&resource_path(BASE_PATH, Some(code)), options).await
    }
}

#[async_trait]
impl WeatherResource for FullApi {
    type Snapshot = FullWeather;

    const DEFAULT_ERROR: &'static str = "Failed to fetch full weather data";

    fn kind(&self) -> ResourceKind {
        ResourceKind::Full
    }

    async fn by_ip(&self) -> Result<FullWeather, ApiError> {
        self.get_by_ip().await
    }

    async fn by_code(&self, code: &str) -> Result<FullWeather, ApiError> {
        self.get_by_code(code).await
    }
}

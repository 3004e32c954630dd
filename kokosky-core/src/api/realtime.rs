use async_trait::async_trait;
use reqwest::Method;
use tracing::instrument;

use crate::{
    ApiError,
    api::{ResourceKind, WeatherResource, resource_path},
    model::{RealtimeUpdate, RealtimeWeather},
    transport::{RequestOptions, Transport},
};

const BASE_PATH: &str = "/api/v1/realtime";

#[derive(Debug, Clone)]
pub struct RealtimeApi {
    transport: Transport,
}

impl RealtimeApi {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Realtime weather for wherever the server places the caller's IP.
    #[instrument(skip(self), level = "info")]
    pub async fn get_by_ip(&self) -> Result<RealtimeWeather, ApiError> {
        self.transport.request(BASE_PATH, RequestOptions::get()).await
    }

    #[instrument(skip(self), level = "info")]
    pub async fn get_by_code(&self, code: &str) -> Result<RealtimeWeather, ApiError> {
        self.transport
            .request(&resource_path(BASE_PATH, Some(code)), RequestOptions::get())
            .await
    }

    #[instrument(skip(self, weather), level = "info")]
    pub async fn update(
        &self,
        code: &str,
        weather: &RealtimeUpdate,
    ) -> Result<RealtimeWeather, ApiError> {
        let options = RequestOptions::method(Method::PUT).json(weather)?;
        self.transport.request(&resource_path(BASE_PATH, Some(code)), options).await
    }
}

#[async_trait]
impl WeatherResource for RealtimeApi {
    type Snapshot = RealtimeWeather;

    const DEFAULT_ERROR: &'static str = "Failed to fetch realtime weather";

    fn kind(&self) -> ResourceKind {
        ResourceKind::Realtime
    }

    async fn by_ip(&self) -> Result<RealtimeWeather, ApiError> {
        self.get_by_ip().await
    }

    async fn by_code(&self, code: &str) -> Result<RealtimeWeather, ApiError> {
        self.get_by_code(code).await
    }
}

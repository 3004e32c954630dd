use async_trait::async_trait;
use chrono::{Local, Timelike};
use reqwest::Method;
use tracing::instrument;

use crate::{
    ApiError,
    api::{ResourceKind, WeatherResource, resource_path},
    model::{HourlyForecast, HourlyWeather},
    transport::{RequestOptions, Transport},
};

const BASE_PATH: &str = "/api/v1/hourly";

/// Header telling the server which hour the forecast should start from.
pub const CURRENT_HOUR_HEADER: &str = "X-Current-Hour";

#[derive(Debug, Clone)]
pub struct HourlyApi {
    transport: Transport,
}

impl HourlyApi {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    #[instrument(skip(self), level = "info")]
    pub async fn get_by_ip(&self, current_hour: u32) -> Result<HourlyWeather, ApiError> {
        self.transport.request(BASE_PATH, hour_options(current_hour)).await
    }

    #[instrument(skip(self), level = "info")]
    pub async fn get_by_code(
        &self,
        code: &str,
        current_hour: u32,
    ) -> Result<HourlyWeather, ApiError> {
        self.transport
            .request(&resource_path(BASE_PATH, Some(code)), hour_options(current_hour))
            .await
    }

    /// Replace the hourly forecast of a location. The body is the bare sequence.
    #[instrument(skip(self, forecasts), fields(hours = forecasts.len()), level = "info")]
    pub async fn update(
        &self,
        code: &str,
        forecasts: &[HourlyForecast],
    ) -> Result<HourlyWeather, ApiError> {
        let options = RequestOptions::method(Method::PUT).json(forecasts)?;
        self.transport.request(&resource_path(BASE_PATH, Some(code)), options).await
    }
}

fn hour_options(current_hour: u32) -> RequestOptions {
    RequestOptions::get().header(CURRENT_HOUR_HEADER, current_hour.to_string())
}

/// Local wall-clock hour, 0-23.
pub fn current_hour() -> u32 {
    Local::now().hour()
}

#[async_trait]
impl WeatherResource for HourlyApi {
    type Snapshot = HourlyWeather;

    const DEFAULT_ERROR: &'static str = "Failed to fetch hourly weather";

    fn kind(&self) -> ResourceKind {
        ResourceKind::Hourly
    }

    async fn by_ip(&self) -> Result<HourlyWeather, ApiError> {
        self.get_by_ip(current_hour()).await
    }

    async fn by_code(&self, code: &str) -> Result<HourlyWeather, ApiError> {
        self.get_by_code(code, current_hour()).await
    }
}

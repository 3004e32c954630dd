use crate::{
    ApiError, ClientConfig,
    api::{
        daily::DailyApi, full::FullApi, hourly::HourlyApi, locations::LocationsApi,
        realtime::RealtimeApi,
    },
    hooks::{LocationsHook, WeatherHook},
    transport::{Transport, encode_segment},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod daily;
pub mod full;
pub mod hourly;
pub mod locations;
pub mod realtime;

/// The weather resource families served under `/api/v1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Realtime,
    Hourly,
    Daily,
    Full,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Realtime => "realtime",
            ResourceKind::Hourly => "hourly",
            ResourceKind::Daily => "daily",
            ResourceKind::Full => "full",
        }
    }

    pub const fn all() -> &'static [ResourceKind] {
        &[
            ResourceKind::Realtime,
            ResourceKind::Hourly,
            ResourceKind::Daily,
            ResourceKind::Full,
        ]
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ResourceKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "realtime" => Ok(ResourceKind::Realtime),
            "hourly" => Ok(ResourceKind::Hourly),
            "daily" => Ok(ResourceKind::Daily),
            "full" => Ok(ResourceKind::Full),
            _ => Err(anyhow::anyhow!(
                "Unknown resource '{value}'. Supported resources: realtime, hourly, daily, full."
            )),
        }
    }
}

/// A weather resource readable by caller IP or by location code.
///
/// The weather hooks are generic over this trait.
#[async_trait]
pub trait WeatherResource: Clone + Send + Sync + Debug + 'static {
    type Snapshot: Clone + Send + Sync + Debug + 'static;

    /// Stored as the hook error when a failure carries no message of its own.
    const DEFAULT_ERROR: &'static str;

    fn kind(&self) -> ResourceKind;

    async fn by_ip(&self) -> Result<Self::Snapshot, ApiError>;

    async fn by_code(&self, code: &str) -> Result<Self::Snapshot, ApiError>;

    /// By-code when a non-blank code is given, by-IP otherwise.
    async fn fetch(&self, code: Option<&str>) -> Result<Self::Snapshot, ApiError> {
        match code.filter(|c| !c.trim().is_empty()) {
            Some(code) => self.by_code(code).await,
            None => self.by_ip().await,
        }
    }
}

/// `/api/v1/{resource}` with an optional percent-encoded code segment.
pub(crate) fn resource_path(base: &str, code: Option<&str>) -> String {
    match code {
        Some(code) => format!("{base}/{}", encode_segment(code)),
        None => base.to_string(),
    }
}

/// Entry point holding one transport and handing out resource clients and hooks.
#[derive(Debug, Clone)]
pub struct KokoSkyClient {
    transport: Transport,
}

impl KokoSkyClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self::from_transport(Transport::new(config))
    }

    pub fn from_transport(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn locations(&self) -> LocationsApi {
        LocationsApi::new(self.transport.clone())
    }

    pub fn realtime(&self) -> RealtimeApi {
        RealtimeApi::new(self.transport.clone())
    }

    pub fn hourly(&self) -> HourlyApi {
        HourlyApi::new(self.transport.clone())
    }

    pub fn daily(&self) -> DailyApi {
        DailyApi::new(self.transport.clone())
    }

    pub fn full(&self) -> FullApi {
        FullApi::new(self.transport.clone())
    }

    /// Attach a location-list hook. Must be called inside a tokio runtime.
    pub fn locations_hook(&self) -> LocationsHook {
        LocationsHook::attach(self.locations())
    }

    /// Attach a realtime weather hook. Must be called inside a tokio runtime.
    pub fn realtime_hook(&self, code: Option<String>) -> WeatherHook<RealtimeApi> {
        WeatherHook::attach(self.realtime(), code)
    }

    pub fn hourly_hook(&self, code: Option<String>) -> WeatherHook<HourlyApi> {
        WeatherHook::attach(self.hourly(), code)
    }

    pub fn daily_hook(&self, code: Option<String>) -> WeatherHook<DailyApi> {
        WeatherHook::attach(self.daily(), code)
    }

    pub fn full_hook(&self, code: Option<String>) -> WeatherHook<FullApi> {
        WeatherHook::attach(self.full(), code)
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A place registered with the weather service, keyed by its unique `code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub code: String,
    pub city_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    pub country_name: String,
    pub country_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Fields this client doesn't know about, echoed back unchanged on writes.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeWeather {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub temperature: f64,
    pub humidity: f64,
    pub precipitation: f64,
    pub status: String,
    pub wind_speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// Realtime write payload: the server derives `location` and `last_updated`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeUpdate {
    pub temperature: f64,
    pub humidity: f64,
    pub precipitation: f64,
    pub status: String,
    pub wind_speed: f64,
}

impl From<RealtimeWeather> for RealtimeUpdate {
    fn from(w: RealtimeWeather) -> Self {
        Self {
            temperature: w.temperature,
            humidity: w.humidity,
            precipitation: w.precipitation,
            status: w.status,
            wind_speed: w.wind_speed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub hour_of_day: u8,
    pub temperature: f64,
    pub precipitation: f64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyWeather {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub hourly_forecast: Vec<HourlyForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub day_of_month: u8,
    pub month: u8,
    pub min_temp: f64,
    pub max_temp: f64,
    pub precipitation: f64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWeather {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub daily_forecast: Vec<DailyForecast>,
}

/// Realtime, hourly and daily weather for one location in a single snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullWeather {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub realtime: RealtimeWeather,
    #[serde(default)]
    pub hourly_forecast: Vec<HourlyForecast>,
    #[serde(default)]
    pub daily_forecast: Vec<DailyForecast>,
}

/// Full-weather write payload, without the server-derived `location`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullWeatherUpdate {
    pub realtime: RealtimeUpdate,
    pub hourly_forecast: Vec<HourlyForecast>,
    pub daily_forecast: Vec<DailyForecast>,
}

impl From<FullWeather> for FullWeatherUpdate {
    fn from(w: FullWeather) -> Self {
        Self {
            realtime: w.realtime.into(),
            hourly_forecast: w.hourly_forecast,
            daily_forecast: w.daily_forecast,
        }
    }
}

/// Body-less success, e.g. the 204 answer to a delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

//! Core library for the KokoSky weather service client.
//!
//! This crate defines:
//! - Base-address configuration & persisted user settings
//! - A single JSON transport with uniform status and decode handling
//! - Typed clients for locations, realtime, hourly, daily and full weather
//! - Data-binding hooks that fetch on attach and publish their state
//!
//! It is used by `kokosky-cli`, but can also back any other front end.

pub mod api;
pub mod config;
pub mod error;
pub mod hooks;
pub mod model;
pub mod transport;

pub use api::{KokoSkyClient, ResourceKind, WeatherResource};
pub use config::{ClientConfig, Settings};
pub use error::ApiError;
pub use hooks::{HookState, LocationsHook, Phase, WeatherHook};
pub use model::{
    DailyForecast, DailyWeather, FullWeather, FullWeatherUpdate, HourlyForecast, HourlyWeather,
    Location, RealtimeUpdate, RealtimeWeather,
};
pub use transport::{RequestOptions, Transport};

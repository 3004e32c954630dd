//! Human-readable output for locations and weather snapshots.

use kokosky_core::{
    DailyForecast, DailyWeather, FullWeather, HourlyForecast, HourlyWeather, Location,
    RealtimeWeather,
};

pub fn location(loc: &Location) {
    println!("{}", location_line(loc));
}

pub fn location_list(locations: &[Location]) {
    if locations.is_empty() {
        println!("No locations.");
        return;
    }
    for loc in locations {
        println!("{}", location_line(loc));
    }
}

fn location_line(loc: &Location) -> String {
    let mut place = loc.city_name.clone();
    if let Some(region) = &loc.region_name {
        place = format!("{place}, {region}");
    }
    let disabled = if loc.enabled == Some(false) { " [disabled]" } else { "" };
    format!(
        "{:<12} {place}, {} ({}){disabled}",
        loc.code, loc.country_name, loc.country_code
    )
}

pub fn realtime(w: &RealtimeWeather) {
    println!("{}", heading(w.location.as_deref(), "Current weather"));
    println!("  Condition:     {}", w.status);
    println!("  Temperature:   {:.1} °C", w.temperature);
    println!("  Humidity:      {:.0} %", w.humidity);
    println!("  Precipitation: {:.0} %", w.precipitation);
    println!("  Wind speed:    {:.1} km/h", w.wind_speed);
    if let Some(updated) = &w.last_updated {
        println!("  Last updated:  {updated}");
    }
}

pub fn hourly(w: &HourlyWeather) {
    println!("{}", heading(w.location.as_deref(), "Hourly forecast"));
    hourly_rows(&w.hourly_forecast);
}

pub fn daily(w: &DailyWeather) {
    println!("{}", heading(w.location.as_deref(), "Daily forecast"));
    daily_rows(&w.daily_forecast);
}

pub fn full(w: &FullWeather) {
    if let Some(location) = &w.location {
        println!("== {location} ==");
    }
    realtime(&w.realtime);
    println!();
    println!("Hourly forecast");
    hourly_rows(&w.hourly_forecast);
    println!();
    println!("Daily forecast");
    daily_rows(&w.daily_forecast);
}

fn heading(location: Option<&str>, title: &str) -> String {
    match location {
        Some(location) => format!("{title} for {location}"),
        None => title.to_string(),
    }
}

fn hourly_rows(forecasts: &[HourlyForecast]) {
    if forecasts.is_empty() {
        println!("  (no hourly data)");
    }
    for f in forecasts {
        println!("{}", hourly_row(f));
    }
}

fn hourly_row(f: &HourlyForecast) -> String {
    format!(
        "  {:02}:00  {:>6.1} °C  {:>3.0} %  {}",
        f.hour_of_day, f.temperature, f.precipitation, f.status
    )
}

fn daily_rows(forecasts: &[DailyForecast]) {
    if forecasts.is_empty() {
        println!("  (no daily data)");
    }
    for f in forecasts {
        println!("{}", daily_row(f));
    }
}

fn daily_row(f: &DailyForecast) -> String {
    format!(
        "  {:02}/{:02}  {:>5.1} .. {:>5.1} °C  {:>3.0} %  {}",
        f.day_of_month, f.month, f.min_temp, f.max_temp, f.precipitation, f.status
    )
}

//! Temperature gauge example
//!
//! Run with: cargo run --example gauge -- [temperature_c] [celsius|fahrenheit]

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use weather_gauge::format::{atmospheric_rows, format_last_updated, format_temp};
use weather_gauge::{
    gauge_ticks, read_gauge, CurrentWeatherPayload, Error, GeoLocation, Result, SessionConfig,
    TemperatureUnit, WeatherSession, WeatherSnapshot, WeatherSource,
};

/// Fixed readings standing in for the weather proxy.
struct StaticSource {
    temp_c: f64,
}

#[async_trait]
impl WeatherSource for StaticSource {
    async fn search_locations(&self, query: &str, limit: usize) -> Result<Vec<GeoLocation>> {
        let known = [
            GeoLocation::new("Reykjavik", 64.15, -21.94, "IS"),
            GeoLocation::new("Rome", 41.89, 12.48, "IT"),
            GeoLocation::new("Rotterdam", 51.92, 4.48, "NL"),
        ];
        Ok(known
            .into_iter()
            .filter(|l| l.name.to_lowercase().starts_with(&query.to_lowercase()))
            .take(limit)
            .collect())
    }

    async fn current_weather(&self, _location: &GeoLocation) -> Result<WeatherSnapshot> {
        let payload = CurrentWeatherPayload {
            main: Some(weather_gauge::data::MainPayload {
                temp: Some(self.temp_c),
                humidity: Some(55),
                pressure: Some(1015.0),
                ..Default::default()
            }),
            visibility: Some(10000.0),
            timezone: Some(3600),
            ..Default::default()
        };
        Ok(WeatherSnapshot::from_payload(&payload, chrono::Utc::now()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let temp_c: f64 = match args.next() {
        Some(arg) => arg.parse().map_err(|_| Error::InvalidParameter {
            name: "temperature".to_string(),
            value: arg.clone(),
        })?,
        None => 18.0,
    };
    let unit: TemperatureUnit = match args.next() {
        Some(arg) => arg.parse()?,
        None => TemperatureUnit::Celsius,
    };

    println!("Temperature Gauge");
    println!("=================\n");

    for tick in gauge_ticks(unit) {
        println!(
            "{:>10} {:>6}{} {:>6.1}%",
            tick.label,
            format_temp(tick.value),
            unit.symbol(),
            tick.position
        );
    }

    let session = WeatherSession::new(Arc::new(StaticSource { temp_c }), SessionConfig::default());
    session.set_unit(unit);
    session.set_query("Ro");
    tokio::time::sleep(Duration::from_millis(500)).await;

    let selected = session
        .select_active_suggestion()
        .ok_or_else(|| Error::LocationNotFound {
            query: "Ro".to_string(),
        })?;
    println!("\nSelected {}", selected.display_name());
    tokio::time::sleep(Duration::from_millis(100)).await;

    let snapshot = session
        .snapshot()
        .ok_or_else(|| Error::Internal("no snapshot".to_string()))?;

    match read_gauge(snapshot.temp_c, unit) {
        Some(reading) => {
            let width = 50;
            let filled = (reading.position / 100.0 * width as f64).round() as usize;
            println!(
                "\n[{}|{}] {}",
                "=".repeat(filled),
                " ".repeat(width - filled),
                reading.band.label
            );
        }
        None => println!("\nNo reading"),
    }

    println!();
    for row in atmospheric_rows(Some(snapshot.as_ref()), unit) {
        println!("{:<22} {}", row.metric, row.value);
    }
    if let Some(updated) = format_last_updated(snapshot.timestamp, snapshot.timezone_offset) {
        println!("\nLast updated: {}", updated);
    }

    session.shutdown();
    Ok(())
}

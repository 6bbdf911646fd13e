//! Weather snapshot and geocoding data structures.
//!
//! Contains the provider's current-conditions payload shape (metric units)
//! and the immutable snapshot built from it.

use chrono::{DateTime, Utc};

use crate::data::scale::{read_gauge, GaugeReading};
use crate::data::units::TemperatureUnit;
use crate::utils::celsius_to_fahrenheit;

/// Metres per kilometre, for visibility.
const METRES_PER_KM: f64 = 1000.0;

/// `main` block of the current-conditions payload.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MainPayload {
    /// Air temperature in Celsius.
    pub temp: Option<f64>,
    /// Apparent temperature in Celsius.
    pub feels_like: Option<f64>,
    /// Minimum observed temperature in Celsius.
    pub temp_min: Option<f64>,
    /// Maximum observed temperature in Celsius.
    pub temp_max: Option<f64>,
    /// Relative humidity in percent.
    pub humidity: Option<u8>,
    /// Sea-level pressure in hPa.
    pub pressure: Option<f64>,
}

/// `wind` block of the current-conditions payload.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WindPayload {
    /// Wind speed in m/s.
    pub speed: Option<f64>,
    /// Wind direction in degrees.
    pub deg: Option<f64>,
    /// Gust speed in m/s.
    pub gust: Option<f64>,
}

/// One entry of the `weather` array.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConditionPayload {
    /// Condition group, e.g. "Clouds".
    pub main: Option<String>,
    /// Longer description, e.g. "broken clouds".
    pub description: Option<String>,
    /// Provider icon code.
    pub icon: Option<String>,
}

/// `clouds` block.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CloudsPayload {
    /// Cloud cover in percent.
    pub all: Option<f64>,
}

/// `rain` or `snow` block.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PrecipitationPayload {
    /// Volume over the last hour in mm.
    #[cfg_attr(feature = "serde", serde(rename = "1h"))]
    pub one_hour: Option<f64>,
}

/// Current-conditions payload as returned by the weather source.
///
/// Every field is optional; [`WeatherSnapshot::from_payload`] fills in
/// defaults for anything missing.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CurrentWeatherPayload {
    /// Temperature, pressure and humidity.
    pub main: Option<MainPayload>,
    /// Visibility in metres.
    pub visibility: Option<f64>,
    /// Wind readings.
    pub wind: Option<WindPayload>,
    /// Condition entries; only the first is used.
    pub weather: Vec<ConditionPayload>,
    /// Cloud cover.
    pub clouds: Option<CloudsPayload>,
    /// Rain volume.
    pub rain: Option<PrecipitationPayload>,
    /// Snow volume.
    pub snow: Option<PrecipitationPayload>,
    /// Observation time, UNIX seconds.
    pub dt: Option<i64>,
    /// Offset of the location from UTC in seconds.
    pub timezone: Option<i32>,
}

/// Current weather at one location.
///
/// Built fresh from every successful fetch and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherSnapshot {
    /// Temperature in Celsius.
    pub temp_c: f64,
    /// Temperature in Fahrenheit.
    pub temp_f: f64,
    /// Apparent temperature in Celsius.
    pub feels_like_c: f64,
    /// Apparent temperature in Fahrenheit.
    pub feels_like_f: f64,
    /// Minimum temperature in Celsius.
    pub temp_min_c: f64,
    /// Maximum temperature in Celsius.
    pub temp_max_c: f64,
    /// Relative humidity in percent.
    pub humidity: u8,
    /// Pressure in hPa.
    pub pressure: f64,
    /// Visibility in km.
    pub visibility_km: f64,
    /// Wind speed in m/s.
    pub wind_speed: f64,
    /// Wind direction in degrees.
    pub wind_deg: Option<f64>,
    /// Gust speed in m/s.
    pub wind_gust: Option<f64>,
    /// Longer condition description.
    pub description: String,
    /// Condition group.
    pub condition: String,
    /// Provider icon code.
    pub icon: Option<String>,
    /// Cloud cover in percent.
    pub clouds: Option<f64>,
    /// Rain over the last hour in mm.
    pub rain_1h: Option<f64>,
    /// Snow over the last hour in mm.
    pub snow_1h: Option<f64>,
    /// Observation time, UNIX seconds.
    pub timestamp: i64,
    /// Offset of the location from UTC in seconds.
    pub timezone_offset: i32,
}

impl WeatherSnapshot {
    /// Build a snapshot from a provider payload.
    ///
    /// # Arguments
    ///
    /// * `payload` - Metric-unit current-conditions payload
    /// * `now` - Used as the observation time when the payload has none
    pub fn from_payload(payload: &CurrentWeatherPayload, now: DateTime<Utc>) -> Self {
        let main = payload.main.clone().unwrap_or_default();
        let wind = payload.wind.clone().unwrap_or_default();
        let condition = payload.weather.first().cloned().unwrap_or_default();

        let temp_c = main.temp.unwrap_or(0.0);
        let feels_like_c = main.feels_like.unwrap_or(temp_c);

        Self {
            temp_c,
            temp_f: celsius_to_fahrenheit(temp_c),
            feels_like_c,
            feels_like_f: celsius_to_fahrenheit(feels_like_c),
            temp_min_c: main.temp_min.unwrap_or(temp_c),
            temp_max_c: main.temp_max.unwrap_or(temp_c),
            humidity: main.humidity.unwrap_or(0),
            pressure: main.pressure.unwrap_or(0.0),
            visibility_km: payload.visibility.unwrap_or(0.0) / METRES_PER_KM,
            wind_speed: wind.speed.unwrap_or(0.0),
            wind_deg: wind.deg,
            wind_gust: wind.gust,
            description: condition.description.unwrap_or_else(|| "-".to_string()),
            condition: condition.main.unwrap_or_else(|| "-".to_string()),
            icon: condition.icon,
            clouds: payload.clouds.as_ref().and_then(|c| c.all),
            rain_1h: payload.rain.as_ref().and_then(|r| r.one_hour),
            snow_1h: payload.snow.as_ref().and_then(|s| s.one_hour),
            timestamp: payload.dt.unwrap_or_else(|| now.timestamp()),
            timezone_offset: payload.timezone.unwrap_or(0),
        }
    }

    /// Temperature in the given unit.
    pub fn temperature(&self, unit: TemperatureUnit) -> f64 {
        unit.pick(self.temp_c, self.temp_f)
    }

    /// Apparent temperature in the given unit.
    pub fn feels_like(&self, unit: TemperatureUnit) -> f64 {
        unit.pick(self.feels_like_c, self.feels_like_f)
    }

    /// Text to show for the condition, preferring the description.
    pub fn condition_text(&self) -> &str {
        if self.description.is_empty() {
            &self.condition
        } else {
            &self.description
        }
    }

    /// Classify the temperature and place it on the gauge.
    pub fn gauge(&self, unit: TemperatureUnit) -> Option<GaugeReading> {
        read_gauge(self.temp_c, unit)
    }
}

/// A geocoding hit for a search query.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoLocation {
    /// Place name.
    pub name: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// ISO country code.
    pub country: String,
    /// State or region, when the provider has one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub state: Option<String>,
}

impl GeoLocation {
    /// Create a location without a state.
    pub fn new(name: impl Into<String>, lat: f64, lon: f64, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
            country: country.into(),
            state: None,
        }
    }

    /// Set the state or region.
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Name for display, e.g. "Portland, Oregon, US".
    pub fn display_name(&self) -> String {
        match &self.state {
            Some(state) if !state.is_empty() => {
                format!("{}, {}, {}", self.name, state, self.country)
            }
            _ => format!("{}, {}", self.name, self.country),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn full_payload() -> CurrentWeatherPayload {
        CurrentWeatherPayload {
            main: Some(MainPayload {
                temp: Some(22.0),
                feels_like: Some(21.5),
                temp_min: Some(19.0),
                temp_max: Some(24.0),
                humidity: Some(64),
                pressure: Some(1013.0),
            }),
            visibility: Some(10000.0),
            wind: Some(WindPayload {
                speed: Some(4.1),
                deg: Some(250.0),
                gust: None,
            }),
            weather: vec![ConditionPayload {
                main: Some("Clouds".to_string()),
                description: Some("broken clouds".to_string()),
                icon: Some("04d".to_string()),
            }],
            clouds: Some(CloudsPayload { all: Some(75.0) }),
            rain: None,
            snow: None,
            dt: Some(1_717_243_200),
            timezone: Some(3600),
        }
    }

    #[test]
    fn test_from_full_payload() {
        let snapshot = WeatherSnapshot::from_payload(&full_payload(), now());

        assert_eq!(snapshot.temp_c, 22.0);
        assert_eq!(snapshot.temp_f, 71.6);
        assert_eq!(snapshot.feels_like_f, 70.7);
        assert_eq!(snapshot.temp_min_c, 19.0);
        assert_eq!(snapshot.humidity, 64);
        assert_eq!(snapshot.pressure, 1013.0);
        assert_eq!(snapshot.visibility_km, 10.0);
        assert_eq!(snapshot.wind_speed, 4.1);
        assert_eq!(snapshot.wind_deg, Some(250.0));
        assert_eq!(snapshot.description, "broken clouds");
        assert_eq!(snapshot.condition, "Clouds");
        assert_eq!(snapshot.icon.as_deref(), Some("04d"));
        assert_eq!(snapshot.clouds, Some(75.0));
        assert_eq!(snapshot.timestamp, 1_717_243_200);
        assert_eq!(snapshot.timezone_offset, 3600);
    }

    #[test]
    fn test_from_empty_payload_uses_defaults() {
        let snapshot = WeatherSnapshot::from_payload(&CurrentWeatherPayload::default(), now());

        assert_eq!(snapshot.temp_c, 0.0);
        assert_eq!(snapshot.temp_f, 32.0);
        assert_eq!(snapshot.feels_like_c, 0.0);
        assert_eq!(snapshot.humidity, 0);
        assert_eq!(snapshot.visibility_km, 0.0);
        assert_eq!(snapshot.description, "-");
        assert_eq!(snapshot.condition, "-");
        assert_eq!(snapshot.timestamp, now().timestamp());
        assert_eq!(snapshot.timezone_offset, 0);
    }

    #[test]
    fn test_feels_like_defaults_to_temp() {
        let payload = CurrentWeatherPayload {
            main: Some(MainPayload {
                temp: Some(-3.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let snapshot = WeatherSnapshot::from_payload(&payload, now());

        assert_eq!(snapshot.feels_like_c, -3.0);
        assert_eq!(snapshot.temp_max_c, -3.0);
        assert_eq!(snapshot.feels_like_f, 26.6);
    }

    #[test]
    fn test_unit_accessors_and_gauge() {
        let snapshot = WeatherSnapshot::from_payload(&full_payload(), now());

        assert_eq!(snapshot.temperature(TemperatureUnit::Fahrenheit), 71.6);
        assert_eq!(snapshot.feels_like(TemperatureUnit::Celsius), 21.5);
        assert_eq!(snapshot.condition_text(), "broken clouds");

        let reading = snapshot.gauge(TemperatureUnit::Celsius).unwrap();
        assert_eq!(reading.band.label, "Comfort");
    }

    #[test]
    fn test_display_name() {
        let plain = GeoLocation::new("London", 51.5, -0.12, "GB");
        assert_eq!(plain.display_name(), "London, GB");

        let with_state = GeoLocation::new("Portland", 45.5, -122.6, "US").with_state("Oregon");
        assert_eq!(with_state.display_name(), "Portland, Oregon, US");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_parse_provider_json() {
        let json = r#"{
            "main": {"temp": 5.0, "feels_like": 2.4, "humidity": 81, "pressure": 1002},
            "visibility": 8000,
            "wind": {"speed": 6.2},
            "weather": [{"main": "Rain", "description": "light rain"}],
            "rain": {"1h": 0.4},
            "dt": 1700000000,
            "timezone": -18000
        }"#;
        let payload: CurrentWeatherPayload = serde_json::from_str(json).unwrap();
        let snapshot = WeatherSnapshot::from_payload(&payload, now());

        assert_eq!(snapshot.temp_f, 41.0);
        assert_eq!(snapshot.visibility_km, 8.0);
        assert_eq!(snapshot.rain_1h, Some(0.4));
        assert_eq!(snapshot.timezone_offset, -18000);
        assert_eq!(snapshot.gauge(TemperatureUnit::Celsius).unwrap().band.label, "Cold");
    }
}

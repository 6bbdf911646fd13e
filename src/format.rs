//! Display formatting for weather readings.
//!
//! Turns snapshot values into the strings shown on the weather cards.
//! Anything without data renders as [`NO_DATA`].

use chrono::DateTime;

use crate::data::snapshot::WeatherSnapshot;
use crate::data::units::TemperatureUnit;

/// Placeholder shown when there is no reading.
pub const NO_DATA: &str = "--";

/// m/s to km/h.
const KPH_PER_MPS: f64 = 3.6;

/// Fixed-point rendering with ties rounded away from zero.
///
/// `{:.N}` alone rounds exact ties to even, which would show 70.25 as 70.2.
fn fixed(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    format!("{:.*}", decimals, (value * scale).round() / scale)
}

/// Format a temperature: whole numbers bare, anything else to one decimal.
pub fn format_temp(value: f64) -> String {
    if value.fract() == 0.0 {
        fixed(value, 0)
    } else {
        fixed(value, 1)
    }
}

/// Format a both-unit temperature with the selected unit first.
///
/// Celsius is shown without decimals and Fahrenheit with one, e.g.
/// `"22°C (71.6°F)"`.
pub fn format_temperature_pair(celsius: f64, fahrenheit: f64, unit: TemperatureUnit) -> String {
    let c = format!("{}{}", fixed(celsius, 0), TemperatureUnit::Celsius.symbol());
    let f = format!("{}{}", fixed(fahrenheit, 1), TemperatureUnit::Fahrenheit.symbol());
    match unit {
        TemperatureUnit::Celsius => format!("{} ({})", c, f),
        TemperatureUnit::Fahrenheit => format!("{} ({})", f, c),
    }
}

/// Upper-case the first character.
pub fn format_condition(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => NO_DATA.to_string(),
    }
}

/// Upper-case the first character of every space-separated word.
pub fn title_case(value: &str) -> String {
    value
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Indicator colour for a condition description.
pub fn condition_color(condition: &str) -> &'static str {
    let c = condition.to_lowercase();
    if c.contains("sun") || c.contains("clear") {
        "#f1c21b"
    } else if c.contains("cloud") {
        "#8a8a8a"
    } else if c.contains("rain") || c.contains("storm") {
        "#0f62fe"
    } else if c.contains("snow") {
        "#a6c8ff"
    } else {
        "#6f6f6f"
    }
}

/// Offset in whole minutes, ties rounded towards positive infinity.
fn offset_minutes(offset_seconds: i32) -> i64 {
    (offset_seconds as f64 / 60.0 + 0.5).floor() as i64
}

fn sign_of(value: i64) -> char {
    if value >= 0 {
        '+'
    } else {
        '-'
    }
}

/// Split an offset into sign, hours and minutes.
fn split_offset(sign: char, total_minutes: i64) -> (char, i64, i64) {
    let abs_minutes = total_minutes.abs();
    (sign, abs_minutes / 60, abs_minutes % 60)
}

/// Short timezone label, e.g. `UTC+5:30`, `UTC+0`, `UTC-3`.
///
/// The sign follows the rounded minutes, so a few seconds west of UTC
/// still reads `UTC+0`.
pub fn format_timezone(offset_seconds: i32) -> String {
    let total_minutes = offset_minutes(offset_seconds);
    let (sign, hours, minutes) = split_offset(sign_of(total_minutes), total_minutes);
    if minutes == 0 {
        format!("UTC{}{}", sign, hours)
    } else {
        format!("UTC{}{}:{:02}", sign, hours, minutes)
    }
}

/// Fixed-width offset, e.g. `+05:30`.
pub fn format_offset(offset_seconds: i32) -> String {
    let sign = sign_of(i64::from(offset_seconds));
    let (sign, hours, minutes) = split_offset(sign, offset_minutes(offset_seconds));
    format!("{}{:02}:{:02}", sign, hours, minutes)
}

/// Observation time rendered in the location's local time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastUpdated {
    /// Local wall time, `YYYY-MM-DD, HH:MM`.
    pub date_time: String,
    /// Offset from UTC, e.g. `+01:00`.
    pub offset: String,
}

impl std::fmt::Display for LastUpdated {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (UTC{})", self.date_time, self.offset)
    }
}

/// Render an observation timestamp at the location's UTC offset.
///
/// # Returns
///
/// `None` if the shifted timestamp is outside chrono's range.
pub fn format_last_updated(timestamp: i64, offset_seconds: i32) -> Option<LastUpdated> {
    let local = DateTime::from_timestamp(timestamp.checked_add(offset_seconds as i64)?, 0)?;
    Some(LastUpdated {
        date_time: local.format("%Y-%m-%d, %H:%M").to_string(),
        offset: format_offset(offset_seconds),
    })
}

/// Convert a wind speed from m/s to km/h.
pub fn wind_speed_kph(meters_per_second: f64) -> f64 {
    meters_per_second * KPH_PER_MPS
}

/// One row of the atmospheric data table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRow {
    /// Stable row identifier.
    pub id: &'static str,
    /// Row label.
    pub metric: &'static str,
    /// Formatted value, or [`NO_DATA`].
    pub value: String,
    /// Kind of value, used for the row tag.
    pub kind: &'static str,
}

fn or_no_data(
    snapshot: Option<&WeatherSnapshot>,
    unit: TemperatureUnit,
    render: fn(&WeatherSnapshot, TemperatureUnit) -> String,
) -> String {
    snapshot
        .map(|w| render(w, unit))
        .unwrap_or_else(|| NO_DATA.to_string())
}

/// Rows of the atmospheric data table for a snapshot, or placeholders.
pub fn atmospheric_rows(
    snapshot: Option<&WeatherSnapshot>,
    unit: TemperatureUnit,
) -> Vec<MetricRow> {
    vec![
        MetricRow {
            id: "current-temp",
            metric: "Current Temperature",
            value: or_no_data(snapshot, unit, |w, unit| {
                format_temperature_pair(w.temp_c, w.temp_f, unit)
            }),
            kind: "temperature",
        },
        MetricRow {
            id: "feels-like",
            metric: "Feels Like",
            value: or_no_data(snapshot, unit, |w, unit| {
                format_temperature_pair(w.feels_like_c, w.feels_like_f, unit)
            }),
            kind: "temperature",
        },
        MetricRow {
            id: "humidity",
            metric: "Humidity",
            value: or_no_data(snapshot, unit, |w, _| format!("{}%", w.humidity)),
            kind: "percentage",
        },
        MetricRow {
            id: "pressure",
            metric: "Atmospheric Pressure",
            value: or_no_data(snapshot, unit, |w, _| format!("{} hPa", w.pressure)),
            kind: "pressure",
        },
        MetricRow {
            id: "wind-speed",
            metric: "Wind Speed",
            value: or_no_data(snapshot, unit, |w, _| {
                format!("{} km/h", fixed(wind_speed_kph(w.wind_speed), 1))
            }),
            kind: "speed",
        },
        MetricRow {
            id: "visibility",
            metric: "Visibility",
            value: or_no_data(snapshot, unit, |w, _| format!("{} km", fixed(w.visibility_km, 1))),
            kind: "distance",
        },
        MetricRow {
            id: "condition",
            metric: "Condition",
            value: or_no_data(snapshot, unit, |w, _| format_condition(w.condition_text())),
            kind: "status",
        },
        MetricRow {
            id: "timezone",
            metric: "Timezone",
            value: or_no_data(snapshot, unit, |w, _| format_timezone(w.timezone_offset)),
            kind: "time",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::snapshot::{CurrentWeatherPayload, MainPayload, WindPayload};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn snapshot() -> WeatherSnapshot {
        let payload = CurrentWeatherPayload {
            main: Some(MainPayload {
                temp: Some(22.0),
                feels_like: Some(21.0),
                humidity: Some(64),
                pressure: Some(1013.0),
                ..Default::default()
            }),
            visibility: Some(9500.0),
            wind: Some(WindPayload {
                speed: Some(5.0),
                ..Default::default()
            }),
            weather: vec![],
            timezone: Some(19800),
            ..Default::default()
        };
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        WeatherSnapshot {
            description: "scattered clouds".to_string(),
            ..WeatherSnapshot::from_payload(&payload, now)
        }
    }

    #[test]
    fn test_format_temp() {
        assert_eq!(format_temp(22.0), "22");
        assert_eq!(format_temp(71.6), "71.6");
        assert_eq!(format_temp(-3.27), "-3.3");
    }

    #[test]
    fn test_format_rounds_ties_up() {
        assert_eq!(format_temp(70.25), "70.3");
        assert_eq!(format_temp(-2.25), "-2.3");
        assert_eq!(
            format_temperature_pair(22.5, 72.5, TemperatureUnit::Celsius),
            "23°C (72.5°F)"
        );
        assert_eq!(
            format_temperature_pair(21.25, 70.25, TemperatureUnit::Fahrenheit),
            "70.3°F (21°C)"
        );
    }

    #[test]
    fn test_format_temperature_pair() {
        assert_eq!(
            format_temperature_pair(22.0, 71.6, TemperatureUnit::Celsius),
            "22°C (71.6°F)"
        );
        assert_eq!(
            format_temperature_pair(22.0, 71.6, TemperatureUnit::Fahrenheit),
            "71.6°F (22°C)"
        );
    }

    #[test]
    fn test_condition_text() {
        assert_eq!(format_condition("light rain"), "Light rain");
        assert_eq!(format_condition(""), "--");
        assert_eq!(title_case("light shower snow"), "Light Shower Snow");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_condition_color() {
        assert_eq!(condition_color("Clear Sky"), "#f1c21b");
        assert_eq!(condition_color("Sunny"), "#f1c21b");
        assert_eq!(condition_color("Broken Clouds"), "#8a8a8a");
        assert_eq!(condition_color("Thunderstorm"), "#0f62fe");
        assert_eq!(condition_color("Light Snow"), "#a6c8ff");
        assert_eq!(condition_color("Haze"), "#6f6f6f");
    }

    #[test]
    fn test_format_timezone() {
        assert_eq!(format_timezone(0), "UTC+0");
        assert_eq!(format_timezone(19800), "UTC+5:30");
        assert_eq!(format_timezone(-10800), "UTC-3");
        assert_eq!(format_timezone(-12600), "UTC-3:30");
    }

    #[test]
    fn test_format_timezone_sign_follows_rounded_minutes() {
        assert_eq!(format_timezone(-1), "UTC+0");
        assert_eq!(format_timezone(-29), "UTC+0");
        assert_eq!(format_timezone(-30), "UTC+0");
        assert_eq!(format_timezone(-31), "UTC-0:01");
        assert_eq!(format_timezone(30), "UTC+0:01");
    }

    #[test]
    fn test_format_offset() {
        assert_eq!(format_offset(0), "+00:00");
        assert_eq!(format_offset(19800), "+05:30");
        assert_eq!(format_offset(-18000), "-05:00");
    }

    #[test]
    fn test_format_last_updated() {
        // 2024-01-15 12:00 UTC, viewed from UTC+1
        let updated = format_last_updated(1_705_320_000, 3600).unwrap();
        assert_eq!(updated.date_time, "2024-01-15, 13:00");
        assert_eq!(updated.offset, "+01:00");
        assert_eq!(updated.to_string(), "2024-01-15, 13:00 (UTC+01:00)");

        assert!(format_last_updated(i64::MAX, 3600).is_none());
    }

    #[test]
    fn test_wind_speed_kph() {
        assert!((wind_speed_kph(10.0) - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_atmospheric_rows_with_data() {
        let rows = atmospheric_rows(Some(&snapshot()), TemperatureUnit::Celsius);
        let values: Vec<_> = rows.iter().map(|r| (r.id, r.value.as_str())).collect();

        assert_eq!(
            values,
            vec![
                ("current-temp", "22°C (71.6°F)"),
                ("feels-like", "21°C (69.8°F)"),
                ("humidity", "64%"),
                ("pressure", "1013 hPa"),
                ("wind-speed", "18.0 km/h"),
                ("visibility", "9.5 km"),
                ("condition", "Scattered clouds"),
                ("timezone", "UTC+5:30"),
            ]
        );
    }

    #[test]
    fn test_atmospheric_rows_without_data() {
        let rows = atmospheric_rows(None, TemperatureUnit::Fahrenheit);
        assert_eq!(rows.len(), 8);
        assert!(rows.iter().all(|r| r.value == NO_DATA));
        assert_eq!(rows[3].metric, "Atmospheric Pressure");
        assert_eq!(rows[3].kind, "pressure");
    }
}

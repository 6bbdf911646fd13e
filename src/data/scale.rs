//! Temperature classification and gauge positioning.
//!
//! A reading is classified into one of ten comfort bands covering
//! -20°C to 40°C and placed on a fixed-range gauge as a percentage.
//! Readings outside the range saturate at the ends of the gauge.

use crate::data::units::TemperatureUnit;

/// Lower bound of the gauge in Celsius.
pub const SCALE_MIN_CELSIUS: f64 = -20.0;

/// Upper bound of the gauge in Celsius.
pub const SCALE_MAX_CELSIUS: f64 = 40.0;

/// One comfort band on the temperature scale.
///
/// Bands are half-open `[min_c, max_c)` except the last, which is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TemperatureBand {
    /// Human-readable label.
    pub label: &'static str,
    /// Inclusive lower bound in Celsius.
    pub min_c: f64,
    /// Upper bound in Celsius (exclusive except for the last band).
    pub max_c: f64,
    /// Where the band's label sits on the gauge, in Celsius.
    pub tick_c: f64,
}

impl TemperatureBand {
    const fn new(label: &'static str, min_c: f64, max_c: f64) -> Self {
        Self {
            label,
            min_c,
            max_c,
            tick_c: min_c,
        }
    }

    /// Check whether a clamped Celsius value falls in this band.
    ///
    /// `is_last` selects the closed upper bound of the terminal band.
    pub fn contains(&self, temp_c: f64, is_last: bool) -> bool {
        temp_c >= self.min_c
            && if is_last {
                temp_c <= self.max_c
            } else {
                temp_c < self.max_c
            }
    }
}

/// The ten comfort bands, ordered from coldest to hottest.
pub static TEMPERATURE_BANDS: [TemperatureBand; 10] = [
    TemperatureBand::new("Freezing", -20.0, -5.0),
    TemperatureBand::new("V. Cold", -5.0, 0.0),
    TemperatureBand::new("Near Zero", 0.0, 5.0),
    TemperatureBand::new("Cold", 5.0, 10.0),
    TemperatureBand::new("Cool", 10.0, 15.0),
    TemperatureBand::new("Mild", 15.0, 20.0),
    TemperatureBand::new("Comfort", 20.0, 25.0),
    TemperatureBand::new("Warm", 25.0, 30.0),
    TemperatureBand::new("Hot", 30.0, 40.0),
    // Open-ended above; clamping folds everything hotter onto 40.
    TemperatureBand::new("V. Hot", 40.0, 40.0),
];

/// Colour stops of the gauge track as `(colour, percent)`.
pub const GAUGE_GRADIENT: [(&str, u8); 4] = [
    ("#4589ff", 0),
    ("#42be65", 30),
    ("#f1c21b", 50),
    ("#da1e28", 100),
];

/// A label position along the gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GaugeTick {
    /// Band label.
    pub label: &'static str,
    /// Tick value in the display unit.
    pub value: f64,
    /// Position along the gauge, 0 to 100.
    pub position: f64,
}

/// Classification and marker position of one reading.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GaugeReading {
    /// The band the reading falls in.
    pub band: &'static TemperatureBand,
    /// Marker position along the gauge, 0 to 100.
    pub position: f64,
}

/// Gauge bounds expressed in the given unit.
///
/// The Celsius endpoints are converted rather than restated so the
/// Fahrenheit gauge lines up with the Celsius classification.
pub fn scale_bounds(unit: TemperatureUnit) -> (f64, f64) {
    (
        unit.convert_celsius(SCALE_MIN_CELSIUS),
        unit.convert_celsius(SCALE_MAX_CELSIUS),
    )
}

/// Classify a Celsius reading into its comfort band.
///
/// Readings below -20°C are "Freezing" and above 40°C "V. Hot".
///
/// # Returns
///
/// `None` if the reading is not finite (no data to classify).
///
/// # Example
///
/// ```
/// use weather_gauge::classify;
///
/// assert_eq!(classify(22.0).map(|b| b.label), Some("Comfort"));
/// assert_eq!(classify(5.0).map(|b| b.label), Some("Cold"));
/// assert_eq!(classify(-30.0).map(|b| b.label), Some("Freezing"));
/// assert!(classify(f64::NAN).is_none());
/// ```
pub fn classify(temp_c: f64) -> Option<&'static TemperatureBand> {
    if !temp_c.is_finite() {
        return None;
    }

    let clamped = temp_c.clamp(SCALE_MIN_CELSIUS, SCALE_MAX_CELSIUS);
    let last = TEMPERATURE_BANDS.len() - 1;

    TEMPERATURE_BANDS
        .iter()
        .enumerate()
        .find(|(i, band)| band.contains(clamped, *i == last))
        .map(|(_, band)| band)
}

/// Normalise a value already expressed in `unit` onto the gauge.
fn normalize(value: f64, unit: TemperatureUnit) -> f64 {
    let (min, max) = scale_bounds(unit);
    let clamped = value.clamp(min, max);
    (clamped - min) / (max - min) * 100.0
}

/// Position of a Celsius reading on the gauge, 0 to 100.
///
/// The reading is converted to `unit` first, then clamped to the gauge
/// bounds in that unit.
///
/// # Returns
///
/// `None` if the reading is not finite.
///
/// # Example
///
/// ```
/// use weather_gauge::{marker_position, TemperatureUnit};
///
/// assert_eq!(marker_position(10.0, TemperatureUnit::Celsius), Some(50.0));
/// assert_eq!(marker_position(60.0, TemperatureUnit::Celsius), Some(100.0));
///
/// let f = marker_position(0.0, TemperatureUnit::Fahrenheit).unwrap();
/// assert!((f - 33.33).abs() < 0.01);
/// ```
pub fn marker_position(temp_c: f64, unit: TemperatureUnit) -> Option<f64> {
    if !temp_c.is_finite() {
        return None;
    }
    Some(normalize(unit.convert_celsius(temp_c), unit))
}

/// Position of a band tick (given in Celsius) on the gauge, 0 to 100.
pub fn tick_position(tick_c: f64, unit: TemperatureUnit) -> f64 {
    normalize(unit.convert_celsius(tick_c), unit)
}

/// All band ticks for the given display unit, coldest first.
pub fn gauge_ticks(unit: TemperatureUnit) -> Vec<GaugeTick> {
    TEMPERATURE_BANDS
        .iter()
        .map(|band| GaugeTick {
            label: band.label,
            value: unit.convert_celsius(band.tick_c),
            position: tick_position(band.tick_c, unit),
        })
        .collect()
}

/// Classify a reading and place it on the gauge in one step.
///
/// # Returns
///
/// `None` if the reading is not finite; callers show a "no data" gauge.
pub fn read_gauge(temp_c: f64, unit: TemperatureUnit) -> Option<GaugeReading> {
    Some(GaugeReading {
        band: classify(temp_c)?,
        position: marker_position(temp_c, unit)?,
    })
}

/// CSS background for the gauge track.
pub fn gauge_gradient_css() -> String {
    let stops: Vec<String> = GAUGE_GRADIENT
        .iter()
        .map(|(colour, percent)| format!("{} {}%", colour, percent))
        .collect();
    format!("linear-gradient(90deg, {})", stops.join(", "))
}

//! # weather-gauge
//!
//! Temperature handling for a single-page weather lookup client.
//!
//! The crate converts between Celsius and Fahrenheit at a fixed two-decimal
//! precision, classifies readings into ten comfort bands between -20°C and
//! 40°C, and places readings on a fixed-range gauge in either unit. Around
//! that core it carries the snapshot type built from the weather provider's
//! payload, display formatting for the weather cards, and an async lookup
//! session that debounces searches and keeps a single fetch in flight.
//!
//! ## Features
//!
//! - **Unit Conversion**: Rounded, mutually inverse Celsius/Fahrenheit converters
//! - **Classification**: Ten contiguous comfort bands with clamped tails
//! - **Gauge Positioning**: Marker and tick positions in either unit
//! - **Snapshots**: Immutable current-conditions records with provider defaults
//! - **Formatting**: Strings for temperatures, timezones and the metrics table
//! - **Lookup Session**: Debounced suggestions, cancel-previous weather fetches
//!
//! ## Quick Start
//!
//! ```rust
//! use weather_gauge::{classify, marker_position, TemperatureUnit};
//!
//! let band = classify(22.0).expect("finite reading");
//! assert_eq!(band.label, "Comfort");
//!
//! let position = marker_position(22.0, TemperatureUnit::Fahrenheit).unwrap();
//! println!("{} at {:.1}% of the gauge", band.label, position);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for data types

pub mod data;
pub mod error;
pub mod format;
pub mod search;
pub mod session;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};
pub use search::SuggestionList;
pub use session::{
    CallbackHandle, SessionConfig, SessionEvent, WeatherSession, WeatherSource, WeatherState,
};
pub use utils::{
    celsius_to_fahrenheit, fahrenheit_to_celsius, round_to_two_decimals,
    validate_temperature_conversions, TEMPERATURE_TEST_CASES,
};

// Re-export commonly used types from submodules
pub use data::{
    classify, gauge_ticks, marker_position, read_gauge, tick_position, CurrentWeatherPayload,
    GaugeReading, GaugeTick, GeoLocation, TemperatureBand, TemperatureUnit, WeatherSnapshot,
    TEMPERATURE_BANDS,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        // Verify that key types are exported
        let _ = std::any::TypeId::of::<TemperatureBand>();
        let _ = std::any::TypeId::of::<TemperatureUnit>();
        let _ = std::any::TypeId::of::<WeatherSnapshot>();
        let _ = std::any::TypeId::of::<GeoLocation>();
        let _ = std::any::TypeId::of::<SuggestionList>();
        let _ = std::any::TypeId::of::<Error>();
    }

    #[test]
    fn test_conversion_table_validates() {
        assert!(validate_temperature_conversions());
    }

    #[test]
    fn test_gauge_reference_points() {
        assert_eq!(classify(-20.0).map(|b| b.label), Some("Freezing"));
        assert_eq!(classify(40.0).map(|b| b.label), Some("V. Hot"));
        assert_eq!(marker_position(-20.0, TemperatureUnit::Celsius), Some(0.0));
        assert_eq!(tick_position(40.0, TemperatureUnit::Fahrenheit), 100.0);
    }
}

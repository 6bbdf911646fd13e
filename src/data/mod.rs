//! Data structures for weather readings.
//!
//! This module contains the display unit, the comfort-band scale and the
//! snapshot and location types produced by the weather source.

pub mod scale;
pub mod snapshot;
pub mod units;

pub use scale::{
    classify, gauge_gradient_css, gauge_ticks, marker_position, read_gauge, scale_bounds,
    tick_position, GaugeReading, GaugeTick, TemperatureBand, GAUGE_GRADIENT, SCALE_MAX_CELSIUS,
    SCALE_MIN_CELSIUS, TEMPERATURE_BANDS,
};
pub use snapshot::{
    CloudsPayload, ConditionPayload, CurrentWeatherPayload, GeoLocation, MainPayload,
    PrecipitationPayload, WeatherSnapshot, WindPayload,
};
pub use units::TemperatureUnit;

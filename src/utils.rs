//! Unit conversion helpers for the weather-gauge crate.
//!
//! Every conversion is rounded to two decimal places so that a value
//! converted back and forth settles on the same number.

/// A known Celsius/Fahrenheit pair used to verify the converters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionCase {
    /// Temperature in degrees Celsius.
    pub celsius: f64,
    /// The same temperature in degrees Fahrenheit.
    pub fahrenheit: f64,
}

/// Fixed points every conversion must reproduce exactly at two decimals.
pub const TEMPERATURE_TEST_CASES: [ConversionCase; 5] = [
    ConversionCase {
        celsius: 0.0,
        fahrenheit: 32.0,
    },
    ConversionCase {
        celsius: 100.0,
        fahrenheit: 212.0,
    },
    ConversionCase {
        celsius: -40.0,
        fahrenheit: -40.0,
    },
    ConversionCase {
        celsius: 37.0,
        fahrenheit: 98.6,
    },
    ConversionCase {
        celsius: 21.11,
        fahrenheit: 70.0,
    },
];

/// Round a value to two decimal places, halves away from zero.
///
/// Applying it twice gives the same result as applying it once.
#[inline]
pub fn round_to_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert Celsius to Fahrenheit.
///
/// # Arguments
///
/// * `celsius` - Temperature in degrees Celsius
///
/// # Returns
///
/// Temperature in degrees Fahrenheit, rounded to two decimals.
///
/// # Example
///
/// ```
/// use weather_gauge::celsius_to_fahrenheit;
///
/// assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
/// assert_eq!(celsius_to_fahrenheit(37.0), 98.6);
/// ```
#[inline]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    round_to_two_decimals(celsius * 9.0 / 5.0 + 32.0)
}

/// Convert Fahrenheit to Celsius.
///
/// # Arguments
///
/// * `fahrenheit` - Temperature in degrees Fahrenheit
///
/// # Returns
///
/// Temperature in degrees Celsius, rounded to two decimals.
///
/// # Example
///
/// ```
/// use weather_gauge::fahrenheit_to_celsius;
///
/// assert_eq!(fahrenheit_to_celsius(212.0), 100.0);
/// assert_eq!(fahrenheit_to_celsius(70.0), 21.11);
/// ```
#[inline]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    round_to_two_decimals((fahrenheit - 32.0) * 5.0 / 9.0)
}

/// Check both converters against [`TEMPERATURE_TEST_CASES`].
///
/// Returns `true` only when every pair converts in both directions to the
/// table value. Meant for the test suite, not for user input.
pub fn validate_temperature_conversions() -> bool {
    TEMPERATURE_TEST_CASES.iter().all(|case| {
        let to_f = celsius_to_fahrenheit(case.celsius);
        let to_c = fahrenheit_to_celsius(case.fahrenheit);
        round_to_two_decimals(to_f) == round_to_two_decimals(case.fahrenheit)
            && round_to_two_decimals(to_c) == round_to_two_decimals(case.celsius)
    })
}

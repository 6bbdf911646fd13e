//! Error types for the weather-gauge crate.
//!
//! The conversion and classification functions never fail; these errors
//! come from parsing user-supplied values and from the lookup session.

use thiserror::Error;

/// The main error type for this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An invalid parameter was provided.
    #[error("Invalid parameter: {name} = {value}")]
    InvalidParameter {
        /// The name of the parameter.
        name: String,
        /// The invalid value that was provided.
        value: String,
    },

    /// Invalid data was received from the weather source.
    #[error("Invalid data received: {context}")]
    InvalidData {
        /// Description of what was invalid about the data.
        context: String,
    },

    /// Geocoding produced no match for the query.
    #[error("Location not found: {query}")]
    LocationNotFound {
        /// The query that was searched for.
        query: String,
    },

    /// The weather source failed to answer.
    #[error("Weather source error: {reason}")]
    Source {
        /// Description of why the request failed.
        reason: String,
    },

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for a [`Error::Source`] error.
    pub fn source_failure(reason: impl Into<String>) -> Self {
        Self::Source {
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::InvalidParameter {
            name: "unit".to_string(),
            value: "kelvin".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid parameter: unit = kelvin");

        let err = Error::source_failure("503 Service Unavailable");
        assert_eq!(
            err.to_string(),
            "Weather source error: 503 Service Unavailable"
        );

        let err = Error::LocationNotFound {
            query: "Atlantis".to_string(),
        };
        assert_eq!(err.to_string(), "Location not found: Atlantis");
    }
}

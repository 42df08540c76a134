//! Error types for cartoee.
//!
//! Every validation failure surfaces synchronously with the offending value
//! attached. Advisory conditions (see [`crate::legend::LegendWarning`]) are not
//! errors and never appear here.

use thiserror::Error;

/// The main error type for cartoee operations.
#[derive(Error, Debug)]
pub enum CartoeeError {
    /// The color-scale registry has no scale with this name
    #[error("Unknown color scale: {name}")]
    UnknownScale { name: String },

    /// Palettes need at least one sample
    #[error("Invalid sample count: {count} (must be >= 1)")]
    InvalidSampleCount { count: usize },

    /// `min`/`max` visualization bounds that are not usable numbers
    #[error("Invalid range: {message}")]
    InvalidRange { message: String },

    /// Both an explicit palette and a named scale were supplied
    #[error("Ambiguous color source: palette {palette:?} given together with scale '{scale}'")]
    AmbiguousColorSource { palette: Vec<String>, scale: String },

    /// Neither an explicit palette nor a named scale was supplied
    #[error("Missing color source: provide a palette or a named color scale")]
    MissingColorSource,

    /// A palette entry that is not a six digit hex triple
    #[error("Invalid color code: '{code}' (expected #rrggbb)")]
    InvalidColorCode { code: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Failures reported by the imagery service collaborator
    #[error("Fetch error: {message}")]
    Fetch { message: String },

    /// Image decoding/encoding errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with CartoeeError
pub type Result<T> = std::result::Result<T, CartoeeError>;

impl CartoeeError {
    pub(crate) fn invalid_parameter(param: &str, message: impl Into<String>) -> Self {
        CartoeeError::InvalidParameter {
            param: param.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = CartoeeError::UnknownScale {
            name: "nope".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown color scale: nope");

        let err = CartoeeError::InvalidColorCode {
            code: "#zzzzzz".to_string(),
        };
        assert!(err.to_string().contains("#zzzzzz"));

        let err = CartoeeError::invalid_parameter("opacity", "must be in [0, 1]");
        assert_eq!(err.to_string(), "Invalid parameter: opacity - must be in [0, 1]");
    }
}

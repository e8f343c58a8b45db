use thiserror::Error;

/// Validation errors for generator configuration.
///
/// Every generator validates its config at construction so a bad value
/// can never produce silently-wrong geometry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid side length must be at least 1, got {0}")]
    GridTooSmall(usize),

    #[error("unity must be within 0.0..=1.0, got {0}")]
    UnityOutOfRange(f32),

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("variance must not be negative, got {0}")]
    NegativeVariance(f32),
}

//! Errors raised by the pure model layer.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("unknown transport mode: {0}")]
    UnknownMode(String),
    #[error("invalid coordinate ({lat}, {lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },
    #[error("unknown hub type: {0}")]
    UnknownHubType(String),
}

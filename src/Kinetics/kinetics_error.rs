use crate::Geometry::molecular_geometry::GeometryError;
use crate::Thermodynamics::thermo_api::ThermoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KineticsError {
    #[error("Invalid temperature {0} K: temperature must be positive and finite")]
    InvalidTemperature(f64),
    #[error("Invalid {quantity}: {value}")]
    InvalidInput { quantity: String, value: f64 },
    #[error("Missing concentration of species {species}")]
    MissingConcentration { species: String },
    #[error("Invalid option '{received}', expected one of: {expected}")]
    InvalidOption { received: String, expected: String },
    #[error("Reaction {reaction} is irreversible: cannot {operation}")]
    IrreversibleReaction { reaction: String, operation: String },
    #[error("Missing data: {0}")]
    MissingData(String),
    #[error("Tunneling correction: {0}")]
    Tunneling(String),
    #[error("Integration did not converge: {0}")]
    Convergence(String),
    #[error("Invalid reaction: {0}")]
    InvalidReaction(String),
    #[error("Fitting failed: {0}")]
    Fitting(String),
    #[error("Thermodynamics error: {0}")]
    Thermo(#[from] ThermoError),
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub(crate) fn check_temperature(T: f64) -> Result<(), KineticsError> {
    if T.is_finite() && T > 0.0 {
        Ok(())
    } else {
        Err(KineticsError::InvalidTemperature(T))
    }
}

/// finite and not negative
pub(crate) fn check_non_negative(value: f64, quantity: &str) -> Result<(), KineticsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(KineticsError::InvalidInput {
            quantity: quantity.to_string(),
            value,
        })
    }
}

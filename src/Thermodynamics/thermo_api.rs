use super::NASAdata::NASAdata;
use super::states::StatesModel;
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/////////////////////ERROR HANDLING////////////////////////////////////////////////////////
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ThermoError {
    #[error("Invalid temperature {0} K: temperature must be positive and finite")]
    InvalidTemperature(f64),
    #[error("No coefficients found for temperature {temperature} K. Valid range: {range}")]
    NoCoefficientsFound { temperature: f64, range: String },
    #[error("Invalid coefficient data: {0}")]
    InvalidCoefficients(String),
    #[error("Missing data: {0}")]
    MissingData(String),
    #[error("Calculation error: {0}")]
    CalculationError(String),
    #[error("Invalid energy grid: {0}")]
    InvalidEnergyGrid(String),
}

pub(crate) fn check_temperature(T: f64) -> Result<(), ThermoError> {
    if T.is_finite() && T > 0.0 {
        Ok(())
    } else {
        Err(ThermoError::InvalidTemperature(T))
    }
}

pub(crate) fn check_finite(value: f64, what: &str, T: f64) -> Result<f64, ThermoError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ThermoError::CalculationError(format!(
            "{} is not finite at T = {} K",
            what, T
        )))
    }
}
////////////////////////////////////////////////////////////////////////////////////////////

/// Thermodynamic properties of one species. Energies are in J/mol, heat capacity and
/// entropy in J/(mol*K), temperature in K.
#[enum_dispatch]
pub trait ThermoModel {
    fn get_heat_capacity(&self, T: f64) -> Result<f64, ThermoError>;
    fn get_enthalpy(&self, T: f64) -> Result<f64, ThermoError>;
    fn get_entropy(&self, T: f64) -> Result<f64, ThermoError>;
    /// Gibbs free energy G = H - T*S
    fn get_free_energy(&self, T: f64) -> Result<f64, ThermoError> {
        Ok(self.get_enthalpy(T)? - T * self.get_entropy(T)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[enum_dispatch(ThermoModel)]
pub enum ThermoEnum {
    NASA(NASAdata),
    StatMech(StatMechThermo),
}

/// Thermodynamics derived from molecular degrees of freedom: the enthalpy is measured from
/// the ground-state energy `E0` of the species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatMechThermo {
    #[serde(default)]
    pub E0: f64,
    pub states: StatesModel,
}

impl StatMechThermo {
    pub fn new(E0: f64, states: StatesModel) -> Self {
        Self { E0, states }
    }
}

impl ThermoModel for StatMechThermo {
    fn get_heat_capacity(&self, T: f64) -> Result<f64, ThermoError> {
        self.states.get_heat_capacity(T)
    }
    fn get_enthalpy(&self, T: f64) -> Result<f64, ThermoError> {
        Ok(self.E0 + self.states.get_enthalpy(T)?)
    }
    fn get_entropy(&self, T: f64) -> Result<f64, ThermoError> {
        self.states.get_entropy(T)
    }
}

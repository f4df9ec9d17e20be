use super::states::StatesModel;
use super::thermo_api::{ThermoEnum, ThermoError, ThermoModel};
use serde::{Deserialize, Serialize};

/// A chemical species: its ground-state energy `E0` (J/mol), and its thermodynamics either
/// as a fitted model (`thermo`) or from molecular degrees of freedom (`states`). When both
/// are present `thermo` is used for H, S, Cp and `states` for partition functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub label: String,
    #[serde(default)]
    pub E0: f64,
    #[serde(default)]
    pub thermo: Option<ThermoEnum>,
    #[serde(default)]
    pub states: Option<StatesModel>,
}

impl Species {
    pub fn new(label: &str, E0: f64) -> Self {
        Self {
            label: label.to_string(),
            E0,
            thermo: None,
            states: None,
        }
    }
    pub fn from_states(label: &str, E0: f64, states: StatesModel) -> Self {
        Self::new(label, E0).with_states(states)
    }
    pub fn with_thermo(mut self, thermo: ThermoEnum) -> Self {
        self.thermo = Some(thermo);
        self
    }
    pub fn with_states(mut self, states: StatesModel) -> Self {
        self.states = Some(states);
        self
    }

    fn states_or_err(&self) -> Result<&StatesModel, ThermoError> {
        self.states.as_ref().ok_or_else(|| {
            ThermoError::MissingData(format!("species {} has no molecular states", self.label))
        })
    }

    fn no_thermo(&self) -> ThermoError {
        ThermoError::MissingData(format!(
            "species {} has neither a thermo model nor molecular states",
            self.label
        ))
    }

    /// molecular partition function, see `StatesModel::get_partition_function`
    pub fn get_partition_function(&self, T: f64) -> Result<f64, ThermoError> {
        self.states_or_err()?.get_partition_function(T)
    }
}

impl ThermoModel for Species {
    fn get_heat_capacity(&self, T: f64) -> Result<f64, ThermoError> {
        match (&self.thermo, &self.states) {
            (Some(thermo), _) => thermo.get_heat_capacity(T),
            (None, Some(states)) => states.get_heat_capacity(T),
            (None, None) => Err(self.no_thermo()),
        }
    }
    fn get_enthalpy(&self, T: f64) -> Result<f64, ThermoError> {
        match (&self.thermo, &self.states) {
            (Some(thermo), _) => thermo.get_enthalpy(T),
            (None, Some(states)) => Ok(self.E0 + states.get_enthalpy(T)?),
            (None, None) => Err(self.no_thermo()),
        }
    }
    fn get_entropy(&self, T: f64) -> Result<f64, ThermoError> {
        match (&self.thermo, &self.states) {
            (Some(thermo), _) => thermo.get_entropy(T),
            (None, Some(states)) => states.get_entropy(T),
            (None, None) => Err(self.no_thermo()),
        }
    }
}

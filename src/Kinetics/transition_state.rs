use crate::Thermodynamics::states::StatesModel;
use serde::{Deserialize, Serialize};

fn default_degeneracy() -> u32 {
    1
}

/// Saddle point between reactants and products. `E0` is the ground-state energy in J/mol on
/// the same scale as the species energies; `frequency` is the imaginary frequency of the
/// reaction coordinate in cm^-1, stored as a negative number; `degeneracy` is the reaction
/// path degeneracy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionState {
    pub label: String,
    pub E0: f64,
    pub frequency: f64,
    #[serde(default = "default_degeneracy")]
    pub degeneracy: u32,
    pub states: StatesModel,
}

impl TransitionState {
    pub fn new(label: &str, E0: f64, frequency: f64, degeneracy: u32, states: StatesModel) -> Self {
        Self {
            label: label.to_string(),
            E0,
            frequency,
            degeneracy,
            states,
        }
    }
}

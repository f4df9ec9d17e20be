/// error type of the kinetics subsystem
pub mod kinetics_error;
/// rate coefficient models: modified Arrhenius, pressure-dependent Arrhenius, Troe falloff
pub mod kinetics_models;
/// A chemical reaction: thermodynamics of reaction, equilibrium constants, mass-action rates,
/// reverse rate coefficients and transition state theory rate coefficients.
/// # Examples
/// ```
/// use KiRate::Kinetics::reaction::{EquilibriumConstantType, Reaction};
/// use KiRate::Thermodynamics::species::Species;
/// use KiRate::Thermodynamics::states::{HarmonicOscillator, StatesModel, Translation};
/// let states = StatesModel::new(
///     vec![Translation::new(0.03).into(), HarmonicOscillator::new(vec![1000.0]).into()],
///     1,
/// );
/// let species = vec![
///     Species::from_states("A", 0.0, states.clone()),
///     Species::from_states("B", 0.0, states),
/// ];
/// let reaction = Reaction::from_equation(1, "A <=> B", &species).unwrap();
/// let K = reaction
///     .get_equilibrium_constant(&species, 500.0, EquilibriumConstantType::Kc)
///     .unwrap();
/// assert!((K - 1.0).abs() < 1e-9);
/// ```
pub mod reaction;
mod reaction_tests;
/// species table, reactions, stoichiometry matrix, net production rates, model files
pub mod reaction_model;
pub mod transition_state;
/// Wigner and Eckart tunneling corrections
pub mod tunneling;

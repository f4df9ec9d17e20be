/// NASA 7-coefficient polynomials: numeric and symbolic Cp, H, S
pub mod NASAdata;
/// molecular species: energy, thermo model, molecular states
pub mod species;
/// statistical mechanics of molecular degrees of freedom
/// # Examples
/// ```
/// use KiRate::Thermodynamics::states::{HarmonicOscillator, RigidRotor, StatesModel, Translation};
/// // carbon monoxide
/// let states = StatesModel::new(
///     vec![
///         Translation::new(0.028).into(),
///         RigidRotor::new(true, vec![1.449e-46], 1).into(),
///         HarmonicOscillator::new(vec![2143.0]).into(),
///     ],
///     1,
/// );
/// let S = states.get_entropy(298.15).unwrap();
/// assert!((S - 197.6).abs() < 1.0);
/// ```
pub mod states;
mod states_tests;
/// common interface of species thermodynamics, error type
pub mod thermo_api;

use crate::Geometry::molecular_geometry::Geometry;
use crate::Kinetics::kinetics_error::KineticsError;
use crate::Kinetics::kinetics_models::ArrheniusModel;
use crate::Kinetics::reaction::{EquilibriumConstantType, Reaction};
use crate::Kinetics::reaction_model::ReactionModel;
use crate::Kinetics::transition_state::TransitionState;
use crate::Kinetics::tunneling::TunnelingModel;
use crate::Thermodynamics::NASAdata::NASAdata;
use crate::Thermodynamics::species::Species;
use crate::Thermodynamics::states::{
    HarmonicOscillator, HinderedRotor, RigidRotor, StatesModel, Translation,
};
use crate::constants::{P0, amu, angstrom};
use nalgebra::Vector3;
use std::collections::HashMap;

// GRI-Mech 3.0
const H2: [[f64; 7]; 2] = [
    [
        2.34433112E+00, 7.98052075E-03, -1.94781510E-05, 2.01572094E-08, -7.37611761E-12,
        -9.17935173E+02, 6.83010238E-01,
    ],
    [
        3.33727920E+00, -4.94024731E-05, 4.99456778E-07, -1.79566394E-10, 2.00255376E-14,
        -9.50158922E+02, -3.20502331E+00,
    ],
];
const O2: [[f64; 7]; 2] = [
    [
        3.78245636E+00, -2.99673416E-03, 9.84730201E-06, -9.68129509E-09, 3.24372837E-12,
        -1.06394356E+03, 3.65767573E+00,
    ],
    [
        3.28253784E+00, 1.48308754E-03, -7.57966669E-07, 2.09470555E-10, -2.16717794E-14,
        -1.08845772E+03, 5.45323129E+00,
    ],
];
const H2O: [[f64; 7]; 2] = [
    [
        4.19864056E+00, -2.03643410E-03, 6.52040211E-06, -5.48797062E-09, 1.77197817E-12,
        -3.02937267E+04, -8.49032208E-01,
    ],
    [
        3.03399249E+00, 2.17691804E-03, -1.64072518E-07, -9.70419870E-11, 1.68200992E-14,
        -3.00042971E+04, 4.96677010E+00,
    ],
];

fn gri_species() -> Result<Vec<Species>, KineticsError> {
    let make = |label: &str, c: [[f64; 7]; 2]| -> Result<Species, KineticsError> {
        let nasa = NASAdata::two_ranges(200.0, 1000.0, 3500.0, c[0], c[1])?;
        Ok(Species::new(label, 0.0).with_thermo(nasa.into()))
    };
    Ok(vec![make("H2", H2)?, make("O2", O2)?, make("H2O", H2O)?])
}

/// a small made-up model of a 1,2-H shift with a methyl torsion
const ISOMERIZATION_JSON: &str = r#"{
    "species": [
        {"label": "R", "E0": 0.0,
         "states": {"modes": [{"Translation": {"mass": 0.043}},
                              {"RigidRotor": {"linear": false, "inertia": [8.0e-47, 2.4e-46, 2.9e-46], "symmetry": 1}},
                              {"HarmonicOscillator": {"frequencies": [420.0, 810.0, 1050.0, 1380.0, 1460.0, 2950.0, 3050.0]}},
                              {"HinderedRotor": {"inertia": 5.0e-47, "barrier": 4000.0, "symmetry": 3}}],
                    "spin_multiplicity": 2}},
        {"label": "P", "E0": -15000.0,
         "states": {"modes": [{"Translation": {"mass": 0.043}},
                              {"RigidRotor": {"linear": false, "inertia": [7.5e-47, 2.5e-46, 3.0e-46], "symmetry": 1}},
                              {"HarmonicOscillator": {"frequencies": [450.0, 830.0, 1100.0, 1400.0, 1470.0, 2980.0, 3080.0]}},
                              {"HinderedRotor": {"inertia": 5.0e-47, "barrier": 5000.0, "symmetry": 3}}],
                    "spin_multiplicity": 2}}
    ],
    "reactions": [
        {"equation": "R <=> P",
         "transition_state": {"label": "TS", "E0": 150000.0, "frequency": -1800.0,
                              "states": {"modes": [{"Translation": {"mass": 0.043}},
                                                   {"RigidRotor": {"linear": false, "inertia": [8.5e-47, 2.3e-46, 2.8e-46], "symmetry": 1}},
                                                   {"HarmonicOscillator": {"frequencies": [500.0, 900.0, 1200.0, 1400.0, 2900.0, 3000.0]}}],
                                         "spin_multiplicity": 2}},
         "kinetics": {"Arrhenius": {"A": 3.0e12, "n": 0.5, "Ea": 148000.0}}}
    ]
}"#;

pub fn rate_examples(task: usize) -> Result<(), KineticsError> {
    match task {
        0 => {
            // thermochemistry of 2 H2 + O2 <=> 2 H2O
            let species = gri_species()?;
            let reaction = Reaction::from_equation(1, "2 H2 + O2 <=> 2 H2O", &species)?;
            println!("{}: {}", reaction, reaction.equation(&species)?);
            for T in [298.15, 1000.0, 2000.0] {
                let dH = reaction.get_enthalpy_of_reaction(&species, T)?;
                let dS = reaction.get_entropy_of_reaction(&species, T)?;
                let dG = reaction.get_free_energy_of_reaction(&species, T)?;
                let Kp = reaction.get_equilibrium_constant(&species, T, EquilibriumConstantType::Kp)?;
                println!(
                    "T = {} K: dH = {:.1} J/mol, dS = {:.3} J/mol/K, dG = {:.1} J/mol, Kp = {:.4e} 1/Pa",
                    T, dH, dS, dG, Kp
                );
            }
            let T = 1500.0;
            let (dH_sym, dS_sym) = reaction.create_sym_dH_dS_of_reaction(&species, T)?;
            println!("dH(T) = {}", dH_sym);
            println!("dS(T) = {}", dS_sym);
            let dH_T = dH_sym.lambdify1D();
            println!(
                "symbolic dH at {} K: {:.1}, numeric: {:.1}",
                T,
                dH_T(T),
                reaction.get_enthalpy_of_reaction(&species, T)?
            );
        }
        1 => {
            // transition state theory with and without tunneling, then the reverse fit
            let reactant = Species::from_states(
                "R",
                0.0,
                StatesModel::new(
                    vec![
                        Translation::new(0.016).into(),
                        RigidRotor::new(false, vec![5.3e-47, 5.3e-47, 5.3e-47], 12).into(),
                        HarmonicOscillator::new(vec![1306.0, 1306.0, 1306.0, 1534.0, 1534.0, 2917.0, 3019.0, 3019.0, 3019.0]).into(),
                    ],
                    1,
                ),
            );
            let product = Species::from_states(
                "P",
                -20000.0,
                StatesModel::new(
                    vec![
                        Translation::new(0.016).into(),
                        RigidRotor::new(false, vec![5.5e-47, 5.6e-47, 6.0e-47], 3).into(),
                        HarmonicOscillator::new(vec![1200.0, 1250.0, 1300.0, 1500.0, 1550.0, 2900.0, 3000.0, 3050.0, 3100.0]).into(),
                    ],
                    1,
                ),
            );
            let ts_states = StatesModel::new(
                vec![
                    Translation::new(0.016).into(),
                    RigidRotor::new(false, vec![5.8e-47, 6.0e-47, 6.4e-47], 1).into(),
                    HarmonicOscillator::new(vec![1100.0, 1200.0, 1400.0, 1500.0, 2800.0, 2950.0, 3000.0, 3100.0]).into(),
                ],
                1,
            );
            let species = vec![reactant, product];
            let ts = TransitionState::new("TS", 120000.0, -1500.0, 1, ts_states);
            let reaction = Reaction::new(1, vec![0], vec![1])?.with_transition_state(ts);
            let Tlist = [300.0, 500.0, 1000.0, 1500.0];
            for tunneling in [TunnelingModel::None, TunnelingModel::Wigner, TunnelingModel::Eckart] {
                let ks = reaction.calculate_tst_rate_coefficients(&species, &Tlist, tunneling)?;
                println!("k(T) with {} tunneling: {:?}", tunneling, ks);
            }
            let ks = reaction.calculate_tst_rate_coefficients(&species, &Tlist, TunnelingModel::Eckart)?;
            let fit = ArrheniusModel::fit_to_data(&Tlist, &ks, 1.0)?;
            println!("forward fit: A = {:.3e}, n = {:.3}, Ea = {:.1}", fit.A, fit.n, fit.Ea);
            let reaction = reaction.with_kinetics(fit);
            let reverse = reaction.generate_reverse_rate_coefficient(&species, &Tlist)?;
            println!(
                "reverse fit: A = {:.3e}, n = {:.3}, Ea = {:.1}",
                reverse.A, reverse.n, reverse.Ea
            );
        }
        2 => {
            // hydrogen peroxide: inertia and the O-O torsion
            let geometry = Geometry::from_atomic_numbers(
                vec![
                    Vector3::new(0.0, 0.7375, -0.0528),
                    Vector3::new(0.0, -0.7375, -0.0528),
                    Vector3::new(0.8190, 0.8170, 0.4220),
                    Vector3::new(-0.8190, -0.8170, 0.4220),
                ],
                vec![8, 8, 1, 1],
            )?;
            println!("total mass: {} amu", geometry.get_total_mass(None)?);
            println!("center of mass: {:?}", geometry.get_center_of_mass(None)?);
            let (moments, axes) = geometry.get_principal_moments_of_inertia();
            println!("principal moments, amu*A^2: {:?}", moments);
            println!("principal axes: {}", axes);
            let reduced = geometry.get_internal_reduced_moment_of_inertia([0, 1], &[0, 2])?;
            println!("reduced moment of the O-O torsion: {} amu*A^2", reduced);
            let rotor = RigidRotor::from_geometry(&geometry, 2)?;
            let torsion = HinderedRotor::cosine(reduced * amu * angstrom * angstrom, 4000.0, 2);
            let states = StatesModel::new(vec![Translation::new(0.034).into(), rotor.into(), torsion.into()], 1);
            for T in [300.0, 1000.0] {
                println!(
                    "T = {} K: S(trans + rot + torsion) = {:.2} J/mol/K",
                    T,
                    states.get_entropy(T)?
                );
            }
        }
        3 => {
            // a model read from JSON
            let model = ReactionModel::from_json_str(ISOMERIZATION_JSON)?;
            let Ci: HashMap<usize, f64> =
                model.concentrations_from_labels(&HashMap::from([("R".to_string(), 10.0), ("P".to_string(), 1.0)]))?;
            model.pretty_print(1000.0, P0, &Ci)?;
            let reaction = &model.reactions[0];
            let k_tst = reaction.calculate_tst_rate_coefficient(&model.species, 1000.0, TunnelingModel::Eckart)?;
            let k = reaction.get_rate_coefficient(1000.0, P0)?;
            println!("k from TST: {:.4e} 1/s, from the Arrhenius fit: {:.4e} 1/s", k_tst, k);
        }
        4 => {
            // densities of states on a 100 cm^-1 grid, direct and by inverse Laplace transform
            let states = StatesModel::new(
                vec![
                    RigidRotor::new(false, vec![5.3e-47, 5.3e-47, 5.3e-47], 12).into(),
                    HarmonicOscillator::new(vec![1306.0, 1534.0, 2917.0]).into(),
                ],
                1,
            );
            let dE = 100.0 * crate::constants::wavenumber_to_J_per_mol;
            let Elist: Vec<f64> = (0..400).map(|i| i as f64 * dE).collect();
            let rho = states.get_density_of_states(&Elist)?;
            let rho_ilt = states.get_density_of_states_ILT(&Elist, 2)?;
            let N = states.get_sum_of_states(&Elist)?;
            for i in [50, 100, 200, 399] {
                println!(
                    "E = {:.0} J/mol: rho = {:.4e}, rho(ILT) = {:.4e} mol/J, N = {:.4e}",
                    Elist[i], rho[i], rho_ilt[i], N[i]
                );
            }
        }
        _ => println!("no example number {}", task),
    }
    Ok(())
}

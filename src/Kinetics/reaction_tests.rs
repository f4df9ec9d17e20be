#[cfg(test)]
mod tests {
    use crate::Kinetics::kinetics_error::KineticsError;
    use crate::Kinetics::kinetics_models::ArrheniusModel;
    use crate::Kinetics::reaction::{EquilibriumConstantType, Reaction};
    use crate::Kinetics::transition_state::TransitionState;
    use crate::Kinetics::tunneling::{TunnelingModel, wigner_correction};
    use crate::Thermodynamics::NASAdata::NASAdata;
    use crate::Thermodynamics::species::Species;
    use crate::Thermodynamics::states::{HarmonicOscillator, RigidRotor, StatesModel, Translation};
    use crate::constants::{P0, R, h, kB};
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    fn isomer_states() -> StatesModel {
        StatesModel::new(
            vec![
                Translation::new(0.044).into(),
                RigidRotor::new(false, vec![3.0e-46, 8.0e-46, 9.0e-46], 1).into(),
                HarmonicOscillator::new(vec![450.0, 900.0, 1100.0, 1700.0, 3000.0]).into(),
            ],
            1,
        )
    }

    /// A, B with identical molecular states and energies 0 and dE
    fn isomers(dE: f64) -> Vec<Species> {
        vec![
            Species::from_states("A", 0.0, isomer_states()),
            Species::from_states("B", dE, isomer_states()),
        ]
    }

    /// A, B, C with simple one-range NASA polynomials
    fn nasa_species() -> Vec<Species> {
        let make = |label: &str, a1: f64, a2: f64, a6: f64, a7: f64| {
            let nasa = NASAdata::one_range(200.0, 3000.0, [a1, a2, 0.0, 0.0, 0.0, a6, a7]).unwrap();
            Species::new(label, 0.0).with_thermo(nasa.into())
        };
        vec![
            make("A", 3.5, 1.0e-3, -1000.0, 5.0),
            make("B", 4.0, 2.0e-3, -5000.0, 3.0),
            make("C", 5.5, 1.5e-3, -9000.0, 1.0),
        ]
    }

    #[test]
    fn test_new_rejects_empty_sides() {
        assert!(matches!(
            Reaction::new(1, vec![], vec![0]),
            Err(KineticsError::InvalidReaction(_))
        ));
        assert!(Reaction::new(1, vec![0], vec![]).is_err());
        let reaction = Reaction::new(7, vec![0], vec![1]).unwrap();
        assert_eq!(reaction.index(), 7);
        assert!(reaction.reversible);
    }

    #[test]
    fn test_stoichiometric_coefficients() {
        let reaction = Reaction::new(1, vec![0, 1, 1], vec![2, 0]).unwrap();
        assert_eq!(reaction.get_stoichiometric_coefficient(0), 0);
        assert_eq!(reaction.get_stoichiometric_coefficient(1), -2);
        assert_eq!(reaction.get_stoichiometric_coefficient(2), 1);
        assert_eq!(reaction.get_stoichiometric_coefficient(9), 0);
    }

    #[test]
    fn test_has_template() {
        let reaction = Reaction::new(1, vec![0, 1], vec![2]).unwrap();
        assert!(reaction.has_template(&[1, 0], &[2]));
        // the same reaction written backwards
        assert!(reaction.has_template(&[2], &[0, 1]));
        assert!(reaction.has_template(&[2], &[1, 0]));
        assert!(!reaction.has_template(&[0, 0], &[2]));
        assert!(!reaction.has_template(&[0, 1], &[2, 2]));
        assert!(!reaction.has_template(&[2], &[0, 0]));
        assert!(!reaction.has_template(&[0, 1], &[0, 1]));
    }

    #[test]
    fn test_free_energy_is_enthalpy_minus_T_entropy() {
        let species = nasa_species();
        let reaction = Reaction::new(1, vec![0, 1], vec![2]).unwrap();
        for T in [300.0, 1000.0, 2500.0] {
            let dH = reaction.get_enthalpy_of_reaction(&species, T).unwrap();
            let dS = reaction.get_entropy_of_reaction(&species, T).unwrap();
            let dG = reaction.get_free_energy_of_reaction(&species, T).unwrap();
            assert_relative_eq!(dG, dH - T * dS, max_relative = 1e-10);
        }
        assert!(matches!(
            reaction.get_enthalpy_of_reaction(&species, 0.0),
            Err(KineticsError::InvalidTemperature(_))
        ));
        // outside the polynomial range
        assert!(matches!(
            reaction.get_entropy_of_reaction(&species, 5000.0),
            Err(KineticsError::Thermo(_))
        ));
    }

    #[test]
    fn test_symbolic_reaction_enthalpy_and_entropy() {
        let species = nasa_species();
        let reaction = Reaction::new(1, vec![0, 1], vec![2]).unwrap();
        for T in [400.0, 1500.0] {
            let (dH_sym, dS_sym) = reaction.create_sym_dH_dS_of_reaction(&species, T).unwrap();
            let dH = reaction.get_enthalpy_of_reaction(&species, T).unwrap();
            let dS = reaction.get_entropy_of_reaction(&species, T).unwrap();
            assert_relative_eq!(dH_sym.lambdify1D()(T), dH, epsilon = 1e-6);
            assert_relative_eq!(dS_sym.lambdify1D()(T), dS, max_relative = 1e-9);
        }
        let stat_mech = isomers(0.0);
        let isomerization = Reaction::new(2, vec![0], vec![1]).unwrap();
        assert!(matches!(
            isomerization.create_sym_dH_dS_of_reaction(&stat_mech, 300.0),
            Err(KineticsError::MissingData(_))
        ));
    }

    #[test]
    fn test_vectorized_matches_scalar() {
        let species = nasa_species();
        let reaction = Reaction::new(1, vec![0, 1], vec![2]).unwrap();
        let Tlist = [400.0, 300.0, 1200.0];
        let dH = reaction.get_enthalpies_of_reaction(&species, &Tlist).unwrap();
        let dS = reaction.get_entropies_of_reaction(&species, &Tlist).unwrap();
        let dG = reaction.get_free_energies_of_reaction(&species, &Tlist).unwrap();
        let K = reaction
            .get_equilibrium_constants(&species, &Tlist, EquilibriumConstantType::Kc)
            .unwrap();
        assert_eq!(dH.len(), 3);
        for (i, &T) in Tlist.iter().enumerate() {
            assert_eq!(dH[i], reaction.get_enthalpy_of_reaction(&species, T).unwrap());
            assert_eq!(dS[i], reaction.get_entropy_of_reaction(&species, T).unwrap());
            assert_eq!(dG[i], reaction.get_free_energy_of_reaction(&species, T).unwrap());
            assert_eq!(
                K[i],
                reaction
                    .get_equilibrium_constant(&species, T, EquilibriumConstantType::Kc)
                    .unwrap()
            );
        }
        assert!(reaction.get_enthalpies_of_reaction(&species, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_identical_isomers_have_unit_equilibrium_constant() {
        let species = isomers(0.0);
        let reaction = Reaction::new(1, vec![0], vec![1]).unwrap();
        for T in [200.0, 500.0, 2000.0] {
            for kind in ["Ka", "Kc", "Kp", "Kx"] {
                let kind: EquilibriumConstantType = kind.parse().unwrap();
                assert_relative_eq!(
                    reaction.get_equilibrium_constant(&species, T, kind).unwrap(),
                    1.0,
                    max_relative = 1e-10
                );
            }
        }
    }

    #[test]
    fn test_equilibrium_constant_kinds() {
        let species = nasa_species();
        // A <=> B + C, dn = 1
        let reaction = Reaction::new(1, vec![0], vec![1, 2]).unwrap();
        let T = 800.0;
        let Ka = reaction
            .get_equilibrium_constant(&species, T, EquilibriumConstantType::Ka)
            .unwrap();
        let dG = reaction.get_free_energy_of_reaction(&species, T).unwrap();
        assert_relative_eq!(Ka, (-dG / (R * T)).exp(), max_relative = 1e-12);
        let Kc = reaction
            .get_equilibrium_constant(&species, T, EquilibriumConstantType::Kc)
            .unwrap();
        assert_relative_eq!(Kc, Ka * P0 / (R * T), max_relative = 1e-12);
        let Kp = reaction
            .get_equilibrium_constant(&species, T, EquilibriumConstantType::Kp)
            .unwrap();
        assert_relative_eq!(Kp, Ka * P0, max_relative = 1e-12);
        let Kx = reaction
            .get_equilibrium_constant(&species, T, EquilibriumConstantType::Kx(2.0 * P0))
            .unwrap();
        assert_relative_eq!(Kx, Ka / 2.0, max_relative = 1e-12);
        assert!(reaction
            .get_equilibrium_constant(&species, T, EquilibriumConstantType::Kx(0.0))
            .is_err());
    }

    #[test]
    fn test_unknown_kind() {
        match "Ky".parse::<EquilibriumConstantType>() {
            Err(KineticsError::InvalidOption { received, expected }) => {
                assert_eq!(received, "Ky");
                assert!(expected.contains("Kc"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_irreversible_policy() {
        let species = isomers(0.0);
        let reaction = Reaction::new(3, vec![0], vec![1])
            .unwrap()
            .irreversible()
            .with_kinetics(ArrheniusModel::new(10.0, 0.0, 0.0));
        assert!(matches!(
            reaction.get_equilibrium_constant(&species, 300.0, EquilibriumConstantType::Ka),
            Err(KineticsError::IrreversibleReaction { .. })
        ));
        assert!(matches!(
            reaction.generate_reverse_rate_coefficient(&species, &[300.0, 400.0, 500.0]),
            Err(KineticsError::IrreversibleReaction { .. })
        ));
        // products are not needed for an irreversible rate
        let conc = HashMap::from([(0, 2.0)]);
        assert_relative_eq!(
            reaction.get_rate(&species, 300.0, P0, &conc, None).unwrap(),
            20.0
        );
    }

    #[test]
    fn test_mass_action_rate() {
        let species = isomers(1000.0);
        let reaction = Reaction::new(1, vec![0], vec![1])
            .unwrap()
            .with_kinetics(ArrheniusModel::new(5.0, 0.0, 0.0));
        let T = 500.0;
        let conc = HashMap::from([(0, 3.0), (1, 1.5)]);
        let Kc = reaction
            .get_equilibrium_constant(&species, T, EquilibriumConstantType::Kc)
            .unwrap();
        assert_relative_eq!(Kc, (-1000.0 / (R * T)).exp(), max_relative = 1e-10);
        assert_relative_eq!(
            reaction.get_rate(&species, T, P0, &conc, None).unwrap(),
            5.0 * (3.0 - 1.5 / Kc),
            max_relative = 1e-12
        );
        // missing product concentration of a reversible reaction
        let partial = HashMap::from([(0, 3.0)]);
        match reaction.get_rate(&species, T, P0, &partial, None) {
            Err(KineticsError::MissingConcentration { species }) => assert_eq!(species, "B"),
            other => panic!("unexpected {:?}", other),
        }
        let negative = HashMap::from([(0, -3.0), (1, 1.0)]);
        assert!(reaction.get_rate(&species, T, P0, &negative, None).is_err());
        let no_kinetics = Reaction::new(2, vec![0], vec![1]).unwrap();
        assert!(matches!(
            no_kinetics.get_rate(&species, T, P0, &conc, None),
            Err(KineticsError::MissingData(_))
        ));
    }

    #[test]
    fn test_third_body_rate() {
        let species = isomers(0.0);
        let reaction = Reaction::new(1, vec![0], vec![1])
            .unwrap()
            .irreversible()
            .with_third_body(true)
            .with_kinetics(ArrheniusModel::new(2.0, 0.0, 0.0));
        let conc = HashMap::from([(0, 3.0), (1, 1.0)]);
        assert_relative_eq!(
            reaction.get_rate(&species, 400.0, P0, &conc, None).unwrap(),
            2.0 * 4.0 * 3.0
        );
        assert_relative_eq!(
            reaction.get_rate(&species, 400.0, P0, &conc, Some(10.0)).unwrap(),
            2.0 * 10.0 * 3.0
        );
    }

    #[test]
    fn test_reverse_rate_coefficient_fit() {
        let dE = 10000.0;
        let species = isomers(dE);
        let reaction = Reaction::new(1, vec![0], vec![1])
            .unwrap()
            .with_kinetics(ArrheniusModel::new(1.0e10, 0.0, 5.0e4));
        let Tlist: Vec<f64> = (0..8).map(|i| 400.0 + 200.0 * i as f64).collect();
        let reverse = reaction.generate_reverse_rate_coefficient(&species, &Tlist).unwrap();
        assert_relative_eq!(reverse.A, 1.0e10, max_relative = 1e-6);
        assert_relative_eq!(reverse.n, 0.0, epsilon = 1e-6);
        assert_relative_eq!(reverse.Ea, 5.0e4 - dE, max_relative = 1e-6);
        assert!(reaction.generate_reverse_rate_coefficient(&species, &Tlist[..2]).is_err());
    }

    fn unimolecular_with_ts(E_ts: f64, frequency: f64) -> (Vec<Species>, Reaction) {
        let species = isomers(0.0);
        let ts = TransitionState::new("TS", E_ts, frequency, 1, isomer_states());
        let reaction = Reaction::new(1, vec![0], vec![1])
            .unwrap()
            .with_transition_state(ts);
        (species, reaction)
    }

    #[test]
    fn test_tst_unimolecular_identical_states() {
        let E0 = 80000.0;
        let (species, reaction) = unimolecular_with_ts(E0, -1200.0);
        for T in [300.0, 700.0, 1500.0] {
            let k = reaction
                .calculate_tst_rate_coefficient(&species, T, TunnelingModel::None)
                .unwrap();
            assert_relative_eq!(k, kB * T / h * (-E0 / (R * T)).exp(), max_relative = 1e-10);
            let k_wigner = reaction
                .calculate_tst_rate_coefficient(&species, T, "wigner".parse().unwrap())
                .unwrap();
            assert_relative_eq!(
                k_wigner,
                k * wigner_correction(-1200.0, T).unwrap(),
                max_relative = 1e-12
            );
            let k_eckart = reaction
                .calculate_tst_rate_coefficient(&species, T, TunnelingModel::Eckart)
                .unwrap();
            assert!(k_eckart > k);
        }
        let ks = reaction
            .calculate_tst_rate_coefficients(&species, &[300.0, 700.0], TunnelingModel::Wigner)
            .unwrap();
        assert_eq!(
            ks[1],
            reaction
                .calculate_tst_rate_coefficient(&species, 700.0, TunnelingModel::Wigner)
                .unwrap()
        );
    }

    #[test]
    fn test_tst_bimolecular_units() {
        let states = isomer_states();
        let species = vec![
            Species::from_states("A", -1000.0, states.clone()),
            Species::from_states("B", 500.0, states.clone()),
            Species::from_states("AB", -40000.0, states.clone()),
        ];
        let ts = TransitionState::new("TS", 30000.0, -800.0, 2, states.clone());
        let reaction = Reaction::new(1, vec![0, 1], vec![2])
            .unwrap()
            .with_transition_state(ts);
        let T = 1000.0;
        let V0 = R * T / P0;
        let Q = states.get_partition_function(T).unwrap();
        let expected = 2.0 * kB * T / h * (Q / V0) / ((Q / V0) * (Q / V0))
            * (-(30000.0 + 500.0) / (R * T)).exp();
        let k = reaction
            .calculate_tst_rate_coefficient(&species, T, TunnelingModel::None)
            .unwrap();
        assert_relative_eq!(k, expected, max_relative = 1e-10);
    }

    #[test]
    fn test_tst_requires_transition_state_and_states() {
        let species = isomers(0.0);
        let reaction = Reaction::new(1, vec![0], vec![1]).unwrap();
        assert!(matches!(
            reaction.calculate_tst_rate_coefficient(&species, 500.0, TunnelingModel::None),
            Err(KineticsError::MissingData(_))
        ));
        let (species, reaction) = unimolecular_with_ts(50000.0, 0.0);
        assert!(matches!(
            reaction.calculate_tst_rate_coefficient(&species, 500.0, TunnelingModel::Wigner),
            Err(KineticsError::Tunneling(_))
        ));
        let bare = vec![Species::new("A", 0.0), Species::new("B", 0.0)];
        assert!(matches!(
            reaction.calculate_tst_rate_coefficient(&bare, 500.0, TunnelingModel::None),
            Err(KineticsError::Thermo(_))
        ));
    }

    #[test]
    fn test_equation_roundtrip() {
        let species = nasa_species();
        let reaction = Reaction::from_equation(4, "A + 2 B <=> C", &species).unwrap();
        assert_eq!(reaction.index(), 4);
        assert_eq!(reaction.reactants, vec![0, 1, 1]);
        assert_eq!(reaction.products, vec![2]);
        assert!(reaction.reversible);
        assert_eq!(reaction.equation(&species).unwrap(), "A + B + B <=> C");

        let irreversible = Reaction::from_equation(5, "C -> A + B", &species).unwrap();
        assert!(!irreversible.reversible);
        assert_eq!(irreversible.equation(&species).unwrap(), "C -> A + B");

        let third_body = Reaction::from_equation(6, "A + B + M = C + M", &species).unwrap();
        assert!(third_body.third_body && third_body.reversible);
        assert_eq!(third_body.reactants, vec![0, 1]);
        assert_eq!(third_body.equation(&species).unwrap(), "A + B + M <=> C + M");

        assert!(!Reaction::from_equation(7, "A=>C", &species).unwrap().reversible);
    }

    #[test]
    fn test_equation_errors() {
        let species = nasa_species();
        for bad in ["A + X <=> C", "A <=> B <=> C", "A + B", " <=> C", "A + 2 <=> C"] {
            assert!(
                matches!(
                    Reaction::from_equation(1, bad, &species),
                    Err(KineticsError::InvalidReaction(_))
                ),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_equation_with_double_bond_labels() {
        let species = vec![
            Species::new("CH2=CH2", 0.0),
            Species::new("H", 0.0),
            Species::new("C2H5", 0.0),
        ];
        let addition = Reaction::from_equation(1, "CH2=CH2 + H <=> C2H5", &species).unwrap();
        assert_eq!(addition.reactants, vec![0, 1]);
        assert_eq!(addition.products, vec![2]);
        assert!(addition.reversible);
        let spaced = Reaction::from_equation(2, "CH2=CH2 + H = C2H5", &species).unwrap();
        assert!(spaced.reversible && spaced.has_template(&[1, 0], &[2]));
        let backwards = Reaction::from_equation(3, "C2H5 -> CH2=CH2 + H", &species).unwrap();
        assert!(!backwards.reversible);
        assert!(backwards.has_template(&[0, 1], &[2]));
        // a bare '=' needs spaces around it
        assert!(matches!(
            Reaction::from_equation(4, "H+H=H2", &species),
            Err(KineticsError::InvalidReaction(_))
        ));
    }
}

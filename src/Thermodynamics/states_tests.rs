#[cfg(test)]
mod tests {
    use crate::Thermodynamics::states::{
        HarmonicOscillator, HinderedRotor, Mode, ModeEnum, RigidRotor, StatesModel, Translation,
        bessel_i0_scaled, bessel_i1_scaled, convolve, elliptic_k, energy_grid_spacing,
    };
    use crate::Thermodynamics::thermo_api::{StatMechThermo, ThermoError, ThermoModel};
    use crate::constants::{Na, R, h, hc_over_kB_cm, kB, wavenumber_to_J_per_mol};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    /// numerical dH/dT of a mode
    fn numeric_heat_capacity(mode: &dyn Mode, T: f64) -> f64 {
        (mode.get_enthalpy(T + 1.0) - mode.get_enthalpy(T - 1.0)) / 2.0
    }

    #[test]
    fn test_bessel_functions() {
        // I0(1) = 1.2660658777, I1(1) = 0.5651591040
        assert_relative_eq!(bessel_i0_scaled(1.0) * 1f64.exp(), 1.2660658777, max_relative = 1e-6);
        assert_relative_eq!(bessel_i1_scaled(1.0) * 1f64.exp(), 0.5651591040, max_relative = 1e-6);
        // I0(5) = 27.239871823, I1(5) = 24.335642142
        assert_relative_eq!(bessel_i0_scaled(5.0) * 5f64.exp(), 27.239871823, max_relative = 1e-6);
        assert_relative_eq!(bessel_i1_scaled(5.0) * 5f64.exp(), 24.335642142, max_relative = 1e-6);
        assert_relative_eq!(bessel_i0_scaled(0.0), 1.0);
        assert_relative_eq!(bessel_i1_scaled(-1.0), -bessel_i1_scaled(1.0));
    }

    #[test]
    fn test_translation_entropy_of_nitrogen() {
        // Sackur-Tetrode entropy of N2 at 298.15 K and 1 bar
        let trans = Translation::new(0.0280134);
        assert_relative_eq!(trans.get_entropy(298.15), 150.4, epsilon = 0.3);
        assert_relative_eq!(trans.get_heat_capacity(298.15), 1.5 * R);
        assert_relative_eq!(trans.get_enthalpy(1000.0), 1.5 * R * 1000.0);
    }

    #[test]
    fn test_linear_rigid_rotor() {
        // CO, I = 1.449e-46 kg m^2
        let rotor = RigidRotor::new(true, vec![1.449e-46], 1);
        let T = 298.15;
        let theta = crate::constants::h.powi(2)
            / (8.0 * PI * PI * 1.449e-46 * crate::constants::kB);
        assert_relative_eq!(rotor.get_partition_function(T), T / theta, max_relative = 1e-12);
        assert_relative_eq!(
            rotor.get_entropy(T),
            R * ((T / theta).ln() + 1.0),
            max_relative = 1e-12
        );
        assert_relative_eq!(rotor.get_heat_capacity(T), R);
        let symmetric = RigidRotor::new(true, vec![1.449e-46], 2);
        assert_relative_eq!(
            symmetric.get_partition_function(T),
            0.5 * rotor.get_partition_function(T)
        );
    }

    #[test]
    fn test_nonlinear_rigid_rotor() {
        let rotor = RigidRotor::new(false, vec![1.0e-47, 2.0e-47, 3.0e-47], 2);
        assert_relative_eq!(rotor.get_heat_capacity(500.0), 1.5 * R);
        // q scales as T^(3/2)
        let ratio = rotor.get_partition_function(1200.0) / rotor.get_partition_function(300.0);
        assert_relative_eq!(ratio, 8.0, max_relative = 1e-12);
    }

    #[test]
    fn test_harmonic_oscillator() {
        let ho = HarmonicOscillator::new(vec![1000.0]);
        let T = 298.15;
        let x: f64 = 1000.0 * hc_over_kB_cm / T;
        assert_relative_eq!(
            ho.get_partition_function(T),
            1.0 / (1.0 - (-x).exp()),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            ho.get_heat_capacity(T),
            R * x * x * x.exp() / (x.exp() - 1.0).powi(2),
            max_relative = 1e-10
        );
        // classical limit
        let soft = HarmonicOscillator::new(vec![10.0, 20.0]);
        assert_relative_eq!(soft.get_heat_capacity(5000.0), 2.0 * R, max_relative = 1e-4);
        // stiff modes do not overflow
        let stiff = HarmonicOscillator::new(vec![4000.0]);
        assert_relative_eq!(stiff.get_heat_capacity(10.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(stiff.get_partition_function(10.0), 1.0);
    }

    #[test]
    fn test_heat_capacity_is_enthalpy_derivative() {
        let modes: Vec<ModeEnum> = vec![
            Translation::new(0.030).into(),
            RigidRotor::new(false, vec![1.0e-46, 2.0e-46, 2.5e-46], 1).into(),
            HarmonicOscillator::new(vec![300.0, 1200.0, 3000.0]).into(),
            HinderedRotor::cosine(5.0e-47, 10000.0, 3).into(),
        ];
        for mode in &modes {
            for T in [300.0, 800.0] {
                assert_relative_eq!(
                    mode.get_heat_capacity(T),
                    numeric_heat_capacity(mode, T),
                    max_relative = 1e-3
                );
            }
        }
    }

    #[test]
    fn test_entropy_consistent_with_partition_function() {
        // S = R ln q + H/T holds for modes without a pressure term
        let modes: Vec<ModeEnum> = vec![
            RigidRotor::new(true, vec![2.0e-46], 1).into(),
            HarmonicOscillator::new(vec![500.0, 1500.0]).into(),
            HinderedRotor::cosine(5.0e-47, 10000.0, 3).into(),
        ];
        let T = 600.0;
        for mode in &modes {
            let expected = R * mode.get_partition_function(T).ln() + mode.get_enthalpy(T) / T;
            assert_relative_eq!(mode.get_entropy(T), expected, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_hindered_rotor_potential_and_frequency() {
        let V0 = 10000.0;
        let cosine = HinderedRotor::cosine(5.0e-47, V0, 3);
        let fourier = HinderedRotor::fourier(5.0e-47, vec![[0.0, 0.0], [0.0, 0.0], [-V0 / 2.0, 0.0]], 3);
        for phi in [0.0, 0.3, PI / 3.0, 2.0] {
            assert_relative_eq!(
                cosine.get_potential(phi),
                fourier.get_potential(phi),
                epsilon = 1e-9
            );
        }
        assert_relative_eq!(cosine.get_potential(PI / 3.0), V0, max_relative = 1e-12);
        assert_relative_eq!(cosine.get_frequency(), fourier.get_frequency(), max_relative = 1e-12);
        assert!(cosine.get_frequency() > 150.0 && cosine.get_frequency() < 250.0);
    }

    #[test]
    fn test_fourier_rotor_close_to_cosine_rotor_at_high_temperature() {
        let V0 = 10000.0;
        let cosine = HinderedRotor::cosine(5.0e-47, V0, 3);
        let fourier = HinderedRotor::fourier(5.0e-47, vec![[0.0, 0.0], [0.0, 0.0], [-V0 / 2.0, 0.0]], 3);
        let T = 1000.0;
        assert_relative_eq!(
            fourier.get_partition_function(T),
            cosine.get_partition_function(T),
            max_relative = 0.05
        );
        let S = fourier.get_entropy(T);
        let expected = R * fourier.get_partition_function(T).ln() + fourier.get_enthalpy(T) / T;
        assert_relative_eq!(S, expected, max_relative = 1e-9);
        assert!(fourier.get_heat_capacity(T) > 0.0);
    }

    #[test]
    fn test_free_rotor_limit() {
        let free = HinderedRotor::cosine(5.0e-47, 0.0, 1);
        let T = 500.0;
        let q = (8.0 * PI.powi(3) * 5.0e-47 * crate::constants::kB * T).sqrt() / crate::constants::h;
        assert_relative_eq!(free.get_partition_function(T), q, max_relative = 1e-9);
        assert_relative_eq!(free.get_heat_capacity(T), 0.5 * R, max_relative = 1e-6);
    }

    fn ethane_like() -> StatesModel {
        StatesModel::new(
            vec![
                Translation::new(0.030).into(),
                RigidRotor::new(false, vec![1.0e-46, 4.2e-46, 4.2e-46], 6).into(),
                HarmonicOscillator::new(vec![822.0, 995.0, 1190.0, 1379.0, 1468.0, 2896.0]).into(),
                HinderedRotor::cosine(2.6e-47, 12000.0, 3).into(),
            ],
            1,
        )
    }

    #[test]
    fn test_states_model_sums() {
        let states = ethane_like();
        let T = 700.0;
        let mode_Cp: f64 = states.modes.iter().map(|m| m.get_heat_capacity(T)).sum();
        assert_relative_eq!(states.get_heat_capacity(T).unwrap(), R + mode_Cp);
        let mode_H: f64 = states.modes.iter().map(|m| m.get_enthalpy(T)).sum();
        assert_relative_eq!(states.get_enthalpy(T).unwrap(), R * T + mode_H);
        let Q: f64 = states.modes.iter().map(|m| m.get_partition_function(T)).product();
        assert_relative_eq!(states.get_partition_function(T).unwrap(), Q, max_relative = 1e-12);
    }

    #[test]
    fn test_spin_and_active_k_rotor() {
        let ho = StatesModel::new(vec![HarmonicOscillator::new(vec![1000.0]).into()], 2);
        let T = 400.0;
        let q_ho = HarmonicOscillator::new(vec![1000.0]).get_partition_function(T);
        let k_rotor = (T * R * PI).sqrt();
        assert_relative_eq!(
            ho.get_partition_function(T).unwrap(),
            2.0 * q_ho * k_rotor,
            max_relative = 1e-12
        );
        assert!(!ho.has_rigid_rotor());
        assert!(ethane_like().has_rigid_rotor());
    }

    #[test]
    fn test_vectorized_matches_scalar() {
        let states = ethane_like();
        let Tlist = [300.0, 600.0, 1200.0];
        let Q = states.get_partition_functions(&Tlist).unwrap();
        let Cp = states.get_heat_capacities(&Tlist).unwrap();
        let H = states.get_enthalpies(&Tlist).unwrap();
        let S = states.get_entropies(&Tlist).unwrap();
        for (i, &T) in Tlist.iter().enumerate() {
            assert_eq!(Q[i], states.get_partition_function(T).unwrap());
            assert_eq!(Cp[i], states.get_heat_capacity(T).unwrap());
            assert_eq!(H[i], states.get_enthalpy(T).unwrap());
            assert_eq!(S[i], states.get_entropy(T).unwrap());
        }
        assert!(states.get_entropies(&[300.0, 0.0]).is_err());
    }

    #[test]
    fn test_statmech_thermo() {
        let thermo = StatMechThermo::new(-5000.0, ethane_like());
        let T = 500.0;
        assert_relative_eq!(
            thermo.get_enthalpy(T).unwrap(),
            -5000.0 + thermo.states.get_enthalpy(T).unwrap()
        );
        assert_eq!(
            thermo.get_heat_capacity(0.0),
            Err(ThermoError::InvalidTemperature(0.0))
        );
    }

    #[test]
    fn test_states_model_from_json() {
        let json = r#"{
            "modes": [
                {"Translation": {"mass": 0.016}},
                {"RigidRotor": {"linear": false, "inertia": [5.3e-47, 5.3e-47, 5.3e-47], "symmetry": 12}},
                {"HarmonicOscillator": {"frequencies": [1306.0, 1306.0, 1306.0, 1534.0, 1534.0, 2917.0, 3019.0, 3019.0, 3019.0]}}
            ]
        }"#;
        let states: StatesModel = serde_json::from_str(json).unwrap();
        assert_eq!(states.spin_multiplicity, 1);
        assert_eq!(states.modes.len(), 3);
        // methane, standard entropy 186.3 J/(mol K)
        assert_relative_eq!(states.get_entropy(298.15).unwrap(), 186.3, epsilon = 1.0);
    }

    fn energy_grid(dE: f64, n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64 * dE).collect()
    }

    /// int_0^inf rho(E) exp(-E/RT) dE by the trapezoidal rule
    fn laplace_transform(rho: &[f64], Elist: &[f64], T: f64) -> f64 {
        let dE = Elist[1] - Elist[0];
        let terms: Vec<f64> = rho
            .iter()
            .zip(Elist)
            .map(|(r, E)| r * (-E / (R * T)).exp())
            .collect();
        (terms.iter().sum::<f64>() - 0.5 * (terms[0] + terms[terms.len() - 1])) * dE
    }

    #[test]
    fn test_elliptic_integral_and_convolution() {
        assert_relative_eq!(elliptic_k(0.0), PI / 2.0, max_relative = 1e-14);
        assert_relative_eq!(elliptic_k(0.5), 1.8540746773013719, max_relative = 1e-12);
        assert_relative_eq!(elliptic_k(0.99), 3.6956373629898747, max_relative = 1e-12);
        // constant * constant grows linearly
        let rho = convolve(&[2.0; 5], &[3.0; 5], 0.5);
        assert_relative_eq!(rho[0], 3.0);
        assert_relative_eq!(rho[4], 15.0);
    }

    #[test]
    fn test_energy_grid_checks() {
        assert_relative_eq!(energy_grid_spacing(&[0.0, 2.0, 4.0]).unwrap(), 2.0);
        for bad in [vec![0.0], vec![1.0, 2.0, 3.0], vec![0.0, 1.0, 3.0], vec![0.0, -1.0]] {
            assert!(matches!(
                energy_grid_spacing(&bad),
                Err(ThermoError::InvalidEnergyGrid(_))
            ));
        }
        let oscillator = HarmonicOscillator::new(vec![1.0]);
        assert!(matches!(
            oscillator.get_density_of_states(&energy_grid(100.0, 10)),
            Err(ThermoError::InvalidEnergyGrid(_))
        ));
    }

    #[test]
    fn test_classical_densities_invert_partition_functions() {
        let T = 500.0;
        let Elist = energy_grid(10.0, 17000);
        let modes: Vec<ModeEnum> = vec![
            Translation::new(0.028).into(),
            RigidRotor::new(true, vec![1.449e-46], 1).into(),
            RigidRotor::new(false, vec![5.3e-47, 8.0e-47, 1.1e-46], 2).into(),
        ];
        for mode in &modes {
            let rho = mode.get_density_of_states(&Elist).unwrap();
            assert_relative_eq!(
                laplace_transform(&rho, &Elist, T),
                mode.get_partition_function(T),
                max_relative = 1e-3
            );
        }
        // cosine hindered rotor against its classical partition function
        let (I, V0, sigma) = (5.0e-47, 8000.0, 3);
        let rotor = HinderedRotor::cosine(I, V0, sigma);
        let rho = rotor.get_density_of_states(&Elist).unwrap();
        let q_free = (8.0 * PI.powi(3) * I * kB * T).sqrt() / (sigma as f64 * h);
        let q_classical = q_free * bessel_i0_scaled(0.5 * V0 / (R * T));
        assert_relative_eq!(laplace_transform(&rho, &Elist, T), q_classical, max_relative = 1e-2);
        // free rotor: rho = q1f / sqrt(pi E)
        let free = HinderedRotor::cosine(I, 0.0, sigma);
        let rho = free.get_density_of_states(&Elist).unwrap();
        let q1f = (8.0 * PI.powi(3) * I / (h * h) / Na).sqrt() / sigma as f64;
        assert_relative_eq!(rho[100], q1f / (PI * Elist[100]).sqrt(), max_relative = 1e-5);
    }

    #[test]
    fn test_fourier_rotor_levels_binned_on_grid() {
        let T = 500.0;
        let rotor = HinderedRotor::fourier(5.0e-47, vec![[-2000.0, 0.0], [0.0, 0.0], [-1500.0, 0.0]], 1);
        let Elist = energy_grid(1.0, 170000);
        let rho = rotor.get_density_of_states(&Elist).unwrap();
        let boltzmann_sum: f64 = rho
            .iter()
            .zip(&Elist)
            .map(|(r, E)| r * (-E / (R * T)).exp())
            .sum::<f64>();
        assert_relative_eq!(boltzmann_sum * (Elist[1] - Elist[0]), rotor.get_partition_function(T), max_relative = 1e-3);
    }

    #[test]
    fn test_harmonic_oscillator_counts_states() {
        // 100 cm^-1 grid, frequencies of 5, 8 and 12 grid steps
        let dE = 100.0 * wavenumber_to_J_per_mol;
        let n = 200;
        let Elist = energy_grid(dE, n);
        let oscillator = HarmonicOscillator::new(vec![500.0, 800.0, 1200.0]);
        let rho = oscillator.get_density_of_states(&Elist).unwrap();
        let mut levels = vec![0.0; n];
        for a in 0..=n / 5 {
            for b in 0..=n / 8 {
                for c in 0..=n / 12 {
                    let level = 5 * a + 8 * b + 12 * c;
                    if level < n {
                        levels[level] += 1.0;
                    }
                }
            }
        }
        for i in 0..n {
            assert_relative_eq!(rho[i] * dE, levels[i], epsilon = 1e-9);
        }
    }

    #[test]
    fn test_sum_of_states_of_rotor_and_vibrations() {
        let dE = 100.0 * wavenumber_to_J_per_mol;
        let n = 120;
        let Elist = energy_grid(dE, n);
        let (I, sigma) = (1.0e-46, 2);
        let states = StatesModel::new(
            vec![
                RigidRotor::new(true, vec![I], sigma).into(),
                HarmonicOscillator::new(vec![500.0, 800.0]).into(),
            ],
            2,
        );
        let N = states.get_sum_of_states(&Elist).unwrap();
        // classical rotor states below E - e_v, summed over the vibrational levels e_v
        let theta = h * h / (8.0 * PI * PI * I) * Na;
        for i in [0, 1, 17, 60, 119] {
            let mut expected = 0.0;
            for a in 0..=n / 5 {
                for b in 0..=n / 8 {
                    let level = 5 * a + 8 * b;
                    if level < i {
                        expected += (Elist[i] - level as f64 * dE) / (sigma as f64 * theta);
                    }
                }
            }
            assert_relative_eq!(N[i], 2.0 * expected, max_relative = 1e-10, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_inverse_laplace_transform_agrees_with_direct_density() {
        let states = StatesModel::new(
            vec![
                Translation::new(0.03).into(),
                RigidRotor::new(false, vec![1.0e-46, 2.0e-46, 3.0e-46], 1).into(),
            ],
            1,
        );
        let Elist = energy_grid(100.0, 1001);
        let direct = states.get_density_of_states(&Elist).unwrap();
        // Q = C (RT)^4, so rho = C E^3 / 3!
        let T = 1000.0;
        let C = states.get_partition_function(T).unwrap() / (R * T).powi(4);
        let first = states.get_density_of_states_ILT(&Elist, 1).unwrap();
        let second = states.get_density_of_states_ILT(&Elist, 2).unwrap();
        assert_eq!(first[0], 0.0);
        for i in [200, 500, 1000] {
            let E = Elist[i];
            assert_relative_eq!(direct[i], C * E.powi(3) / 6.0, max_relative = 2e-3);
            // first order steepest descents overestimates by about 1/(12 n) for Q ~ T^n
            assert!(first[i] > direct[i]);
            assert_relative_eq!(first[i], direct[i], max_relative = 3e-2);
            assert_relative_eq!(second[i], direct[i], max_relative = 5e-3);
        }
        assert!(matches!(
            states.get_density_of_states_ILT(&Elist, 3),
            Err(ThermoError::CalculationError(_))
        ));
    }

    #[test]
    fn test_k_rotor_and_spin_in_density_of_states() {
        let Elist = energy_grid(50.0, 400);
        let with_rotor = StatesModel::new(
            vec![
                Translation::new(0.03).into(),
                RigidRotor::new(true, vec![1.5e-46], 1).into(),
            ],
            1,
        );
        let without_rotor = StatesModel::new(vec![Translation::new(0.03).into()], 3);
        let T = 800.0;
        for states in [&with_rotor, &without_rotor] {
            let rho = states.get_density_of_states(&Elist).unwrap();
            let long_grid = energy_grid(50.0, 4000);
            let rho_long = states.get_density_of_states(&long_grid).unwrap();
            assert_eq!(&rho[..], &rho_long[..400]);
            assert_relative_eq!(
                laplace_transform(&rho_long, &long_grid, T),
                states.get_partition_function(T).unwrap(),
                max_relative = 1e-2
            );
        }
    }
}

//! Molecular degrees of freedom and their contributions to the partition function,
//! heat capacity, enthalpy and entropy of an ideal gas molecule.
//!
//! A molecule of N atoms has 3N degrees of freedom: three translational, two (linear) or
//! three (nonlinear) external rotations, the rest internal vibrations, some of which may
//! be better described as hindered internal rotations. Each kind is a [`Mode`]; a
//! [`StatesModel`] collects the modes of one molecule.
//!
//! Units: energies in J/mol, heat capacities and entropies in J/(mol*K), moments of inertia
//! in kg*m^2, frequencies in cm^-1, molar mass in kg/mol. Translational quantities refer to
//! the standard pressure of 1 bar.
//!
//! Densities of states are tabulated on an energy grid `Elist` = 0, dE, 2 dE, ... (J/mol
//! above the ground state) and returned in mol/J. External and internal rotations use their
//! classical densities, which are the inverse Laplace transforms of the classical partition
//! functions; vibrations are counted exactly on the grid (Beyer-Swinehart).
use super::thermo_api::{ThermoError, check_finite, check_temperature};
use crate::Geometry::molecular_geometry::Geometry;
use crate::Geometry::molecular_geometry::GeometryError;
use crate::constants::{P0, R, amu, angstrom, c, h, hc_over_kB_cm, kB, Na, wavenumber_to_J_per_mol};
use log::debug;
use enum_dispatch::enum_dispatch;
use nalgebra::{Complex, DMatrix, SymmetricEigen};
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::f64::consts::PI;

/// number of plane waves on each side of m = 0 used for the Fourier hindered rotor
const FOURIER_BASIS_HALF_WIDTH: i64 = 200;

#[enum_dispatch]
pub trait Mode {
    fn get_partition_function(&self, T: f64) -> f64;
    fn get_heat_capacity(&self, T: f64) -> f64;
    fn get_enthalpy(&self, T: f64) -> f64;
    fn get_entropy(&self, T: f64) -> f64;
    /// density of states (mol/J) on the energy grid `Elist` (J/mol)
    fn get_density_of_states(&self, Elist: &[f64]) -> Result<Vec<f64>, ThermoError>;
}

/// Spacing dE of an energy grid 0, dE, 2 dE, ... with at least two points
pub fn energy_grid_spacing(Elist: &[f64]) -> Result<f64, ThermoError> {
    if Elist.len() < 2 {
        return Err(ThermoError::InvalidEnergyGrid(format!(
            "at least two energies are needed, got {}",
            Elist.len()
        )));
    }
    let dE = Elist[1] - Elist[0];
    if !(dE.is_finite() && dE > 0.0) {
        return Err(ThermoError::InvalidEnergyGrid(format!("spacing {} J/mol", dE)));
    }
    if Elist[0].abs() > 1e-9 * dE {
        return Err(ThermoError::InvalidEnergyGrid(format!(
            "the grid must start at 0 J/mol, starts at {}",
            Elist[0]
        )));
    }
    if let Some(i) = (0..Elist.len()).find(|&i| (Elist[i] - i as f64 * dE).abs() > 1e-6 * dE) {
        return Err(ThermoError::InvalidEnergyGrid(format!(
            "energy {} J/mol at position {} is off the uniform grid of spacing {}",
            Elist[i], i, dE
        )));
    }
    Ok(dE)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[enum_dispatch(Mode)]
pub enum ModeEnum {
    Translation(Translation),
    RigidRotor(RigidRotor),
    HarmonicOscillator(HarmonicOscillator),
    HinderedRotor(HinderedRotor),
}

/////////////////////////TRANSLATION////////////////////////////////////////////////////////
/// Three-dimensional translation of an ideal gas molecule of molar `mass` (kg/mol)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub mass: f64,
}

impl Translation {
    pub fn new(mass: f64) -> Self {
        Self { mass }
    }
}

impl Mode for Translation {
    /// q = (2 pi m kB T / h^2)^(3/2) kB T / P0
    fn get_partition_function(&self, T: f64) -> f64 {
        let qt = ((2.0 * PI * self.mass / Na) / (h * h)).powf(1.5) / P0;
        qt * (kB * T).powf(2.5)
    }
    fn get_heat_capacity(&self, _T: f64) -> f64 {
        1.5 * R
    }
    fn get_enthalpy(&self, T: f64) -> f64 {
        1.5 * R * T
    }
    fn get_entropy(&self, T: f64) -> f64 {
        (self.get_partition_function(T).ln() + 1.5 + 1.0) * R
    }
    /// rho = (2 pi m / h^2)^(3/2) / P0 E^(3/2) / Gamma(5/2), per mole of molecules
    fn get_density_of_states(&self, Elist: &[f64]) -> Result<Vec<f64>, ThermoError> {
        energy_grid_spacing(Elist)?;
        let qt = ((2.0 * PI * self.mass / Na / Na) / (h * h)).powf(1.5) / P0;
        let gamma_5_2 = 0.75 * PI.sqrt();
        Ok(Elist.iter().map(|&E| qt * E.powf(1.5) / gamma_5_2 / Na).collect())
    }
}

/////////////////////////RIGID ROTOR////////////////////////////////////////////////////////
/// External rotation. A linear rotor stores one moment of inertia, a nonlinear rotor all
/// three principal moments (even if some are equal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidRotor {
    pub linear: bool,
    pub inertia: Vec<f64>,
    #[serde(default = "default_symmetry")]
    pub symmetry: u32,
}

fn default_symmetry() -> u32 {
    1
}

impl RigidRotor {
    pub fn new(linear: bool, inertia: Vec<f64>, symmetry: u32) -> Self {
        Self {
            linear,
            inertia,
            symmetry,
        }
    }
    /// Rigid rotor from the principal moments of a geometry given in Angstrom and amu.
    /// The geometry is treated as linear when its smallest principal moment is below
    /// `1e-6` of the largest one.
    pub fn from_geometry(geometry: &Geometry, symmetry: u32) -> Result<Self, GeometryError> {
        let (moments, _) = geometry.get_principal_moments_of_inertia();
        let to_SI = amu * angstrom * angstrom;
        let largest = moments[2];
        if largest <= 0.0 {
            return Err(GeometryError::Degenerate(
                "all principal moments of inertia vanish".to_string(),
            ));
        }
        if moments[0].abs() < 1e-6 * largest {
            Ok(Self::new(true, vec![largest * to_SI], symmetry))
        } else {
            Ok(Self::new(
                false,
                moments.iter().map(|I| I * to_SI).collect(),
                symmetry,
            ))
        }
    }
    /// rotational temperature h^2 / (8 pi^2 I kB) of one moment of inertia
    fn rotational_temperature(inertia: f64) -> f64 {
        h * h / (8.0 * PI * PI * inertia * kB)
    }
    /// rotational constant h^2 / (8 pi^2 I) of one moment of inertia, J/mol
    fn rotational_energy(inertia: f64) -> f64 {
        h * h / (8.0 * PI * PI * inertia) * Na
    }
}

impl Mode for RigidRotor {
    fn get_partition_function(&self, T: f64) -> f64 {
        let sigma = self.symmetry as f64;
        if self.linear {
            T / Self::rotational_temperature(self.inertia[0]) / sigma
        } else {
            let theta: f64 = self
                .inertia
                .iter()
                .map(|&I| Self::rotational_temperature(I))
                .product();
            (PI * T.powi(self.inertia.len() as i32) / theta).sqrt() / sigma
        }
    }
    fn get_heat_capacity(&self, _T: f64) -> f64 {
        if self.linear { R } else { 1.5 * R }
    }
    fn get_enthalpy(&self, T: f64) -> f64 {
        if self.linear { R * T } else { 1.5 * R * T }
    }
    fn get_entropy(&self, T: f64) -> f64 {
        let lnq = self.get_partition_function(T).ln();
        if self.linear {
            (lnq + 1.0) * R
        } else {
            (lnq + 1.5) * R
        }
    }
    /// linear: rho = 1 / (sigma theta); nonlinear: rho = 2 sqrt(E / (theta_A theta_B theta_C)) / sigma
    fn get_density_of_states(&self, Elist: &[f64]) -> Result<Vec<f64>, ThermoError> {
        energy_grid_spacing(Elist)?;
        let sigma = self.symmetry as f64;
        let theta: f64 = self.inertia.iter().map(|&I| Self::rotational_energy(I)).product();
        if self.linear {
            Ok(vec![1.0 / theta / sigma; Elist.len()])
        } else {
            Ok(Elist.iter().map(|&E| 2.0 * (E / theta).sqrt() / sigma).collect())
        }
    }
}

/////////////////////////HARMONIC OSCILLATOR////////////////////////////////////////////////
/// A set of one-dimensional quantum harmonic oscillators. The zero of energy is the
/// zero-point level, not the bottom of the well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonicOscillator {
    pub frequencies: Vec<f64>,
}

impl HarmonicOscillator {
    pub fn new(frequencies: Vec<f64>) -> Self {
        Self { frequencies }
    }
    fn reduced_frequencies(&self, T: f64) -> impl Iterator<Item = f64> + '_ {
        self.frequencies.iter().map(move |freq| freq * hc_over_kB_cm / T)
    }

    /// Beyer-Swinehart: convolves the vibrational levels into the density `rho` tabulated
    /// with spacing `dE`. Each frequency is rounded to a whole number of grid steps.
    pub fn add_to_density_of_states(&self, mut rho: Vec<f64>, dE: f64) -> Result<Vec<f64>, ThermoError> {
        for &freq in &self.frequencies {
            let steps = (freq * wavenumber_to_J_per_mol / dE).round();
            if !(steps >= 1.0) {
                return Err(ThermoError::InvalidEnergyGrid(format!(
                    "frequency {} cm^-1 is not resolved by the grid spacing {} J/mol",
                    freq, dE
                )));
            }
            let steps = steps as usize;
            for n in steps..rho.len() {
                rho[n] += rho[n - steps];
            }
        }
        Ok(rho)
    }
}

/// x^2 e^x / (1 - e^x)^2 written without overflowing for large x
fn einstein_heat_capacity(x: f64) -> f64 {
    if x < 1e-8 {
        return 1.0;
    }
    let exp_mx = (-x).exp();
    x * x * exp_mx / ((1.0 - exp_mx) * (1.0 - exp_mx))
}

impl Mode for HarmonicOscillator {
    /// q = prod 1 / (1 - exp(-h nu / kB T))
    fn get_partition_function(&self, T: f64) -> f64 {
        self.reduced_frequencies(T)
            .map(|x| 1.0 / (-(-x).exp_m1()))
            .product()
    }
    fn get_heat_capacity(&self, T: f64) -> f64 {
        self.reduced_frequencies(T).map(einstein_heat_capacity).sum::<f64>() * R
    }
    fn get_enthalpy(&self, T: f64) -> f64 {
        self.reduced_frequencies(T).map(|x| x / x.exp_m1()).sum::<f64>() * R * T
    }
    fn get_entropy(&self, T: f64) -> f64 {
        let thermal: f64 = self.reduced_frequencies(T).map(|x| x / x.exp_m1()).sum();
        (self.get_partition_function(T).ln() + thermal) * R
    }
    /// levels counted on the grid: the ground level at E = 0 is a single bin of height 1/dE
    fn get_density_of_states(&self, Elist: &[f64]) -> Result<Vec<f64>, ThermoError> {
        let dE = energy_grid_spacing(Elist)?;
        let mut rho = vec![0.0; Elist.len()];
        rho[0] = 1.0 / dE;
        self.add_to_density_of_states(rho, dE)
    }
}

/////////////////////////HINDERED ROTOR/////////////////////////////////////////////////////
/// One-dimensional hindered internal rotation with reduced moment of `inertia` (kg*m^2).
///
/// The potential is either the cosine form V = V0/2 (1 - cos(sigma phi)) with `barrier` V0,
/// or, when `fourier` is present, the series V = sum_k (a_k cos k phi + b_k sin k phi) -
/// sum_k a_k with `fourier[k-1] = [a_k, b_k]` in J/mol. The Fourier form is solved
/// quantum mechanically and takes precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HinderedRotor {
    pub inertia: f64,
    #[serde(default)]
    pub barrier: f64,
    #[serde(default = "default_symmetry")]
    pub symmetry: u32,
    #[serde(default)]
    pub fourier: Option<Vec<[f64; 2]>>,
    /// energy levels of the Fourier potential, J/mol above the ground level
    #[serde(skip)]
    energies: OnceCell<Vec<f64>>,
}

impl HinderedRotor {
    pub fn cosine(inertia: f64, barrier: f64, symmetry: u32) -> Self {
        Self {
            inertia,
            barrier,
            symmetry,
            fourier: None,
            energies: OnceCell::new(),
        }
    }
    pub fn fourier(inertia: f64, fourier: Vec<[f64; 2]>, symmetry: u32) -> Self {
        Self {
            inertia,
            barrier: 0.0,
            symmetry,
            fourier: Some(fourier),
            energies: OnceCell::new(),
        }
    }

    /// V(phi) in J/mol
    pub fn get_potential(&self, phi: f64) -> f64 {
        match &self.fourier {
            Some(fourier) => fourier
                .iter()
                .enumerate()
                .map(|(k, [a, b])| {
                    let k = (k + 1) as f64;
                    a * (k * phi).cos() + b * (k * phi).sin() - a
                })
                .sum(),
            None => 0.5 * self.barrier * (1.0 - (self.symmetry as f64 * phi).cos()),
        }
    }

    /// Frequency (cm^-1) of the harmonic limit at the potential minimum phi = 0,
    /// nu = 1/(2 pi) sqrt(V''(0) / I). For the cosine potential this is
    /// sigma/(2 pi) sqrt(V0 / 2I).
    pub fn get_frequency(&self) -> f64 {
        let curvature = match &self.fourier {
            Some(fourier) => fourier
                .iter()
                .enumerate()
                .map(|(k, [a, _])| -((k + 1) as f64).powi(2) * a)
                .sum::<f64>(),
            None => 0.5 * self.barrier * (self.symmetry as f64).powi(2),
        };
        (curvature.max(0.0) / Na / self.inertia).sqrt() / (2.0 * PI) / (c * 100.0)
    }

    /// Energy levels from the 1D Schrodinger equation
    /// -hbar^2/(2I) psi'' + V(phi) psi = E psi, expanded in the plane waves
    /// exp(i m phi)/sqrt(2 pi), m = -M..M, which turns it into a Hermitian eigenproblem.
    fn solve_schrodinger_equation(&self, fourier: &[[f64; 2]]) -> Vec<f64> {
        let n = (2 * FOURIER_BASIS_HALF_WIDTH + 1) as usize;
        let mut H = DMatrix::<Complex<f64>>::zeros(n, n);
        let kinetic = h * h / (8.0 * PI * PI * self.inertia);
        for (row, m) in (-FOURIER_BASIS_HALF_WIDTH..=FOURIER_BASIS_HALF_WIDTH).enumerate() {
            let m = m as f64;
            H[(row, row)] = Complex::new(kinetic * m * m, 0.0);
            for (k, [a, b]) in fourier.iter().enumerate() {
                let k = k + 1;
                let (a, b) = (a / Na / 2.0, b / Na / 2.0);
                if row >= k {
                    H[(row, row - k)] = Complex::new(a, -b);
                }
                if row + k < n {
                    H[(row, row + k)] = Complex::new(a, b);
                }
            }
        }
        let eigen = SymmetricEigen::new(H);
        let mut energies: Vec<f64> = eigen.eigenvalues.iter().cloned().collect();
        energies.sort_by(|a, b| a.total_cmp(b));
        let ground = energies[0];
        energies.iter().map(|E| (E - ground) * Na).collect()
    }

    fn energy_levels(&self) -> Option<&[f64]> {
        let fourier = self.fourier.as_ref()?;
        Some(
            self.energies
                .get_or_init(|| self.solve_schrodinger_equation(fourier))
                .as_slice(),
        )
    }

    /// Boltzmann sums (sum e, sum E e, sum E^2 e) over the energy levels
    fn boltzmann_sums(energies: &[f64], T: f64) -> (f64, f64, f64) {
        energies.iter().fold((0.0, 0.0, 0.0), |(s0, s1, s2), &E| {
            let e = (-E / (R * T)).exp();
            (s0 + e, s1 + E * e, s2 + E * E * e)
        })
    }

    /// (x, z): reduced harmonic frequency h nu / kB T and z = V0 / 2RT
    fn cosine_arguments(&self, T: f64) -> (f64, f64) {
        let x = self.get_frequency() * hc_over_kB_cm / T;
        let z = 0.5 * self.barrier / (R * T);
        (x, z)
    }

    fn ln_partition_function(&self, T: f64) -> f64 {
        self.get_partition_function(T).ln()
    }
}

impl Mode for HinderedRotor {
    /// Cosine potential: Pitzer-Gwynn approximation
    /// q = q_vib_quantum / q_vib_classical * q_hind_classical, i.e.
    /// q = x/(1 - e^-x) (2 pi I kB T/h^2)^(1/2) (2 pi/sigma) e^-z I0(z).
    /// Fourier potential: q = 1/sigma sum_i exp(-E_i / RT).
    fn get_partition_function(&self, T: f64) -> f64 {
        let sigma = self.symmetry as f64;
        if let Some(energies) = self.energy_levels() {
            let (s0, _, _) = Self::boltzmann_sums(energies, T);
            return s0 / sigma;
        }
        let (x, z) = self.cosine_arguments(T);
        let quantum_ratio = if x < 1e-12 { 1.0 } else { x / (-(-x).exp_m1()) };
        quantum_ratio
            * (2.0 * PI * self.inertia * kB * T / (h * h)).sqrt()
            * (2.0 * PI / sigma)
            * bessel_i0_scaled(z)
    }
    fn get_heat_capacity(&self, T: f64) -> f64 {
        if let Some(energies) = self.energy_levels() {
            let (s0, s1, s2) = Self::boltzmann_sums(energies, T);
            return (s2 * s0 - s1 * s1) / (R * T * T * s0 * s0);
        }
        let (x, z) = self.cosine_arguments(T);
        let BB = bessel_i1_over_i0(z);
        (einstein_heat_capacity(x) - 0.5 + z * (z - BB - z * BB * BB)) * R
    }
    /// Fourier potential: Boltzmann average of the levels; cosine potential:
    /// R T^2 d ln q / dT by central differences.
    fn get_enthalpy(&self, T: f64) -> f64 {
        if let Some(energies) = self.energy_levels() {
            let (s0, s1, _) = Self::boltzmann_sums(energies, T);
            return s1 / s0;
        }
        let (T_low, T_high) = (T * 0.999, T * 1.001);
        let dlnq_dT = (self.ln_partition_function(T_high) - self.ln_partition_function(T_low))
            / (T_high - T_low);
        R * T * T * dlnq_dT
    }
    fn get_entropy(&self, T: f64) -> f64 {
        R * self.ln_partition_function(T) + self.get_enthalpy(T) / T
    }
    /// Fourier potential: the quantum levels binned on the grid. Cosine potential: the
    /// classical density
    /// rho = 2 q1f / (pi^(3/2) V0^(1/2)) K(E/V0) for E < V0,
    /// rho = 2 q1f / (pi^(3/2) E^(1/2)) K(V0/E) for E > V0,
    /// with q1f = (8 pi^3 I / h^2)^(1/2) / sigma and K the complete elliptic integral of
    /// the first kind. The logarithmic singularity at E = V0 is left at zero. A free rotor
    /// (V0 = 0) has rho = q1f / sqrt(pi E), averaged over each grid cell.
    fn get_density_of_states(&self, Elist: &[f64]) -> Result<Vec<f64>, ThermoError> {
        let dE = energy_grid_spacing(Elist)?;
        let sigma = self.symmetry as f64;
        let mut rho = vec![0.0; Elist.len()];
        if let Some(energies) = self.energy_levels() {
            for &E in energies {
                let bin = (E / dE).round() as usize;
                if bin < rho.len() {
                    rho[bin] += 1.0 / sigma / dE;
                }
            }
            return Ok(rho);
        }
        let q1f = (8.0 * PI * PI * PI * self.inertia / (h * h) / Na).sqrt() / sigma;
        let V0 = self.barrier;
        if V0 <= 0.0 {
            return Ok(inverse_sqrt_cell_averages(Elist, dE)
                .into_iter()
                .map(|r| q1f / PI.sqrt() * r)
                .collect());
        }
        for (rho, &E) in rho.iter_mut().zip(Elist) {
            *rho = if E < V0 {
                2.0 * q1f / (PI.powi(3) * V0).sqrt() * elliptic_k(E / V0)
            } else if E > V0 {
                2.0 * q1f / (PI.powi(3) * E).sqrt() * elliptic_k(V0 / E)
            } else {
                0.0
            };
        }
        Ok(rho)
    }
}

/// Complete elliptic integral of the first kind K(m) = int_0^(pi/2) (1 - m sin^2 t)^(-1/2) dt
/// for the parameter 0 <= m < 1, by the arithmetic-geometric mean.
pub fn elliptic_k(m: f64) -> f64 {
    let (mut a, mut b) = (1.0_f64, (1.0 - m).sqrt());
    for _ in 0..64 {
        if (a - b).abs() <= 1e-15 * a {
            break;
        }
        (a, b) = (0.5 * (a + b), (a * b).sqrt());
    }
    PI / (2.0 * a)
}

/// E^(-1/2) averaged over the cells [E - dE/2, E + dE/2] (the first cell is [0, dE/2]), so
/// that the singularity at E = 0 integrates exactly in sums and convolutions
fn inverse_sqrt_cell_averages(Elist: &[f64], dE: f64) -> Vec<f64> {
    Elist
        .iter()
        .map(|&E| {
            let (low, high) = ((E - 0.5 * dE).max(0.0), E + 0.5 * dE);
            2.0 * (high.sqrt() - low.sqrt()) / (high - low)
        })
        .collect()
}

/// rho(E) = int_0^E rho1(x) rho2(E - x) dx on a grid of spacing `dE`
pub fn convolve(rho1: &[f64], rho2: &[f64], dE: f64) -> Vec<f64> {
    (0..rho1.len().min(rho2.len()))
        .map(|i| (0..=i).map(|j| rho1[j] * rho2[i - j]).sum::<f64>() * dE)
        .collect()
}

/// e^-|x| I0(x), modified Bessel function of order zero scaled by its asymptotic growth
/// (polynomial approximations of Abramowitz and Stegun 9.8.1-9.8.2, |error| < 2e-7)
pub fn bessel_i0_scaled(x: f64) -> f64 {
    let ax = x.abs();
    if ax < 3.75 {
        let y = (x / 3.75).powi(2);
        let i0 = 1.0
            + y * (3.5156229
                + y * (3.0899424
                    + y * (1.2067492 + y * (0.2659732 + y * (0.360768e-1 + y * 0.45813e-2)))));
        i0 * (-ax).exp()
    } else {
        let y = 3.75 / ax;
        (0.39894228
            + y * (0.1328592e-1
                + y * (0.225319e-2
                    + y * (-0.157565e-2
                        + y * (0.916281e-2
                            + y * (-0.2057706e-1
                                + y * (0.2635537e-1 + y * (-0.1647633e-1 + y * 0.392377e-2))))))))
            / ax.sqrt()
    }
}

/// e^-|x| I1(x) (Abramowitz and Stegun 9.8.3-9.8.4)
pub fn bessel_i1_scaled(x: f64) -> f64 {
    let ax = x.abs();
    let ans = if ax < 3.75 {
        let y = (x / 3.75).powi(2);
        ax * (0.5
            + y * (0.87890594
                + y * (0.51498869
                    + y * (0.15084934 + y * (0.2658733e-1 + y * (0.301532e-2 + y * 0.32411e-3))))))
            * (-ax).exp()
    } else {
        let y = 3.75 / ax;
        let tail = 0.2282967e-1 + y * (-0.2895312e-1 + y * (0.1787654e-1 - y * 0.420059e-2));
        (0.39894228
            + y * (-0.3988024e-1
                + y * (-0.362018e-2 + y * (0.163801e-2 + y * (-0.1031555e-1 + y * tail)))))
            / ax.sqrt()
    };
    if x < 0.0 { -ans } else { ans }
}

/// I1(x)/I0(x)
fn bessel_i1_over_i0(x: f64) -> f64 {
    bessel_i1_scaled(x) / bessel_i0_scaled(x)
}

/////////////////////////STATES MODEL///////////////////////////////////////////////////////
/// Degrees of freedom of one molecule, as obtained from a quantum chemistry calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatesModel {
    pub modes: Vec<ModeEnum>,
    #[serde(default = "default_symmetry")]
    pub spin_multiplicity: u32,
}

impl StatesModel {
    pub fn new(modes: Vec<ModeEnum>, spin_multiplicity: u32) -> Self {
        Self {
            modes,
            spin_multiplicity,
        }
    }

    pub fn has_rigid_rotor(&self) -> bool {
        self.modes
            .iter()
            .any(|mode| matches!(mode, ModeEnum::RigidRotor(_)))
    }

    /// constant-pressure heat capacity: R plus the sum of the mode heat capacities
    pub fn get_heat_capacity(&self, T: f64) -> Result<f64, ThermoError> {
        check_temperature(T)?;
        let Cp = R + self.modes.iter().map(|m| m.get_heat_capacity(T)).sum::<f64>();
        check_finite(Cp, "heat capacity", T)
    }

    /// enthalpy above the ground state: RT plus the sum of the mode enthalpies
    pub fn get_enthalpy(&self, T: f64) -> Result<f64, ThermoError> {
        check_temperature(T)?;
        let H = R * T + self.modes.iter().map(|m| m.get_enthalpy(T)).sum::<f64>();
        check_finite(H, "enthalpy", T)
    }

    pub fn get_entropy(&self, T: f64) -> Result<f64, ThermoError> {
        check_temperature(T)?;
        let S = self.modes.iter().map(|m| m.get_entropy(T)).sum::<f64>();
        check_finite(S, "entropy", T)
    }

    /// Product of the mode partition functions times the spin multiplicity. An active
    /// K-rotor is included when there is no external rigid rotor.
    pub fn get_partition_function(&self, T: f64) -> Result<f64, ThermoError> {
        check_temperature(T)?;
        let mut Q = 1.0;
        if !self.has_rigid_rotor() {
            let T_rot = 1.0 / R / PI;
            Q *= (T / T_rot).sqrt();
        }
        for mode in &self.modes {
            Q *= mode.get_partition_function(T);
        }
        check_finite(Q * self.spin_multiplicity as f64, "partition function", T)
    }

    /// Density of states (mol/J) on the grid `Elist`: the classical densities of the
    /// translation, rotations and the active K-rotor (when there is no external rigid rotor)
    /// are convolved, then the vibrations are added by Beyer-Swinehart counting. The result
    /// is multiplied by the spin multiplicity.
    pub fn get_density_of_states(&self, Elist: &[f64]) -> Result<Vec<f64>, ThermoError> {
        let dE = energy_grid_spacing(Elist)?;
        let mut rho: Option<Vec<f64>> = None;
        if !self.has_rigid_rotor() {
            // active K-rotor, rho = E^(-1/2)
            rho = Some(inverse_sqrt_cell_averages(Elist, dE));
        }
        for mode in &self.modes {
            if matches!(mode, ModeEnum::HarmonicOscillator(_)) {
                continue;
            }
            let mode_rho = mode.get_density_of_states(Elist)?;
            rho = Some(match rho {
                Some(rho) => convolve(&rho, &mode_rho, dE),
                None => mode_rho,
            });
        }
        let mut rho = rho.unwrap_or_else(|| {
            let mut delta = vec![0.0; Elist.len()];
            delta[0] = 1.0 / dE;
            delta
        });
        for mode in &self.modes {
            if let ModeEnum::HarmonicOscillator(oscillator) = mode {
                rho = oscillator.add_to_density_of_states(rho, dE)?;
            }
        }
        let spin = self.spin_multiplicity as f64;
        Ok(rho.into_iter().map(|r| r * spin).collect())
    }

    /// N(E_i) = sum_(j < i) rho(E_j) dE, the number of states below each grid energy
    pub fn get_sum_of_states(&self, Elist: &[f64]) -> Result<Vec<f64>, ThermoError> {
        let dE = energy_grid_spacing(Elist)?;
        let rho = self.get_density_of_states(Elist)?;
        let mut total = 0.0;
        Ok(rho
            .iter()
            .map(|r| {
                let below = total;
                total += r * dE;
                below
            })
            .collect())
    }

    /// phi(beta) = ln Q(1 / (R beta)) + beta E
    fn phi(&self, beta: f64, E: f64) -> Result<f64, ThermoError> {
        Ok(self.get_partition_function(1.0 / (R * beta))?.ln() + beta * E)
    }

    /// beta minimizing phi for energy E, by bisection on the sign of dphi/dbeta in ln(beta)
    fn saddle_point(&self, E: f64) -> Result<f64, ThermoError> {
        let slope = |beta: f64| -> Result<f64, ThermoError> {
            let d = 1e-5 * beta;
            Ok((self.phi(beta + d, E)? - self.phi(beta - d, E)?) / (2.0 * d))
        };
        // T from 1e6 K down to 1e-2 K
        let (mut low, mut high) = ((1.0 / (R * 1e6)).ln(), (1.0 / (R * 1e-2)).ln());
        if slope(low.exp())? >= 0.0 || slope(high.exp())? <= 0.0 {
            return Err(ThermoError::CalculationError(format!(
                "no saddle point of the inverse Laplace transform for E = {} J/mol",
                E
            )));
        }
        while high - low > 1e-12 {
            let mid = 0.5 * (low + high);
            if slope(mid.exp())? > 0.0 {
                high = mid;
            } else {
                low = mid;
            }
        }
        Ok((0.5 * (low + high)).exp())
    }

    /// Density of states (mol/J) from the inverse Laplace transform of the partition
    /// function by steepest descents, rho = exp(phi) / sqrt(2 pi phi''), at the minimum of
    /// phi(beta) = ln Q + beta E. `order` 2 adds the next term of the expansion,
    /// 1 + phi''''/(8 phi''^2) - 5 phi'''^2/(24 phi''^3). The result agrees with the partition
    /// function by construction; rho(0) is zero.
    pub fn get_density_of_states_ILT(&self, Elist: &[f64], order: usize) -> Result<Vec<f64>, ThermoError> {
        energy_grid_spacing(Elist)?;
        if !(order == 1 || order == 2) {
            return Err(ThermoError::CalculationError(format!(
                "steepest descents order must be 1 or 2, got {}",
                order
            )));
        }
        debug!("inverse Laplace transform on {} energies, order {}", Elist.len(), order);
        let mut rho = vec![0.0; Elist.len()];
        for (i, &E) in Elist.iter().enumerate().skip(1) {
            let beta = self.saddle_point(E)?;
            let f = |x: f64| self.phi(x, E);
            let d = 1e-3 * beta;
            let f0 = f(beta)?;
            let d2 = (f(beta + d)? - 2.0 * f0 + f(beta - d)?) / (d * d);
            rho[i] = f0.exp() / (2.0 * PI * d2).sqrt();
            if order == 2 {
                let d = 1e-2 * beta;
                let d3 = (f(beta + 1.5 * d)? - 3.0 * f(beta + 0.5 * d)? + 3.0 * f(beta - 0.5 * d)?
                    - f(beta - 1.5 * d)?)
                    / d.powi(3);
                let d4 = (f(beta + 2.0 * d)? - 4.0 * f(beta + d)? + 6.0 * f0 - 4.0 * f(beta - d)?
                    + f(beta - 2.0 * d)?)
                    / d.powi(4);
                rho[i] *= 1.0 + d4 / 8.0 / (d2 * d2) - 5.0 * d3 * d3 / 24.0 / d2.powi(3);
            }
        }
        Ok(rho)
    }

    pub fn get_partition_functions(&self, Tlist: &[f64]) -> Result<Vec<f64>, ThermoError> {
        Tlist.iter().map(|&T| self.get_partition_function(T)).collect()
    }
    pub fn get_heat_capacities(&self, Tlist: &[f64]) -> Result<Vec<f64>, ThermoError> {
        Tlist.iter().map(|&T| self.get_heat_capacity(T)).collect()
    }
    pub fn get_enthalpies(&self, Tlist: &[f64]) -> Result<Vec<f64>, ThermoError> {
        Tlist.iter().map(|&T| self.get_enthalpy(T)).collect()
    }
    pub fn get_entropies(&self, Tlist: &[f64]) -> Result<Vec<f64>, ThermoError> {
        Tlist.iter().map(|&T| self.get_entropy(T)).collect()
    }
}

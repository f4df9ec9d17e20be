//! Physical constants in SI units (CODATA 2018 exact values where defined).
#![allow(non_upper_case_globals)]

/// Boltzmann constant, J/K
pub const kB: f64 = 1.380649e-23;
/// Planck constant, J*s
pub const h: f64 = 6.62607015e-34;
/// Avogadro constant, 1/mol
pub const Na: f64 = 6.02214076e23;
/// gas law constant, J/(mol*K)
pub const R: f64 = kB * Na;
/// speed of light in vacuum, m/s
pub const c: f64 = 299792458.0;
/// standard pressure, Pa
pub const P0: f64 = 1.0e5;
/// atomic mass unit, kg
pub const amu: f64 = 1.66053906660e-27;
/// one Angstrom, m
pub const angstrom: f64 = 1.0e-10;
/// h*c/kB in cm*K: converts a wavenumber in cm^-1 to a temperature
pub const hc_over_kB_cm: f64 = h * c * 100.0 / kB;
/// energy of one wavenumber (cm^-1) per mole, J/mol
pub const wavenumber_to_J_per_mol: f64 = h * c * 100.0 * Na;

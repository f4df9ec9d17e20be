//! NASA 7-coefficient polynomial representation of species thermochemistry.
//!
//! The coefficients are stored as one flat vector: first the temperature bounds of the
//! ranges, then 7 coefficients (a1..a7) per range, low-temperature range first:
//! - 9 numbers: `[T1, T2, a1..a7]`, one range T1..T2
//! - 17 numbers: `[T1, T2, T3, a1..a7, a1..a7]`, ranges T1..T2 and T2..T3
//! - 25 numbers: three ranges
//!
//! Cp/R = a1 + a2 T + a3 T^2 + a4 T^3 + a5 T^4,
//! H/RT = a1 + a2 T/2 + a3 T^2/3 + a4 T^3/4 + a5 T^4/5 + a6/T,
//! S/R = a1 ln T + a2 T + a3 T^2/2 + a4 T^3/3 + a5 T^4/4 + a7.
use super::thermo_api::{ThermoError, ThermoModel, check_temperature};
use crate::constants::R;
use RustedSciThe::symbolic::symbolic_engine::Expr;
use serde::{Deserialize, Serialize};

type Coeffs7 = (f64, f64, f64, f64, f64, f64, f64);

fn Cp(t: f64, a: f64, b: f64, c: f64, d: f64, e: f64) -> f64 {
    R * (a + b * t + c * t.powi(2) + d * t.powi(3) + e * t.powi(4))
}
fn dh(t: f64, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> f64 {
    R * t
        * (a + b * t / 2.0
            + c * t.powi(2) / 3.0
            + d * t.powi(3) / 4.0
            + e * t.powi(4) / 5.0
            + f / t)
}
fn ds(t: f64, a: f64, b: f64, c: f64, d: f64, e: f64, g: f64) -> f64 {
    R * (a * t.ln() + b * t + c * t.powi(2) / 2.0 + d * t.powi(3) / 3.0 + e * t.powi(4) / 4.0 + g)
}
fn Cp_sym(a: f64, b: f64, c: f64, d: f64, e: f64) -> Expr {
    let t = Expr::Var("T".to_owned());
    Expr::Const(R)
        * (Expr::Const(a)
            + Expr::Const(b) * t.clone()
            + Expr::Const(c) * t.clone().pow(Expr::Const(2.0))
            + Expr::Const(d) * t.clone().pow(Expr::Const(3.0))
            + Expr::Const(e) * t.pow(Expr::Const(4.0)))
}
fn dh_sym(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Expr {
    let t = Expr::Var("T".to_owned());
    Expr::Const(R)
        * (Expr::Const(a) * t.clone()
            + Expr::Const(b / 2.0) * t.clone().pow(Expr::Const(2.0))
            + Expr::Const(c / 3.0) * t.clone().pow(Expr::Const(3.0))
            + Expr::Const(d / 4.0) * t.clone().pow(Expr::Const(4.0))
            + Expr::Const(e / 5.0) * t.pow(Expr::Const(5.0))
            + Expr::Const(f))
}
fn ds_sym(a: f64, b: f64, c: f64, d: f64, e: f64, g: f64) -> Expr {
    let t = Expr::Var("T".to_owned());
    Expr::Const(R)
        * (Expr::Const(a) * t.clone().ln()
            + Expr::Const(b) * t.clone()
            + Expr::Const(c / 2.0) * t.clone().pow(Expr::Const(2.0))
            + Expr::Const(d / 3.0) * t.clone().pow(Expr::Const(3.0))
            + Expr::Const(e / 4.0) * t.pow(Expr::Const(4.0))
            + Expr::Const(g))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NASAdata {
    /// temperature bounds followed by NASA7 coefficients of every range
    pub coeffs: Vec<f64>,
}

impl NASAdata {
    pub fn new(coeffs: Vec<f64>) -> Result<Self, ThermoError> {
        let data = Self { coeffs };
        data.validate()?;
        Ok(data)
    }
    /// one temperature range T_min..T_max
    pub fn one_range(T_min: f64, T_max: f64, a: [f64; 7]) -> Result<Self, ThermoError> {
        let mut coeffs = vec![T_min, T_max];
        coeffs.extend_from_slice(&a);
        Self::new(coeffs)
    }
    /// two temperature ranges T_min..T_mid and T_mid..T_max
    pub fn two_ranges(
        T_min: f64,
        T_mid: f64,
        T_max: f64,
        low: [f64; 7],
        high: [f64; 7],
    ) -> Result<Self, ThermoError> {
        let mut coeffs = vec![T_min, T_mid, T_max];
        coeffs.extend_from_slice(&low);
        coeffs.extend_from_slice(&high);
        Self::new(coeffs)
    }

    fn n_ranges(&self) -> Result<usize, ThermoError> {
        match self.coeffs.len() {
            9 => Ok(1),
            17 => Ok(2),
            25 => Ok(3),
            n => Err(ThermoError::InvalidCoefficients(format!(
                "expected 9, 17 or 25 numbers, found {}",
                n
            ))),
        }
    }

    pub fn validate(&self) -> Result<(), ThermoError> {
        let n = self.n_ranges()?;
        let bounds = &self.coeffs[..=n];
        if self.coeffs.iter().any(|x| !x.is_finite()) {
            return Err(ThermoError::InvalidCoefficients(
                "coefficients must be finite".to_string(),
            ));
        }
        if bounds[0] <= 0.0 || bounds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ThermoError::InvalidCoefficients(format!(
                "temperature bounds {:?} must be positive and increasing",
                bounds
            )));
        }
        Ok(())
    }

    /// the temperature interval where the polynomials are defined
    pub fn temperature_range(&self) -> Result<(f64, f64), ThermoError> {
        let n = self.n_ranges()?;
        Ok((self.coeffs[0], self.coeffs[n]))
    }

    /// get the 7 constants of NASA7 format for concrete temperature
    pub fn extract_coefficients(&self, t: f64) -> Result<Coeffs7, ThermoError> {
        let n = self.n_ranges()?;
        let bounds = &self.coeffs[..=n];
        let get_range_str = |temps: &[f64]| {
            temps
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(" - ")
        };
        // the lowest range is closed on both sides, the others are closed on the right
        let range = (0..n).find(|&i| {
            let (lo, hi) = (bounds[i], bounds[i + 1]);
            if i == 0 { lo <= t && t <= hi } else { lo < t && t <= hi }
        });
        match range {
            Some(i) => {
                let start = n + 1 + 7 * i;
                let a = &self.coeffs[start..start + 7];
                Ok((a[0], a[1], a[2], a[3], a[4], a[5], a[6]))
            }
            None => Err(ThermoError::NoCoefficientsFound {
                temperature: t,
                range: get_range_str(bounds),
            }),
        }
    }

    /// symbolic Cp(T), H(T), S(T) valid in the range containing temperature t
    pub fn create_sym_Cp_dH_dS(&self, t: f64) -> Result<(Expr, Expr, Expr), ThermoError> {
        let (a, b, c, d, e, f, g) = self.extract_coefficients(t)?;
        Ok((
            Cp_sym(a, b, c, d, e),
            dh_sym(a, b, c, d, e, f),
            ds_sym(a, b, c, d, e, g),
        ))
    }
}

impl ThermoModel for NASAdata {
    fn get_heat_capacity(&self, T: f64) -> Result<f64, ThermoError> {
        check_temperature(T)?;
        let (a, b, c, d, e, _, _) = self.extract_coefficients(T)?;
        Ok(Cp(T, a, b, c, d, e))
    }
    fn get_enthalpy(&self, T: f64) -> Result<f64, ThermoError> {
        check_temperature(T)?;
        let (a, b, c, d, e, f, _) = self.extract_coefficients(T)?;
        Ok(dh(T, a, b, c, d, e, f))
    }
    fn get_entropy(&self, T: f64) -> Result<f64, ThermoError> {
        check_temperature(T)?;
        let (a, b, c, d, e, _, g) = self.extract_coefficients(T)?;
        Ok(ds(T, a, b, c, d, e, g))
    }
}

//! Rate coefficient models k(T, P). Units follow the reaction order in SI (m^3, mol, s);
//! activation energies are in J/mol.
use super::kinetics_error::{KineticsError, check_non_negative, check_temperature};
use crate::constants::R;
use RustedSciThe::symbolic::symbolic_engine::Expr;
use enum_dispatch::enum_dispatch;
use log::{info, warn};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

#[enum_dispatch]
pub trait KineticsModel {
    fn get_rate_coefficient(&self, T: f64, P: f64) -> Result<f64, KineticsError>;
    /// whether T lies in the interval the model was fitted for
    fn is_temperature_valid(&self, T: f64) -> bool;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[enum_dispatch(KineticsModel)]
pub enum KineticsEnum {
    Arrhenius(ArrheniusModel),
    PDepArrhenius(PDepArrhenius),
    Troe(TroeFalloff),
}

fn default_T0() -> f64 {
    1.0
}
/////////////////////////ARRHENIUS//////////////////////////////////////////////////////////
/// Modified Arrhenius expression k = A (T/T0)^n exp(-Ea/RT)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrheniusModel {
    pub A: f64,
    #[serde(default)]
    pub n: f64,
    #[serde(default)]
    pub Ea: f64,
    #[serde(default = "default_T0")]
    pub T0: f64,
    #[serde(default)]
    pub Tmin: Option<f64>,
    #[serde(default)]
    pub Tmax: Option<f64>,
}

impl ArrheniusModel {
    pub fn new(A: f64, n: f64, Ea: f64) -> Self {
        Self {
            A,
            n,
            Ea,
            T0: 1.0,
            Tmin: None,
            Tmax: None,
        }
    }
    pub fn with_T0(mut self, T0: f64) -> Self {
        self.T0 = T0;
        self
    }
    pub fn with_range(mut self, Tmin: f64, Tmax: f64) -> Self {
        self.Tmin = Some(Tmin);
        self.Tmax = Some(Tmax);
        self
    }

    fn evaluate(&self, T: f64) -> f64 {
        self.A * (T / self.T0).powf(self.n) * (-self.Ea / (R * T)).exp()
    }

    /// Least-squares fit of ln k = ln A + n ln(T/T0) - Ea/(RT) to (T, k) data.
    /// Needs at least three points with positive k; the fitted model is valid on the
    /// temperature range of the data.
    pub fn fit_to_data(Tlist: &[f64], klist: &[f64], T0: f64) -> Result<Self, KineticsError> {
        if Tlist.len() != klist.len() {
            return Err(KineticsError::Fitting(format!(
                "{} temperatures but {} rate coefficients",
                Tlist.len(),
                klist.len()
            )));
        }
        if Tlist.len() < 3 {
            return Err(KineticsError::Fitting(format!(
                "three parameters need at least 3 points, got {}",
                Tlist.len()
            )));
        }
        check_temperature(T0)?;
        for (&T, &k) in Tlist.iter().zip(klist) {
            check_temperature(T)?;
            if !(k.is_finite() && k > 0.0) {
                return Err(KineticsError::Fitting(format!(
                    "rate coefficient {} at T = {} K cannot be fitted in log space",
                    k, T
                )));
            }
        }
        let n = Tlist.len();
        let matrix = DMatrix::from_fn(n, 3, |i, j| match j {
            0 => 1.0,
            1 => (Tlist[i] / T0).ln(),
            _ => -1.0 / (R * Tlist[i]),
        });
        let rhs = DVector::from_iterator(n, klist.iter().map(|k| k.ln()));
        let x = matrix
            .svd(true, true)
            .solve(&rhs, 1e-14)
            .map_err(|e| KineticsError::Fitting(e.to_string()))?;
        let Tmin = Tlist.iter().cloned().fold(f64::INFINITY, f64::min);
        let Tmax = Tlist.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let fitted = Self {
            A: x[0].exp(),
            n: x[1],
            Ea: x[2],
            T0,
            Tmin: Some(Tmin),
            Tmax: Some(Tmax),
        };
        info!(
            "fitted Arrhenius A = {:e}, n = {:.4}, Ea = {:.1} J/mol on {} - {} K",
            fitted.A, fitted.n, fitted.Ea, Tmin, Tmax
        );
        Ok(fitted)
    }

    /// symbolic k(T) in the variable "T"
    pub fn K_expr(&self) -> Expr {
        let T = Expr::Var("T".to_owned());
        let A = Expr::Const(self.A);
        let n = Expr::Const(self.n);
        let Ea = Expr::Const(self.Ea);
        let k0 = A * (T.clone() / Expr::Const(self.T0)).pow(n);
        k0 * (-Ea / (Expr::Const(R) * T)).exp()
    }
}

impl KineticsModel for ArrheniusModel {
    fn get_rate_coefficient(&self, T: f64, _P: f64) -> Result<f64, KineticsError> {
        check_temperature(T)?;
        if !self.is_temperature_valid(T) {
            warn!(
                "T = {} K is outside the Arrhenius range {:?} - {:?} K",
                T, self.Tmin, self.Tmax
            );
        }
        Ok(self.evaluate(T))
    }
    fn is_temperature_valid(&self, T: f64) -> bool {
        self.Tmin.is_none_or(|Tmin| T >= Tmin) && self.Tmax.is_none_or(|Tmax| T <= Tmax)
    }
}
/////////////////////////PRESSURE DEPENDENT/////////////////////////////////////////////////
/// Arrhenius expressions given at a list of pressures (Pa); k is interpolated linearly in
/// ln k versus ln P and held constant outside the pressure range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PDepArrhenius {
    pub pressures: Vec<f64>,
    pub arrhenius: Vec<ArrheniusModel>,
}

impl PDepArrhenius {
    pub fn new(pressures: Vec<f64>, arrhenius: Vec<ArrheniusModel>) -> Result<Self, KineticsError> {
        let model = Self {
            pressures,
            arrhenius,
        };
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), KineticsError> {
        if self.pressures.is_empty() || self.pressures.len() != self.arrhenius.len() {
            return Err(KineticsError::MissingData(format!(
                "{} pressures for {} Arrhenius expressions",
                self.pressures.len(),
                self.arrhenius.len()
            )));
        }
        if self.pressures[0] <= 0.0 || self.pressures.windows(2).any(|w| w[0] >= w[1]) {
            return Err(KineticsError::MissingData(
                "pressures must be positive and increasing".to_string(),
            ));
        }
        Ok(())
    }
}

impl KineticsModel for PDepArrhenius {
    fn get_rate_coefficient(&self, T: f64, P: f64) -> Result<f64, KineticsError> {
        check_temperature(T)?;
        check_non_negative(P, "pressure")?;
        self.validate()?;
        let last = self.pressures.len() - 1;
        if P <= self.pressures[0] {
            return self.arrhenius[0].get_rate_coefficient(T, P);
        }
        if P >= self.pressures[last] {
            return self.arrhenius[last].get_rate_coefficient(T, P);
        }
        let i = self
            .pressures
            .windows(2)
            .position(|w| w[0] <= P && P <= w[1])
            .unwrap_or(last - 1);
        let (P1, P2) = (self.pressures[i], self.pressures[i + 1]);
        let k1 = self.arrhenius[i].get_rate_coefficient(T, P)?;
        let k2 = self.arrhenius[i + 1].get_rate_coefficient(T, P)?;
        let weight = (P / P1).ln() / (P2 / P1).ln();
        if k1 > 0.0 && k2 > 0.0 {
            Ok((k1.ln() + weight * (k2.ln() - k1.ln())).exp())
        } else {
            Ok(k1 + weight * (k2 - k1))
        }
    }
    fn is_temperature_valid(&self, T: f64) -> bool {
        self.arrhenius.iter().all(|a| a.is_temperature_valid(T))
    }
}
/////////////////////////FALLOFF////////////////////////////////////////////////////////////
/// Lindemann falloff between the `low` and `high` pressure limits, with the Troe
/// broadening factor when `troe` = [a, T3, T1] or [a, T3, T1, T2] is given. The bath gas
/// concentration is the ideal-gas [M] = P/RT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TroeFalloff {
    pub low: ArrheniusModel,
    pub high: ArrheniusModel,
    #[serde(default)]
    pub troe: Option<Vec<f64>>,
}

impl TroeFalloff {
    pub fn new(low: ArrheniusModel, high: ArrheniusModel, troe: Option<Vec<f64>>) -> Self {
        Self { low, high, troe }
    }

    /// center broadening factor F_cent(T)
    fn F_cent(&self, troe: &[f64], T: f64) -> Result<f64, KineticsError> {
        let F_c = match troe {
            [a, T3, T1] => (1.0 - a) * (-T / T3).exp() + a * (-T / T1).exp(),
            [a, T3, T1, T2] => (1.0 - a) * (-T / T3).exp() + a * (-T / T1).exp() + (-T2 / T).exp(),
            _ => {
                return Err(KineticsError::MissingData(format!(
                    "Troe parameters must have 3 or 4 entries, found {}",
                    troe.len()
                )));
            }
        };
        if F_c.is_finite() && F_c > 0.0 {
            Ok(F_c)
        } else {
            Err(KineticsError::InvalidInput {
                quantity: "Troe center broadening factor".to_string(),
                value: F_c,
            })
        }
    }
}

impl KineticsModel for TroeFalloff {
    fn get_rate_coefficient(&self, T: f64, P: f64) -> Result<f64, KineticsError> {
        check_temperature(T)?;
        check_non_negative(P, "pressure")?;
        let k0 = self.low.get_rate_coefficient(T, P)?;
        let k_inf = self.high.get_rate_coefficient(T, P)?;
        let M = P / (R * T);
        let P_r = k0 * M / k_inf;
        if !(P_r > 0.0) {
            return Ok(0.0);
        }
        let lindemann = k_inf * P_r / (1.0 + P_r);
        let F = match &self.troe {
            Some(troe) => {
                let log_Fc = self.F_cent(troe, T)?.log10();
                let C = -0.4 - 0.67 * log_Fc;
                let N = 0.75 - 1.27 * log_Fc;
                let f_1 = (P_r.log10() + C) / (N - 0.14 * (P_r.log10() + C));
                10f64.powf(log_Fc / (1.0 + f_1 * f_1))
            }
            None => 1.0,
        };
        Ok(lindemann * F)
    }
    fn is_temperature_valid(&self, T: f64) -> bool {
        self.low.is_temperature_valid(T) && self.high.is_temperature_valid(T)
    }
}

//! Quantum tunneling corrections kappa(T) to transition state theory rate coefficients.
//!
//! The Wigner correction is the leading term of the expansion in h nu / kB T. The Eckart
//! correction treats the reaction coordinate as a one-dimensional asymmetric Eckart barrier
//! whose height above reactants is dV1 and above products dV2 (J/mol) and whose curvature
//! is given by the imaginary frequency. Tunneling is evaluated in the exothermic direction,
//! so the barriers are swapped when dV1 > dV2. With x = E/RT,
//!
//! kappa(T) = exp(dV1/RT) * integral_0^inf P(x RT) exp(-x) dx,
//!
//! where P(E) is the transmission probability through the barrier for an energy E measured
//! from the bottom of the reactant side.
use super::kinetics_error::{KineticsError, check_temperature};
use crate::constants::{R, hc_over_kB_cm, wavenumber_to_J_per_mol};
use log::debug;
use serde::{Deserialize, Serialize};
use std::f64::consts::{LN_2, PI};
use std::fmt;
use std::str::FromStr;

/// imaginary frequencies below this magnitude (cm^-1) are treated as missing
const MIN_FREQUENCY: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TunnelingModel {
    #[default]
    None,
    Wigner,
    Eckart,
}

impl FromStr for TunnelingModel {
    type Err = KineticsError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(TunnelingModel::None),
            "wigner" => Ok(TunnelingModel::Wigner),
            "eckart" => Ok(TunnelingModel::Eckart),
            _ => Err(KineticsError::InvalidOption {
                received: s.to_string(),
                expected: "'', 'none', 'wigner', 'eckart'".to_string(),
            }),
        }
    }
}

impl fmt::Display for TunnelingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TunnelingModel::None => "none",
            TunnelingModel::Wigner => "wigner",
            TunnelingModel::Eckart => "eckart",
        };
        write!(f, "{}", name)
    }
}

/// Numerical settings of the Eckart quadrature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EckartSettings {
    /// relative accuracy of kappa
    pub rel_tol: f64,
    /// width of one integration panel in units of RT
    pub panel_width: f64,
    /// maximum bisection depth of the adaptive Simpson rule inside a panel
    pub max_depth: u32,
    /// how far above the barrier top (in RT) the integration may go before giving up
    pub max_excess: f64,
}

impl Default for EckartSettings {
    fn default() -> Self {
        Self {
            rel_tol: 1e-6,
            panel_width: 4.0,
            max_depth: 40,
            max_excess: 200.0,
        }
    }
}

fn check_frequency(frequency: f64) -> Result<f64, KineticsError> {
    let nu = frequency.abs();
    if nu.is_finite() && nu >= MIN_FREQUENCY {
        Ok(nu)
    } else {
        Err(KineticsError::Tunneling(format!(
            "imaginary frequency {} cm^-1 is zero or not finite",
            frequency
        )))
    }
}

/// kappa = 1 + (h c |nu| / kB T)^2 / 24, frequency in cm^-1
pub fn wigner_correction(frequency: f64, T: f64) -> Result<f64, KineticsError> {
    check_temperature(T)?;
    let nu = check_frequency(frequency)?;
    let u = nu * hc_over_kB_cm / T;
    Ok(1.0 + u * u / 24.0)
}

/////////////////////////ECKART BARRIER/////////////////////////////////////////////////////
/// Shape of an Eckart barrier oriented so that dV1 <= dV2
#[derive(Debug, Clone, Copy)]
struct EckartBarrier {
    dV1: f64,
    alpha1: f64,
    alpha2: f64,
}

impl EckartBarrier {
    fn new(frequency: f64, dV1: f64, dV2: f64) -> Result<Self, KineticsError> {
        let nu = check_frequency(frequency)?;
        if !(dV1.is_finite() && dV2.is_finite()) {
            return Err(KineticsError::Tunneling(format!(
                "barrier heights {} and {} J/mol must be finite",
                dV1, dV2
            )));
        }
        let (dV1, dV2) = if dV1 > dV2 { (dV2, dV1) } else { (dV1, dV2) };
        if dV1 <= 0.0 {
            return Err(KineticsError::Tunneling(format!(
                "Eckart barrier height must be positive, got {} J/mol",
                dV1
            )));
        }
        let alpha1 = 2.0 * PI * dV1 / (wavenumber_to_J_per_mol * nu);
        let alpha2 = 2.0 * PI * dV2 / (wavenumber_to_J_per_mol * nu);
        Ok(Self {
            dV1,
            alpha1,
            alpha2,
        })
    }

    /// ln P(E), E in J/mol above the reactant level
    fn ln_transmission(&self, E: f64) -> f64 {
        if E <= 0.0 {
            return f64::NEG_INFINITY;
        }
        let xi = E / self.dV1;
        let (a1, a2) = (self.alpha1, self.alpha2);
        let scale = 1.0 / a1.sqrt() + 1.0 / a2.sqrt();
        let two_pi_a = 2.0 * (a1 * xi).sqrt() / scale;
        let two_pi_b = 2.0 * ((xi - 1.0) * a1 + a2).max(0.0).sqrt() / scale;
        if two_pi_a <= 0.0 || two_pi_b <= 0.0 {
            return f64::NEG_INFINITY;
        }
        let numerator = LN_2 + ln_sinh(two_pi_a) + ln_sinh(two_pi_b);
        let ln_cosh_sum = ln_cosh(two_pi_a + two_pi_b);
        let discriminant = a1 * a2 - PI * PI / 4.0;
        let denominator = if discriminant >= 0.0 {
            log_add_exp(ln_cosh_sum, ln_cosh(2.0 * discriminant.sqrt()))
        } else {
            let cos_d = (2.0 * (-discriminant).sqrt()).cos();
            ln_cosh_sum + (cos_d * (-ln_cosh_sum).exp()).ln_1p()
        };
        (numerator - denominator).min(0.0)
    }
}

fn ln_sinh(x: f64) -> f64 {
    if x > 20.0 {
        x - LN_2 + (-(-2.0 * x).exp()).ln_1p()
    } else {
        x.sinh().ln()
    }
}

fn ln_cosh(x: f64) -> f64 {
    let x = x.abs();
    x - LN_2 + (-2.0 * x).exp().ln_1p()
}

fn log_add_exp(a: f64, b: f64) -> f64 {
    let (hi, lo) = if a > b { (a, b) } else { (b, a) };
    hi + (lo - hi).exp().ln_1p()
}

/// Transmission probability P(E) through the Eckart barrier, E in J/mol above the lower
/// of the two sides
pub fn eckart_transmission_probability(
    E: f64,
    frequency: f64,
    dV1: f64,
    dV2: f64,
) -> Result<f64, KineticsError> {
    let barrier = EckartBarrier::new(frequency, dV1, dV2)?;
    Ok(barrier.ln_transmission(E).exp())
}

#[allow(clippy::too_many_arguments)]
fn adaptive_simpson<F: Fn(f64) -> f64>(
    f: &F,
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
    whole: f64,
    tol: f64,
    min_tol: f64,
    depth: u32,
    max_depth: u32,
) -> Result<f64, KineticsError> {
    let m = 0.5 * (a + b);
    let (lm, rm) = (0.5 * (a + m), 0.5 * (m + b));
    let (flm, frm) = (f(lm), f(rm));
    let left = (m - a) / 6.0 * (fa + 4.0 * flm + fm);
    let right = (b - m) / 6.0 * (fm + 4.0 * frm + fb);
    let delta = left + right - whole;
    if delta.abs() <= 15.0 * tol {
        return Ok(left + right + delta / 15.0);
    }
    if depth >= max_depth {
        return Err(KineticsError::Convergence(format!(
            "adaptive Simpson exceeded depth {} on [{}, {}]",
            max_depth, a, b
        )));
    }
    let child_tol = (0.5 * tol).max(min_tol);
    let left = adaptive_simpson(f, a, m, fa, flm, fm, left, child_tol, min_tol, depth + 1, max_depth)?;
    let right = adaptive_simpson(f, m, b, fm, frm, fb, right, child_tol, min_tol, depth + 1, max_depth)?;
    Ok(left + right)
}

fn simpson_panel<F: Fn(f64) -> f64>(
    f: &F,
    a: f64,
    b: f64,
    tol: f64,
    max_depth: u32,
) -> Result<f64, KineticsError> {
    let (fa, fm, fb) = (f(a), f(0.5 * (a + b)), f(b));
    let whole = (b - a) / 6.0 * (fa + 4.0 * fm + fb);
    adaptive_simpson(f, a, b, fa, fm, fb, whole, tol, tol / 1024.0, 0, max_depth)
}

/// Eckart tunneling correction kappa(T), barriers in J/mol, frequency in cm^-1
pub fn eckart_correction(
    frequency: f64,
    dV1: f64,
    dV2: f64,
    T: f64,
    settings: &EckartSettings,
) -> Result<f64, KineticsError> {
    check_temperature(T)?;
    if !(settings.rel_tol > 0.0 && settings.panel_width > 0.0 && settings.max_excess > 0.0) {
        return Err(KineticsError::InvalidInput {
            quantity: "Eckart settings".to_string(),
            value: settings.rel_tol.min(settings.panel_width).min(settings.max_excess),
        });
    }
    let barrier = EckartBarrier::new(frequency, dV1, dV2)?;
    let RT = R * T;
    let beta_V1 = barrier.dV1 / RT;
    let integrand = |x: f64| (beta_V1 - x + barrier.ln_transmission(x * RT)).exp();

    // coarse scan for the size of the integrand, which sets the absolute tolerance
    let n_scan = ((beta_V1 + 50.0) / 0.1).ceil() as usize;
    let g_max = (0..=n_scan)
        .map(|i| integrand(0.1 * i as f64))
        .fold(0.0, f64::max);
    if !(g_max.is_finite() && g_max > 0.0) {
        return Err(KineticsError::Convergence(format!(
            "Eckart integrand has no finite positive values at T = {} K",
            T
        )));
    }
    let panel_tol = settings.rel_tol * g_max * 0.1;
    let x_limit = beta_V1 + settings.max_excess;
    debug!(
        "Eckart integration at T = {} K: dV1/RT = {:.3}, alpha1 = {:.3}, alpha2 = {:.3}",
        T, beta_V1, barrier.alpha1, barrier.alpha2
    );

    let mut integral = 0.0;
    let mut a = 0.0;
    loop {
        let b = a + settings.panel_width;
        integral += simpson_panel(&integrand, a, b, panel_tol, settings.max_depth)?;
        // the integrand is bounded by exp(dV1/RT - x) beyond b
        if (beta_V1 - b).exp() <= settings.rel_tol * integral {
            debug!("Eckart integration stopped at E/RT = {:.2}", b);
            break;
        }
        if b > x_limit {
            return Err(KineticsError::Convergence(format!(
                "Eckart integral not converged up to E/RT = {:.1} at T = {} K",
                b, T
            )));
        }
        a = b;
    }
    if integral.is_finite() {
        Ok(integral)
    } else {
        Err(KineticsError::Convergence(format!(
            "Eckart correction is not finite at T = {} K",
            T
        )))
    }
}

//! A chemical reaction between species of a species table, referenced by index.
//!
//! Thermodynamic properties of reaction are stoichiometry-weighted sums over the species,
//! rates follow the law of mass action and rate coefficients come either from a kinetics
//! model or from transition state theory.
use super::kinetics_error::{KineticsError, check_non_negative, check_temperature};
use super::kinetics_models::{ArrheniusModel, KineticsEnum, KineticsModel};
use super::transition_state::TransitionState;
use super::tunneling::{EckartSettings, TunnelingModel, eckart_correction, wigner_correction};
use crate::Thermodynamics::species::Species;
use crate::Thermodynamics::thermo_api::{ThermoEnum, ThermoModel};
use RustedSciThe::symbolic::symbolic_engine::Expr;
use crate::constants::{P0, R, h, kB};
use log::info;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// `<=>`, `=>` and `->` with optional spaces; a bare `=` only between spaces, so that
/// labels such as `CH2=CH2` stay intact
static ARROW_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\s*(<=>|=>|->)\s*|\s+(=)\s+"));
static PLUS_RE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(r"\s+\+\s+"));
static TERM_RE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(r"^(\d+)\s*(\S+)$"));

fn compiled(re: &'static LazyLock<Result<Regex, regex::Error>>) -> Result<&'static Regex, KineticsError> {
    LazyLock::force(re)
        .as_ref()
        .map_err(|e| KineticsError::InvalidReaction(format!("equation pattern: {}", e)))
}

/// Which equilibrium constant to compute
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EquilibriumConstantType {
    /// in terms of activities, dimensionless
    Ka,
    /// in terms of concentrations, (mol/m^3)^dn
    Kc,
    /// in terms of partial pressures, Pa^dn
    Kp,
    /// in terms of mole fractions at the given total pressure (Pa)
    Kx(f64),
}

impl FromStr for EquilibriumConstantType {
    type Err = KineticsError;
    /// "Ka", "Kc", "Kp" or "Kx" (mole fractions at the standard pressure)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Ka" => Ok(Self::Ka),
            "Kc" => Ok(Self::Kc),
            "Kp" => Ok(Self::Kp),
            "Kx" => Ok(Self::Kx(P0)),
            _ => Err(KineticsError::InvalidOption {
                received: s.to_string(),
                expected: "'Ka', 'Kc', 'Kp', 'Kx'".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    index: usize,
    pub reactants: Vec<usize>,
    pub products: Vec<usize>,
    pub reversible: bool,
    pub transition_state: Option<TransitionState>,
    pub kinetics: Option<KineticsEnum>,
    pub third_body: bool,
    pub eckart_settings: EckartSettings,
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reaction #{}", self.index)
    }
}

impl Reaction {
    /// Reversible reaction without kinetics; both sides must be non-empty.
    pub fn new(index: usize, reactants: Vec<usize>, products: Vec<usize>) -> Result<Self, KineticsError> {
        if reactants.is_empty() || products.is_empty() {
            return Err(KineticsError::InvalidReaction(format!(
                "reaction #{} needs at least one reactant and one product",
                index
            )));
        }
        Ok(Self {
            index,
            reactants,
            products,
            reversible: true,
            transition_state: None,
            kinetics: None,
            third_body: false,
            eckart_settings: EckartSettings::default(),
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }
    pub fn irreversible(mut self) -> Self {
        self.reversible = false;
        self
    }
    pub fn with_kinetics(mut self, kinetics: impl Into<KineticsEnum>) -> Self {
        self.kinetics = Some(kinetics.into());
        self
    }
    pub fn with_transition_state(mut self, transition_state: TransitionState) -> Self {
        self.transition_state = Some(transition_state);
        self
    }
    pub fn with_third_body(mut self, third_body: bool) -> Self {
        self.third_body = third_body;
        self
    }
    pub fn set_eckart_settings(&mut self, settings: EckartSettings) {
        self.eckart_settings = settings;
    }

    ///////////////////////////////STOICHIOMETRY////////////////////////////////////////////
    /// count in products minus count in reactants
    pub fn get_stoichiometric_coefficient(&self, species: usize) -> i32 {
        let produced = self.products.iter().filter(|&&s| s == species).count() as i32;
        let consumed = self.reactants.iter().filter(|&&s| s == species).count() as i32;
        produced - consumed
    }

    /// change in the number of molecules, dn = products - reactants
    fn delta_n(&self) -> i32 {
        self.products.len() as i32 - self.reactants.len() as i32
    }

    /// true if the reaction has exactly these reactants and products, in any order and in
    /// either direction
    pub fn has_template(&self, reactants: &[usize], products: &[usize]) -> bool {
        fn same_multiset(a: &[usize], b: &[usize]) -> bool {
            let mut a = a.to_vec();
            let mut b = b.to_vec();
            a.sort_unstable();
            b.sort_unstable();
            a == b
        }
        (same_multiset(&self.reactants, reactants) && same_multiset(&self.products, products))
            || (same_multiset(&self.reactants, products) && same_multiset(&self.products, reactants))
    }

    /// largest species index used by the reaction
    pub(crate) fn max_species_index(&self) -> Option<usize> {
        self.reactants.iter().chain(&self.products).copied().max()
    }

    fn species_at<'a>(&self, species: &'a [Species], i: usize) -> Result<&'a Species, KineticsError> {
        species.get(i).ok_or_else(|| {
            KineticsError::InvalidReaction(format!(
                "{} refers to species {} but the table has {} species",
                self,
                i,
                species.len()
            ))
        })
    }

    /// sum over products minus sum over reactants of a per-species property
    fn delta<F>(&self, species: &[Species], property: F) -> Result<f64, KineticsError>
    where
        F: Fn(&Species) -> Result<f64, KineticsError>,
    {
        let mut total = 0.0;
        for &p in &self.products {
            total += property(self.species_at(species, p)?)?;
        }
        for &r in &self.reactants {
            total -= property(self.species_at(species, r)?)?;
        }
        Ok(total)
    }

    ///////////////////////////////THERMODYNAMICS///////////////////////////////////////////
    /// dH of reaction, J/mol
    pub fn get_enthalpy_of_reaction(&self, species: &[Species], T: f64) -> Result<f64, KineticsError> {
        check_temperature(T)?;
        self.delta(species, |s| Ok(s.get_enthalpy(T)?))
    }
    /// dS of reaction, J/(mol*K)
    pub fn get_entropy_of_reaction(&self, species: &[Species], T: f64) -> Result<f64, KineticsError> {
        check_temperature(T)?;
        self.delta(species, |s| Ok(s.get_entropy(T)?))
    }
    /// dG of reaction, J/mol
    pub fn get_free_energy_of_reaction(&self, species: &[Species], T: f64) -> Result<f64, KineticsError> {
        check_temperature(T)?;
        self.delta(species, |s| Ok(s.get_free_energy(T)?))
    }
    pub fn get_enthalpies_of_reaction(&self, species: &[Species], Tlist: &[f64]) -> Result<Vec<f64>, KineticsError> {
        Tlist.iter().map(|&T| self.get_enthalpy_of_reaction(species, T)).collect()
    }
    pub fn get_entropies_of_reaction(&self, species: &[Species], Tlist: &[f64]) -> Result<Vec<f64>, KineticsError> {
        Tlist.iter().map(|&T| self.get_entropy_of_reaction(species, T)).collect()
    }
    pub fn get_free_energies_of_reaction(&self, species: &[Species], Tlist: &[f64]) -> Result<Vec<f64>, KineticsError> {
        Tlist.iter().map(|&T| self.get_free_energy_of_reaction(species, T)).collect()
    }

    /// Symbolic dH(T) and dS(T) of reaction for species described by NASA polynomials,
    /// valid in the polynomial ranges containing temperature `T`
    pub fn create_sym_dH_dS_of_reaction(&self, species: &[Species], T: f64) -> Result<(Expr, Expr), KineticsError> {
        let mut dH = Expr::Const(0.0);
        let mut dS = Expr::Const(0.0);
        let sides = [(&self.products, 1.0), (&self.reactants, -1.0)];
        for (side, sign) in sides {
            for &i in side.iter() {
                let s = self.species_at(species, i)?;
                let nasa = match &s.thermo {
                    Some(ThermoEnum::NASA(nasa)) => nasa,
                    _ => {
                        return Err(KineticsError::MissingData(format!(
                            "species {} has no NASA polynomials",
                            s.label
                        )));
                    }
                };
                let (_, dh, ds) = nasa.create_sym_Cp_dH_dS(T)?;
                dH = dH + Expr::Const(sign) * dh;
                dS = dS + Expr::Const(sign) * ds;
            }
        }
        Ok((dH.symplify(), dS.symplify()))
    }

    fn require_reversible(&self, operation: &str) -> Result<(), KineticsError> {
        if self.reversible {
            Ok(())
        } else {
            Err(KineticsError::IrreversibleReaction {
                reaction: self.to_string(),
                operation: operation.to_string(),
            })
        }
    }

    /// Equilibrium constant Ka = exp(-dG/RT), converted to the requested kind with
    /// dn = (number of products) - (number of reactants)
    pub fn get_equilibrium_constant(
        &self,
        species: &[Species],
        T: f64,
        kind: EquilibriumConstantType,
    ) -> Result<f64, KineticsError> {
        self.require_reversible("compute an equilibrium constant")?;
        let dG = self.get_free_energy_of_reaction(species, T)?;
        let Ka = (-dG / (R * T)).exp();
        let dn = self.delta_n();
        let K = match kind {
            EquilibriumConstantType::Ka => Ka,
            EquilibriumConstantType::Kc => Ka * (P0 / (R * T)).powi(dn),
            EquilibriumConstantType::Kp => Ka * P0.powi(dn),
            EquilibriumConstantType::Kx(P) => {
                if !(P.is_finite() && P > 0.0) {
                    return Err(KineticsError::InvalidInput {
                        quantity: "pressure".to_string(),
                        value: P,
                    });
                }
                Ka * (P / P0).powi(-dn)
            }
        };
        Ok(K)
    }

    pub fn get_equilibrium_constants(
        &self,
        species: &[Species],
        Tlist: &[f64],
        kind: EquilibriumConstantType,
    ) -> Result<Vec<f64>, KineticsError> {
        Tlist
            .iter()
            .map(|&T| self.get_equilibrium_constant(species, T, kind))
            .collect()
    }

    ///////////////////////////////KINETICS/////////////////////////////////////////////////
    fn kinetics_or_err(&self) -> Result<&KineticsEnum, KineticsError> {
        self.kinetics
            .as_ref()
            .ok_or_else(|| KineticsError::MissingData(format!("{} has no kinetics model", self)))
    }

    /// forward rate coefficient of the kinetics model
    pub fn get_rate_coefficient(&self, T: f64, P: f64) -> Result<f64, KineticsError> {
        self.kinetics_or_err()?.get_rate_coefficient(T, P)
    }

    fn concentration_product(
        &self,
        side: &[usize],
        species: &[Species],
        conc: &HashMap<usize, f64>,
    ) -> Result<f64, KineticsError> {
        let mut product = 1.0;
        for &i in side {
            let c = conc.get(&i).copied().ok_or_else(|| KineticsError::MissingConcentration {
                species: species
                    .get(i)
                    .map_or_else(|| format!("#{}", i), |s| s.label.clone()),
            })?;
            check_non_negative(c, "concentration")?;
            product *= c;
        }
        Ok(product)
    }

    /// Net rate of reaction, mol/(m^3*s), at temperature T (K), pressure P (Pa) and
    /// concentrations (mol/m^3) keyed by species index. The rate coefficient is multiplied
    /// by the total concentration for third-body reactions; it defaults to the sum of
    /// `conc`. Irreversible reactions have no reverse term.
    pub fn get_rate(
        &self,
        species: &[Species],
        T: f64,
        P: f64,
        conc: &HashMap<usize, f64>,
        total_conc: Option<f64>,
    ) -> Result<f64, KineticsError> {
        check_temperature(T)?;
        check_non_negative(P, "pressure")?;
        let mut k = self.get_rate_coefficient(T, P)?;
        if self.third_body {
            let total = total_conc.unwrap_or_else(|| conc.values().sum());
            check_non_negative(total, "total concentration")?;
            k *= total;
        }
        let forward = self.concentration_product(&self.reactants, species, conc)?;
        let reverse = if self.reversible {
            let products = self.concentration_product(&self.products, species, conc)?;
            products / self.get_equilibrium_constant(species, T, EquilibriumConstantType::Kc)?
        } else {
            0.0
        };
        Ok(k * (forward - reverse))
    }

    /// Reverse rate coefficient k_f/Kc on `Tlist`, fitted to a modified Arrhenius
    /// expression. The forward coefficient is taken at the standard pressure.
    pub fn generate_reverse_rate_coefficient(
        &self,
        species: &[Species],
        Tlist: &[f64],
    ) -> Result<ArrheniusModel, KineticsError> {
        self.require_reversible("generate a reverse rate coefficient")?;
        let kinetics = self.kinetics_or_err()?;
        let T0 = match kinetics {
            KineticsEnum::Arrhenius(arrhenius) => arrhenius.T0,
            _ => 1.0,
        };
        info!(
            "fitting reverse rate coefficient of {} on {} temperatures",
            self,
            Tlist.len()
        );
        let mut klist = Vec::with_capacity(Tlist.len());
        for &T in Tlist {
            let kf = kinetics.get_rate_coefficient(T, P0)?;
            let Kc = self.get_equilibrium_constant(species, T, EquilibriumConstantType::Kc)?;
            klist.push(kf / Kc);
        }
        ArrheniusModel::fit_to_data(Tlist, &klist, T0)
    }

    ///////////////////////////////TRANSITION STATE THEORY//////////////////////////////////
    fn transition_state_or_err(&self) -> Result<&TransitionState, KineticsError> {
        self.transition_state
            .as_ref()
            .ok_or_else(|| KineticsError::MissingData(format!("{} has no transition state", self)))
    }

    fn sum_E0(&self, side: &[usize], species: &[Species]) -> Result<f64, KineticsError> {
        let mut total = 0.0;
        for &i in side {
            total += self.species_at(species, i)?.E0;
        }
        Ok(total)
    }

    /// Tunneling correction kappa(T) for the transition state of the reaction
    pub fn calculate_tunneling_correction(
        &self,
        species: &[Species],
        T: f64,
        tunneling: TunnelingModel,
    ) -> Result<f64, KineticsError> {
        match tunneling {
            TunnelingModel::None => Ok(1.0),
            TunnelingModel::Wigner => self.calculate_wigner_tunneling_correction(T),
            TunnelingModel::Eckart => self.calculate_eckart_tunneling_correction(species, T),
        }
    }

    pub fn calculate_wigner_tunneling_correction(&self, T: f64) -> Result<f64, KineticsError> {
        let ts = self.transition_state_or_err()?;
        wigner_correction(ts.frequency, T)
    }

    /// Eckart correction with barrier heights measured from the reactant and product
    /// ground-state energies
    pub fn calculate_eckart_tunneling_correction(&self, species: &[Species], T: f64) -> Result<f64, KineticsError> {
        let ts = self.transition_state_or_err()?;
        let dV1 = ts.E0 - self.sum_E0(&self.reactants, species)?;
        let dV2 = ts.E0 - self.sum_E0(&self.products, species)?;
        eckart_correction(ts.frequency, dV1, dV2, T, &self.eckart_settings)
    }

    /// Transition state theory rate coefficient
    /// k = deg kappa (kB T/h) (Q_TS/V0) / prod(Q_reactant/V0) exp(-E0/RT), V0 = RT/P0
    pub fn calculate_tst_rate_coefficient(
        &self,
        species: &[Species],
        T: f64,
        tunneling: TunnelingModel,
    ) -> Result<f64, KineticsError> {
        check_temperature(T)?;
        let ts = self.transition_state_or_err()?;
        let V0 = R * T / P0;
        let E0 = ts.E0 - self.sum_E0(&self.reactants, species)?;
        let mut Q_ratio = ts.states.get_partition_function(T)? / V0;
        for &r in &self.reactants {
            Q_ratio /= self.species_at(species, r)?.get_partition_function(T)? / V0;
        }
        let kappa = self.calculate_tunneling_correction(species, T, tunneling)?;
        let k = ts.degeneracy as f64 * kappa * (kB * T / h) * Q_ratio * (-E0 / (R * T)).exp();
        if k.is_finite() {
            Ok(k)
        } else {
            Err(KineticsError::InvalidInput {
                quantity: format!("TST rate coefficient of {} at T = {} K", self, T),
                value: k,
            })
        }
    }

    pub fn calculate_tst_rate_coefficients(
        &self,
        species: &[Species],
        Tlist: &[f64],
        tunneling: TunnelingModel,
    ) -> Result<Vec<f64>, KineticsError> {
        Tlist
            .iter()
            .map(|&T| self.calculate_tst_rate_coefficient(species, T, tunneling))
            .collect()
    }

    ///////////////////////////////EQUATION STRINGS/////////////////////////////////////////
    /// "A + B <=> C" for reversible and "A + B -> C" for irreversible reactions
    pub fn equation(&self, species: &[Species]) -> Result<String, KineticsError> {
        let side = |indices: &[usize]| -> Result<String, KineticsError> {
            let mut labels = indices
                .iter()
                .map(|&i| Ok(self.species_at(species, i)?.label.clone()))
                .collect::<Result<Vec<String>, KineticsError>>()?;
            if self.third_body {
                labels.push("M".to_string());
            }
            Ok(labels.join(" + "))
        };
        let arrow = if self.reversible { "<=>" } else { "->" };
        Ok(format!("{} {} {}", side(&self.reactants)?, arrow, side(&self.products)?))
    }

    /// Parses "A + 2 B <=> C + M". `<=>` and ` = ` mark reversible reactions, `->` and `=>`
    /// irreversible ones; a bare `=` must be surrounded by spaces. Terms are separated by
    /// " + " and an integer prefix repeats a species. A term "M" that is not a species
    /// label marks a third-body reaction.
    pub fn from_equation(index: usize, equation: &str, species: &[Species]) -> Result<Self, KineticsError> {
        let invalid = |msg: String| KineticsError::InvalidReaction(format!("'{}': {}", equation, msg));
        let arrows: Vec<_> = compiled(&ARROW_RE)?.captures_iter(equation).collect();
        if arrows.len() != 1 {
            return Err(invalid(format!("expected one arrow, found {}", arrows.len())));
        }
        let arrow = arrows[0].get(1).or_else(|| arrows[0].get(2));
        let (whole, arrow) = match (arrows[0].get(0), arrow) {
            (Some(whole), Some(arrow)) => (whole, arrow.as_str()),
            _ => return Err(invalid("cannot locate the arrow".to_string())),
        };
        let reversible = matches!(arrow, "<=>" | "=");
        let left = &equation[..whole.start()];
        let right = &equation[whole.end()..];

        let plus_re = compiled(&PLUS_RE)?;
        let term_re = compiled(&TERM_RE)?;
        let mut third_body = false;
        let mut parse_side = |text: &str| -> Result<Vec<usize>, KineticsError> {
            let mut indices = Vec::new();
            for term in plus_re.split(text.trim()) {
                let term = term.trim();
                if term.is_empty() {
                    return Err(invalid("empty term".to_string()));
                }
                let lookup = |label: &str| species.iter().position(|s| s.label == label);
                if let Some(i) = lookup(term) {
                    indices.push(i);
                    continue;
                }
                if term == "M" {
                    third_body = true;
                    continue;
                }
                let (count, label) = match term_re.captures(term) {
                    Some(caps) => {
                        let count: usize = caps[1].parse().map_err(|_| invalid(format!("bad multiplicity in '{}'", term)))?;
                        (count, caps[2].to_string())
                    }
                    None => return Err(invalid(format!("unknown species '{}'", term))),
                };
                let i = lookup(&label).ok_or_else(|| invalid(format!("unknown species '{}'", label)))?;
                indices.extend(std::iter::repeat_n(i, count));
            }
            Ok(indices)
        };
        let reactants = parse_side(left)?;
        let products = parse_side(right)?;
        let reaction = Self::new(index, reactants, products)?.with_third_body(third_body);
        Ok(if reversible { reaction } else { reaction.irreversible() })
    }
}

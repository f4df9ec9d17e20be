use super::kinetics_error::{KineticsError, check_temperature};
use super::kinetics_models::KineticsEnum;
use super::reaction::Reaction;
use super::transition_state::TransitionState;
use super::tunneling::EckartSettings;
use crate::Thermodynamics::species::Species;
use log::{info, warn};
use nalgebra::DMatrix;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// A species table and the reactions between its species
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReactionModel {
    pub species: Vec<Species>,
    pub reactions: Vec<Reaction>,
}

/// one reaction of a model description file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ReactionEntry {
    equation: String,
    #[serde(default)]
    kinetics: Option<KineticsEnum>,
    #[serde(default)]
    transition_state: Option<TransitionState>,
    #[serde(default)]
    eckart: Option<EckartSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelDocument {
    species: Vec<Species>,
    #[serde(default)]
    reactions: Vec<ReactionEntry>,
}

impl ReactionModel {
    /// Model with the given species and no reactions; labels must be distinct.
    pub fn new(species: Vec<Species>) -> Result<Self, KineticsError> {
        let mut seen = HashSet::new();
        for s in &species {
            if !seen.insert(s.label.as_str()) {
                return Err(KineticsError::InvalidReaction(format!(
                    "species label {} appears more than once",
                    s.label
                )));
            }
        }
        Ok(Self {
            species,
            reactions: Vec::new(),
        })
    }

    pub fn species_index(&self, label: &str) -> Option<usize> {
        self.species.iter().position(|s| s.label == label)
    }

    fn check_reaction(&self, reaction: &Reaction) -> Result<(), KineticsError> {
        match reaction.max_species_index() {
            Some(i) if i >= self.species.len() => Err(KineticsError::InvalidReaction(format!(
                "{} refers to species {} but the model has {} species",
                reaction,
                i,
                self.species.len()
            ))),
            _ => Ok(()),
        }
    }

    /// appends a reaction whose species indices are inside the species table
    pub fn add_reaction(&mut self, reaction: Reaction) -> Result<(), KineticsError> {
        self.check_reaction(&reaction)?;
        self.reactions.push(reaction);
        Ok(())
    }

    /// parses an equation against the species table and appends the reaction with the next
    /// free index
    pub fn add_reaction_from_equation(&mut self, equation: &str) -> Result<&mut Reaction, KineticsError> {
        let index = self.reactions.len() + 1;
        let reaction = Reaction::from_equation(index, equation, &self.species)?;
        self.reactions.push(reaction);
        let last = self.reactions.len() - 1;
        Ok(&mut self.reactions[last])
    }

    /// R x S matrix of stoichiometric coefficients: entry (r, s) is the coefficient of
    /// species s in reaction r
    pub fn generate_stoichiometry_matrix(&self) -> Result<DMatrix<i32>, KineticsError> {
        for reaction in &self.reactions {
            self.check_reaction(reaction)?;
        }
        let (n_reactions, n_species) = (self.reactions.len(), self.species.len());
        info!(
            "generating {} x {} stoichiometry matrix",
            n_reactions, n_species
        );
        Ok(DMatrix::from_fn(n_reactions, n_species, |r, s| {
            self.reactions[r].get_stoichiometric_coefficient(s)
        }))
    }

    /// net rate of every reaction, mol/(m^3*s)
    pub fn get_rates_of_reactions(
        &self,
        T: f64,
        P: f64,
        Ci: &HashMap<usize, f64>,
    ) -> Result<Vec<f64>, KineticsError> {
        check_temperature(T)?;
        let total_conc: f64 = Ci.values().sum();
        self.reactions
            .iter()
            .map(|reaction| reaction.get_rate(&self.species, T, P, Ci, Some(total_conc)))
            .collect()
    }

    /// net production rate of every species, sum over reactions of nu(s, r) rate_r
    pub fn get_reaction_rates(
        &self,
        T: f64,
        P: f64,
        Ci: &HashMap<usize, f64>,
    ) -> Result<Vec<f64>, KineticsError> {
        let rates = self.get_rates_of_reactions(T, P, Ci)?;
        let stoichiometry = self.generate_stoichiometry_matrix()?;
        let mut production = vec![0.0; self.species.len()];
        for (r, rate) in rates.iter().enumerate() {
            for (s, net) in production.iter_mut().enumerate() {
                *net += stoichiometry[(r, s)] as f64 * rate;
            }
        }
        Ok(production)
    }

    /// concentrations keyed by species index from concentrations keyed by label
    pub fn concentrations_from_labels(
        &self,
        by_label: &HashMap<String, f64>,
    ) -> Result<HashMap<usize, f64>, KineticsError> {
        by_label
            .iter()
            .map(|(label, &c)| {
                self.species_index(label)
                    .map(|i| (i, c))
                    .ok_or_else(|| KineticsError::MissingData(format!("unknown species {}", label)))
            })
            .collect()
    }

    ///////////////////////////////LOADING/////////////////////////////////////////////////
    /// Model from its JSON description; reactions are indexed 1, 2, ... in order
    pub fn from_json_str(json: &str) -> Result<Self, KineticsError> {
        let document: ModelDocument = serde_json::from_str(json)?;
        let mut model = Self::new(document.species)?;
        for entry in document.reactions {
            let reaction = model.add_reaction_from_equation(&entry.equation)?;
            reaction.kinetics = entry.kinetics;
            reaction.transition_state = entry.transition_state;
            if let Some(settings) = entry.eckart {
                reaction.set_eckart_settings(settings);
            }
            if reaction.kinetics.is_none() && reaction.transition_state.is_none() {
                warn!(
                    "reaction '{}' has neither kinetics nor a transition state",
                    entry.equation
                );
            }
        }
        info!(
            "loaded model with {} species and {} reactions",
            model.species.len(),
            model.reactions.len()
        );
        Ok(model)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, KineticsError> {
        let path = path.as_ref();
        info!("loading reaction model from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    ///////////////////////////////PRESENTATION////////////////////////////////////////////
    pub fn stoichiometry_table(&self) -> Result<Table, KineticsError> {
        let matrix = self.generate_stoichiometry_matrix()?;
        let mut table = Table::new();
        let mut header = vec![Cell::new("#")];
        header.extend(self.species.iter().map(|s| Cell::new(&s.label)));
        table.add_row(Row::new(header));
        for (r, reaction) in self.reactions.iter().enumerate() {
            let mut row = vec![Cell::new(&reaction.index().to_string())];
            row.extend((0..self.species.len()).map(|s| Cell::new(&matrix[(r, s)].to_string())));
            table.add_row(Row::new(row));
        }
        Ok(table)
    }

    /// equation, forward rate coefficient and net rate of every reaction
    pub fn rates_table(&self, T: f64, P: f64, Ci: &HashMap<usize, f64>) -> Result<Table, KineticsError> {
        let rates = self.get_rates_of_reactions(T, P, Ci)?;
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("#"),
            Cell::new("equation"),
            Cell::new("k"),
            Cell::new("rate"),
        ]));
        for (reaction, rate) in self.reactions.iter().zip(rates) {
            table.add_row(Row::new(vec![
                Cell::new(&reaction.index().to_string()),
                Cell::new(&reaction.equation(&self.species)?),
                Cell::new(&format!("{:.4e}", reaction.get_rate_coefficient(T, P)?)),
                Cell::new(&format!("{:.4e}", rate)),
            ]));
        }
        Ok(table)
    }

    pub fn pretty_print(&self, T: f64, P: f64, Ci: &HashMap<usize, f64>) -> Result<(), KineticsError> {
        println!("Stoichiometry:");
        self.stoichiometry_table()?.printstd();
        println!("Rates at T = {} K, P = {} Pa:", T, P);
        self.rates_table(T, P, Ci)?.printstd();
        Ok(())
    }
}

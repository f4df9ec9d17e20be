//! Cartesian molecular geometry: coordinates in Angstrom, masses in amu. Inertia
//! quantities are returned in amu*Angstrom^2.
use super::elements::atomic_mass;
use nalgebra::{Matrix3, SymmetricEigen, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error(
        "Inconsistent geometry: {coordinates} coordinates, {numbers} atomic numbers, {masses} masses"
    )]
    Inconsistent {
        coordinates: usize,
        numbers: usize,
        masses: usize,
    },
    #[error("Geometry has no atoms")]
    Empty,
    #[error("Invalid mass {mass} of atom {atom}")]
    InvalidMass { atom: usize, mass: f64 },
    #[error("Coordinates of atom {0} are not finite")]
    InvalidCoordinates(usize),
    #[error("Atom index {index} out of range for {n_atoms} atoms")]
    AtomOutOfRange { index: usize, n_atoms: usize },
    #[error("No atomic mass for atomic number {0}")]
    UnknownElement(u32),
    #[error("Invalid internal rotor: {0}")]
    InvalidRotor(String),
    #[error("Degenerate geometry: {0}")]
    Degenerate(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeometryData")]
pub struct Geometry {
    coordinates: Vec<Vector3<f64>>,
    number: Vec<u32>,
    mass: Vec<f64>,
}

/// unchecked serialized form; deserialization goes through [`Geometry::new`]
#[derive(Deserialize)]
struct GeometryData {
    coordinates: Vec<Vector3<f64>>,
    number: Vec<u32>,
    mass: Vec<f64>,
}

impl TryFrom<GeometryData> for Geometry {
    type Error = GeometryError;
    fn try_from(data: GeometryData) -> Result<Self, Self::Error> {
        Geometry::new(data.coordinates, data.number, data.mass)
    }
}

impl Geometry {
    /// Checks that coordinates, atomic numbers and masses describe the same atoms, that
    /// masses are positive and coordinates finite.
    pub fn new(
        coordinates: Vec<Vector3<f64>>,
        number: Vec<u32>,
        mass: Vec<f64>,
    ) -> Result<Self, GeometryError> {
        if coordinates.len() != number.len() || coordinates.len() != mass.len() {
            return Err(GeometryError::Inconsistent {
                coordinates: coordinates.len(),
                numbers: number.len(),
                masses: mass.len(),
            });
        }
        if coordinates.is_empty() {
            return Err(GeometryError::Empty);
        }
        if let Some((atom, &m)) = mass
            .iter()
            .enumerate()
            .find(|(_, m)| !(m.is_finite() && **m > 0.0))
        {
            return Err(GeometryError::InvalidMass { atom, mass: m });
        }
        if let Some(atom) = coordinates.iter().position(|r| !r.iter().all(|x| x.is_finite())) {
            return Err(GeometryError::InvalidCoordinates(atom));
        }
        Ok(Self {
            coordinates,
            number,
            mass,
        })
    }

    /// masses taken from the element table
    pub fn from_atomic_numbers(coordinates: Vec<Vector3<f64>>, number: Vec<u32>) -> Result<Self, GeometryError> {
        let mass = number
            .iter()
            .map(|&Z| atomic_mass(Z).ok_or(GeometryError::UnknownElement(Z)))
            .collect::<Result<Vec<f64>, GeometryError>>()?;
        Self::new(coordinates, number, mass)
    }

    pub fn n_atoms(&self) -> usize {
        self.coordinates.len()
    }
    pub fn coordinates(&self) -> &[Vector3<f64>] {
        &self.coordinates
    }
    pub fn number(&self) -> &[u32] {
        &self.number
    }
    pub fn mass(&self) -> &[f64] {
        &self.mass
    }

    fn check_atoms(&self, atoms: &[usize]) -> Result<(), GeometryError> {
        match atoms.iter().find(|&&i| i >= self.n_atoms()) {
            Some(&index) => Err(GeometryError::AtomOutOfRange {
                index,
                n_atoms: self.n_atoms(),
            }),
            None => Ok(()),
        }
    }

    fn atom_indices(&self, atoms: Option<&[usize]>) -> Result<Vec<usize>, GeometryError> {
        match atoms {
            Some(atoms) => {
                self.check_atoms(atoms)?;
                Ok(atoms.to_vec())
            }
            None => Ok((0..self.n_atoms()).collect()),
        }
    }

    /// total mass of the given atoms (all atoms for None), amu
    pub fn get_total_mass(&self, atoms: Option<&[usize]>) -> Result<f64, GeometryError> {
        Ok(self
            .atom_indices(atoms)?
            .iter()
            .map(|&i| self.mass[i])
            .sum())
    }

    /// center of mass of the given atoms (all atoms for None), Angstrom
    pub fn get_center_of_mass(&self, atoms: Option<&[usize]>) -> Result<Vector3<f64>, GeometryError> {
        let atoms = self.atom_indices(atoms)?;
        if atoms.is_empty() {
            return Err(GeometryError::Degenerate(
                "center of mass of an empty set of atoms".to_string(),
            ));
        }
        let (weighted, total) = atoms.iter().fold((Vector3::zeros(), 0.0), |(sum, m), &i| {
            (sum + self.coordinates[i] * self.mass[i], m + self.mass[i])
        });
        Ok(weighted / total)
    }

    fn center_of_mass(&self) -> Vector3<f64> {
        let total: f64 = self.mass.iter().sum();
        self.coordinates
            .iter()
            .zip(&self.mass)
            .fold(Vector3::zeros(), |sum, (r, &m)| sum + r * m)
            / total
    }

    /// I_ij = sum m (delta_ij |r|^2 - r_i r_j) with r measured from the center of mass
    pub fn get_moment_of_inertia_tensor(&self) -> Matrix3<f64> {
        let center = self.center_of_mass();
        let mut tensor = Matrix3::zeros();
        for (r, &m) in self.coordinates.iter().zip(&self.mass) {
            let r = r - center;
            tensor += (Matrix3::identity() * r.norm_squared() - r * r.transpose()) * m;
        }
        tensor
    }

    /// Principal moments in ascending order and the principal axes as the columns of the
    /// returned matrix, in the same order.
    pub fn get_principal_moments_of_inertia(&self) -> (Vector3<f64>, Matrix3<f64>) {
        let eigen = SymmetricEigen::new(self.get_moment_of_inertia_tensor());
        let mut order = [0usize, 1, 2];
        order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));
        let moments = Vector3::from_fn(|i, _| eigen.eigenvalues[order[i]]);
        let axes = Matrix3::from_columns(&[
            eigen.eigenvectors.column(order[0]).into_owned(),
            eigen.eigenvectors.column(order[1]).into_owned(),
            eigen.eigenvectors.column(order[2]).into_owned(),
        ]);
        (moments, axes)
    }

    /// Reduced moment of inertia of the internal rotation about the bond between the two
    /// `pivots`. `top1` lists the atoms of one rotating group including exactly one pivot;
    /// the remaining atoms form the other group. Each group's moment is sum m d^2, d being
    /// the distance from the pivot axis, and 1/I_red = 1/I_top1 + 1/I_top2.
    pub fn get_internal_reduced_moment_of_inertia(
        &self,
        pivots: [usize; 2],
        top1: &[usize],
    ) -> Result<f64, GeometryError> {
        self.check_atoms(&pivots)?;
        self.check_atoms(top1)?;
        if pivots[0] == pivots[1] {
            return Err(GeometryError::InvalidRotor(format!(
                "both pivots are atom {}",
                pivots[0]
            )));
        }
        let top1: HashSet<usize> = top1.iter().copied().collect();
        let pivots_in_top1 = pivots.iter().filter(|p| top1.contains(p)).count();
        if pivots_in_top1 != 1 {
            return Err(GeometryError::InvalidRotor(format!(
                "the first top must contain exactly one pivot, it contains {}",
                pivots_in_top1
            )));
        }
        let top2: Vec<usize> = (0..self.n_atoms()).filter(|i| !top1.contains(i)).collect();
        if top2.is_empty() {
            return Err(GeometryError::InvalidRotor(
                "the second top has no atoms".to_string(),
            ));
        }

        let origin = self.coordinates[pivots[0]];
        let bond = self.coordinates[pivots[1]] - origin;
        if bond.norm() < 1e-8 {
            return Err(GeometryError::InvalidRotor(format!(
                "pivot atoms {} and {} coincide",
                pivots[0], pivots[1]
            )));
        }
        let axis = bond.normalize();
        let moment = |atoms: &mut dyn Iterator<Item = usize>| -> f64 {
            atoms
                .map(|i| {
                    let r = self.coordinates[i] - origin;
                    let along = r.dot(&axis);
                    self.mass[i] * (r.norm_squared() - along * along).max(0.0)
                })
                .sum()
        };
        let I1 = moment(&mut top1.iter().copied());
        let I2 = moment(&mut top2.iter().copied());
        if I1 <= 0.0 || I2 <= 0.0 {
            return Err(GeometryError::Degenerate(format!(
                "a rotating top lies on the rotor axis (I1 = {}, I2 = {})",
                I1, I2
            )));
        }
        Ok(I1 * I2 / (I1 + I2))
    }
}

/// atomic masses of the elements H..Kr
pub mod elements;
/// coordinates, masses, center of mass, inertia tensor, principal and internal moments
/// # Examples
/// ```
/// use KiRate::Geometry::molecular_geometry::Geometry;
/// use nalgebra::Vector3;
/// let hcl = Geometry::from_atomic_numbers(
///     vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.27)],
///     vec![1, 17],
/// )
/// .unwrap();
/// let (moments, _axes) = hcl.get_principal_moments_of_inertia();
/// assert!(moments[0].abs() < 1e-10);
/// assert!((moments[1] - moments[2]).abs() < 1e-10);
/// ```
pub mod molecular_geometry;

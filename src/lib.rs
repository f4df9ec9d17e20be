#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod Geometry;
#[allow(non_snake_case)]
pub mod Kinetics;
#[allow(non_snake_case)]
pub mod Thermodynamics;
pub mod constants;

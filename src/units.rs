//! Unit conventions for the configuration literals.
//!
//! Lengths are expressed in millimeters, times in nanoseconds and energies
//! in MeV, so a literal like `2.5 * CM` reads the same as in the lab
//! notebook it came from. Densities are the exception and stay in g/cm³
//! throughout, molar masses in g/mole, number densities in 1/cm³.

pub const MM: f64 = 1.0;
pub const CM: f64 = 10.0 * MM;
pub const M: f64 = 1000.0 * MM;

pub const NS: f64 = 1.0;

pub const MEV: f64 = 1.0;
pub const KEV: f64 = 1e-3 * MEV;
pub const EV: f64 = 1e-6 * MEV;

/// Degrees to radians; angles are carried in radians internally.
pub const DEG: f64 = std::f64::consts::PI / 180.0;

/// 1/mole
pub const AVOGADRO: f64 = 6.02214076e23;

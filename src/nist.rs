//! Embedded registry of standard elements and materials.
//!
//! Covers the registry names the experiment actually looks up; densities in
//! g/cm³, molar masses in g/mole. Unknown names are reported as
//! [`Error::UnknownMaterial`](crate::Error::UnknownMaterial) instead of a
//! toolkit-style fatal abort.

use crate::error::{Error, Result};
use crate::material::{Element, Material, State};

/// (name, symbol, Z, molar mass)
const ELEMENTS: &[(&str, &str, u32, f64)] = &[
    ("Hydrogen", "H", 1, 1.008),
    ("Carbon", "C", 6, 12.011),
    ("Nitrogen", "N", 7, 14.007),
    ("Oxygen", "O", 8, 15.999),
    ("Aluminium", "Al", 13, 26.9815385),
    ("Argon", "Ar", 18, 39.948),
    ("Cobalt", "Co", 27, 58.933194),
];

/// (registry name, density, state, components as (symbol, mass fraction))
const MATERIALS: &[(&str, f64, State, &[(&str, f64)])] = &[
    (
        "G4_AIR",
        1.20479e-3,
        State::Gas,
        &[
            ("C", 0.000124),
            ("N", 0.755268),
            ("O", 0.231781),
            ("Ar", 0.012827),
        ],
    ),
    (
        "G4_WATER",
        1.0,
        State::Liquid,
        &[("H", 0.111894), ("O", 0.888106)],
    ),
    ("G4_Al", 2.699, State::Solid, &[("Al", 1.0)]),
];

/// Looks up a natural element by its chemical symbol.
pub fn find_element(symbol: &str) -> Result<Element> {
    ELEMENTS
        .iter()
        .find(|(_, s, _, _)| *s == symbol)
        .map(|(name, s, z, molar_mass)| Element::natural(name, s, *z, *molar_mass))
        .ok_or_else(|| Error::UnknownMaterial(symbol.to_string()))
}

/// Builds a standard material by its registry name.
pub fn find_material(name: &str) -> Result<Material> {
    let (_, density, state, components) = MATERIALS
        .iter()
        .find(|(n, _, _, _)| *n == name)
        .ok_or_else(|| Error::UnknownMaterial(name.to_string()))?;

    let mut builder = Material::builder(name).density(*density).state(*state);
    for (symbol, fraction) in components.iter() {
        builder = builder.element_fraction(find_element(symbol)?, *fraction);
    }
    builder.build()
}

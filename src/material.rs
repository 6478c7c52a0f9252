use crate::error::{Error, Result};
use crate::property::PropertyTable;
use crate::units::AVOGADRO;
use std::sync::Arc;

/// Shared, immutable material handle as consumed by logical volumes.
pub type MaterialHandle = Arc<Material>;

/// A single nuclide, identified by charge and mass number.
#[derive(Debug, Clone)]
pub struct Isotope {
    pub name: String,
    pub z: u32,
    pub a: u32,
    /// g/mole
    pub molar_mass: f64,
}

impl Isotope {
    pub fn new(name: &str, z: u32, a: u32, molar_mass: f64) -> Isotope {
        Isotope {
            name: name.to_string(),
            z,
            a,
            molar_mass,
        }
    }
}

/// Chemical element, either at natural isotopic abundance or built from an
/// explicit isotope mix (e.g. an enriched source element).
#[derive(Debug, Clone)]
pub struct Element {
    name: String,
    symbol: String,
    z: u32,
    /// g/mole
    molar_mass: f64,
}

impl Element {
    pub fn natural(name: &str, symbol: &str, z: u32, molar_mass: f64) -> Element {
        Element {
            name: name.to_string(),
            symbol: symbol.to_string(),
            z,
            molar_mass,
        }
    }

    /// Builds an element from isotopes and their abundance fractions.
    pub fn from_isotopes(
        name: &str,
        symbol: &str,
        isotopes: &[(Isotope, f64)],
    ) -> Result<Element> {
        let (first, _) = isotopes.first().ok_or_else(|| Error::InvalidMaterial {
            name: name.to_string(),
            reason: "element needs at least one isotope".to_string(),
        })?;
        let z = first.z;
        if isotopes.iter().any(|(iso, _)| iso.z != z) {
            return Err(Error::InvalidMaterial {
                name: name.to_string(),
                reason: "isotopes of one element must share the charge number".to_string(),
            });
        }
        let total: f64 = isotopes.iter().map(|(_, f)| f).sum();
        if (total - 1.0).abs() > 1e-6 {
            return Err(Error::InvalidMaterial {
                name: name.to_string(),
                reason: format!("isotope abundances sum to {}, expected 1", total),
            });
        }
        let molar_mass: f64 = isotopes
            .iter()
            .map(|(iso, f)| f * iso.molar_mass)
            .sum();
        Ok(Element {
            name: name.to_string(),
            symbol: symbol.to_string(),
            z,
            molar_mass,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn z(&self) -> u32 {
        self.z
    }

    /// g/mole
    pub fn molar_mass(&self) -> f64 {
        self.molar_mass
    }
}

/// How an element enters a material: a per-molecule atom count (chemical
/// formula style) or a mass fraction. One material uses one style only.
#[derive(Debug, Clone, Copy)]
pub enum Composition {
    Atoms(u32),
    MassFraction(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Solid,
    Liquid,
    Gas,
}

/// An immutable material record: density, composition, physical state and
/// an optional optical property table.
///
/// Densities are in g/cm³ by crate convention.
#[derive(Debug, Clone)]
pub struct Material {
    name: String,
    density: f64,
    state: State,
    components: Vec<(Element, Composition)>,
    properties: Option<PropertyTable>,
}

impl Material {
    pub fn builder(name: &str) -> MaterialBuilder {
        MaterialBuilder {
            name: name.to_string(),
            density: 0.0,
            state: State::Solid,
            components: Vec::new(),
            properties: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// g/cm³
    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn components(&self) -> &[(Element, Composition)] {
        &self.components
    }

    pub fn properties(&self) -> Option<&PropertyTable> {
        self.properties.as_ref()
    }

    /// Returns a copy of this material with the given property table
    /// attached, replacing any previous one. Registry materials come bare
    /// and get their optics attached this way.
    pub fn with_properties(mut self, properties: PropertyTable) -> Material {
        self.properties = Some(properties);
        self
    }

    /// Molar mass of one formula unit in g/mole. Only defined for
    /// atom-count compositions.
    pub fn molar_mass(&self) -> Option<f64> {
        let mut total = 0.0;
        for (element, composition) in &self.components {
            match composition {
                Composition::Atoms(n) => total += f64::from(*n) * element.molar_mass(),
                Composition::MassFraction(_) => return None,
            }
        }
        Some(total)
    }

    /// Total atom count per cm³ across all constituent elements.
    pub fn atoms_per_cm3(&self) -> f64 {
        match self.molar_mass() {
            Some(molar_mass) => {
                let molecules = self.density / molar_mass * AVOGADRO;
                let atoms_per_molecule: f64 = self
                    .components
                    .iter()
                    .map(|(_, c)| match c {
                        Composition::Atoms(n) => f64::from(*n),
                        Composition::MassFraction(_) => 0.0,
                    })
                    .sum();
                molecules * atoms_per_molecule
            }
            None => self
                .components
                .iter()
                .map(|(element, c)| match c {
                    Composition::MassFraction(w) => {
                        self.density * w / element.molar_mass() * AVOGADRO
                    }
                    Composition::Atoms(_) => 0.0,
                })
                .sum(),
        }
    }
}

pub struct MaterialBuilder {
    name: String,
    density: f64,
    state: State,
    components: Vec<(Element, Composition)>,
    properties: Option<PropertyTable>,
}

impl MaterialBuilder {
    /// Density in g/cm³.
    pub fn density(mut self, density: f64) -> MaterialBuilder {
        self.density = density;
        self
    }

    pub fn state(mut self, state: State) -> MaterialBuilder {
        self.state = state;
        self
    }

    /// Adds an element with a per-formula-unit atom count.
    pub fn element_atoms(mut self, element: Element, count: u32) -> MaterialBuilder {
        self.components.push((element, Composition::Atoms(count)));
        self
    }

    /// Adds an element with a mass fraction. Fractions must sum to 1.
    pub fn element_fraction(mut self, element: Element, fraction: f64) -> MaterialBuilder {
        self.components
            .push((element, Composition::MassFraction(fraction)));
        self
    }

    pub fn properties(mut self, properties: PropertyTable) -> MaterialBuilder {
        self.properties = Some(properties);
        self
    }

    pub fn build(self) -> Result<Material> {
        let invalid = |reason: String| Error::InvalidMaterial {
            name: self.name.clone(),
            reason,
        };

        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(invalid(format!(
                "density must be positive, got {} g/cm3",
                self.density
            )));
        }
        if self.components.is_empty() {
            return Err(invalid("no constituent elements given".to_string()));
        }

        let mut atom_styled = 0usize;
        let mut fraction_sum = 0.0;
        for (element, composition) in &self.components {
            match composition {
                Composition::Atoms(n) => {
                    if *n == 0 {
                        return Err(invalid(format!(
                            "element {} has a zero atom count",
                            element.symbol()
                        )));
                    }
                    atom_styled += 1;
                }
                Composition::MassFraction(w) => {
                    if !(w.is_finite() && *w > 0.0 && *w <= 1.0) {
                        return Err(invalid(format!(
                            "element {} has mass fraction {}, expected (0, 1]",
                            element.symbol(),
                            w
                        )));
                    }
                    fraction_sum += w;
                }
            }
        }
        if atom_styled != 0 && atom_styled != self.components.len() {
            return Err(invalid(
                "composition mixes atom counts and mass fractions".to_string(),
            ));
        }
        if atom_styled == 0 && (fraction_sum - 1.0).abs() > 1e-6 {
            return Err(invalid(format!(
                "mass fractions sum to {}, expected 1",
                fraction_sum
            )));
        }

        Ok(Material {
            name: self.name,
            density: self.density,
            state: self.state,
            components: self.components,
            properties: self.properties,
        })
    }
}

use crate::error::{Error, Result};

/// Energy-dependent optical properties carried by a material or surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    /// Refractive index over the photon energy grid.
    RefractiveIndex,
    /// Photon absorption length, in mm.
    AbsorptionLength,
    /// Relative emission intensity of the fast scintillation component.
    FastComponent,
    /// Relative emission intensity of the slow scintillation component.
    SlowComponent,
    /// Boundary reflectivity (surfaces only).
    Reflectivity,
    /// Boundary detection efficiency (surfaces only).
    Efficiency,
}

/// Scalar scintillation constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstProperty {
    /// Photons emitted per unit deposited energy, in 1/MeV.
    ScintillationYield,
    /// Width scale of the statistical yield fluctuation.
    ResolutionScale,
    /// Decay time of the fast component, in ns.
    FastTimeConstant,
    /// Decay time of the slow component, in ns.
    SlowTimeConstant,
    /// Fraction of the yield going into the fast component.
    YieldRatio,
}

/// One property sampled on an ascending photon-energy grid.
///
/// The grid and the value array always have the same length; this is
/// enforced on construction and can be relied on downstream.
#[derive(Debug, Clone)]
pub struct EnergySeries {
    energies: Vec<f64>,
    values: Vec<f64>,
}

impl EnergySeries {
    fn new(key: Property, energies: &[f64], values: &[f64]) -> Result<EnergySeries> {
        if energies.len() != values.len() {
            return Err(Error::InvalidProperty(format!(
                "{:?}: energy grid has {} entries but {} values were given",
                key,
                energies.len(),
                values.len()
            )));
        }
        if energies.len() < 2 {
            return Err(Error::InvalidProperty(format!(
                "{:?}: at least two grid points required, got {}",
                key,
                energies.len()
            )));
        }
        if energies.windows(2).any(|w| w[1] <= w[0]) {
            return Err(Error::InvalidProperty(format!(
                "{:?}: energy grid must be strictly ascending",
                key
            )));
        }
        Ok(EnergySeries {
            energies: energies.to_vec(),
            values: values.to_vec(),
        })
    }

    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn min_energy(&self) -> f64 {
        self.energies[0]
    }

    pub fn max_energy(&self) -> f64 {
        self.energies[self.energies.len() - 1]
    }

    /// Linearly interpolated value at `energy`, clamped to the grid ends.
    pub fn value_at(&self, energy: f64) -> f64 {
        if energy <= self.min_energy() {
            return self.values[0];
        }
        if energy >= self.max_energy() {
            return self.values[self.values.len() - 1];
        }
        // max_energy check above guarantees an upper neighbour exists
        let hi = self
            .energies
            .iter()
            .position(|&e| e >= energy)
            .unwrap_or(self.energies.len() - 1);
        let lo = hi - 1;
        let t = (energy - self.energies[lo]) / (self.energies[hi] - self.energies[lo]);
        self.values[lo] + t * (self.values[hi] - self.values[lo])
    }
}

/// Optical property table: energy series plus scalar constants.
#[derive(Debug, Clone, Default)]
pub struct PropertyTable {
    series: Vec<(Property, EnergySeries)>,
    constants: Vec<(ConstProperty, f64)>,
}

impl PropertyTable {
    pub fn builder() -> PropertyTableBuilder {
        PropertyTableBuilder {
            series: Vec::new(),
            constants: Vec::new(),
        }
    }

    pub fn series(&self, key: Property) -> Option<&EnergySeries> {
        self.series.iter().find(|(k, _)| *k == key).map(|(_, s)| s)
    }

    pub fn constant(&self, key: ConstProperty) -> Option<f64> {
        self.constants
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    pub fn series_keys(&self) -> impl Iterator<Item = Property> + '_ {
        self.series.iter().map(|(k, _)| *k)
    }
}

/// Collects raw grids and validates them all in `build`.
pub struct PropertyTableBuilder {
    series: Vec<(Property, Vec<f64>, Vec<f64>)>,
    constants: Vec<(ConstProperty, f64)>,
}

impl PropertyTableBuilder {
    pub fn series(mut self, key: Property, energies: &[f64], values: &[f64]) -> Self {
        self.series
            .push((key, energies.to_vec(), values.to_vec()));
        self
    }

    pub fn constant(mut self, key: ConstProperty, value: f64) -> Self {
        self.constants.push((key, value));
        self
    }

    pub fn build(self) -> Result<PropertyTable> {
        let mut series = Vec::with_capacity(self.series.len());
        for (key, energies, values) in self.series {
            if series.iter().any(|(k, _)| *k == key) {
                return Err(Error::InvalidProperty(format!("{:?} given twice", key)));
            }
            series.push((key, EnergySeries::new(key, &energies, &values)?));
        }
        for (key, value) in &self.constants {
            if !value.is_finite() {
                return Err(Error::InvalidProperty(format!(
                    "{:?} must be finite, got {}",
                    key, value
                )));
            }
        }
        Ok(PropertyTable {
            series,
            constants: self.constants,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::units::EV;

    #[test]
    fn rejects_mismatched_grid_lengths() {
        let result = PropertyTable::builder()
            .series(
                Property::RefractiveIndex,
                &[1.5 * EV, 10.0 * EV],
                &[1.0003],
            )
            .build();
        assert!(matches!(result, Err(Error::InvalidProperty(_))));
    }

    #[test]
    fn rejects_unordered_energy_grid() {
        let result = PropertyTable::builder()
            .series(
                Property::AbsorptionLength,
                &[10.0 * EV, 1.5 * EV],
                &[1.0, 1.0],
            )
            .build();
        assert!(matches!(result, Err(Error::InvalidProperty(_))));
    }

    #[test]
    fn rejects_single_point_grid() {
        let result = PropertyTable::builder()
            .series(Property::Reflectivity, &[2.0 * EV], &[0.5])
            .build();
        assert!(matches!(result, Err(Error::InvalidProperty(_))));
    }

    #[test]
    fn rejects_duplicate_key() {
        let result = PropertyTable::builder()
            .series(Property::Reflectivity, &[2.0 * EV, 3.0 * EV], &[0.5, 0.5])
            .series(Property::Reflectivity, &[2.0 * EV, 3.0 * EV], &[0.4, 0.4])
            .build();
        assert!(matches!(result, Err(Error::InvalidProperty(_))));
    }

    #[test]
    fn grids_and_values_always_match_in_length() {
        let table = PropertyTable::builder()
            .series(
                Property::RefractiveIndex,
                &[1.5 * EV, 5.0 * EV, 10.0 * EV],
                &[1.58, 1.58, 1.58],
            )
            .series(Property::AbsorptionLength, &[1.5 * EV, 10.0 * EV], &[1.0, 1.0])
            .build()
            .unwrap();

        for key in table.series_keys().collect::<Vec<_>>() {
            let s = table.series(key).unwrap();
            assert_eq!(s.energies().len(), s.values().len());
        }
    }

    #[test]
    fn interpolates_and_clamps() {
        let table = PropertyTable::builder()
            .series(Property::FastComponent, &[2.0, 4.0, 6.0], &[0.0, 1.0, 0.0])
            .build()
            .unwrap();
        let s = table.series(Property::FastComponent).unwrap();

        assert_eq!(s.value_at(3.0), 0.5);
        assert_eq!(s.value_at(4.0), 1.0);
        // outside the grid the end values hold
        assert_eq!(s.value_at(1.0), 0.0);
        assert_eq!(s.value_at(9.0), 0.0);
    }

    #[test]
    fn constants_are_retrievable() {
        let table = PropertyTable::builder()
            .constant(ConstProperty::ScintillationYield, 10000.0)
            .constant(ConstProperty::FastTimeConstant, 2.1)
            .build()
            .unwrap();
        assert_eq!(table.constant(ConstProperty::ScintillationYield), Some(10000.0));
        assert_eq!(table.constant(ConstProperty::SlowTimeConstant), None);
    }
}

use crate::error::{Error, Result};
use crate::geometry::{Rotation, Vec3};
use crate::sampling::{CylinderVolume, UnitSphere};
use crate::units::MEV;
use cgmath::{InnerSpace, SquareMatrix};
use rand::Rng;
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Species {
    Gamma,
    Electron,
    Neutron,
}

/// Spatial distribution of primary vertices.
#[derive(Debug, Clone)]
pub enum SpatialDist {
    Point(Vec3),
    /// Volume-uniform cylinder. The local cylinder axis is z; `rotation`
    /// maps it into the world frame.
    Cylinder {
        center: Vec3,
        radius: f64,
        half_z: f64,
        rotation: Rotation,
    },
}

#[derive(Debug, Clone)]
pub enum AngularDist {
    Isotropic,
    /// Every primary leaves in this (unit) direction.
    Directed(Vec3),
}

#[derive(Debug, Clone, Copy)]
pub enum EnergyDist {
    /// Monoenergetic line, in MeV.
    Mono(f64),
}

/// The initial particle state injected into one simulated event.
#[derive(Debug, Clone)]
pub struct PrimaryVertex {
    pub species: Species,
    pub position: Vec3,
    pub direction: Vec3,
    pub energy: f64,
}

/// General particle source descriptor. Configured once at startup and
/// sampled once per event; sampling never mutates the descriptor.
pub struct ParticleSource {
    species: Species,
    spatial: SpatialDist,
    angular: AngularDist,
    energy: EnergyDist,
}

impl ParticleSource {
    pub fn species(&self) -> Species {
        self.species
    }

    pub fn spatial(&self) -> &SpatialDist {
        &self.spatial
    }

    pub fn angular(&self) -> &AngularDist {
        &self.angular
    }

    pub fn energy(&self) -> &EnergyDist {
        &self.energy
    }

    /// Draws one primary vertex.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PrimaryVertex {
        let position = match &self.spatial {
            SpatialDist::Point(p) => *p,
            SpatialDist::Cylinder {
                center,
                radius,
                half_z,
                rotation,
            } => {
                let local = CylinderVolume {
                    rmin: 0.0,
                    rmax: *radius,
                    half_z: *half_z,
                }
                .uniform(rng);
                center + rotation * local
            }
        };

        let direction = match &self.angular {
            AngularDist::Isotropic => UnitSphere.uniform(rng),
            AngularDist::Directed(d) => *d,
        };

        let EnergyDist::Mono(energy) = self.energy;

        PrimaryVertex {
            species: self.species,
            position,
            direction,
            energy,
        }
    }

    /// Draws `count` primaries in parallel, one per event.
    pub fn sample_batch(&self, count: usize) -> Vec<PrimaryVertex> {
        (0..count)
            .into_par_iter()
            .map_init(rand::thread_rng, |rng, _| self.sample(rng))
            .collect()
    }
}

/// Builder for the source descriptor. Defaults to an isotropic 1 MeV gamma
/// point source at the origin.
pub struct SourceBuilder {
    source: ParticleSource,
}

impl SourceBuilder {
    pub fn new() -> SourceBuilder {
        SourceBuilder {
            source: ParticleSource {
                species: Species::Gamma,
                spatial: SpatialDist::Point(Vec3::new(0.0, 0.0, 0.0)),
                angular: AngularDist::Isotropic,
                energy: EnergyDist::Mono(1.0 * MEV),
            },
        }
    }

    pub fn particle(mut self, species: Species) -> SourceBuilder {
        self.source.species = species;
        self
    }

    pub fn point_shaped(mut self, position: Vec3) -> SourceBuilder {
        self.source.spatial = SpatialDist::Point(position);
        self
    }

    /// Cylinder volume with its axis along world z.
    pub fn cylinder_shaped(mut self, center: Vec3, radius: f64, half_z: f64) -> SourceBuilder {
        self.source.spatial = SpatialDist::Cylinder {
            center,
            radius,
            half_z,
            rotation: Rotation::identity(),
        };
        self
    }

    /// Reorients a previously configured cylinder shape.
    pub fn rotated(mut self, rotation: Rotation) -> SourceBuilder {
        if let SpatialDist::Cylinder {
            rotation: ref mut r,
            ..
        } = self.source.spatial
        {
            *r = rotation;
        }
        self
    }

    pub fn isotropic(mut self) -> SourceBuilder {
        self.source.angular = AngularDist::Isotropic;
        self
    }

    pub fn directed(mut self, direction: Vec3) -> SourceBuilder {
        self.source.angular = AngularDist::Directed(direction);
        self
    }

    /// Monoenergetic line, in MeV.
    pub fn mono_energy(mut self, energy: f64) -> SourceBuilder {
        self.source.energy = EnergyDist::Mono(energy);
        self
    }

    pub fn build(self) -> Result<ParticleSource> {
        let mut source = self.source;

        if let SpatialDist::Cylinder { radius, half_z, .. } = &source.spatial {
            if !(*radius > 0.0 && *half_z > 0.0) {
                return Err(Error::InvalidSource(format!(
                    "cylinder shape needs positive radius and half-length, got {} and {}",
                    radius, half_z
                )));
            }
        }

        if let AngularDist::Directed(ref mut d) = source.angular {
            let magnitude = d.magnitude();
            if magnitude < 1e-12 {
                return Err(Error::InvalidSource(
                    "emission direction must be non-zero".to_string(),
                ));
            }
            *d /= magnitude;
        }

        let EnergyDist::Mono(energy) = source.energy;
        if !(energy.is_finite() && energy > 0.0) {
            return Err(Error::InvalidSource(format!(
                "energy must be positive, got {} MeV",
                energy
            )));
        }

        Ok(source)
    }
}

impl Default for SourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::units::CM;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn cylinder_source_samples_stay_inside_the_bound() {
        let center = Vec3::new(0.0, 5.5 * CM, 0.0);
        let source = SourceBuilder::new()
            .particle(Species::Gamma)
            .cylinder_shaped(center, 1.5 * CM, 2.0 * CM)
            .isotropic()
            .mono_energy(1.25 * MEV)
            .build()
            .unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..2000 {
            let vertex = source.sample(&mut rng);
            let d = vertex.position - center;
            let r = (d.x * d.x + d.y * d.y).sqrt();
            assert!(r <= 1.5 * CM);
            assert!(d.z.abs() <= 2.0 * CM);
            assert_eq!(vertex.energy, 1.25 * MEV);
            assert_eq!(vertex.species, Species::Gamma);
            assert!((vertex.direction.magnitude() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn directed_sources_emit_normalized_directions() {
        let source = SourceBuilder::new()
            .directed(Vec3::new(0.0, 0.0, -2.0))
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let vertex = source.sample(&mut rng);
        assert!((vertex.direction - Vec3::new(0.0, 0.0, -1.0)).magnitude() < 1e-12);
    }

    #[test]
    fn rejects_degenerate_shapes_and_energies() {
        assert!(SourceBuilder::new()
            .cylinder_shaped(Vec3::new(0.0, 0.0, 0.0), 0.0, 1.0)
            .build()
            .is_err());
        assert!(SourceBuilder::new()
            .directed(Vec3::new(0.0, 0.0, 0.0))
            .build()
            .is_err());
        assert!(SourceBuilder::new().mono_energy(-1.0).build().is_err());
    }

    #[test]
    fn batch_sampling_yields_one_vertex_per_event() {
        let source = SourceBuilder::new().build().unwrap();
        let batch = source.sample_batch(128);
        assert_eq!(batch.len(), 128);
    }
}

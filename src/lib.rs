//! Configuration layer for a gamma-ray scintillator detector experiment.
//!
//! Models the setup a Monte Carlo transport engine consumes: materials with
//! energy-dependent optical property tables, a nested volume geometry with
//! optical boundary surfaces, and a general particle source sampled once
//! per simulated event. Transport, optical-photon tracking and the event
//! loop itself are the engine's business, not this crate's.

mod error;
mod geometry;
mod material;
pub mod nist;
mod property;
mod rig;
mod sampling;
mod source;
mod surface;
pub mod units;

pub use error::{Error, Result};
pub use geometry::{
    rotation_about_x, Aabb, BorderSurface, Geometry, GeometryBuilder, LogicalVolume,
    PlacedVolume, Rotation, Solid, Vec3, VolumeId,
};
pub use material::{
    Composition, Element, Isotope, Material, MaterialBuilder, MaterialHandle, State,
};
pub use property::{ConstProperty, EnergySeries, Property, PropertyTable, PropertyTableBuilder};
pub use rig::{Experiment, MaterialSet, Preset};
pub use sampling::{CylinderVolume, UnitSphere};
pub use source::{
    AngularDist, EnergyDist, ParticleSource, PrimaryVertex, SourceBuilder, SpatialDist, Species,
};
pub use surface::{OpticalSurface, SurfaceFinish, SurfaceHandle, SurfaceModel, SurfaceType};

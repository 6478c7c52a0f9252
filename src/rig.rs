//! The experiment presets: the fixed material set, the detector geometries
//! and the gamma source configuration.
//!
//! Two divergent construction variants circulated for this rig; they are
//! kept as explicit presets instead of guessing a canonical one.

use crate::error::Result;
use crate::geometry::{
    rotation_about_x, Geometry, GeometryBuilder, LogicalVolume, Rotation, Solid, Vec3, VolumeId,
};
use crate::material::{Element, Isotope, Material, MaterialHandle, State};
use crate::nist;
use crate::property::{ConstProperty, Property, PropertyTable};
use crate::source::{ParticleSource, PrimaryVertex, SourceBuilder, Species};
use crate::surface::{OpticalSurface, SurfaceFinish, SurfaceHandle, SurfaceModel, SurfaceType};
use crate::units::{AVOGADRO, CM, DEG, EV, M, MEV, NS};
use cgmath::SquareMatrix;
use log::info;
use rand::Rng;
use std::sync::Arc;

/// Alternate construction variants of the rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// EJ-200 scintillator cube with an annular air source holder above it
    /// and a ⌀2.54 cm detector tube below.
    Ej200RingSource,
    /// EJ-276 scintillator cube with a solid Co-60 metal source disc and a
    /// smaller detector tube.
    Ej276DiscSource,
}

/// The fixed set of materials and the scintillator-to-air optical surface,
/// built once before any geometry.
pub struct MaterialSet {
    pub air: MaterialHandle,
    pub water: MaterialHandle,
    pub aluminum: MaterialHandle,
    pub co60: MaterialHandle,
    pub ej200: MaterialHandle,
    pub ej276: MaterialHandle,
    pub stick_to_air: SurfaceHandle,
}

impl MaterialSet {
    pub fn build() -> Result<MaterialSet> {
        let air = nist::find_material("G4_AIR")?.with_properties(
            PropertyTable::builder()
                .series(
                    Property::RefractiveIndex,
                    &[1.5 * EV, 10.0 * EV],
                    &[1.0003, 1.0003],
                )
                .series(
                    Property::AbsorptionLength,
                    &[1.5 * EV, 10.0 * EV],
                    &[1000.0 * M, 1000.0 * M],
                )
                .build()?,
        );
        let water = nist::find_material("G4_WATER")?;
        let aluminum = nist::find_material("G4_Al")?;

        let co60 = co60_metal()?;
        let ej200 = ej200()?;
        let ej276 = ej276()?;

        info!(
            "EJ200: density {} g/cm3, {:.3e} atoms per cm3",
            ej200.density(),
            ej200.atoms_per_cm3()
        );
        info!(
            "EJ276: density {:.4} g/cm3, {:.3e} atoms per cm3",
            ej276.density(),
            ej276.atoms_per_cm3()
        );

        Ok(MaterialSet {
            air: Arc::new(air),
            water: Arc::new(water),
            aluminum: Arc::new(aluminum),
            co60: Arc::new(co60),
            ej200: Arc::new(ej200),
            ej276: Arc::new(ej276),
            stick_to_air: Arc::new(stick_to_air()?),
        })
    }
}

/// Metallic cobalt fully enriched in ⁶⁰Co, the source nuclide.
fn co60_metal() -> Result<Material> {
    let iso_co60 = Isotope::new("Co60", 27, 60, 59.933817);
    let enriched = Element::from_isotopes("EnrichedCo60", "Co*", &[(iso_co60, 1.0)])?;
    Material::builder("Co60_Metal")
        .density(8.9)
        .state(State::Solid)
        .element_fraction(enriched, 1.0)
        .build()
}

/// EJ-200 plastic scintillator, C₁₀H₁₁ at 1.023 g/cm³.
fn ej200() -> Result<Material> {
    let hydrogen = nist::find_element("H")?;
    let carbon = nist::find_element("C")?;

    // 0.25 eV grid from 2.00 eV to 9.75 eV
    let energies: Vec<f64> = (0..32).map(|i| (2.0 + 0.25 * i as f64) * EV).collect();
    let emission = [
        0.00, 0.01, 0.05, 0.12, 0.20, 0.28, //
        0.35, 0.42, 0.48, 0.55, 0.62, 0.68, //
        0.75, 0.82, 0.88, 0.95, 1.00, 0.95, //
        0.88, 0.80, 0.70, 0.60, 0.50, 0.40, //
        0.30, 0.20, 0.10, 0.05, 0.01, 0.00, //
        0.00, 0.00,
    ];

    let table = PropertyTable::builder()
        .series(Property::RefractiveIndex, &energies, &vec![1.58; 32])
        .series(Property::AbsorptionLength, &energies, &vec![10.0 * M; 32])
        .series(Property::FastComponent, &energies, &emission)
        .constant(ConstProperty::ScintillationYield, 10000.0 / MEV)
        .constant(ConstProperty::ResolutionScale, 1.0)
        .constant(ConstProperty::FastTimeConstant, 2.1 * NS)
        .constant(ConstProperty::YieldRatio, 1.0)
        .build()?;

    Material::builder("EJ200")
        .density(1.023)
        .state(State::Solid)
        .element_atoms(carbon, 10)
        .element_atoms(hydrogen, 11)
        .properties(table)
        .build()
}

/// EJ-276 plastic scintillator. The density is derived from the datasheet
/// H and C number densities rather than quoted directly.
fn ej276() -> Result<Material> {
    let hydrogen = nist::find_element("H")?;
    let carbon = nist::find_element("C")?;

    // 1/cm³
    let h_number_density = 4.647e22;
    let c_number_density = 4.944e22;

    let h_mass_density = h_number_density / AVOGADRO * hydrogen.molar_mass();
    let c_mass_density = c_number_density / AVOGADRO * carbon.molar_mass();
    let density = h_mass_density + c_mass_density;

    let energies: Vec<f64> = [
        1.77, 1.96, 2.07, 2.17, 2.28, //
        2.38, 2.48, 2.58, 2.76, 2.88, //
        3.00, 3.10, 3.26, 3.44, 3.54,
    ]
    .iter()
    .map(|e| e * EV)
    .collect();
    // fast component dominates the neutron response, slow the gamma response
    let fast = [
        0.01, 0.15, 0.40, 0.75, 0.90, //
        1.00, 0.95, 0.80, 0.60, 0.30, //
        0.10, 0.05, 0.01, 0.00, 0.00,
    ];
    let slow = [
        0.00, 0.05, 0.20, 0.45, 0.70, //
        0.85, 0.95, 1.00, 0.90, 0.75, //
        0.50, 0.30, 0.10, 0.05, 0.00,
    ];

    let table = PropertyTable::builder()
        .series(Property::RefractiveIndex, &energies, &vec![1.58; 15])
        .series(Property::AbsorptionLength, &energies, &vec![3.0 * M; 15])
        .series(Property::FastComponent, &energies, &fast)
        .series(Property::SlowComponent, &energies, &slow)
        .constant(ConstProperty::ScintillationYield, 8000.0 / MEV)
        .constant(ConstProperty::ResolutionScale, 1.0)
        .constant(ConstProperty::FastTimeConstant, 3.2 * NS)
        .constant(ConstProperty::SlowTimeConstant, 42.0 * NS)
        .constant(ConstProperty::YieldRatio, 0.5)
        .build()?;

    Material::builder("EJ276")
        .density(density)
        .state(State::Solid)
        .element_fraction(hydrogen, h_mass_density / density)
        .element_fraction(carbon, c_mass_density / density)
        .properties(table)
        .build()
}

/// Boundary between the scintillator faces and the surrounding air.
fn stick_to_air() -> Result<OpticalSurface> {
    let table = PropertyTable::builder()
        .series(Property::Reflectivity, &[2.0 * EV, 9.75 * EV], &[0.5, 0.5])
        .series(Property::Efficiency, &[2.0 * EV, 9.75 * EV], &[0.5, 0.5])
        .build()?;
    Ok(OpticalSurface::new(
        "StickAir",
        SurfaceType::DielectricDielectric,
        SurfaceFinish::Polished,
        SurfaceModel::Glisur,
        table,
    ))
}

/// A built experiment: materials, placed volumes and the primary source.
/// `world` and `generate_primary` are the two entry points the enclosing
/// run loop consumes.
pub struct Experiment {
    pub materials: MaterialSet,
    pub geometry: Geometry,
    pub source: ParticleSource,
}

impl Experiment {
    /// Builds materials first, then the preset geometry consuming the
    /// material handles, then the source descriptor.
    pub fn build(preset: Preset) -> Result<Experiment> {
        let materials = MaterialSet::build()?;
        let (geometry, source) = match preset {
            Preset::Ej200RingSource => (ring_geometry(&materials)?, ring_source()?),
            Preset::Ej276DiscSource => (disc_geometry(&materials)?, disc_source()?),
        };
        info!(
            "{:?}: {} volumes, {} border surfaces",
            preset,
            geometry.len(),
            geometry.border_surfaces().len()
        );
        Ok(Experiment {
            materials,
            geometry,
            source,
        })
    }

    /// The root volume, handed to the run manager once at initialization.
    pub fn world(&self) -> VolumeId {
        self.geometry.world()
    }

    /// Draws the primary vertex for one event.
    pub fn generate_primary<R: Rng + ?Sized>(&self, rng: &mut R) -> PrimaryVertex {
        self.source.sample(rng)
    }
}

fn ring_geometry(materials: &MaterialSet) -> Result<Geometry> {
    let check_overlaps = true;
    let world_size = 20.0 * CM;
    let scintillator_size = 6.0 * CM;

    let mut builder = GeometryBuilder::new();
    let world = builder.place_world(LogicalVolume::new(
        Solid::cube(world_size),
        materials.aluminum.clone(),
        "World",
    ))?;

    let scintillator = builder.place(
        LogicalVolume::new(
            Solid::cube(scintillator_size),
            materials.ej200.clone(),
            "Scintillator",
        ),
        Rotation::identity(),
        Vec3::new(0.0, 0.0, 0.0),
        world,
        0,
        check_overlaps,
    )?;
    builder.add_border_surface(
        "ScintillatorWorldSurface",
        scintillator,
        world,
        materials.stick_to_air.clone(),
    )?;

    // tubes are built along z and tipped over to stand on the y axis
    let upright = rotation_about_x(90.0 * DEG);

    let source_half_length = 0.2 * CM;
    builder.place(
        LogicalVolume::new(
            Solid::tube(0.5 * 2.5 * CM, 0.5 * 3.5 * CM, source_half_length),
            materials.air.clone(),
            "SourceCylinder",
        ),
        upright,
        Vec3::new(0.0, source_half_length + 0.5 * scintillator_size, 0.0),
        world,
        0,
        check_overlaps,
    )?;

    let detector = builder.place(
        LogicalVolume::new(
            Solid::tube(0.0, 2.54 * CM, 1.0 * CM),
            materials.air.clone(),
            "Detector",
        ),
        upright,
        Vec3::new(0.0, -0.5 * scintillator_size - 1.1 * CM, 0.0),
        world,
        0,
        check_overlaps,
    )?;
    builder.add_border_surface(
        "DetectorWorldSurface",
        detector,
        world,
        materials.stick_to_air.clone(),
    )?;

    builder.build()
}

/// GPS-style gamma source for the ring preset: the activity fills a
/// cylinder volume above the scintillator, emitting isotropically at the
/// 1.25 MeV mean Co-60 line energy.
fn ring_source() -> Result<ParticleSource> {
    SourceBuilder::new()
        .particle(Species::Gamma)
        .cylinder_shaped(Vec3::new(0.0, 5.5 * CM, 0.0), 1.5 * CM, 2.0 * CM)
        .isotropic()
        .mono_energy(1.25 * MEV)
        .build()
}

fn disc_geometry(materials: &MaterialSet) -> Result<Geometry> {
    let check_overlaps = true;
    let world_size = 20.0 * CM;
    let scintillator_size = 6.0 * CM;

    let mut builder = GeometryBuilder::new();
    let world = builder.place_world(LogicalVolume::new(
        Solid::cube(world_size),
        materials.aluminum.clone(),
        "World",
    ))?;

    let scintillator = builder.place(
        LogicalVolume::new(
            Solid::cube(scintillator_size),
            materials.ej276.clone(),
            "Scintillator",
        ),
        Rotation::identity(),
        Vec3::new(0.0, 0.0, 0.0),
        world,
        0,
        check_overlaps,
    )?;
    builder.add_border_surface(
        "ScintillatorWorldSurface",
        scintillator,
        world,
        materials.stick_to_air.clone(),
    )?;

    let upright = rotation_about_x(90.0 * DEG);

    // solid Co-60 metal disc resting right above the scintillator face
    let disc_half_length = 0.1 * CM;
    builder.place(
        LogicalVolume::new(
            Solid::tube(0.0, 1.25 * CM, disc_half_length),
            materials.co60.clone(),
            "SourceDisc",
        ),
        upright,
        Vec3::new(0.0, disc_half_length + 0.5 * scintillator_size, 0.0),
        world,
        0,
        check_overlaps,
    )?;

    let detector = builder.place(
        LogicalVolume::new(
            Solid::tube(0.0, 2.3 * CM, 1.0 * CM),
            materials.air.clone(),
            "Detector",
        ),
        upright,
        Vec3::new(0.0, -0.5 * scintillator_size - 1.1 * CM, 0.0),
        world,
        0,
        check_overlaps,
    )?;
    builder.add_border_surface(
        "DetectorWorldSurface",
        detector,
        world,
        materials.stick_to_air.clone(),
    )?;

    builder.build()
}

/// Source sampling volume matching the Co-60 disc of the disc preset.
fn disc_source() -> Result<ParticleSource> {
    SourceBuilder::new()
        .particle(Species::Gamma)
        .cylinder_shaped(Vec3::new(0.0, 3.1 * CM, 0.0), 1.25 * CM, 0.1 * CM)
        .rotated(rotation_about_x(90.0 * DEG))
        .isotropic()
        .mono_energy(1.25 * MEV)
        .build()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ej200_matches_the_datasheet_literals() {
        let materials = MaterialSet::build().unwrap();
        assert_eq!(materials.ej200.density(), 1.023);
        assert!(materials.ej200.atoms_per_cm3() > 0.0);

        let table = materials.ej200.properties().unwrap();
        let emission = table.series(Property::FastComponent).unwrap();
        assert_eq!(emission.len(), 32);
        assert_eq!(emission.energies().len(), emission.values().len());
        assert_eq!(
            table.constant(ConstProperty::ScintillationYield),
            Some(10000.0)
        );
        assert_eq!(table.constant(ConstProperty::FastTimeConstant), Some(2.1 * NS));
    }

    #[test]
    fn ej276_density_is_the_sum_of_elemental_contributions() {
        let materials = MaterialSet::build().unwrap();
        let hydrogen = nist::find_element("H").unwrap();
        let carbon = nist::find_element("C").unwrap();
        let expected = 4.647e22 / AVOGADRO * hydrogen.molar_mass()
            + 4.944e22 / AVOGADRO * carbon.molar_mass();
        assert!((materials.ej276.density() - expected).abs() < 1e-12);

        let table = materials.ej276.properties().unwrap();
        assert!(table.series(Property::SlowComponent).is_some());
        assert_eq!(table.constant(ConstProperty::YieldRatio), Some(0.5));
    }

    #[test]
    fn co60_is_fully_enriched_metal() {
        let materials = MaterialSet::build().unwrap();
        assert_eq!(materials.co60.density(), 8.9);
        let (element, _) = &materials.co60.components()[0];
        assert_eq!(element.z(), 27);
        assert!((element.molar_mass() - 59.933817).abs() < 1e-12);
    }

    #[test]
    fn stick_to_air_surface_is_half_reflective() {
        let materials = MaterialSet::build().unwrap();
        let reflectivity = materials
            .stick_to_air
            .properties()
            .series(Property::Reflectivity)
            .unwrap();
        assert_eq!(reflectivity.value_at(5.0 * EV), 0.5);
    }

    #[test]
    fn ring_preset_builds_the_documented_tree() {
        let experiment = Experiment::build(Preset::Ej200RingSource).unwrap();
        let geometry = &experiment.geometry;

        assert_eq!(geometry.len(), 4);
        assert_eq!(geometry.border_surfaces().len(), 2);

        let world = geometry.world();
        assert!(geometry.volume(world).mother.is_none());
        assert_eq!(geometry.volume(world).logical.material.name(), "G4_Al");

        let scintillator = geometry.find("Scintillator").unwrap();
        assert_eq!(
            geometry.volume(scintillator).logical.material.name(),
            "EJ200"
        );

        for (id, _) in geometry.volumes() {
            assert_eq!(*geometry.parent_chain(id).last().unwrap(), world);
        }
    }

    #[test]
    fn disc_preset_swaps_scintillator_and_source() {
        let experiment = Experiment::build(Preset::Ej276DiscSource).unwrap();
        let geometry = &experiment.geometry;

        let scintillator = geometry.find("Scintillator").unwrap();
        assert_eq!(
            geometry.volume(scintillator).logical.material.name(),
            "EJ276"
        );
        let disc = geometry.find("SourceDisc").unwrap();
        assert_eq!(
            geometry.volume(disc).logical.material.name(),
            "Co60_Metal"
        );
        assert!(geometry.find("SourceCylinder").is_none());
    }
}

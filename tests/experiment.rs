//! Full-preset construction and per-event sampling.

use approx::assert_relative_eq;
use cgmath::InnerSpace;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scintirig::units::{CM, MEV};
use scintirig::{Experiment, Preset, Property, Species};

#[test]
fn ring_preset_constructs_and_emits_primaries() {
    let experiment = Experiment::build(Preset::Ej200RingSource).unwrap();

    // one root, every chain terminates there
    let world = experiment.world();
    let geometry = &experiment.geometry;
    assert!(geometry.volume(world).mother.is_none());
    let roots = geometry
        .volumes()
        .filter(|(_, v)| v.mother.is_none())
        .count();
    assert_eq!(roots, 1);
    for (id, _) in geometry.volumes() {
        assert_eq!(*geometry.parent_chain(id).last().unwrap(), world);
    }

    // every property table in the material set is well-formed
    for material in [
        &experiment.materials.air,
        &experiment.materials.ej200,
        &experiment.materials.ej276,
    ] {
        let table = material.properties().unwrap();
        for key in table.series_keys().collect::<Vec<_>>() {
            let series = table.series(key).unwrap();
            assert_eq!(series.energies().len(), series.values().len());
            assert!(series
                .energies()
                .windows(2)
                .all(|pair| pair[0] < pair[1]));
        }
    }

    // the source cylinder bound and the fixed line energy hold per event
    let center_y = 5.5 * CM;
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..5000 {
        let vertex = experiment.generate_primary(&mut rng);
        assert_eq!(vertex.species, Species::Gamma);
        assert_eq!(vertex.energy, 1.25 * MEV);
        assert_relative_eq!(vertex.direction.magnitude(), 1.0, epsilon = 1e-12);

        let dy = vertex.position.y - center_y;
        let radial = (vertex.position.x * vertex.position.x + dy * dy).sqrt();
        assert!(radial <= 1.5 * CM + 1e-9);
        assert!(vertex.position.z.abs() <= 2.0 * CM + 1e-9);
    }
}

#[test]
fn disc_preset_constructs_and_emits_from_the_disc() {
    let experiment = Experiment::build(Preset::Ej276DiscSource).unwrap();

    // the scintillator carries both emission components in this variant
    let scintillator = experiment.geometry.find("Scintillator").unwrap();
    let material = &experiment.geometry.volume(scintillator).logical.material;
    let table = material.properties().unwrap();
    assert!(table.series(Property::FastComponent).is_some());
    assert!(table.series(Property::SlowComponent).is_some());

    // the disc stands upright, so its sampling volume is thin along y
    let mut rng = StdRng::seed_from_u64(7);
    let disc_center_y = 3.1 * CM;
    for _ in 0..2000 {
        let vertex = experiment.generate_primary(&mut rng);
        assert!((vertex.position.y - disc_center_y).abs() <= 0.1 * CM + 1e-9);
        let radial =
            (vertex.position.x * vertex.position.x + vertex.position.z * vertex.position.z).sqrt();
        assert!(radial <= 1.25 * CM + 1e-9);
        assert_eq!(vertex.energy, 1.25 * MEV);
    }
}

//! Uniform samplers for the source distributions.

use crate::geometry::Vec3;
use rand::Rng;
use std::f64::consts::TAU;

/// Uniform distribution over the surface of the unit sphere, used for
/// isotropic emission directions.
pub struct UnitSphere;

impl UnitSphere {
    pub fn uniform<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let cos_theta: f64 = rng.gen_range(-1.0..=1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
        let phi: f64 = rng.gen_range(0.0..TAU);
        Vec3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
    }
}

/// Uniform distribution over the volume of a z-aligned cylinder shell.
/// `rmin` of zero gives a solid cylinder.
pub struct CylinderVolume {
    pub rmin: f64,
    pub rmax: f64,
    pub half_z: f64,
}

impl CylinderVolume {
    pub fn uniform<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        // area-uniform in radius, so sample r² linearly
        let u: f64 = rng.gen_range(0.0..=1.0);
        let r = (self.rmin * self.rmin + u * (self.rmax * self.rmax - self.rmin * self.rmin))
            .sqrt();
        let phi: f64 = rng.gen_range(0.0..TAU);
        let z = rng.gen_range(-self.half_z..=self.half_z);
        Vec3::new(r * phi.cos(), r * phi.sin(), z)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use cgmath::InnerSpace;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sphere_samples_are_unit_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = UnitSphere.uniform(&mut rng);
            assert!((v.magnitude() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn cylinder_samples_respect_the_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let shell = CylinderVolume {
            rmin: 12.5,
            rmax: 17.5,
            half_z: 2.0,
        };
        for _ in 0..1000 {
            let p = shell.uniform(&mut rng);
            let r = (p.x * p.x + p.y * p.y).sqrt();
            assert!(r >= shell.rmin && r <= shell.rmax);
            assert!(p.z.abs() <= shell.half_z);
        }
    }
}

use crate::error::{Error, Result};
use crate::material::MaterialHandle;
use crate::surface::SurfaceHandle;
use cgmath::{Matrix3, Rad, SquareMatrix, Vector3};

pub type Vec3 = Vector3<f64>;
pub type Rotation = Matrix3<f64>;

/// Rotation by `angle` radians about the x axis, as applied to placements.
pub fn rotation_about_x(angle: f64) -> Rotation {
    Matrix3::from_angle_x(Rad(angle))
}

/// Length tolerance in mm. Placements touching exactly at a face do not
/// count as overlapping.
const TOLERANCE: f64 = 1e-6;

/// Geometric primitives. Dimensions in mm, following the crate unit
/// conventions.
#[derive(Debug, Clone)]
pub enum Solid {
    /// Axis-aligned box given by its half-extents.
    Box { half: Vec3 },
    /// Cylindrical tube segment along the local z axis, with inner and
    /// outer radius, half-length and an angular cut.
    Tube {
        rmin: f64,
        rmax: f64,
        half_z: f64,
        phi_start: f64,
        phi_sweep: f64,
    },
}

impl Solid {
    pub fn cuboid(half_x: f64, half_y: f64, half_z: f64) -> Solid {
        Solid::Box {
            half: Vec3::new(half_x, half_y, half_z),
        }
    }

    pub fn cube(side: f64) -> Solid {
        Solid::cuboid(0.5 * side, 0.5 * side, 0.5 * side)
    }

    /// Full tube without an angular cut.
    pub fn tube(rmin: f64, rmax: f64, half_z: f64) -> Solid {
        Solid::Tube {
            rmin,
            rmax,
            half_z,
            phi_start: 0.0,
            phi_sweep: std::f64::consts::TAU,
        }
    }

    fn validate(&self, name: &str) -> Result<()> {
        let bad = |detail: String| {
            Err(Error::InvalidPlacement(format!(
                "solid of `{}`: {}",
                name, detail
            )))
        };
        match self {
            Solid::Box { half } => {
                if !(half.x > 0.0 && half.y > 0.0 && half.z > 0.0) {
                    return bad(format!("box half-extents must be positive, got {:?}", half));
                }
            }
            Solid::Tube {
                rmin,
                rmax,
                half_z,
                phi_sweep,
                ..
            } => {
                if !(*rmin >= 0.0 && rmax > rmin && *half_z > 0.0) {
                    return bad(format!(
                        "tube radii/half-length inconsistent: rmin {} rmax {} half_z {}",
                        rmin, rmax, half_z
                    ));
                }
                if !(*phi_sweep > 0.0 && *phi_sweep <= std::f64::consts::TAU + TOLERANCE) {
                    return bad(format!("tube sweep angle out of range: {}", phi_sweep));
                }
            }
        }
        Ok(())
    }

    /// Bounding box in the solid's own frame. The angular cut of a tube is
    /// ignored, which keeps the bound conservative.
    fn local_aabb(&self) -> Aabb {
        match self {
            Solid::Box { half } => Aabb {
                min: -*half,
                max: *half,
            },
            Solid::Tube {
                rmax, half_z, ..
            } => Aabb {
                min: Vec3::new(-rmax, -rmax, -half_z),
                max: Vec3::new(*rmax, *rmax, *half_z),
            },
        }
    }
}

/// Axis-aligned bounding box used by the overlap check.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Bound of this box after rotating and translating it, taken over the
    /// transformed corners.
    fn transformed(&self, rotation: &Rotation, translation: Vec3) -> Aabb {
        let mut min = Vec3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = -min;
        for &x in &[self.min.x, self.max.x] {
            for &y in &[self.min.y, self.max.y] {
                for &z in &[self.min.z, self.max.z] {
                    let p = rotation * Vec3::new(x, y, z) + translation;
                    min.x = min.x.min(p.x);
                    min.y = min.y.min(p.y);
                    min.z = min.z.min(p.z);
                    max.x = max.x.max(p.x);
                    max.y = max.y.max(p.y);
                    max.z = max.z.max(p.z);
                }
            }
        }
        Aabb { min, max }
    }

    fn contains(&self, other: &Aabb) -> bool {
        other.min.x >= self.min.x - TOLERANCE
            && other.min.y >= self.min.y - TOLERANCE
            && other.min.z >= self.min.z - TOLERANCE
            && other.max.x <= self.max.x + TOLERANCE
            && other.max.y <= self.max.y + TOLERANCE
            && other.max.z <= self.max.z + TOLERANCE
    }

    /// Open-interval intersection test; shared faces are not intersections.
    fn intersects(&self, other: &Aabb) -> bool {
        self.min.x + TOLERANCE < other.max.x
            && other.min.x + TOLERANCE < self.max.x
            && self.min.y + TOLERANCE < other.max.y
            && other.min.y + TOLERANCE < self.max.y
            && self.min.z + TOLERANCE < other.max.z
            && other.min.z + TOLERANCE < self.max.z
    }
}

/// Shape plus material, not yet placed anywhere.
#[derive(Debug, Clone)]
pub struct LogicalVolume {
    pub name: String,
    pub solid: Solid,
    pub material: MaterialHandle,
}

impl LogicalVolume {
    pub fn new(solid: Solid, material: MaterialHandle, name: &str) -> LogicalVolume {
        LogicalVolume {
            name: name.to_string(),
            solid,
            material,
        }
    }
}

/// Handle to a placed volume within one `Geometry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeId(usize);

/// A logical volume placed in its mother's frame.
#[derive(Debug, Clone)]
pub struct PlacedVolume {
    pub name: String,
    pub logical: LogicalVolume,
    /// Maps child-frame points into the mother frame (applied before the
    /// translation).
    pub rotation: Rotation,
    pub translation: Vec3,
    pub mother: Option<VolumeId>,
    pub copy_no: u32,
}

/// An optical surface override between two placed volumes, looked up when a
/// photon crosses from `from` into `to`.
#[derive(Debug, Clone)]
pub struct BorderSurface {
    pub name: String,
    pub from: VolumeId,
    pub to: VolumeId,
    pub surface: SurfaceHandle,
}

/// Builds placements in strict dependency order: the world first, then each
/// child against an already placed mother.
pub struct GeometryBuilder {
    volumes: Vec<PlacedVolume>,
    world: Option<VolumeId>,
    surfaces: Vec<BorderSurface>,
}

impl GeometryBuilder {
    pub fn new() -> GeometryBuilder {
        GeometryBuilder {
            volumes: Vec::new(),
            world: None,
            surfaces: Vec::new(),
        }
    }

    /// Places the root volume. There is exactly one; a second call is an
    /// error.
    pub fn place_world(&mut self, logical: LogicalVolume) -> Result<VolumeId> {
        if let Some(world) = self.world {
            return Err(Error::InvalidPlacement(format!(
                "world volume already placed as `{}`",
                self.volumes[world.0].name
            )));
        }
        logical.solid.validate(&logical.name)?;
        let id = VolumeId(self.volumes.len());
        self.volumes.push(PlacedVolume {
            name: logical.name.clone(),
            logical,
            rotation: Rotation::identity(),
            translation: Vec3::new(0.0, 0.0, 0.0),
            mother: None,
            copy_no: 0,
        });
        self.world = Some(id);
        Ok(id)
    }

    /// Places a volume inside `mother`. With `check_overlaps` set, the
    /// placement is verified to stay inside the mother's bound and clear of
    /// its siblings (conservative, via rotated bounding boxes).
    pub fn place(
        &mut self,
        logical: LogicalVolume,
        rotation: Rotation,
        translation: Vec3,
        mother: VolumeId,
        copy_no: u32,
        check_overlaps: bool,
    ) -> Result<VolumeId> {
        if mother.0 >= self.volumes.len() {
            return Err(Error::InvalidPlacement(format!(
                "mother volume of `{}` is not part of this geometry",
                logical.name
            )));
        }
        logical.solid.validate(&logical.name)?;

        if check_overlaps {
            let bound = logical
                .solid
                .local_aabb()
                .transformed(&rotation, translation);

            let mother_bound = self.volumes[mother.0].logical.solid.local_aabb();
            if !mother_bound.contains(&bound) {
                return Err(Error::Overlap {
                    volume: logical.name,
                    detail: format!(
                        "protrudes from mother `{}`",
                        self.volumes[mother.0].name
                    ),
                });
            }

            for (i, sibling) in self.volumes.iter().enumerate() {
                if sibling.mother != Some(mother) {
                    continue;
                }
                let sibling_bound = sibling
                    .logical
                    .solid
                    .local_aabb()
                    .transformed(&sibling.rotation, sibling.translation);
                if bound.intersects(&sibling_bound) {
                    return Err(Error::Overlap {
                        volume: logical.name,
                        detail: format!("intersects sibling `{}`", self.volumes[i].name),
                    });
                }
            }
        }

        let id = VolumeId(self.volumes.len());
        self.volumes.push(PlacedVolume {
            name: logical.name.clone(),
            logical,
            rotation,
            translation,
            mother: Some(mother),
            copy_no,
        });
        Ok(id)
    }

    /// Registers an optical border surface between two placed volumes.
    pub fn add_border_surface(
        &mut self,
        name: &str,
        from: VolumeId,
        to: VolumeId,
        surface: SurfaceHandle,
    ) -> Result<()> {
        if from.0 >= self.volumes.len() || to.0 >= self.volumes.len() {
            return Err(Error::InvalidPlacement(format!(
                "border surface `{}` references a volume outside this geometry",
                name
            )));
        }
        if from == to {
            return Err(Error::InvalidPlacement(format!(
                "border surface `{}` needs two distinct volumes",
                name
            )));
        }
        self.surfaces.push(BorderSurface {
            name: name.to_string(),
            from,
            to,
            surface,
        });
        Ok(())
    }

    pub fn build(self) -> Result<Geometry> {
        let world = self
            .world
            .ok_or_else(|| Error::InvalidPlacement("no world volume placed".to_string()))?;
        Ok(Geometry {
            volumes: self.volumes,
            world,
            surfaces: self.surfaces,
        })
    }
}

impl Default for GeometryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The finished volume tree, rooted at the single world volume.
pub struct Geometry {
    volumes: Vec<PlacedVolume>,
    world: VolumeId,
    surfaces: Vec<BorderSurface>,
}

impl Geometry {
    pub fn world(&self) -> VolumeId {
        self.world
    }

    pub fn volume(&self, id: VolumeId) -> &PlacedVolume {
        &self.volumes[id.0]
    }

    pub fn volumes(&self) -> impl Iterator<Item = (VolumeId, &PlacedVolume)> + '_ {
        self.volumes
            .iter()
            .enumerate()
            .map(|(i, v)| (VolumeId(i), v))
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<VolumeId> {
        self.volumes
            .iter()
            .position(|v| v.name == name)
            .map(VolumeId)
    }

    /// Walks from `id` up to the root, inclusive of both ends.
    pub fn parent_chain(&self, id: VolumeId) -> Vec<VolumeId> {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(mother) = self.volumes[current.0].mother {
            chain.push(mother);
            current = mother;
        }
        chain
    }

    pub fn border_surfaces(&self) -> &[BorderSurface] {
        &self.surfaces
    }
}

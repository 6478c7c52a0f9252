use crate::property::PropertyTable;
use std::sync::Arc;

/// Shared optical surface handle as referenced by border-surface registrations.
pub type SurfaceHandle = Arc<OpticalSurface>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceType {
    DielectricDielectric,
    DielectricMetal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceFinish {
    Polished,
    Ground,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceModel {
    Glisur,
    Unified,
}

/// Describes how optical photons behave at a boundary between two placed
/// volumes (or around one volume's skin): reflection model plus an
/// energy-dependent reflectivity/efficiency table.
#[derive(Debug, Clone)]
pub struct OpticalSurface {
    name: String,
    kind: SurfaceType,
    finish: SurfaceFinish,
    model: SurfaceModel,
    properties: PropertyTable,
}

impl OpticalSurface {
    pub fn new(
        name: &str,
        kind: SurfaceType,
        finish: SurfaceFinish,
        model: SurfaceModel,
        properties: PropertyTable,
    ) -> OpticalSurface {
        OpticalSurface {
            name: name.to_string(),
            kind,
            finish,
            model,
            properties,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SurfaceType {
        self.kind
    }

    pub fn finish(&self) -> SurfaceFinish {
        self.finish
    }

    pub fn model(&self) -> SurfaceModel {
        self.model
    }

    pub fn properties(&self) -> &PropertyTable {
        &self.properties
    }
}

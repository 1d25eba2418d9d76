use glam::DVec3;
use serde::{Deserialize, Serialize};

/// The geometry variant carried by one visual or collision element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AstraGeometry {
  Sphere { radius: f64 },
  Box { size: DVec3 },
  Cylinder { radius: f64, length: f64 },
  Mesh { filename: String, scale: DVec3 },
}

/// The implementation of the geometry variant.
impl AstraGeometry {
  pub fn is_mesh(&self) -> bool {
    matches!(self, Self::Mesh { .. })
  }

  pub fn mesh_filename(&self) -> Option<&str> {
    match self {
      Self::Mesh { filename, .. } => Some(filename),
      _ => None,
    }
  }
}

impl std::convert::From<&urdf_rs::Geometry> for AstraGeometry {
  fn from(geometry: &urdf_rs::Geometry) -> Self {
    match geometry {
      urdf_rs::Geometry::Sphere { radius } => Self::Sphere { radius: *radius },
      urdf_rs::Geometry::Box { size } => Self::Box {
        size: DVec3::new(size[0], size[1], size[2]),
      },
      urdf_rs::Geometry::Cylinder { radius, length } => Self::Cylinder {
        radius: *radius,
        length: *length,
      },
      // A capsule degrades to a cylinder of the same radius and length.
      urdf_rs::Geometry::Capsule { radius, length } => Self::Cylinder {
        radius: *radius,
        length: *length,
      },
      urdf_rs::Geometry::Mesh { filename, scale } => Self::Mesh {
        filename: filename.clone(),
        scale: scale
          .as_ref()
          .map_or(DVec3::ONE, |s| DVec3::new(s[0], s[1], s[2])),
      },
    }
  }
}

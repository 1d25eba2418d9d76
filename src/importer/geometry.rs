//! Conversion of source geometry elements into engine-native records.

use glam::DVec3;

use crate::descriptor::{AstraGeometryData, AstraShapeKind};
use crate::model::{AstraCollision, AstraGeometry, AstraVisual};

/// Side length of the box synthesized when a link supplies no geometry.
pub const PLACEHOLDER_EXTENT: f64 = 0.01;

/// Map a geometry variant onto the engine's extent/scale/filename fields.
/// Mesh geometry keeps the caller-supplied default extent; primitives encode
/// their dimensions into the extent vector.
/// param geometry: The source geometry.
/// param default_extent: The extent used for mesh geometry.
/// return: The engine-native record.
pub fn build_geometry(geometry: &AstraGeometry, default_extent: DVec3) -> AstraGeometryData {
  match geometry {
    AstraGeometry::Sphere { radius } => AstraGeometryData {
      shape: AstraShapeKind::Sphere,
      extent: DVec3::new(*radius, 0.0, 0.0),
      scale: DVec3::ONE,
      filename: None,
    },
    AstraGeometry::Box { size } => AstraGeometryData {
      shape: AstraShapeKind::Box,
      extent: *size,
      scale: DVec3::ONE,
      filename: None,
    },
    AstraGeometry::Cylinder { radius, length } => AstraGeometryData {
      shape: AstraShapeKind::Cylinder,
      extent: DVec3::new(*radius, *length, 0.0),
      scale: DVec3::ONE,
      filename: None,
    },
    AstraGeometry::Mesh { filename, scale } => AstraGeometryData {
      shape: AstraShapeKind::Mesh,
      extent: default_extent,
      scale: *scale,
      filename: Some(filename.clone()),
    },
  }
}

/// Visual record plus the material name the element references.
pub fn build_visual(visual: &AstraVisual) -> (AstraGeometryData, String) {
  (
    build_geometry(&visual.geometry, DVec3::ZERO),
    visual.material_name.clone().unwrap_or_default(),
  )
}

/// Collision record. Mesh collisions mirror their scale into the extent,
/// which is what the engine sizes the collision volume with.
pub fn build_collision(collision: &AstraCollision) -> AstraGeometryData {
  let mut record = build_geometry(&collision.geometry, DVec3::ZERO);
  if record.shape == AstraShapeKind::Mesh {
    record.extent = record.scale;
  }
  record
}

/// The 1 cm box standing in when a link has no visual or collision element.
pub fn placeholder_geometry() -> AstraGeometryData {
  AstraGeometryData {
    shape: AstraShapeKind::Box,
    extent: DVec3::splat(PLACEHOLDER_EXTENT),
    scale: DVec3::ONE,
    filename: None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sphere_radius_goes_into_extent_x() {
    let record = build_geometry(&AstraGeometry::Sphere { radius: 0.3 }, DVec3::ZERO);
    assert_eq!(record.shape, AstraShapeKind::Sphere);
    assert_eq!(record.extent, DVec3::new(0.3, 0.0, 0.0));
    assert_eq!(record.scale, DVec3::ONE);
  }

  #[test]
  fn box_dimensions_fill_the_extent() {
    let record = build_geometry(
      &AstraGeometry::Box {
        size: DVec3::new(1.0, 2.0, 3.0),
      },
      DVec3::ZERO,
    );
    assert_eq!(record.shape, AstraShapeKind::Box);
    assert_eq!(record.extent, DVec3::new(1.0, 2.0, 3.0));
  }

  #[test]
  fn cylinder_packs_radius_and_length() {
    let record = build_geometry(
      &AstraGeometry::Cylinder {
        radius: 0.1,
        length: 0.7,
      },
      DVec3::ZERO,
    );
    assert_eq!(record.shape, AstraShapeKind::Cylinder);
    assert_eq!(record.extent, DVec3::new(0.1, 0.7, 0.0));
  }

  #[test]
  fn mesh_keeps_the_default_extent_and_sets_scale() {
    let record = build_geometry(
      &AstraGeometry::Mesh {
        filename: "meshes/wheel.obj".to_owned(),
        scale: DVec3::splat(2.0),
      },
      DVec3::ZERO,
    );
    assert_eq!(record.shape, AstraShapeKind::Mesh);
    assert_eq!(record.extent, DVec3::ZERO);
    assert_eq!(record.scale, DVec3::splat(2.0));
    assert_eq!(record.filename.as_deref(), Some("meshes/wheel.obj"));
  }

  #[test]
  fn mesh_collision_mirrors_scale_into_extent() {
    let collision = AstraCollision {
      name: None,
      origin: crate::math::AstraPose::IDENTITY,
      geometry: AstraGeometry::Mesh {
        filename: "meshes/hull.stl".to_owned(),
        scale: DVec3::splat(0.001),
      },
    };
    let record = build_collision(&collision);
    assert_eq!(record.extent, DVec3::splat(0.001));
  }

  #[test]
  fn placeholder_is_a_one_centimeter_box() {
    let record = placeholder_geometry();
    assert_eq!(record.shape, AstraShapeKind::Box);
    assert_eq!(record.extent, DVec3::splat(0.01));
  }
}

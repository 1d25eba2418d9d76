//! Node splitting and grouping policy.
//!
//! One link usually collapses into a single node carrying both its visual
//! and its collision geometry. Links whose elements cannot share a node are
//! expanded into a primary node plus child nodes tied together by a group id.

use crate::descriptor::{AstraNodeData, AstraShapeKind, FALLBACK_MATERIAL_NAME};
use crate::math::AstraPose;
use crate::model::{AstraCollision, AstraLink, AstraVisual};
use super::frame::reference_origin;
use super::geometry::{build_collision, build_visual, placeholder_geometry};
use super::walker::AstraIdAllocator;

/// Outcome of the per-link grouping rules.
struct SplitDecision {
  group_id: u64,
  load_visual: bool,
  load_collision: bool,
}

/// A visual can share a node with a mesh collision only when it references
/// the same mesh file. Primitive collisions pair with any visual.
fn visual_matches_collision(visual: &AstraVisual, collision: &AstraCollision) -> bool {
  if collision.geometry.is_mesh() {
    collision.geometry.mesh_filename() == visual.geometry.mesh_filename()
  } else {
    true
  }
}

/// Apply the grouping rules once per link.
///
/// Any rule match forces a fresh nonzero group id:
/// 1. several visual elements and several collision elements,
/// 2. the primary collision's origin differs from the inertial origin, in
///    which case the collision is exiled to a child node (the visual stays
///    with the primary node even then),
/// 3. the primary collision is a mesh the primary visual does not match, in
///    which case the visual is exiled instead.
fn decide_split(link: &AstraLink, ids: &mut AstraIdAllocator) -> SplitDecision {
  let mut load_visual = !link.visuals.is_empty();
  let mut load_collision = !link.collisions.is_empty();
  let mut need_group_id = false;

  if link.visuals.len() > 1 && link.collisions.len() > 1 {
    need_group_id = true;
  }
  if let (Some(collision), Some(inertial)) = (link.primary_collision(), link.inertial.as_ref()) {
    if !collision.origin.approx_eq(&inertial.origin) {
      load_collision = false;
      need_group_id = true;
    }
  }
  if let (Some(visual), Some(collision)) = (link.primary_visual(), link.primary_collision()) {
    if load_collision && !visual_matches_collision(visual, collision) {
      load_visual = false;
      need_group_id = true;
    }
  }

  SplitDecision {
    group_id: if need_group_id { ids.group_id() } else { 0 },
    load_visual,
    load_collision,
  }
}

/// Emits the node descriptors for single links.
pub(crate) struct AstraNodeSynthesizer<'a> {
  ids: &'a mut AstraIdAllocator,
}

/// The implementation of the node synthesizer.
impl<'a> AstraNodeSynthesizer<'a> {
  pub fn new(ids: &'a mut AstraIdAllocator) -> Self {
    Self { ids }
  }

  /// Emit the primary node and any split-off children for one link.
  /// param link: The link to convert.
  /// param node_pose: The link's pose relative to its parent's frame.
  /// param relative_id: The node index of the parent link's primary node.
  /// return: The primary node and its child nodes, in emission order.
  pub fn synthesize(
    &mut self,
    link: &AstraLink,
    node_pose: AstraPose,
    relative_id: u64,
  ) -> (AstraNodeData, Vec<AstraNodeData>) {
    let decision = decide_split(link, self.ids);
    let link_reference = reference_origin(link);

    let mut primary = AstraNodeData {
      index: self.ids.node_id(),
      name: link.name.clone(),
      group_id: decision.group_id,
      relative_id,
      position: node_pose.position,
      rotation: node_pose.rotation,
      ..Default::default()
    };
    if let Some(inertial) = link.inertial.as_ref() {
      primary.mass = inertial.mass;
      primary.inertia = Some(inertial.inertia);
    }

    // Index of the next visual and collision element still to be placed.
    let mut visual_index = 0;
    let mut collision_index = 0;

    match link.primary_visual() {
      Some(visual) if decision.load_visual => {
        let (record, material_name) = build_visual(visual);
        primary.visual = record;
        primary.material_name = material_name;
        let offset = visual.origin.relative_to(&link_reference);
        primary.visual_position = offset.position;
        primary.visual_rotation = offset.rotation;
        visual_index = 1;
      }
      _ => {
        primary.visual = placeholder_geometry();
        primary.material_name = FALLBACK_MATERIAL_NAME.to_owned();
      }
    }

    match link.primary_collision() {
      Some(collision) if decision.load_collision => {
        primary.physical = build_collision(collision);
        collision_index = 1;
      }
      _ => {
        primary.physical = placeholder_geometry();
        primary.collision_mask = 0;
      }
    }

    let mut children = Vec::new();

    // Remaining collision elements each get a child node, greedily paired by
    // array position with a remaining visual when the mesh check allows it.
    while collision_index < link.collisions.len() {
      let collision = &link.collisions[collision_index];
      let paired_visual = link
        .visuals
        .get(visual_index)
        .filter(|visual| visual_matches_collision(visual, collision));

      let mut child = self.child_base(link, &primary, collision.name.as_deref());
      child.physical = build_collision(collision);
      let child_pose = collision.origin.relative_to(&link_reference);
      child.position = child_pose.position;
      child.rotation = child_pose.rotation;
      collision_index += 1;

      match paired_visual {
        Some(visual) => {
          let (record, material_name) = build_visual(visual);
          child.visual = record;
          child.material_name = material_name;
          let visual_pose = visual.origin.relative_to(&link_reference);
          let offset = visual_pose.relative_to(&child_pose);
          child.visual_position = offset.position;
          child.visual_rotation = offset.rotation;
          visual_index += 1;
        }
        None => {
          child.visual = placeholder_geometry();
          child.material_name = FALLBACK_MATERIAL_NAME.to_owned();
        }
      }
      children.push(child);
    }

    // Visual elements left over once all collisions are consumed become
    // non-colliding children placed at the visual's own origin.
    while visual_index < link.visuals.len() {
      let visual = &link.visuals[visual_index];
      let mut child = self.child_base(link, &primary, visual.name.as_deref());
      child.no_physical = true;

      let (record, material_name) = build_visual(visual);
      // The engine wants a physical tag and extent even on non-colliding
      // nodes; primitive shapes mirror the visual, meshes tag as box.
      child.physical.shape = match record.shape {
        AstraShapeKind::Mesh => AstraShapeKind::Box,
        shape => shape,
      };
      child.physical.extent = record.extent;
      child.visual = record;
      child.material_name = material_name;

      let pose = visual.origin.relative_to(&link_reference);
      child.position = pose.position;
      child.rotation = pose.rotation;
      visual_index += 1;
      children.push(child);
    }

    (primary, children)
  }

  /// Common child-node skeleton: fresh index, primary as placement parent,
  /// inherited group id, no mass of its own.
  fn child_base(
    &mut self,
    link: &AstraLink,
    primary: &AstraNodeData,
    element_name: Option<&str>,
  ) -> AstraNodeData {
    AstraNodeData {
      index: self.ids.node_id(),
      name: element_name
        .map(str::to_owned)
        .unwrap_or_else(|| format!("{}_child", link.name)),
      group_id: primary.group_id,
      relative_id: primary.index,
      mass: 0.0,
      density: 0.0,
      ..Default::default()
    }
  }
}

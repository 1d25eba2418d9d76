use serde::{Deserialize, Serialize};

/// Name of the reserved material synthesized ahead of every document table.
/// Placeholder visuals reference it, and the committer falls back to it when
/// a node's material name cannot be resolved.
pub const FALLBACK_MATERIAL_NAME: &str = "_fallback_material";

/// One engine material in its pre-commit descriptor form.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AstraMaterialData {
  /// Sequential index, counted from 1 within one load.
  pub index: u64,
  pub name: String,
  /// Front-face diffuse color as r, g, b, a.
  pub diffuse: [f64; 4],
  pub texture: Option<String>,
  pub exists: bool,
}

/// The implementation of the material descriptor.
impl AstraMaterialData {
  /// The reserved fallback material, independent of the source document.
  pub fn fallback(index: u64) -> Self {
    Self {
      index,
      name: FALLBACK_MATERIAL_NAME.to_owned(),
      diffuse: [1.0, 0.0, 0.0, 1.0],
      texture: None,
      exists: true,
    }
  }
}

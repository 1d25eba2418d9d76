//! Two-phase scene import: pure descriptor construction, then engine commit.

pub mod committer;
pub mod frame;
pub mod geometry;
pub mod synthesizer;
pub mod walker;

pub use committer::AstraSceneCommitter;
pub use walker::AstraTreeWalker;

use crate::descriptor::AstraSceneDescriptors;
use crate::error::AstraImporterError;
use crate::interfaces::AstraEngineContext;
use crate::model::AstraModel;

/// Options controlling one import.
#[derive(Clone, Debug, Default)]
pub struct AstraImportOptions {
  /// Logical robot name reported to the entity collaborator.
  pub robot_name: Option<String>,
  /// Log the full descriptor dump before committing.
  pub dump_descriptors: bool,
}

/// The implementation of the import options.
impl AstraImportOptions {
  pub fn with_robot_name(mut self, robot_name: &str) -> Self {
    self.robot_name = Some(robot_name.to_owned());
    self
  }

  pub fn with_descriptor_dump(mut self) -> Self {
    self.dump_descriptors = true;
    self
  }
}

/// The scene importer.
///
/// Converts one robot-description document into the engine's flattened
/// node/joint/material graph. The descriptor-building phase is pure; all
/// engine registration happens in the commit phase, so a rejected commit
/// leaves no half-built importer state behind.
pub struct AstraSceneImporter {
  file_name: String,
  options: AstraImportOptions,
}

/// The implementation of the scene importer.
impl AstraSceneImporter {
  /// Create an importer for one description file.
  /// param file_name: The description file. Also the scene's registry key.
  /// return: The importer.
  pub fn new(file_name: &str) -> Self {
    Self {
      file_name: file_name.to_owned(),
      options: AstraImportOptions::default(),
    }
  }

  pub fn with_options(file_name: &str, options: AstraImportOptions) -> Self {
    Self {
      file_name: file_name.to_owned(),
      options,
    }
  }

  /// Load the description file and commit it to the engine.
  /// param ctx: The engine collaborators.
  /// return: The committed descriptor set.
  pub fn load(
    &self,
    ctx: &mut AstraEngineContext,
  ) -> Result<AstraSceneDescriptors, AstraImporterError> {
    log::info!("Loading robot description \"{}\".", self.file_name);
    let robot = urdf_rs::read_file(&self.file_name).map_err(|err| {
      AstraImporterError::new(
        &format!("Parsing robot description \"{}\" failed.", self.file_name),
        Some(Box::new(err)),
      )
    })?;
    self.load_robot(&robot, ctx)
  }

  /// Load a description document already in memory and commit it.
  /// param content: The description document text.
  /// param ctx: The engine collaborators.
  /// return: The committed descriptor set.
  pub fn load_from_string(
    &self,
    content: &str,
    ctx: &mut AstraEngineContext,
  ) -> Result<AstraSceneDescriptors, AstraImporterError> {
    log::info!("Loading robot description \"{}\" from memory.", self.file_name);
    let robot = urdf_rs::read_from_string(content).map_err(|err| {
      AstraImporterError::new(
        &format!("Parsing robot description \"{}\" failed.", self.file_name),
        Some(Box::new(err)),
      )
    })?;
    self.load_robot(&robot, ctx)
  }

  /// Descriptor construction alone. Pure: no engine calls, safe to retry.
  /// param model: The model tree to convert.
  /// param first_node_id: The first node index to assign.
  /// param first_group_id: The first group id to assign.
  /// return: The descriptor set.
  pub fn parse_model(
    &self,
    model: &AstraModel,
    first_node_id: u64,
    first_group_id: u64,
  ) -> Result<AstraSceneDescriptors, AstraImporterError> {
    AstraTreeWalker::new(model, first_node_id, first_group_id).walk()
  }

  fn load_robot(
    &self,
    robot: &urdf_rs::Robot,
    ctx: &mut AstraEngineContext,
  ) -> Result<AstraSceneDescriptors, AstraImporterError> {
    let model = AstraModel::from_urdf(robot)?;
    let map_index = self.prepare(ctx);

    let descriptors =
      self.parse_model(&model, ctx.nodes.max_node_id() + 1, ctx.nodes.max_group_id() + 1)?;
    if self.options.dump_descriptors {
      log::debug!("Descriptor dump:\n{}", descriptors.debug.to_json()?);
    }

    let mut committer = AstraSceneCommitter::new(map_index);
    if let Some(robot_name) = self.options.robot_name.as_deref() {
      committer = committer.with_robot_name(robot_name);
    }
    committer.commit(&descriptors, ctx)?;

    log::info!(
      "Loaded \"{}\": {} materials, {} nodes, {} joints.",
      self.file_name,
      descriptors.materials.len(),
      descriptors.nodes.len(),
      descriptors.joints.len()
    );
    Ok(descriptors)
  }

  /// Register the scene with the load registry, re-using the mapping index
  /// of an earlier load of the same file, and announce the logical entity.
  fn prepare(&self, ctx: &mut AstraEngineContext) -> u64 {
    if let (Some(entities), Some(robot_name)) =
      (ctx.entities.as_deref_mut(), self.options.robot_name.as_deref())
    {
      entities.add_entity(robot_name);
    }

    let mut map_index = ctx.registry.scene_index_by_name(&self.file_name);
    if map_index == 0 {
      ctx.registry.register_scene_name(&self.file_name);
      map_index = ctx.registry.scene_index_by_name(&self.file_name);
    }
    map_index
  }
}

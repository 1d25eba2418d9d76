pub use crate::error::AstraImporterError;
pub use crate::math::AstraPose;
pub use crate::model::AstraModel;
pub use crate::descriptor::{
  AstraJointData,
  AstraMaterialData,
  AstraNodeData,
  AstraSceneDescriptors,
};
pub use crate::importer::{
  AstraImportOptions,
  AstraSceneCommitter,
  AstraSceneImporter,
};
pub use crate::interfaces::{
  AstraEngineContext,
  AstraEntityManager,
  AstraJointManager,
  AstraLoadRegistry,
  AstraMapKind,
  AstraNodeManager,
};

mod assigner_options;
mod chunk;
mod module;
mod types;

// We don't want internal position adjustment of files affect users, so all items are exported in the root.
pub use crate::{
  assigner_options::AssignerOptions,
  chunk::Chunk,
  module::{external_module::ExternalModule, normal_module::NormalModule, Module},
  types::{
    import_kind::ImportKind,
    import_record::ResolvedImportRecord,
    module_table::IndexModules,
    raw_idx::{ImportRecordIdx, ModuleIdx, RawIdx},
    side_effects,
  },
};

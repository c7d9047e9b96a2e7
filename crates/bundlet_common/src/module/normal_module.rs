use arcstr::ArcStr;
use oxc_index::IndexVec;

use crate::side_effects::DeterminedSideEffects;
use crate::{ImportRecordIdx, ModuleIdx, ResolvedImportRecord};

#[derive(Debug)]
pub struct NormalModule {
  pub idx: ModuleIdx,
  /// Identifier that is stable across machine and os, used in diagnostics.
  pub stable_id: String,
  pub source: ArcStr,
  pub side_effects: DeterminedSideEffects,
  pub import_records: IndexVec<ImportRecordIdx, ResolvedImportRecord>,
  /// Static dependencies selected for inclusion by tree shaking, in record
  /// order. May contain externals; callers filter against the module table.
  pub included_dependencies: Vec<ModuleIdx>,
  /// Modules that dynamically import this one and are themselves included.
  pub included_dynamic_importers: Vec<ModuleIdx>,
  /// Modules this one is guaranteed to be evaluated before, and the inverse
  /// edge. Treated like dynamic import edges by the assignment.
  pub implicitly_loaded_before: Vec<ModuleIdx>,
  pub implicitly_loaded_after: Vec<ModuleIdx>,
}

impl NormalModule {
  /// All static dependencies in record order, externals included.
  pub fn static_dependencies(&self) -> impl Iterator<Item = ModuleIdx> + '_ {
    self.import_records.iter().filter(|rec| rec.kind.is_static()).map(|rec| rec.resolved_module)
  }

  /// Resolutions of `import()` expressions in record order.
  pub fn dynamic_import_resolutions(&self) -> impl Iterator<Item = ModuleIdx> + '_ {
    self.import_records.iter().filter(|rec| rec.kind.is_dynamic()).map(|rec| rec.resolved_module)
  }

  /// The module's serialized byte cost.
  pub fn size(&self) -> usize {
    self.source.len()
  }
}

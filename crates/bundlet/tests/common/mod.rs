use arcstr::ArcStr;
use bundlet::side_effects::DeterminedSideEffects;
use bundlet::{
  ExternalModule, ImportKind, IndexModules, Module, ModuleIdx, NormalModule, ResolvedImportRecord,
};
use oxc_index::IndexVec;

/// Builds small module tables for assignment tests. Sizes are spelled out
/// as source lengths, the same way the bundler measures them.
#[derive(Default)]
pub struct GraphBuilder {
  modules: IndexModules,
}

impl GraphBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn module(&mut self, id: &str, size: usize, has_side_effects: bool) -> ModuleIdx {
    let idx = ModuleIdx::from_usize(self.modules.len());
    self.modules.push(Module::normal(NormalModule {
      idx,
      stable_id: id.to_string(),
      source: "s".repeat(size).into(),
      side_effects: DeterminedSideEffects::Analyzed(has_side_effects),
      import_records: IndexVec::default(),
      included_dependencies: Vec::new(),
      included_dynamic_importers: Vec::new(),
      implicitly_loaded_before: Vec::new(),
      implicitly_loaded_after: Vec::new(),
    }))
  }

  #[allow(dead_code)]
  pub fn external(&mut self, name: &str) -> ModuleIdx {
    let idx = ModuleIdx::from_usize(self.modules.len());
    self.modules.push(Module::external(ExternalModule::new(idx, ArcStr::from(name))))
  }

  /// Static import selected for inclusion by tree shaking.
  pub fn depend(&mut self, importer: ModuleIdx, importee: ModuleIdx) {
    self
      .normal_mut(importer)
      .import_records
      .push(ResolvedImportRecord::new(ImportKind::Import, importee));
    self.normal_mut(importer).included_dependencies.push(importee);
  }

  /// Static import dropped by tree shaking. Manual chunks still follow it;
  /// the graph analysis does not.
  #[allow(dead_code)]
  pub fn depend_excluded(&mut self, importer: ModuleIdx, importee: ModuleIdx) {
    self
      .normal_mut(importer)
      .import_records
      .push(ResolvedImportRecord::new(ImportKind::Import, importee));
  }

  /// `import()` whose importer stays included.
  #[allow(dead_code)]
  pub fn dynamic_import(&mut self, importer: ModuleIdx, importee: ModuleIdx) {
    self
      .normal_mut(importer)
      .import_records
      .push(ResolvedImportRecord::new(ImportKind::DynamicImport, importee));
    self.normal_mut(importee).included_dynamic_importers.push(importer);
  }

  /// Declares that `entry` only ever starts loading after `importer`, the
  /// way an emitted chunk depends on its loader.
  #[allow(dead_code)]
  pub fn implicitly_loaded_after(&mut self, entry: ModuleIdx, importer: ModuleIdx) {
    self.normal_mut(importer).implicitly_loaded_before.push(entry);
    self.normal_mut(entry).implicitly_loaded_after.push(importer);
  }

  pub fn build(self) -> IndexModules {
    self.modules
  }

  fn normal_mut(&mut self, idx: ModuleIdx) -> &mut NormalModule {
    self.modules[idx].as_normal_mut().expect("builder edge endpoints must be normal modules")
  }
}

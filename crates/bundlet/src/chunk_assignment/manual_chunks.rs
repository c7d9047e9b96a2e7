use arcstr::ArcStr;
use bundlet_common::{Chunk, Module, ModuleIdx};
use bundlet_utils::indexmap::{FxIndexMap, FxIndexSet};

use super::ChunkAssigner;

impl ChunkAssigner<'_> {
  /// Materializes one chunk per manual alias by walking the static
  /// dependencies of every entry assigned to that alias. A module reached
  /// by two aliases stays with the alias that reached it first.
  pub(super) fn create_manual_chunks(&mut self) -> Vec<Chunk> {
    let manual_chunk_alias_by_entry = self.manual_chunk_alias_by_entry;
    self.modules_in_manual_chunks.extend(manual_chunk_alias_by_entry.keys().copied());

    let mut manual_chunk_modules_by_alias: FxIndexMap<ArcStr, Vec<ModuleIdx>> =
      FxIndexMap::default();
    for (&entry, alias) in manual_chunk_alias_by_entry {
      let chunk_modules = manual_chunk_modules_by_alias.entry(alias.clone()).or_default();
      self.add_static_dependencies_to_manual_chunk(entry, chunk_modules);
    }

    manual_chunk_modules_by_alias
      .into_iter()
      .map(|(alias, modules)| Chunk::new(Some(alias), modules))
      .collect()
  }

  fn add_static_dependencies_to_manual_chunk(
    &mut self,
    entry: ModuleIdx,
    chunk_modules: &mut Vec<ModuleIdx>,
  ) {
    let mut modules_to_handle = FxIndexSet::from_iter([entry]);
    let mut handled = 0;
    while handled < modules_to_handle.len() {
      let module_idx = modules_to_handle[handled];
      handled += 1;
      self.modules_in_manual_chunks.insert(module_idx);
      chunk_modules.push(module_idx);
      let Module::Normal(module) = &self.modules[module_idx] else {
        continue;
      };
      for dependency_idx in module.static_dependencies() {
        if self.modules[dependency_idx].is_normal()
          && !self.modules_in_manual_chunks.contains(&dependency_idx)
        {
          modules_to_handle.insert(dependency_idx);
        }
      }
    }
  }
}

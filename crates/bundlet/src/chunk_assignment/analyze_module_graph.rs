use bundlet_common::Module;
use bundlet_utils::indexmap::FxIndexSet;
use rustc_hash::{FxHashMap, FxHashSet};

use super::ChunkAssigner;

impl ChunkAssigner<'_> {
  /// Walks the included graph from every entry, recording which entries
  /// reach which modules and discovering dynamic entries along the way.
  /// `all_entries` grows while it is being iterated; entries appended
  /// mid-loop get their own traversal in a later round.
  pub(super) fn analyze_module_graph(&mut self) {
    self.all_entries.extend(self.entries.iter().copied());

    let mut entry_index = 0;
    while entry_index < self.all_entries.len() {
      let current_entry = self.all_entries[entry_index];
      entry_index += 1;

      let mut modules_to_handle = FxIndexSet::from_iter([current_entry]);
      let mut handled = 0;
      while handled < modules_to_handle.len() {
        let module_idx = modules_to_handle[handled];
        handled += 1;
        self.dependent_entries_by_module[module_idx].insert(current_entry);

        let Module::Normal(module) = &self.modules[module_idx] else {
          continue;
        };
        for &dependency_idx in &module.included_dependencies {
          if self.modules[dependency_idx].is_normal() {
            modules_to_handle.insert(dependency_idx);
          }
        }
        for resolution_idx in module.dynamic_import_resolutions() {
          if let Module::Normal(resolution) = &self.modules[resolution_idx] {
            if !resolution.included_dynamic_importers.is_empty()
              && !self.all_entries.contains(&resolution_idx)
            {
              tracing::debug!("discovered dynamic entry {}", resolution.stable_id);
              self.dynamic_entries.insert(resolution_idx);
              self.all_entries.insert(resolution_idx);
            }
          }
        }
        for &dependency_idx in &module.implicitly_loaded_before {
          if !self.all_entries.contains(&dependency_idx) {
            self.dynamic_entries.insert(dependency_idx);
            self.all_entries.insert(dependency_idx);
          }
        }
      }
    }

    self.compute_dynamically_dependent_entries();
  }

  /// For every dynamic entry, the union of the dependent entries of its
  /// live importers: the entries under which it may start loading.
  fn compute_dynamically_dependent_entries(&mut self) {
    let mut dynamically_dependent_entries_by_dynamic_entry = FxHashMap::default();
    for &dynamic_entry in &self.dynamic_entries {
      let mut dynamically_dependent_entries = FxHashSet::default();
      let module = self.modules[dynamic_entry]
        .as_normal()
        .expect("dynamic entries can only be normal modules");
      for importer_idx in
        module.included_dynamic_importers.iter().chain(&module.implicitly_loaded_after)
      {
        dynamically_dependent_entries
          .extend(self.dependent_entries_by_module[*importer_idx].iter().copied());
      }
      dynamically_dependent_entries_by_dynamic_entry
        .insert(dynamic_entry, dynamically_dependent_entries);
    }
    self.dynamically_dependent_entries_by_dynamic_entry =
      dynamically_dependent_entries_by_dynamic_entry;
  }
}

use bundlet_common::{IndexModules, Module, ModuleIdx};
use bundlet_utils::indexmap::{FxIndexMap, FxIndexSet};
use oxc_index::IndexVec;
use rustc_hash::{FxHashMap, FxHashSet};

use super::ChunkAssigner;

struct AssignContext<'a> {
  modules: &'a IndexModules,
  modules_in_manual_chunks: &'a FxHashSet<ModuleIdx>,
  static_entries: &'a FxHashSet<ModuleIdx>,
  dependent_entries_by_module: &'a IndexVec<ModuleIdx, FxHashSet<ModuleIdx>>,
  dynamically_dependent_entries_by_dynamic_entry: &'a FxHashMap<ModuleIdx, FxHashSet<ModuleIdx>>,
  max_checked_dependent_entries: usize,
  assigned_entries_by_module: &'a mut FxIndexMap<ModuleIdx, FxHashSet<ModuleIdx>>,
}

/// Attributes every module of `entry`'s static subgraph to `entry`, except
/// modules already guaranteed to be loaded in every context `entry` can be
/// loaded from. Traversal continues through skipped modules.
fn assign_entry_to_static_dependencies(
  ctx: &mut AssignContext,
  entry: ModuleIdx,
  dynamically_dependent_entries: Option<&FxHashSet<ModuleIdx>>,
) {
  let mut modules_to_handle = FxIndexSet::from_iter([entry]);
  let mut handled = 0;
  while handled < modules_to_handle.len() {
    let module_idx = modules_to_handle[handled];
    handled += 1;

    let already_loaded = match dynamically_dependent_entries {
      Some(dependent_entries) => are_entries_contained_or_dynamically_dependent(
        ctx,
        dependent_entries,
        &ctx.dependent_entries_by_module[module_idx],
      ),
      None => false,
    };
    if !already_loaded {
      ctx.assigned_entries_by_module.entry(module_idx).or_default().insert(entry);
    }

    let Module::Normal(module) = &ctx.modules[module_idx] else {
      continue;
    };
    for &dependency_idx in &module.included_dependencies {
      if ctx.modules[dependency_idx].is_normal()
        && !ctx.modules_in_manual_chunks.contains(&dependency_idx)
      {
        modules_to_handle.insert(dependency_idx);
      }
    }
  }
}

/// Whether every entry in `entries` is either contained in `contained_in`
/// or a dynamic entry all of whose own loaders are, transitively. Gives up
/// (and answers no) as soon as a checked set exceeds the configured bound.
fn are_entries_contained_or_dynamically_dependent(
  ctx: &AssignContext,
  entries: &FxHashSet<ModuleIdx>,
  contained_in: &FxHashSet<ModuleIdx>,
) -> bool {
  if entries.len() > ctx.max_checked_dependent_entries {
    return false;
  }
  let mut entries_to_check = FxIndexSet::from_iter(entries.iter().copied());
  let mut checked = 0;
  while checked < entries_to_check.len() {
    let entry = entries_to_check[checked];
    checked += 1;
    if contained_in.contains(&entry) {
      continue;
    }
    if ctx.static_entries.contains(&entry) {
      return false;
    }
    let dynamically_dependent_entries = ctx
      .dynamically_dependent_entries_by_dynamic_entry
      .get(&entry)
      .expect("a dynamic entry always has dynamically dependent entries");
    if dynamically_dependent_entries.len() > ctx.max_checked_dependent_entries {
      return false;
    }
    entries_to_check.extend(dynamically_dependent_entries.iter().copied());
  }
  true
}

impl ChunkAssigner<'_> {
  pub(super) fn assign_entries_to_modules(&mut self) {
    let mut ctx = AssignContext {
      modules: self.modules,
      modules_in_manual_chunks: &self.modules_in_manual_chunks,
      static_entries: &self.static_entries,
      dependent_entries_by_module: &self.dependent_entries_by_module,
      dynamically_dependent_entries_by_dynamic_entry: &self
        .dynamically_dependent_entries_by_dynamic_entry,
      max_checked_dependent_entries: self.options.max_checked_dependent_entries,
      assigned_entries_by_module: &mut self.assigned_entries_by_module,
    };

    for &entry in &self.all_entries {
      if ctx.modules_in_manual_chunks.contains(&entry) {
        continue;
      }
      let dynamically_dependent_entries =
        ctx.dynamically_dependent_entries_by_dynamic_entry.get(&entry);
      assign_entry_to_static_dependencies(&mut ctx, entry, dynamically_dependent_entries);
    }
  }
}

mod analyze_module_graph;
mod assign_entries;
mod create_chunks;
mod manual_chunks;
mod merge_chunks;

use arcstr::ArcStr;
use bundlet_common::{AssignerOptions, Chunk, IndexModules, ModuleIdx};
use bundlet_utils::indexmap::{FxIndexMap, FxIndexSet};
use oxc_index::{index_vec, IndexVec};
use rustc_hash::{FxHashMap, FxHashSet};

pub type ManualChunkAliasByEntry = FxIndexMap<ModuleIdx, ArcStr>;

/// Assigns every included module to exactly one chunk.
///
/// Manual chunks come first in input order; automatic chunks follow in the
/// order produced by signature grouping or, when `min_chunk_size` is set,
/// by the merge pass.
pub fn assign_chunks(
  modules: &IndexModules,
  entries: &[ModuleIdx],
  manual_chunk_alias_by_entry: &ManualChunkAliasByEntry,
  options: &AssignerOptions,
) -> Vec<Chunk> {
  ChunkAssigner::new(modules, entries, manual_chunk_alias_by_entry, options).assign()
}

pub struct ChunkAssigner<'a> {
  modules: &'a IndexModules,
  entries: &'a [ModuleIdx],
  manual_chunk_alias_by_entry: &'a ManualChunkAliasByEntry,
  options: &'a AssignerOptions,

  /// Hard exclusion set for all phases after manual chunk materialization.
  modules_in_manual_chunks: FxHashSet<ModuleIdx>,
  /// User entries plus dynamic entries in discovery order. This order is
  /// the canonical signature position order, so it must stay stable.
  all_entries: FxIndexSet<ModuleIdx>,
  static_entries: FxHashSet<ModuleIdx>,
  dynamic_entries: FxIndexSet<ModuleIdx>,
  /// Per module, the entries whose traversal reached it. Empty means the
  /// module was never encountered.
  dependent_entries_by_module: IndexVec<ModuleIdx, FxHashSet<ModuleIdx>>,
  /// Per dynamic entry, the entries under which it may start loading.
  dynamically_dependent_entries_by_dynamic_entry: FxHashMap<ModuleIdx, FxHashSet<ModuleIdx>>,
  /// Per module, the entries it ends up attributed to. Insertion order is
  /// first-attribution order and drives chunk emission order.
  assigned_entries_by_module: FxIndexMap<ModuleIdx, FxHashSet<ModuleIdx>>,
}

impl<'a> ChunkAssigner<'a> {
  pub fn new(
    modules: &'a IndexModules,
    entries: &'a [ModuleIdx],
    manual_chunk_alias_by_entry: &'a ManualChunkAliasByEntry,
    options: &'a AssignerOptions,
  ) -> Self {
    for &entry in entries {
      assert!(
        modules[entry].is_normal(),
        "entry {} is not a normal module",
        modules[entry].stable_id()
      );
    }
    for (&entry, alias) in manual_chunk_alias_by_entry {
      assert!(!alias.is_empty(), "manual chunk aliases must be non-empty");
      assert!(
        modules[entry].is_normal(),
        "manual chunk entry {} is not a normal module",
        modules[entry].stable_id()
      );
    }

    Self {
      modules,
      entries,
      manual_chunk_alias_by_entry,
      options,
      modules_in_manual_chunks: FxHashSet::default(),
      all_entries: FxIndexSet::default(),
      static_entries: entries.iter().copied().collect(),
      dynamic_entries: FxIndexSet::default(),
      dependent_entries_by_module: index_vec![FxHashSet::default(); modules.len()],
      dynamically_dependent_entries_by_dynamic_entry: FxHashMap::default(),
      assigned_entries_by_module: FxIndexMap::default(),
    }
  }

  pub fn assign(mut self) -> Vec<Chunk> {
    let mut chunks = self.create_manual_chunks();
    self.analyze_module_graph();
    self.assign_entries_to_modules();
    chunks.extend(self.create_chunks());
    chunks
  }
}

use bundlet_common::{Chunk, ModuleIdx};
use bundlet_utils::{bitset::BitSet, indexmap::FxIndexMap};

use super::ChunkAssigner;

impl ChunkAssigner<'_> {
  /// Groups modules whose assigned-entry sets coincide. Each group becomes
  /// one chunk unless a minimum chunk size asks for merging.
  pub(super) fn create_chunks(&mut self) -> Vec<Chunk> {
    let entry_count =
      u32::try_from(self.all_entries.len()).expect("entry count should fit in u32");

    let mut chunk_modules_by_signature: FxIndexMap<BitSet, Vec<ModuleIdx>> = FxIndexMap::default();
    for (module_idx, assigned_entries) in &self.assigned_entries_by_module {
      let mut signature = BitSet::new(entry_count);
      for (position, entry) in self.all_entries.iter().enumerate() {
        if assigned_entries.contains(entry) {
          signature.set_bit(position as u32);
        }
      }
      chunk_modules_by_signature.entry(signature).or_default().push(*module_idx);
    }

    if self.options.min_chunk_size == 0 {
      return chunk_modules_by_signature
        .into_values()
        .map(|modules| Chunk::new(None, modules))
        .collect();
    }

    self.merge_small_chunks(chunk_modules_by_signature)
  }
}

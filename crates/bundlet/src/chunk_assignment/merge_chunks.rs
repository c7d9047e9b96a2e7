use bundlet_common::{Chunk, ModuleIdx};
use bundlet_utils::{bitset::BitSet, indexmap::FxIndexMap, pretty_bytes::pretty_bytes};
use itertools::Itertools;

use super::ChunkAssigner;

const INFINITE_DISTANCE: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
  SmallSideEffects,
  SmallPure,
  BigSideEffects,
  BigPure,
}

/// A preliminary chunk while the merge pass reshuffles it.
struct ChunkDescription {
  modules: Vec<ModuleIdx>,
  signature: BitSet,
  size: usize,
  pure: bool,
  bucket: Bucket,
  /// Bumped whenever the chunk is (re-)inserted into a bucket list, so
  /// stale list entries can be told apart from the current one.
  epoch: u32,
  merged: bool,
}

impl ChunkDescription {
  fn is_live(&self, bucket: Bucket, epoch: u32) -> bool {
    !self.merged && self.bucket == bucket && self.epoch == epoch
  }
}

/// The four bucket lists. Entries are `(description index, epoch)`;
/// re-inserting appends, which is what lets a pass pick up chunks that
/// were re-bucketed into its source list while it runs.
#[derive(Default)]
struct ChunkPartition {
  small_side_effects: Vec<(usize, u32)>,
  small_pure: Vec<(usize, u32)>,
  big_side_effects: Vec<(usize, u32)>,
  big_pure: Vec<(usize, u32)>,
}

impl ChunkPartition {
  fn list(&self, bucket: Bucket) -> &[(usize, u32)] {
    match bucket {
      Bucket::SmallSideEffects => &self.small_side_effects,
      Bucket::SmallPure => &self.small_pure,
      Bucket::BigSideEffects => &self.big_side_effects,
      Bucket::BigPure => &self.big_pure,
    }
  }

  fn insert(&mut self, descriptions: &[ChunkDescription], index: usize) {
    let description = &descriptions[index];
    let entry = (index, description.epoch);
    match description.bucket {
      Bucket::SmallSideEffects => self.small_side_effects.push(entry),
      Bucket::SmallPure => self.small_pure.push(entry),
      Bucket::BigSideEffects => self.big_side_effects.push(entry),
      Bucket::BigPure => self.big_pure.push(entry),
    }
  }

  fn live_len(&self, descriptions: &[ChunkDescription], bucket: Bucket) -> usize {
    self
      .list(bucket)
      .iter()
      .filter(|(index, epoch)| descriptions[*index].is_live(bucket, *epoch))
      .count()
  }
}

fn bucket_for(size: usize, pure: bool, min_chunk_size: usize) -> Bucket {
  match (size < min_chunk_size, pure) {
    (true, true) => Bucket::SmallPure,
    (true, false) => Bucket::SmallSideEffects,
    (false, true) => Bucket::BigPure,
    (false, false) => Bucket::BigSideEffects,
  }
}

/// Number of positions where the signatures disagree. With
/// `enforce_subset`, any entry needed by `source` but missing from
/// `target` makes the pair unmergeable.
fn signature_distance(source: &BitSet, target: &BitSet, enforce_subset: bool) -> u32 {
  if enforce_subset && !source.is_subset_of(target) {
    return INFINITE_DISTANCE;
  }
  source.difference_count(target)
}

/// Scans the target buckets in order for the closest live chunk. A chunk
/// at distance 0 or 1 is taken on the spot; otherwise the first chunk at
/// the smallest finite distance wins.
fn find_closest_target(
  descriptions: &[ChunkDescription],
  partition: &ChunkPartition,
  source_index: usize,
  target_buckets: &[Bucket],
) -> Option<usize> {
  let source = &descriptions[source_index];
  let mut closest = None;
  let mut closest_distance = INFINITE_DISTANCE;
  for &bucket in target_buckets {
    for &(target_index, epoch) in partition.list(bucket) {
      if target_index == source_index {
        continue;
      }
      let target = &descriptions[target_index];
      if !target.is_live(bucket, epoch) {
        continue;
      }
      // A chunk with side effects must not end up loaded under entries it
      // was not needed by, so its signature has to stay a superset of
      // whatever it absorbs or joins.
      let distance = if source.pure {
        signature_distance(&source.signature, &target.signature, !target.pure)
      } else {
        signature_distance(&target.signature, &source.signature, true)
      };
      if distance <= 1 {
        return Some(target_index);
      }
      if distance < closest_distance {
        closest_distance = distance;
        closest = Some(target_index);
      }
    }
  }
  closest
}

fn merge_into(
  descriptions: &mut [ChunkDescription],
  partition: &mut ChunkPartition,
  source_index: usize,
  target_index: usize,
  min_chunk_size: usize,
) {
  let source_modules = std::mem::take(&mut descriptions[source_index].modules);
  let source_signature = descriptions[source_index].signature.clone();
  let source_size = descriptions[source_index].size;
  let source_pure = descriptions[source_index].pure;
  descriptions[source_index].merged = true;

  let target = &mut descriptions[target_index];
  target.modules.extend(source_modules);
  target.size += source_size;
  target.pure &= source_pure;
  target.signature.union(&source_signature);
  // Re-insertion appends even when the bucket is unchanged, mirroring a
  // delete-then-add on an insertion-ordered set.
  target.bucket = bucket_for(target.size, target.pure, min_chunk_size);
  target.epoch += 1;
  partition.insert(descriptions, target_index);
}

fn merge_pass(
  descriptions: &mut [ChunkDescription],
  partition: &mut ChunkPartition,
  source_bucket: Bucket,
  target_buckets: &[Bucket],
  min_chunk_size: usize,
) {
  let mut position = 0;
  while position < partition.list(source_bucket).len() {
    let (source_index, epoch) = partition.list(source_bucket)[position];
    position += 1;
    if !descriptions[source_index].is_live(source_bucket, epoch) {
      continue;
    }
    let Some(target_index) =
      find_closest_target(descriptions, partition, source_index, target_buckets)
    else {
      continue;
    };
    merge_into(descriptions, partition, source_index, target_index, min_chunk_size);
  }
}

impl ChunkAssigner<'_> {
  /// Merges chunks below the minimum size into the least disruptive
  /// compatible neighbor: first the small side-effect chunks into pure
  /// targets whose signature they already cover, then the small pure
  /// chunks into anything whose signature is close enough.
  pub(super) fn merge_small_chunks(
    &self,
    chunk_modules_by_signature: FxIndexMap<BitSet, Vec<ModuleIdx>>,
  ) -> Vec<Chunk> {
    let min_chunk_size = self.options.min_chunk_size as usize;

    let mut descriptions = chunk_modules_by_signature
      .into_iter()
      .map(|(signature, modules)| {
        let mut size = 0;
        let mut pure = true;
        for &module_idx in &modules {
          let module =
            self.modules[module_idx].as_normal().expect("chunks only contain normal modules");
          size += module.size();
          pure &= !module.side_effects.has_side_effects();
        }
        ChunkDescription {
          modules,
          signature,
          size,
          pure,
          bucket: bucket_for(size, pure, min_chunk_size),
          epoch: 0,
          merged: false,
        }
      })
      .collect_vec();

    // Buckets start sorted by ascending size; the sort is stable, so equal
    // sizes keep grouping order.
    let mut partition = ChunkPartition::default();
    for index in (0..descriptions.len()).sorted_by_key(|&index| descriptions[index].size) {
      partition.insert(&descriptions, index);
    }

    tracing::debug!(
      "merging chunks smaller than {}: {} small with side effects, {} small pure, {} big with side effects, {} big pure",
      pretty_bytes(min_chunk_size),
      partition.small_side_effects.len(),
      partition.small_pure.len(),
      partition.big_side_effects.len(),
      partition.big_pure.len(),
    );

    merge_pass(
      &mut descriptions,
      &mut partition,
      Bucket::SmallSideEffects,
      &[Bucket::SmallPure, Bucket::BigPure],
      min_chunk_size,
    );
    merge_pass(
      &mut descriptions,
      &mut partition,
      Bucket::SmallPure,
      &[Bucket::SmallPure, Bucket::BigSideEffects, Bucket::BigPure],
      min_chunk_size,
    );

    tracing::debug!(
      "{} small chunks could not be merged",
      partition.live_len(&descriptions, Bucket::SmallSideEffects)
        + partition.live_len(&descriptions, Bucket::SmallPure),
    );

    let mut chunks = Vec::new();
    for bucket in
      [Bucket::SmallSideEffects, Bucket::SmallPure, Bucket::BigSideEffects, Bucket::BigPure]
    {
      for position in 0..partition.list(bucket).len() {
        let (index, epoch) = partition.list(bucket)[position];
        if !descriptions[index].is_live(bucket, epoch) {
          continue;
        }
        chunks.push(Chunk::new(None, std::mem::take(&mut descriptions[index].modules)));
      }
    }
    chunks
  }
}

#[cfg(test)]
mod tests {
  use bundlet_utils::bitset::BitSet;

  use super::{signature_distance, INFINITE_DISTANCE};

  fn signature(pattern: &str) -> BitSet {
    let mut ret = BitSet::new(pattern.len() as u32);
    for (position, char) in pattern.char_indices() {
      if char == 'X' {
        ret.set_bit(position as u32);
      }
    }
    ret
  }

  #[test]
  fn distance_of_identical_signatures_is_zero() {
    assert_eq!(signature_distance(&signature("X_X_"), &signature("X_X_"), true), 0);
    assert_eq!(signature_distance(&signature("X_X_"), &signature("X_X_"), false), 0);
  }

  #[test]
  fn distance_counts_differing_positions() {
    assert_eq!(signature_distance(&signature("__XX"), &signature("XXXX"), false), 2);
    assert_eq!(signature_distance(&signature("XX__"), &signature("__XX"), false), 4);
  }

  #[test]
  fn enforce_subset_rejects_sources_needing_more() {
    // The source needs the first entry, the target does not provide it.
    assert_eq!(
      signature_distance(&signature("X_"), &signature("_X"), true),
      INFINITE_DISTANCE
    );
    // The other direction only counts the difference.
    assert_eq!(signature_distance(&signature("_X"), &signature("XX"), true), 1);
  }

  #[test]
  fn merged_signatures_are_position_wise_or() {
    let mut merged = signature("X__X");
    merged.union(&signature("_X_X"));
    assert_eq!(merged, signature("XX_X"));

    // Commutative, associative, idempotent.
    let mut other_way = signature("_X_X");
    other_way.union(&signature("X__X"));
    assert_eq!(merged, other_way);

    let mut twice = merged.clone();
    twice.union(&signature("_X_X"));
    assert_eq!(twice, merged);
  }
}

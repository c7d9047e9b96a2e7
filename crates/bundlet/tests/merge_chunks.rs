mod common;

use bundlet::{assign_chunks, AssignerOptions, Chunk, ManualChunkAliasByEntry};
use common::GraphBuilder;

fn options(min_chunk_size: u32) -> AssignerOptions {
  AssignerOptions { min_chunk_size, ..Default::default() }
}

#[test]
fn small_pure_chunk_merges_into_big_pure_target() {
  let mut graph = GraphBuilder::new();
  let a = graph.module("a.js", 50, false);
  let b = graph.module("b.js", 2000, false);
  let shared = graph.module("shared.js", 10_000, false);
  graph.depend(a, shared);
  graph.depend(b, shared);
  let modules = graph.build();

  // `a` (signature `X_`) is one position away from `shared` (`XX`); the
  // distance-1 short circuit takes the first such target.
  let chunks =
    assign_chunks(&modules, &[a, b], &ManualChunkAliasByEntry::default(), &options(1000));
  assert_eq!(
    chunks,
    vec![Chunk::new(None, vec![b]), Chunk::new(None, vec![shared, a])]
  );
}

#[test]
fn small_side_effect_chunk_stays_without_compatible_target() {
  let mut graph = GraphBuilder::new();
  let a = graph.module("a.js", 50, true);
  let b = graph.module("b.js", 2000, false);
  let modules = graph.build();

  // The only candidate (`_X`) lacks the entry the side-effect chunk needs,
  // so nothing merges.
  let chunks =
    assign_chunks(&modules, &[a, b], &ManualChunkAliasByEntry::default(), &options(1000));
  assert_eq!(chunks, vec![Chunk::new(None, vec![a]), Chunk::new(None, vec![b])]);
}

#[test]
fn side_effect_chunks_never_gain_entries() {
  let mut graph = GraphBuilder::new();
  let a = graph.module("a.js", 50, true);
  let b = graph.module("b.js", 60, true);
  let shared = graph.module("shared.js", 10_000, false);
  graph.depend(a, shared);
  graph.depend(b, shared);
  let modules = graph.build();

  // Merging either small side-effect chunk into the wider pure chunk would
  // run its side effects under the other entry as well; both stay put.
  let chunks =
    assign_chunks(&modules, &[a, b], &ManualChunkAliasByEntry::default(), &options(1000));
  assert_eq!(
    chunks,
    vec![
      Chunk::new(None, vec![a]),
      Chunk::new(None, vec![b]),
      Chunk::new(None, vec![shared]),
    ]
  );
}

#[test]
fn small_pure_chunks_collapse_into_a_shared_target() {
  let mut graph = GraphBuilder::new();
  let a = graph.module("a.js", 50, false);
  let b = graph.module("b.js", 60, false);
  let shared = graph.module("shared.js", 10_000, false);
  graph.depend(a, shared);
  graph.depend(b, shared);
  let modules = graph.build();

  // Pure sources may widen freely: both entry chunks fold into the shared
  // chunk one after the other, in ascending size order.
  let chunks =
    assign_chunks(&modules, &[a, b], &ManualChunkAliasByEntry::default(), &options(1000));
  assert_eq!(chunks, vec![Chunk::new(None, vec![shared, a, b])]);
}

#[test]
fn side_effect_chunk_merges_into_covering_pure_target() {
  let mut graph = GraphBuilder::new();
  let a = graph.module("a.js", 10, false);
  let b = graph.module("b.js", 2000, false);
  let effectful = graph.module("effectful.js", 50, true);
  let lib = graph.module("lib.js", 10_000, false);
  graph.depend(a, effectful);
  graph.depend(b, effectful);
  graph.depend(a, lib);
  let modules = graph.build();

  // `effectful` needs both entries (`XX`); the pure chunk `[b]` (`_X`) is
  // covered by that signature, so the merge leaves the side-effect
  // signature untouched. The merged chunk now has side effects and is
  // re-bucketed accordingly.
  let chunks =
    assign_chunks(&modules, &[a, b], &ManualChunkAliasByEntry::default(), &options(1000));
  assert_eq!(
    chunks,
    vec![Chunk::new(None, vec![b, effectful]), Chunk::new(None, vec![a, lib])]
  );
}

#[test]
fn merged_chunks_keep_merging_while_small() {
  let mut graph = GraphBuilder::new();
  let a = graph.module("a.js", 50, false);
  let b = graph.module("b.js", 5000, false);
  let shared = graph.module("shared.js", 100, false);
  graph.depend(a, shared);
  graph.depend(b, shared);
  let modules = graph.build();

  // `a` first folds into the still-small `shared` chunk; the grown chunk
  // is appended back to the small pure bucket and picked up again, ending
  // up inside `b`'s chunk.
  let chunks =
    assign_chunks(&modules, &[a, b], &ManualChunkAliasByEntry::default(), &options(1000));
  assert_eq!(chunks, vec![Chunk::new(None, vec![b, shared, a])]);
}

#[test]
fn zero_min_chunk_size_disables_merging() {
  let mut graph = GraphBuilder::new();
  let a = graph.module("a.js", 1, false);
  let b = graph.module("b.js", 1, false);
  let shared = graph.module("shared.js", 1, false);
  graph.depend(a, shared);
  graph.depend(b, shared);
  let modules = graph.build();

  let chunks = assign_chunks(&modules, &[a, b], &ManualChunkAliasByEntry::default(), &options(0));
  assert_eq!(
    chunks,
    vec![
      Chunk::new(None, vec![a]),
      Chunk::new(None, vec![shared]),
      Chunk::new(None, vec![b]),
    ]
  );
}

/// Knobs of the chunk assignment, already normalized by the caller.
#[derive(Debug, Clone)]
pub struct AssignerOptions {
  /// Automatic chunks smaller than this many bytes are merged into a
  /// compatible neighbor. `0` keeps every signature group as its own chunk.
  pub min_chunk_size: u32,
  /// How many dynamically dependent entries the already-loaded check walks
  /// before giving up. Raising it elides more attributions at quadratic
  /// cost; the output contract assumes the default.
  pub max_checked_dependent_entries: usize,
}

impl Default for AssignerOptions {
  fn default() -> Self {
    Self { min_chunk_size: 0, max_checked_dependent_entries: 3 }
  }
}

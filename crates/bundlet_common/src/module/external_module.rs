use arcstr::ArcStr;

use crate::ModuleIdx;

/// An import left to the host environment. Externals terminate every
/// traversal and are never placed into a chunk.
#[derive(Debug)]
pub struct ExternalModule {
  pub idx: ModuleIdx,
  pub name: ArcStr,
}

impl ExternalModule {
  pub fn new(idx: ModuleIdx, name: ArcStr) -> Self {
    Self { idx, name }
  }
}

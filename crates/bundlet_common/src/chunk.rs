use arcstr::ArcStr;

use crate::ModuleIdx;

/// An output grouping of modules emitted together.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Chunk {
  /// The manual chunk alias, or `None` for chunks created by signature
  /// grouping.
  pub name: Option<ArcStr>,
  pub modules: Vec<ModuleIdx>,
}

impl Chunk {
  pub fn new(name: Option<ArcStr>, modules: Vec<ModuleIdx>) -> Self {
    Self { name, modules }
  }
}

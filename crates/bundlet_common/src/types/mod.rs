pub mod import_kind;
pub mod import_record;
pub mod module_table;
pub mod raw_idx;
pub mod side_effects;

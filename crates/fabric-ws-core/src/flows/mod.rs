//! Batch flows. Both run items sequentially and record a per-item outcome;
//! only fatal errors (validation, listing for delete) return `Err`.

pub mod create;
pub mod delete;

pub use create::{create_all, run_create};
pub use delete::{delete_exact, run_delete};

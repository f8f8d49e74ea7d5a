//! reviseflow
//!
//! Crate raíz del workspace:
//! - Re-exporta `revise_core` (engine, auditoría, hashing).
//! - Expone `errors` para los errores de aplicación.
//! - Expone `report` para serializar el resultado de un run.
//!
//! Puede usarse desde `main.rs` o por otros crates/clientes.

pub mod errors;
pub mod report;

pub use report::ExecutionReport;
pub use revise_core;
pub use revise_core::hashing::canonical_json;
pub use revise_core::hashing::canonical_json::to_canonical_json;

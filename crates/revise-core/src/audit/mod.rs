//! Registro de auditoría y cadena de hashes.
//!
//! Rol en el flujo:
//! - El `FlowEngine` agrega un `AuditEntry` por cada resultado de fase a un
//!   `AuditLog` append-only, propio de cada ejecución.
//! - `chain` pliega la secuencia en un único digest (`ChainRoot`) mediante
//!   hashing secuencial; cualquier alteración, inserción, borrado o
//!   reordenamiento cambia la raíz.

mod chain;
mod entry;
mod store;

pub use chain::{canonical_payload, chain_links, compute_root, first_divergence, verify_root, ChainOptions, ChainRoot};
pub use entry::{AuditEntry, AuditPhase, AuditRecord};
pub use store::AuditLog;

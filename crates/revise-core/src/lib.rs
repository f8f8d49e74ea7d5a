//! revise-core: motor draft → critique → revise con registro de auditoría
//! encadenado.
//!
//! - `engine`: ejecución secuencial de steps con presupuesto de iteraciones.
//! - `audit`: entradas append-only y raíz de la cadena de hashes.
//! - `step`: descriptores y capacidades provistas por el usuario.
//! - `hashing`: JSON canónico y digests.
pub mod audit;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod hashing;
pub mod step;

pub use audit::{compute_root, AuditEntry, AuditLog, AuditPhase, AuditRecord, ChainOptions, ChainRoot};
pub use config::EngineConfig;
pub use engine::{EngineBuilder, FlowEngine, FlowExecution};
pub use errors::{ConfigError, FlowError, PhaseError};
pub use hashing::HashAlgorithm;
pub use step::{sync_critic, Critic, Drafter, FlowState, Issues, Reviser, Step, StepConfig};

//! Definiciones relacionadas a Steps.
//!
//! Un step es una terna de capacidades asíncronas provistas por el usuario:
//! - `Drafter`: produce el candidato inicial a partir del estado de entrada.
//! - `Critic`: evalúa un candidato y devuelve los problemas encontrados.
//! - `Reviser`: repara un candidato dados los problemas y el estado de
//!   entrada del step.
//!
//! Además declara opcionalmente su presupuesto (`max_iterations`) y la pausa
//! entre revise y critique (`delay_ms`); ver `StepConfig`.

mod capability;
mod config;
mod definition;

pub use capability::{issues_from_value, sync_critic, Critic, Drafter, Reviser, SyncCritic};
pub use config::StepConfig;
pub use definition::Step;

/// Estado opaco que atraviesa los steps. El engine nunca lo muta en sitio.
pub type FlowState = serde_json::Value;

/// Descriptores de problemas devueltos por una critique.
pub type Issues = Vec<serde_json::Value>;

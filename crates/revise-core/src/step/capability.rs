//! Capacidades draft/critique/revise.
//!
//! Cualquier closure `Fn` que devuelva un future con el `Result` adecuado
//! implementa la capacidad correspondiente; el error puede ser cualquier tipo
//! convertible en `PhaseError` (`String`, `&str`, errores propios...).
use std::future::Future;

use async_trait::async_trait;
use serde_json::Value;

use super::{FlowState, Issues};
use crate::errors::PhaseError;

#[async_trait]
pub trait Drafter: Send + Sync {
    async fn draft(&self, state: FlowState) -> Result<FlowState, PhaseError>;
}

/// La critique devuelve un JSON arbitrario; ver `issues_from_value` para la
/// interpretación.
#[async_trait]
pub trait Critic: Send + Sync {
    async fn critique(&self, state: FlowState) -> Result<Value, PhaseError>;
}

#[async_trait]
pub trait Reviser: Send + Sync {
    async fn revise(&self, state: FlowState, issues: Issues, step_input: FlowState) -> Result<FlowState, PhaseError>;
}

#[async_trait]
impl<F, Fut, E> Drafter for F
    where F: Fn(FlowState) -> Fut + Send + Sync + 'static,
          Fut: Future<Output = Result<FlowState, E>> + Send + 'static,
          E: Into<PhaseError> + Send + 'static
{
    async fn draft(&self, state: FlowState) -> Result<FlowState, PhaseError> {
        (self)(state).await.map_err(Into::into)
    }
}

#[async_trait]
impl<F, Fut, E> Critic for F
    where F: Fn(FlowState) -> Fut + Send + Sync + 'static,
          Fut: Future<Output = Result<Value, E>> + Send + 'static,
          E: Into<PhaseError> + Send + 'static
{
    async fn critique(&self, state: FlowState) -> Result<Value, PhaseError> {
        (self)(state).await.map_err(Into::into)
    }
}

#[async_trait]
impl<F, Fut, E> Reviser for F
    where F: Fn(FlowState, Issues, FlowState) -> Fut + Send + Sync + 'static,
          Fut: Future<Output = Result<FlowState, E>> + Send + 'static,
          E: Into<PhaseError> + Send + 'static
{
    async fn revise(&self, state: FlowState, issues: Issues, step_input: FlowState) -> Result<FlowState, PhaseError> {
        (self)(state, issues, step_input).await.map_err(Into::into)
    }
}

/// Adaptador para critiques síncronas e infalibles.
pub struct SyncCritic<F>(F);

/// Envuelve una función `&FlowState -> Value` como `Critic`.
pub fn sync_critic<F>(f: F) -> SyncCritic<F>
    where F: Fn(&FlowState) -> Value + Send + Sync + 'static
{
    SyncCritic(f)
}

#[async_trait]
impl<F> Critic for SyncCritic<F> where F: Fn(&FlowState) -> Value + Send + Sync + 'static
{
    async fn critique(&self, state: FlowState) -> Result<Value, PhaseError> {
        Ok((self.0)(&state))
    }
}

/// Interpreta el resultado de una critique. Sólo un arreglo JSON cuenta como
/// lista de problemas; `null`, `false`, objetos, números o strings equivalen a
/// "sin problemas".
pub fn issues_from_value(value: Value) -> Issues {
    match value {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

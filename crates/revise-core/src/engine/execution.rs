//! Handle de una ejecución en curso.
//!
//! El resultado y el registro de auditoría viajan por separado: el future
//! resuelve al estado final (o al error), y el `AuditLog` compartido se
//! puede leer en cualquier momento, antes, durante o después del fallo.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::audit::{AuditEntry, AuditLog, ChainRoot};
use crate::errors::FlowError;
use crate::step::FlowState;

/// Future de una ejecución completa.
pub type RunFuture = Pin<Box<dyn Future<Output = Result<FlowState, FlowError>> + Send + 'static>>;

#[must_use = "a FlowExecution does nothing unless awaited or spawned"]
pub struct FlowExecution {
    run_id: Uuid,
    audit: AuditLog,
    outcome: RunFuture,
}

impl FlowExecution {
    pub(crate) fn new(run_id: Uuid, audit: AuditLog, outcome: RunFuture) -> Self {
        Self { run_id, audit, outcome }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Handle del registro; clonarlo permite seguir leyendo tras `.await`.
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        self.audit.entries()
    }

    /// Raíz calculada sobre las entradas actuales.
    pub fn audit_root(&self) -> ChainRoot {
        self.audit.root()
    }

    /// Separa el handle del registro del future de la ejecución.
    pub fn into_parts(self) -> (AuditLog, RunFuture) {
        (self.audit, self.outcome)
    }

    /// Arranca la ejecución en el runtime de tokio sin esperar a que el
    /// llamador haga `.await`. Debe invocarse dentro de un runtime.
    pub fn spawn(self) -> (AuditLog, JoinHandle<Result<FlowState, FlowError>>) {
        let handle = tokio::spawn(self.outcome);
        (self.audit, handle)
    }
}

impl Future for FlowExecution {
    type Output = Result<FlowState, FlowError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.get_mut().outcome.as_mut().poll(cx)
    }
}

impl fmt::Debug for FlowExecution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowExecution")
         .field("run_id", &self.run_id)
         .field("entries", &self.audit.len())
         .finish_non_exhaustive()
    }
}

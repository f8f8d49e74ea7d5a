//! Reporte serializable de una ejecución.
//!
//! Es la forma que usan los adaptadores externos (CLI, HTTP) para exponer un
//! run: `{runId, finalState, auditEntries, auditRoot, error}` en camelCase.

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use revise_core::{AuditEntry, AuditPhase, ChainRoot, FlowExecution};

use crate::errors::CoreError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReport {
    pub run_id: Uuid,
    pub final_state: Option<Value>,
    pub audit_entries: Vec<AuditEntry>,
    pub audit_root: ChainRoot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_phase: Option<AuditPhase>,
}

impl ExecutionReport {
    /// Espera la ejecución y captura su resultado junto al registro. Un run
    /// fallido no es un error aquí: queda descrito en `error`.
    pub async fn collect(execution: FlowExecution) -> Self {
        let run_id = execution.run_id();
        let audit = execution.audit().clone();
        let outcome = execution.await;
        let (final_state, error, failed_phase) = match outcome {
            Ok(state) => (Some(state), None, None),
            Err(e) => (None, Some(e.to_string()), Some(e.phase())),
        };
        Self { run_id,
               final_state,
               audit_entries: audit.entries(),
               audit_root: audit.root(),
               error,
               failed_phase }
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

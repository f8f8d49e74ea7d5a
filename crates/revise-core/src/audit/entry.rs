//! Tipos de entrada de auditoría.
//!
//! `AuditRecord` es lo que produce el engine al cerrar una fase (sin
//! timestamp); el `AuditLog` le asigna el instante al agregarlo y lo congela
//! como `AuditEntry`.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::step::FlowState;

/// Resultado observable de una fase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditPhase {
    /// El step no declara las tres capacidades. Terminal.
    #[serde(rename = "invalid")]
    Invalid,
    /// Falló el draft. Terminal.
    #[serde(rename = "draft:error")]
    DraftError,
    /// La primera critique no encontró problemas.
    #[serde(rename = "draft:accepted")]
    DraftAccepted,
    /// Falló una critique. Terminal.
    #[serde(rename = "critique:error")]
    CritiqueError,
    /// Falló un revise. Terminal.
    #[serde(rename = "revise:error")]
    ReviseError,
    /// Una critique posterior a un revise quedó limpia.
    #[serde(rename = "revise:accepted")]
    ReviseAccepted,
    /// Se agotó el presupuesto con problemas pendientes; el run continúa.
    #[serde(rename = "revise:capped")]
    ReviseCapped,
}

impl AuditPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditPhase::Invalid => "invalid",
            AuditPhase::DraftError => "draft:error",
            AuditPhase::DraftAccepted => "draft:accepted",
            AuditPhase::CritiqueError => "critique:error",
            AuditPhase::ReviseError => "revise:error",
            AuditPhase::ReviseAccepted => "revise:accepted",
            AuditPhase::ReviseCapped => "revise:capped",
        }
    }

    /// `true` para las fases que detienen el run.
    pub fn is_failure(&self) -> bool {
        matches!(self,
                 AuditPhase::Invalid | AuditPhase::DraftError | AuditPhase::CritiqueError | AuditPhase::ReviseError)
    }

    /// `true` para las fases que cierran un step y permiten avanzar.
    pub fn is_terminal_success(&self) -> bool {
        matches!(self, AuditPhase::DraftAccepted | AuditPhase::ReviseAccepted | AuditPhase::ReviseCapped)
    }
}

impl std::fmt::Display for AuditPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entrada pendiente de agregar (sin timestamp).
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRecord {
    pub step_index: usize,
    pub phase: AuditPhase,
    pub input_state: Option<FlowState>,
    pub draft_state: Option<FlowState>,
    pub final_state: Option<FlowState>,
    pub critiques: Option<Vec<Value>>,
    pub iterations: Option<u32>,
    pub error: Option<String>,
}

impl AuditRecord {
    pub fn new(step_index: usize, phase: AuditPhase) -> Self {
        Self { step_index,
               phase,
               input_state: None,
               draft_state: None,
               final_state: None,
               critiques: None,
               iterations: None,
               error: None }
    }

    pub fn input_state(mut self, state: &FlowState) -> Self {
        self.input_state = Some(state.clone());
        self
    }

    pub fn draft_state(mut self, state: &FlowState) -> Self {
        self.draft_state = Some(state.clone());
        self
    }

    pub fn final_state(mut self, state: &FlowState) -> Self {
        self.final_state = Some(state.clone());
        self
    }

    pub fn critiques(mut self, critiques: &[Value]) -> Self {
        self.critiques = Some(critiques.to_vec());
        self
    }

    pub fn iterations(mut self, iterations: u32) -> Self {
        self.iterations = Some(iterations);
        self
    }

    pub fn error(mut self, error: impl std::fmt::Display) -> Self {
        self.error = Some(error.to_string());
        self
    }
}

/// Registro inmutable de un resultado de fase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub step_index: usize,
    pub timestamp: DateTime<Utc>,
    pub phase: AuditPhase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_state: Option<FlowState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft_state: Option<FlowState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_state: Option<FlowState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critiques: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditEntry {
    pub(crate) fn from_record(record: AuditRecord, timestamp: DateTime<Utc>) -> Self {
        Self { step_index: record.step_index,
               timestamp,
               phase: record.phase,
               input_state: record.input_state,
               draft_state: record.draft_state,
               final_state: record.final_state,
               critiques: record.critiques,
               iterations: record.iterations,
               error: record.error }
    }
}

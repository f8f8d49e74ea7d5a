//! Errores del core.
//!
//! `FlowError` es la taxonomía terminal de una ejecución: cualquier variante
//! detiene el run en el primer fallo. Las variantes de fase envuelven el error
//! original de la capacidad del usuario como `source`, sin reescribir su
//! mensaje.

use thiserror::Error;

use crate::audit::AuditPhase;

/// Error opaco devuelto por las capacidades draft/critique/revise.
pub type PhaseError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("invalid step definition at index {step_index}: missing {missing}")]
    InvalidStepDefinition { step_index: usize, missing: String },
    #[error("draft failed at step {step_index}: {source}")]
    DraftFailure { step_index: usize, source: PhaseError },
    #[error("critique failed at step {step_index}: {source}")]
    CritiqueFailure { step_index: usize, source: PhaseError },
    #[error("revise failed at step {step_index}: {source}")]
    ReviseFailure { step_index: usize, source: PhaseError },
}

impl FlowError {
    /// Índice del step que originó el fallo.
    pub fn step_index(&self) -> usize {
        match self {
            FlowError::InvalidStepDefinition { step_index, .. }
            | FlowError::DraftFailure { step_index, .. }
            | FlowError::CritiqueFailure { step_index, .. }
            | FlowError::ReviseFailure { step_index, .. } => *step_index,
        }
    }

    /// Fase de auditoría registrada para este fallo.
    pub fn phase(&self) -> AuditPhase {
        match self {
            FlowError::InvalidStepDefinition { .. } => AuditPhase::Invalid,
            FlowError::DraftFailure { .. } => AuditPhase::DraftError,
            FlowError::CritiqueFailure { .. } => AuditPhase::CritiqueError,
            FlowError::ReviseFailure { .. } => AuditPhase::ReviseError,
        }
    }
}

/// Valores de configuración que no se pudieron interpretar.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn phase_failures_keep_original_source() {
        let err = FlowError::ReviseFailure { step_index: 2, source: "model refused".into() };
        assert_eq!(err.to_string(), "revise failed at step 2: model refused");
        assert_eq!(err.source().map(|s| s.to_string()), Some("model refused".to_string()));
        assert_eq!(err.step_index(), 2);
        assert_eq!(err.phase(), AuditPhase::ReviseError);
    }

    #[test]
    fn invalid_step_names_missing_capabilities() {
        let err = FlowError::InvalidStepDefinition { step_index: 1, missing: "draft".into() };
        assert_eq!(err.to_string(), "invalid step definition at index 1: missing draft");
        assert_eq!(err.phase(), AuditPhase::Invalid);
    }
}

//! Core FlowEngine implementation

use std::time::Duration;

use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::audit::{AuditLog, AuditPhase, AuditRecord};
use crate::config::EngineConfig;
use crate::engine::{EngineBuilder, FlowExecution};
use crate::errors::{ConfigError, FlowError};
use crate::step::{issues_from_value, FlowState, Step, StepConfig};

/// Motor de ejecución draft → critique → revise.
///
/// Cada llamada a `execute` crea un run independiente con su propio
/// `AuditLog`; el engine no guarda estado mutable entre runs, así que se
/// puede compartir y usar en paralelo.
#[derive(Debug, Clone, Default)]
pub struct FlowEngine {
    config: EngineConfig,
}

impl FlowEngine {
    /// Engine con defaults `{max_iterations: 3, delay_ms: 0}`, SHA-256 y
    /// timestamps dentro de la cadena.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Engine configurado desde variables `REVISEFLOW_*` (y `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        EngineConfig::from_env().map(Self::with_config)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Ejecuta `steps` en orden a partir de `initial_state`.
    ///
    /// No corre nada hasta que el handle se espera (o se hace `spawn`); el
    /// registro de auditoría ya está disponible desde el handle.
    pub fn execute(&self, initial_state: FlowState, steps: Vec<Step>) -> FlowExecution {
        let run_id = Uuid::new_v4();
        let audit = AuditLog::new(self.config.chain);
        let run = Run { run_id,
                        audit: audit.clone(),
                        defaults: self.config.step_defaults };
        FlowExecution::new(run_id, audit, Box::pin(run.execute(initial_state, steps)))
    }
}

/// Estado de un run: identificador, registro propio y defaults de step.
struct Run {
    run_id: Uuid,
    audit: AuditLog,
    defaults: StepConfig,
}

impl Run {
    async fn execute(self, initial_state: FlowState, steps: Vec<Step>) -> Result<FlowState, FlowError> {
        let run_id = self.run_id;
        debug!("execute:start run_id={run_id} steps={}", steps.len());

        let mut current = initial_state;
        for (step_index, step) in steps.iter().enumerate() {
            current = match self.run_step(step_index, step, current).await {
                Ok(state) => state,
                Err(e) => {
                    error!("execute:failed run_id={run_id} step_index={step_index} phase={} err={e}", e.phase());
                    return Err(e);
                }
            };
        }

        info!("execute:done run_id={run_id} steps={} entries={}", steps.len(), self.audit.len());
        Ok(current)
    }

    async fn run_step(&self, step_index: usize, step: &Step, input: FlowState) -> Result<FlowState, FlowError> {
        let run_id = self.run_id;
        let label = step.label_str().unwrap_or("-");

        let Some((drafter, critic, reviser)) = step.capabilities() else {
            let missing = step.missing_capabilities().join(", ");
            self.audit.append(AuditRecord::new(step_index, AuditPhase::Invalid).input_state(&input)
                                                                             .error(format!("missing {missing}")));
            return Err(FlowError::InvalidStepDefinition { step_index, missing });
        };

        let config = step.resolve_config(&self.defaults);
        debug!("step:start run_id={run_id} step_index={step_index} label={label} max_iterations={} delay_ms={}",
               config.max_iterations,
               config.delay_ms);

        let drafted = match drafter.draft(input.clone()).await {
            Ok(state) => state,
            Err(source) => {
                self.audit.append(AuditRecord::new(step_index, AuditPhase::DraftError).input_state(&input)
                                                                                    .error(&source));
                return Err(FlowError::DraftFailure { step_index, source });
            }
        };

        let mut candidate = drafted.clone();
        let mut critiques_run: u32 = 0;
        let mut revisions: u32 = 0;
        loop {
            critiques_run += 1;
            let verdict = match critic.critique(candidate.clone()).await {
                Ok(v) => v,
                Err(source) => {
                    self.audit.append(AuditRecord::new(step_index, AuditPhase::CritiqueError).input_state(&input)
                                                                                           .draft_state(&drafted)
                                                                                           .iterations(revisions)
                                                                                           .error(&source));
                    return Err(FlowError::CritiqueFailure { step_index, source });
                }
            };
            let issues = issues_from_value(verdict);

            // Sin problemas gana siempre sobre el tope: se evalúa antes.
            if issues.is_empty() {
                let phase = if revisions == 0 { AuditPhase::DraftAccepted } else { AuditPhase::ReviseAccepted };
                self.audit.append(AuditRecord::new(step_index, phase).input_state(&input)
                                                                     .draft_state(&drafted)
                                                                     .critiques(&[])
                                                                     .final_state(&candidate)
                                                                     .iterations(revisions));
                debug!("step:done run_id={run_id} step_index={step_index} phase={phase} iterations={revisions}");
                return Ok(candidate);
            }

            if critiques_run >= config.max_iterations {
                warn!("step:capped run_id={run_id} step_index={step_index} label={label} iterations={critiques_run} \
                       unresolved={}",
                      issues.len());
                self.audit.append(AuditRecord::new(step_index, AuditPhase::ReviseCapped).input_state(&input)
                                                                                      .draft_state(&drafted)
                                                                                      .critiques(&issues)
                                                                                      .final_state(&candidate)
                                                                                      .iterations(critiques_run));
                return Ok(candidate);
            }

            debug!("step:revise run_id={run_id} step_index={step_index} attempt={} issues={}",
                   revisions + 1,
                   issues.len());
            candidate = match reviser.revise(candidate, issues.clone(), input.clone()).await {
                Ok(state) => state,
                Err(source) => {
                    self.audit.append(AuditRecord::new(step_index, AuditPhase::ReviseError).input_state(&input)
                                                                                         .draft_state(&drafted)
                                                                                         .critiques(&issues)
                                                                                         .iterations(revisions)
                                                                                         .error(&source));
                    return Err(FlowError::ReviseFailure { step_index, source });
                }
            };
            revisions += 1;

            if config.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(config.delay_ms)).await;
            }
        }
    }
}

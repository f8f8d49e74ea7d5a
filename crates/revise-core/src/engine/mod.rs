//! Engine module for FlowEngine implementation
//!
//! Provides the core engine, its builder and the execution handle returned by
//! `FlowEngine::execute`.

pub mod builder;
pub mod core;
pub mod execution;

pub use builder::EngineBuilder;
pub use core::FlowEngine;
pub use execution::{FlowExecution, RunFuture};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditPhase;
    use crate::errors::{FlowError, PhaseError};
    use crate::step::{sync_critic, FlowState, Issues, Step};
    use serde_json::json;

    // Step que incrementa `n` y se acepta cuando llega a `target`
    fn counter_step(target: i64) -> Step {
        Step::new(|s: FlowState| async move { Ok::<_, PhaseError>(json!({"n": s["n"].as_i64().unwrap_or(0) + 1})) },
                  sync_critic(move |s: &FlowState| {
                      if s["n"].as_i64() >= Some(target) { json!([]) } else { json!(["below target"]) }
                  }),
                  |s: FlowState, _i: Issues, _input: FlowState| async move {
                      Ok::<_, PhaseError>(json!({"n": s["n"].as_i64().unwrap_or(0) + 1}))
                  })
    }

    #[tokio::test]
    async fn steps_thread_state_in_order() {
        let engine = FlowEngine::new();
        let exec = engine.execute(json!({"n": 0}), vec![counter_step(1), counter_step(3)]);
        let audit = exec.audit().clone();
        let out = exec.await.expect("run should complete");
        assert_eq!(out, json!({"n": 3}));
        // step 1: draft 2 -> revise 3
        assert_eq!(audit.phases(), vec![AuditPhase::DraftAccepted, AuditPhase::ReviseAccepted]);
        let second = &audit.entries()[1];
        assert_eq!(second.input_state, Some(json!({"n": 1})));
        assert_eq!(second.draft_state, Some(json!({"n": 2})));
        assert_eq!(second.iterations, Some(1));
    }

    #[tokio::test]
    async fn empty_step_list_returns_initial_state() {
        let exec = FlowEngine::new().execute(json!({"untouched": true}), Vec::new());
        let audit = exec.audit().clone();
        assert_eq!(exec.await.unwrap(), json!({"untouched": true}));
        assert!(audit.is_empty());
        assert!(audit.root().is_empty());
    }

    #[tokio::test]
    async fn nothing_runs_before_await() {
        let exec = FlowEngine::new().execute(json!({"n": 0}), vec![counter_step(1)]);
        assert!(exec.audit_entries().is_empty());
        let audit = exec.audit().clone();
        exec.await.unwrap();
        assert_eq!(audit.len(), 1);
    }

    #[tokio::test]
    async fn spawned_run_progresses_without_await_on_handle() {
        let exec = FlowEngine::new().execute(json!({"n": 0}), vec![counter_step(2)]);
        let run_id = exec.run_id();
        assert!(!run_id.is_nil());
        let (audit, handle) = exec.spawn();
        let out = handle.await.expect("task should not panic").expect("run should complete");
        assert_eq!(out, json!({"n": 2}));
        assert_eq!(audit.phases(), vec![AuditPhase::ReviseAccepted]);
    }

    #[tokio::test]
    async fn parts_keep_the_log_attached_to_the_future() {
        let exec = FlowEngine::new().execute(json!({"n": 0}), vec![counter_step(2)]);
        let (audit, outcome) = exec.into_parts();
        assert!(audit.is_empty());
        assert_eq!(outcome.await.unwrap(), json!({"n": 2}));
        assert_eq!(audit.phases(), vec![AuditPhase::ReviseAccepted]);
    }

    #[tokio::test]
    async fn engine_defaults_apply_when_step_has_no_override() {
        let engine = FlowEngine::builder().max_iterations(1).build();
        let exec = engine.execute(json!({"n": 0}), vec![counter_step(10)]);
        let audit = exec.audit().clone();
        assert_eq!(exec.await.unwrap(), json!({"n": 1}));
        let entry = audit.last().unwrap();
        assert_eq!(entry.phase, AuditPhase::ReviseCapped);
        assert_eq!(entry.iterations, Some(1));
    }

    #[tokio::test]
    async fn failure_reports_step_and_phase() {
        let failing = Step::new(|_s: FlowState| async move { Err::<FlowState, _>("no model") },
                                sync_critic(|_s: &FlowState| json!([])),
                                |s: FlowState, _i: Issues, _input: FlowState| async move { Ok::<_, PhaseError>(s) });
        let exec = FlowEngine::new().execute(json!({"n": 0}), vec![counter_step(1), failing]);
        let root_before = exec.audit_root();
        let audit = exec.audit().clone();
        let err = exec.await.unwrap_err();
        assert!(matches!(err, FlowError::DraftFailure { step_index: 1, .. }));
        assert_eq!(err.phase(), AuditPhase::DraftError);
        assert_eq!(audit.phases(), vec![AuditPhase::DraftAccepted, AuditPhase::DraftError]);
        assert_ne!(audit.root(), root_before);
    }
}

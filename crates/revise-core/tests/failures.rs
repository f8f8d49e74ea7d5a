
use std::error::Error as _;
use std::fmt;

use revise_core::{sync_critic, AuditPhase, FlowEngine, FlowError, FlowState, Issues, PhaseError, Step};
use serde_json::json;
use test_support::{counted_step, never_clears, Calls};

#[derive(Debug)]
struct QuotaExceeded;

impl fmt::Display for QuotaExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("quota exceeded")
    }
}

impl std::error::Error for QuotaExceeded {}

fn ok_draft(s: FlowState) -> impl std::future::Future<Output = Result<FlowState, PhaseError>> + Send {
    async move { Ok(json!({"drafted": s})) }
}

fn ok_revise(s: FlowState, _i: Issues, _input: FlowState)
             -> impl std::future::Future<Output = Result<FlowState, PhaseError>> + Send {
    async move { Ok(s) }
}

#[tokio::test]
async fn draft_error_is_recorded_once_and_not_retried() {
    let calls = Calls::default();
    let failing = Step::new(|_s: FlowState| async move { Err::<FlowState, _>(QuotaExceeded) },
                            sync_critic(|_s: &FlowState| json!([])),
                            ok_revise);
    let exec = FlowEngine::new().execute(json!({"in": 1}), vec![failing, counted_step(&calls, never_clears)]);
    let audit = exec.audit().clone();
    let err = exec.await.unwrap_err();

    assert!(matches!(err, FlowError::DraftFailure { step_index: 0, .. }));
    assert_eq!(err.source().map(|s| s.to_string()), Some("quota exceeded".into()));
    let entries = audit.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].phase, AuditPhase::DraftError);
    assert_eq!(entries[0].input_state, Some(json!({"in": 1})));
    assert_eq!(entries[0].error.as_deref(), Some("quota exceeded"));
    assert_eq!(calls.drafts(), 0);
}

#[tokio::test]
async fn critique_error_records_draft_and_input() {
    let failing = Step::new(ok_draft,
                            |_s: FlowState| async move { Err::<serde_json::Value, _>("rule engine down") },
                            ok_revise);
    let exec = FlowEngine::new().execute(json!(5), vec![failing]);
    let audit = exec.audit().clone();
    let err = exec.await.unwrap_err();

    assert!(matches!(err, FlowError::CritiqueFailure { step_index: 0, .. }));
    let entry = audit.last().unwrap();
    assert_eq!(entry.phase, AuditPhase::CritiqueError);
    assert_eq!(entry.input_state, Some(json!(5)));
    assert_eq!(entry.draft_state, Some(json!({"drafted": 5})));
    assert_eq!(entry.error.as_deref(), Some("rule engine down"));
    assert_eq!(audit.len(), 1);
}

#[tokio::test]
async fn revise_error_records_pending_critiques() {
    let failing = Step::new(ok_draft,
                            sync_critic(|_s: &FlowState| json!(["too vague"])),
                            |_s: FlowState, _i: Issues, _input: FlowState| async move {
                                Err::<FlowState, _>(String::from("reviser crashed"))
                            });
    let exec = FlowEngine::new().execute(json!("x"), vec![test_support::identity_step(), failing]);
    let audit = exec.audit().clone();
    let err = exec.await.unwrap_err();

    assert_eq!(err.step_index(), 1);
    assert_eq!(err.phase(), AuditPhase::ReviseError);
    assert_eq!(err.to_string(), "revise failed at step 1: reviser crashed");
    assert_eq!(audit.phases(), vec![AuditPhase::DraftAccepted, AuditPhase::ReviseError]);
    let entry = audit.last().unwrap();
    assert_eq!(entry.critiques, Some(vec![json!("too vague")]));
    assert_eq!(entry.draft_state, Some(json!({"drafted": "x"})));
    assert_eq!(entry.input_state, Some(json!("x")));
    assert!(entry.final_state.is_none());
}

#[tokio::test]
async fn failed_run_keeps_a_verifiable_trail() {
    let failing = Step::new(|_s: FlowState| async move { Err::<FlowState, _>("nope") },
                            sync_critic(|_s: &FlowState| json!([])),
                            ok_revise);
    let exec = FlowEngine::new().execute(json!({}), vec![test_support::identity_step(), failing]);
    let audit = exec.audit().clone();
    assert!(exec.await.is_err());

    let root = audit.root();
    assert!(!root.is_empty());
    assert!(audit.verify(&root));
    assert_eq!(audit.phases().iter().filter(|p| p.is_failure()).count(), 1);
}

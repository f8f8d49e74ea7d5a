//! Demo de `reviseflow`: ejecuta algunos flujos de ejemplo e imprime su
//! reporte JSON (`finalState`, `auditEntries`, `auditRoot`).
//!
//! La configuración por defecto de los steps se toma de `REVISEFLOW_*`
//! (ver `revise_core::config`).

use async_trait::async_trait;
use serde_json::{json, Value};

use reviseflow::errors::CoreError;
use reviseflow::ExecutionReport;
use revise_core::config::init_dotenv;
use revise_core::{sync_critic, Critic, FlowEngine, FlowState, Issues, PhaseError, Step};

/// Critique basada en reglas: el texto no debe superar `max_len` caracteres
/// ni contener palabras prohibidas.
struct StyleCritic {
    max_len: usize,
    banned: Vec<&'static str>,
}

#[async_trait]
impl Critic for StyleCritic {
    async fn critique(&self, state: FlowState) -> Result<Value, PhaseError> {
        let text = state["text"].as_str().ok_or("state has no text")?;
        let mut issues = Vec::new();
        if text.chars().count() > self.max_len {
            issues.push(json!({"rule": "max_len", "limit": self.max_len}));
        }
        for word in &self.banned {
            if text.contains(word) {
                issues.push(json!({"rule": "banned_word", "word": word}));
            }
        }
        Ok(Value::Array(issues))
    }
}

/// Borrador verboso que se va recortando en cada revise.
fn summary_step() -> Step {
    Step::new(|s: FlowState| async move {
                  let topic = s["topic"].as_str().unwrap_or("nothing").to_string();
                  Ok::<_, PhaseError>(json!({"topic": topic, "text": format!("basically, {topic} is really very interesting")}))
              },
              StyleCritic { max_len: 24,
                            banned: vec!["basically", "really"] },
              |s: FlowState, issues: Issues, _input: FlowState| async move {
                  let mut text = s["text"].as_str().unwrap_or_default().to_string();
                  for issue in &issues {
                      match issue["rule"].as_str() {
                          Some("banned_word") => {
                              let word = issue["word"].as_str().unwrap_or_default();
                              text = text.replace(&format!("{word}, "), "").replace(&format!("{word} "), "");
                          }
                          Some("max_len") => text = text.replace("very ", ""),
                          _ => {}
                      }
                  }
                  Ok::<_, PhaseError>(json!({"topic": s["topic"], "text": text}))
              }).label("summary")
}

/// Paso del ejemplo clásico: el draft debe ser impar.
fn odd_draft_step() -> Step {
    Step::new(|s: FlowState| async move {
                  let mut next = s.clone();
                  next["draft"] = json!(s["value"].as_i64().unwrap_or(0) + 1);
                  Ok::<_, PhaseError>(next)
              },
              sync_critic(|s: &FlowState| {
                  if s["draft"].as_i64().unwrap_or(0) % 2 == 0 { json!(["draft must be odd"]) } else { json!([]) }
              }),
              |s: FlowState, _i: Issues, _input: FlowState| async move {
                  let mut next = s.clone();
                  next["draft"] = json!(s["draft"].as_i64().unwrap_or(0) + 1);
                  Ok::<_, PhaseError>(next)
              }).label("odd-draft")
}

async fn print_report(name: &str, engine: &FlowEngine, initial: FlowState, steps: Vec<Step>) -> Result<(), CoreError> {
    let report = ExecutionReport::collect(engine.execute(initial, steps)).await;
    println!("--- {name} ---");
    println!("{}", report.to_json_pretty()?);
    if let Some(e) = &report.error {
        eprintln!("[{name}] run failed: {e}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    init_dotenv();
    let engine = FlowEngine::from_env()?;

    print_report("odd-draft", &engine, json!({"value": 0}), vec![odd_draft_step()]).await?;
    print_report("summary", &engine, json!({"topic": "rust"}), vec![summary_step()]).await?;
    print_report("capped",
                 &engine,
                 json!({"topic": "an extremely long topic name"}),
                 vec![summary_step().max_iterations(2)]).await?;
    print_report("invalid",
                 &engine,
                 json!({"value": 0}),
                 vec![odd_draft_step(), Step::empty().with_critique(sync_critic(|_s: &FlowState| json!([])))]).await?;
    Ok(())
}

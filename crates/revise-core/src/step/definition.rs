use std::fmt;
use std::sync::Arc;

use super::{Critic, Drafter, Reviser, StepConfig};

/// Descriptor de un step.
///
/// Las tres capacidades son opcionales a nivel de tipo para poder representar
/// descriptores incompletos (por ejemplo, deserializados o armados de forma
/// dinámica); el engine los rechaza con una entrada `invalid` antes de
/// ejecutar cualquier fase.
#[derive(Clone, Default)]
pub struct Step {
    draft: Option<Arc<dyn Drafter>>,
    critique: Option<Arc<dyn Critic>>,
    revise: Option<Arc<dyn Reviser>>,
    max_iterations: Option<u32>,
    delay_ms: Option<u64>,
    label: Option<String>,
}

impl Step {
    /// Step completo con la configuración por defecto del engine.
    pub fn new<D, C, R>(draft: D, critique: C, revise: R) -> Self
        where D: Drafter + 'static,
              C: Critic + 'static,
              R: Reviser + 'static
    {
        Self::empty().with_draft(draft).with_critique(critique).with_revise(revise)
    }

    /// Descriptor sin capacidades; inválido hasta completarlo.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_draft<D: Drafter + 'static>(mut self, draft: D) -> Self {
        self.draft = Some(Arc::new(draft));
        self
    }

    pub fn with_critique<C: Critic + 'static>(mut self, critique: C) -> Self {
        self.critique = Some(Arc::new(critique));
        self
    }

    pub fn with_revise<R: Reviser + 'static>(mut self, revise: R) -> Self {
        self.revise = Some(Arc::new(revise));
        self
    }

    /// Presupuesto propio; `0` se trata como `1`.
    pub fn max_iterations(mut self, n: u32) -> Self {
        self.max_iterations = Some(n);
        self
    }

    pub fn delay_ms(mut self, ms: u64) -> Self {
        self.delay_ms = Some(ms);
        self
    }

    /// Nombre usado sólo en logs.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label_str(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Combina los overrides del step con los defaults del engine.
    pub fn resolve_config(&self, defaults: &StepConfig) -> StepConfig {
        StepConfig::new(self.max_iterations.unwrap_or(defaults.max_iterations),
                        self.delay_ms.unwrap_or(defaults.delay_ms))
    }

    /// Nombres de las capacidades ausentes, en orden draft/critique/revise.
    pub fn missing_capabilities(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.draft.is_none() {
            missing.push("draft");
        }
        if self.critique.is_none() {
            missing.push("critique");
        }
        if self.revise.is_none() {
            missing.push("revise");
        }
        missing
    }

    pub fn is_valid(&self) -> bool {
        self.missing_capabilities().is_empty()
    }

    /// Las tres capacidades si el step es válido.
    pub(crate) fn capabilities(&self) -> Option<(Arc<dyn Drafter>, Arc<dyn Critic>, Arc<dyn Reviser>)> {
        Some((self.draft.clone()?, self.critique.clone()?, self.revise.clone()?))
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
         .field("label", &self.label)
         .field("draft", &self.draft.is_some())
         .field("critique", &self.critique.is_some())
         .field("revise", &self.revise.is_some())
         .field("max_iterations", &self.max_iterations)
         .field("delay_ms", &self.delay_ms)
         .finish()
    }
}

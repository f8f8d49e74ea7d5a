use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DELAY_MS, DEFAULT_MAX_ITERATIONS};

/// Configuración efectiva de un step, resuelta una sola vez antes de
/// ejecutarlo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepConfig {
    /// Presupuesto de critiques por step (≥ 1).
    pub max_iterations: u32,
    /// Pausa entre un revise y la siguiente critique.
    pub delay_ms: u64,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self { max_iterations: DEFAULT_MAX_ITERATIONS,
               delay_ms: DEFAULT_DELAY_MS }
    }
}

impl StepConfig {
    pub fn new(max_iterations: u32, delay_ms: u64) -> Self {
        Self { max_iterations, delay_ms }.normalized()
    }

    /// Fuerza `max_iterations >= 1`.
    pub fn normalized(self) -> Self {
        Self { max_iterations: self.max_iterations.max(1),
               ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_three_iterations_no_delay() {
        let c = StepConfig::default();
        assert_eq!(c.max_iterations, 3);
        assert_eq!(c.delay_ms, 0);
    }

    #[test]
    fn zero_iterations_coerced_to_one() {
        assert_eq!(StepConfig::new(0, 5).max_iterations, 1);
        assert_eq!(StepConfig::new(0, 5).delay_ms, 5);
    }
}

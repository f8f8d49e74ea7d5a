//! Builder para `FlowEngine`.
//!
//! Permite fijar los defaults de step y las opciones de la cadena sin pasar
//! por el entorno:
//!
//! ```ignore
//! let engine = FlowEngine::builder()
//!     .max_iterations(5)
//!     .delay_ms(50)
//!     .include_timestamps(false)
//!     .build();
//! ```

use crate::audit::ChainOptions;
use crate::config::EngineConfig;
use crate::engine::FlowEngine;
use crate::hashing::HashAlgorithm;
use crate::step::StepConfig;

#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    config: EngineConfig,
}

impl EngineBuilder {
    pub fn step_defaults(mut self, defaults: StepConfig) -> Self {
        self.config.step_defaults = defaults.normalized();
        self
    }

    pub fn max_iterations(mut self, n: u32) -> Self {
        self.config.step_defaults = StepConfig::new(n, self.config.step_defaults.delay_ms);
        self
    }

    pub fn delay_ms(mut self, ms: u64) -> Self {
        self.config.step_defaults.delay_ms = ms;
        self
    }

    pub fn chain_options(mut self, chain: ChainOptions) -> Self {
        self.config.chain = chain;
        self
    }

    pub fn hash_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.config.chain.algorithm = algorithm;
        self
    }

    pub fn include_timestamps(mut self, include: bool) -> Self {
        self.config.chain.include_timestamps = include;
        self
    }

    /// Liga también `iterations` y `error` a la raíz.
    pub fn bind_outcome(mut self, bind: bool) -> Self {
        self.config.chain.bind_outcome = bind;
        self
    }

    #[inline]
    pub fn build(self) -> FlowEngine {
        FlowEngine::with_config(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_every_field() {
        let engine = FlowEngine::builder().max_iterations(0)
                                          .delay_ms(7)
                                          .hash_algorithm(HashAlgorithm::Blake3)
                                          .include_timestamps(false)
                                          .bind_outcome(true)
                                          .build();
        let cfg = engine.config();
        assert_eq!(cfg.step_defaults, StepConfig { max_iterations: 1, delay_ms: 7 });
        assert_eq!(cfg.chain.algorithm, HashAlgorithm::Blake3);
        assert!(!cfg.chain.include_timestamps);
        assert!(cfg.chain.bind_outcome);
    }

    #[test]
    fn step_defaults_are_normalized() {
        let engine = FlowEngine::builder().step_defaults(StepConfig { max_iterations: 0,
                                                                      delay_ms: 3 })
                                          .build();
        assert_eq!(engine.config().step_defaults, StepConfig { max_iterations: 1, delay_ms: 3 });
    }
}

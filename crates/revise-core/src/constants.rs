//! Constantes del motor core.
//!
//! Valores por defecto de la configuración de cada step. Un step que no
//! declara `max_iterations` ni `delay_ms` hereda estos valores (o los que la
//! configuración del engine haya fijado desde el entorno).

/// Número máximo de ciclos critique/revise por step.
pub const DEFAULT_MAX_ITERATIONS: u32 = 3;

/// Pausa entre un revise y la siguiente critique (ms).
pub const DEFAULT_DELAY_MS: u64 = 0;

/// Prefijo de las variables de entorno leídas por `EngineConfig::from_env`.
pub const ENV_PREFIX: &str = "REVISEFLOW_";

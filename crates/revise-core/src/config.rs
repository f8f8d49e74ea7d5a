//! Carga de configuración del engine desde variables de entorno.
//! Usa el prefijo `REVISEFLOW_`; todas las variables son opcionales.

use std::env;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

use crate::audit::ChainOptions;
use crate::constants::ENV_PREFIX;
use crate::errors::ConfigError;
use crate::hashing::HashAlgorithm;
use crate::step::StepConfig;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Configuración del engine: defaults de step y opciones de la cadena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    pub step_defaults: StepConfig,
    pub chain: ChainOptions,
}

impl EngineConfig {
    /// Lee `REVISEFLOW_MAX_ITERATIONS`, `REVISEFLOW_DELAY_MS`,
    /// `REVISEFLOW_HASH_TIMESTAMPS`, `REVISEFLOW_HASH_OUTCOME` y
    /// `REVISEFLOW_HASH_ALGORITHM`.
    pub fn from_env() -> Result<Self, ConfigError> {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
        where F: Fn(&str) -> Option<String>
    {
        let get = |name: &str| {
            let key = format!("{ENV_PREFIX}{name}");
            lookup(&key).map(|v| (key, v))
        };
        let defaults = Self::default();

        let max_iterations = match get("MAX_ITERATIONS") {
            Some((key, v)) => v.trim().parse::<u32>().map_err(|_| ConfigError::InvalidValue { key, value: v })?,
            None => defaults.step_defaults.max_iterations,
        };
        let delay_ms = match get("DELAY_MS") {
            Some((key, v)) => v.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue { key, value: v })?,
            None => defaults.step_defaults.delay_ms,
        };
        let include_timestamps = match get("HASH_TIMESTAMPS") {
            Some((key, v)) => parse_bool(&v).ok_or(ConfigError::InvalidValue { key, value: v })?,
            None => defaults.chain.include_timestamps,
        };
        let bind_outcome = match get("HASH_OUTCOME") {
            Some((key, v)) => parse_bool(&v).ok_or(ConfigError::InvalidValue { key, value: v })?,
            None => defaults.chain.bind_outcome,
        };
        let algorithm = match get("HASH_ALGORITHM") {
            Some((key, v)) => HashAlgorithm::parse(&v).ok_or(ConfigError::InvalidValue { key, value: v })?,
            None => defaults.chain.algorithm,
        };

        Ok(Self { step_defaults: StepConfig::new(max_iterations, delay_ms),
                  chain: ChainOptions { algorithm,
                                        include_timestamps,
                                        bind_outcome } })
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

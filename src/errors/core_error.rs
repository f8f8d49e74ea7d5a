use thiserror::Error;

use revise_core::{ConfigError, FlowError};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error de configuración: {0}")]
    Config(#[from] ConfigError),
    #[error("Error de serialización: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Ejecución fallida: {0}")]
    Flow(#[from] FlowError),
}

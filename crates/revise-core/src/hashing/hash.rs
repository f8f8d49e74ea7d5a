//! Hash helpers – abstracción para permitir cambiar de algoritmo sin tocar resto del core.

use std::fmt::Write;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Algoritmo usado para encadenar entradas de auditoría.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Blake3 => "blake3",
        }
    }

    /// Parsea el nombre usado en configuración (`sha256` | `blake3`).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Some(HashAlgorithm::Sha256),
            "blake3" => Some(HashAlgorithm::Blake3),
            _ => None,
        }
    }
}

/// Digest de `prefix ‖ payload`. Ambos se alimentan al hasher en orden, sin
/// separador: el prefijo es siempre de longitud fija o vacío.
pub fn digest_concat(algorithm: HashAlgorithm, prefix: &[u8], payload: &[u8]) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Sha256 => {
            let mut h = Sha256::new();
            h.update(prefix);
            h.update(payload);
            h.finalize().to_vec()
        }
        HashAlgorithm::Blake3 => {
            let mut h = blake3::Hasher::new();
            h.update(prefix);
            h.update(payload);
            h.finalize().as_bytes().to_vec()
        }
    }
}

/// Hashea un string y devuelve hex.
pub fn hash_str(algorithm: HashAlgorithm, input: &str) -> String {
    to_hex(&digest_concat(algorithm, &[], input.as_bytes()))
}

pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}

//! Cadena de hashes secuencial sobre las entradas de auditoría.
//!
//! `acc_0 = []`, `acc_i = H(acc_{i-1} ‖ canonical(entry_i))`. La raíz es el
//! último acumulador. Es una lista enlazada de hashes, no un árbol: no hay
//! pruebas de inclusión parciales.
//!
//! La secuencia vacía produce la raíz de longitud cero (`ChainRoot::EMPTY`,
//! hex `""`), distinguible de cualquier raíz no vacía.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Value};

use super::AuditEntry;
use crate::hashing::{digest_concat, to_canonical_json, to_hex, HashAlgorithm};

/// Parámetros de construcción de la cadena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainOptions {
    pub algorithm: HashAlgorithm,
    /// Si es `false` el timestamp se canonicaliza como `null` y dos
    /// ejecuciones lógicamente idénticas producen la misma raíz.
    pub include_timestamps: bool,
    /// Si es `true` el payload también liga `iterations` y `error`. Apagado
    /// por defecto: la raíz estándar sólo cubre los campos mínimos.
    #[serde(default)]
    pub bind_outcome: bool,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self { algorithm: HashAlgorithm::Sha256,
               include_timestamps: true,
               bind_outcome: false }
    }
}

impl ChainOptions {
    /// Opciones con raíz reproducible entre ejecuciones (timestamps fuera).
    pub fn reproducible() -> Self {
        Self { include_timestamps: false,
               ..Self::default() }
    }

    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Incluye `iterations` y `error` en cada payload.
    pub fn with_outcome(mut self) -> Self {
        self.bind_outcome = true;
        self
    }
}

/// Raíz (o acumulador intermedio) de la cadena.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ChainRoot(Vec<u8>);

impl ChainRoot {
    pub const EMPTY: ChainRoot = ChainRoot(Vec::new());

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        to_hex(&self.0)
    }
}

impl std::fmt::Display for ChainRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for ChainRoot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Payload canónico de una entrada. Los estados ausentes se emiten como
/// `null` explícito para que la estructura sea siempre la misma; de las
/// critiques sólo entra la cantidad. `iterations` y `error` sólo entran con
/// `ChainOptions::bind_outcome`.
pub fn canonical_payload(entry: &AuditEntry, options: &ChainOptions) -> Value {
    let timestamp = if options.include_timestamps {
        Value::String(entry.timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true))
    } else {
        Value::Null
    };
    let mut payload = json!({
        "stepIndex": entry.step_index,
        "timestamp": timestamp,
        "phase": entry.phase.as_str(),
        "critiques": entry.critiques.as_ref().map_or(0, Vec::len),
        "inputState": entry.input_state.clone().unwrap_or(Value::Null),
        "draftState": entry.draft_state.clone().unwrap_or(Value::Null),
        "finalState": entry.final_state.clone().unwrap_or(Value::Null),
    });
    if options.bind_outcome {
        payload["iterations"] = json!(entry.iterations);
        payload["error"] = json!(entry.error);
    }
    payload
}

fn fold(acc: &[u8], entry: &AuditEntry, options: &ChainOptions) -> Vec<u8> {
    let payload = to_canonical_json(&canonical_payload(entry, options));
    digest_concat(options.algorithm, acc, payload.as_bytes())
}

/// Calcula la raíz de la cadena para `entries` en su orden actual.
pub fn compute_root(entries: &[AuditEntry], options: &ChainOptions) -> ChainRoot {
    let acc = entries.iter().fold(Vec::new(), |acc, e| fold(&acc, e, options));
    ChainRoot(acc)
}

/// Todos los acumuladores intermedios; `links[i]` es la raíz de `entries[..=i]`.
pub fn chain_links(entries: &[AuditEntry], options: &ChainOptions) -> Vec<ChainRoot> {
    let mut links = Vec::with_capacity(entries.len());
    let mut acc = Vec::new();
    for e in entries {
        acc = fold(&acc, e, options);
        links.push(ChainRoot(acc.clone()));
    }
    links
}

/// Recalcula la raíz y la compara con `expected`.
pub fn verify_root(entries: &[AuditEntry], expected: &ChainRoot, options: &ChainOptions) -> bool {
    compute_root(entries, options) == *expected
}

/// Primer índice en el que dos secuencias dejan de coincidir. Si una es
/// prefijo de la otra, el índice es la longitud de la más corta.
pub fn first_divergence(a: &[AuditEntry], b: &[AuditEntry], options: &ChainOptions) -> Option<usize> {
    let la = chain_links(a, options);
    let lb = chain_links(b, options);
    if let Some(i) = la.iter().zip(lb.iter()).position(|(x, y)| x != y) {
        return Some(i);
    }
    if la.len() != lb.len() {
        return Some(la.len().min(lb.len()));
    }
    None
}

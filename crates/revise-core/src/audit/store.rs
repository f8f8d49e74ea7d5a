use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use super::{compute_root, AuditEntry, AuditPhase, AuditRecord, ChainOptions, ChainRoot};

/// Secuencia append-only de entradas de una ejecución.
///
/// Es un handle compartido: el engine agrega y el llamador lee el mismo
/// buffer, incluso después de que el run haya fallado. No expone operaciones
/// para modificar ni quitar entradas.
#[derive(Debug, Clone, Default)]
pub struct AuditLog {
    entries: Arc<Mutex<Vec<AuditEntry>>>,
    chain: ChainOptions,
}

impl AuditLog {
    pub fn new(chain: ChainOptions) -> Self {
        Self { entries: Arc::new(Mutex::new(Vec::new())),
               chain }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<AuditEntry>> {
        // Las entradas nunca quedan a medio escribir: un pánico previo no
        // invalida el contenido.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Agrega un registro y devuelve la entrada congelada. El timestamp nunca
    /// retrocede respecto a la entrada anterior.
    pub fn append(&self, record: AuditRecord) -> AuditEntry {
        let mut entries = self.lock();
        let now = Utc::now();
        let ts = match entries.last() {
            Some(prev) if prev.timestamp > now => prev.timestamp,
            _ => now,
        };
        let entry = AuditEntry::from_record(record, ts);
        entries.push(entry.clone());
        entry
    }

    /// Copia de las entradas actuales (orden de ejecución).
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn last(&self) -> Option<AuditEntry> {
        self.lock().last().cloned()
    }

    pub fn chain_options(&self) -> ChainOptions {
        self.chain
    }

    /// Raíz de la cadena sobre el contenido vivo; se recalcula en cada lectura.
    pub fn root(&self) -> ChainRoot {
        compute_root(&self.lock(), &self.chain)
    }

    /// `true` si el contenido actual produce `expected`.
    pub fn verify(&self, expected: &ChainRoot) -> bool {
        self.root() == *expected
    }

    /// Secuencia compacta de fases, útil en aserciones y logs.
    pub fn phases(&self) -> Vec<AuditPhase> {
        self.lock().iter().map(|e| e.phase).collect()
    }

    /// Entradas de un step concreto.
    pub fn entries_for_step(&self, step_index: usize) -> Vec<AuditEntry> {
        self.lock().iter().filter(|e| e.step_index == step_index).cloned().collect()
    }
}

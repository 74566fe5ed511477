use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Serializes the multi-step writes of both stores.
///
/// Holding the guard across a check and the write that depends on it keeps
/// canvas deletes and card inserts from interleaving inside one process.
#[derive(Debug, Clone, Default)]
pub struct WriteGate {
    lock: Arc<Mutex<()>>,
}

impl WriteGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn enter(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }
}

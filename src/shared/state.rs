use std::sync::Arc;

use crate::board::{build_stores, CanvasRecord, CanvasStore, CardRepository, CardStore};
use crate::board::{MemoryRepository, PgRepository, Repository};
use crate::config::StorageBackend;
use crate::shared::utils::DbPool;

#[derive(Clone)]
pub struct AppState {
    pub canvases: CanvasStore,
    pub cards: CardStore,
    pub storage: StorageBackend,
    pub conn: Option<DbPool>,
}

impl AppState {
    pub fn new(
        canvas_repo: Arc<dyn Repository<CanvasRecord>>,
        card_repo: Arc<dyn CardRepository>,
        storage: StorageBackend,
        conn: Option<DbPool>,
    ) -> Self {
        let (canvases, cards) = build_stores(canvas_repo, card_repo);
        Self {
            canvases,
            cards,
            storage,
            conn,
        }
    }

    pub fn in_memory() -> Self {
        let repo = Arc::new(MemoryRepository::new());
        Self::new(repo.clone(), repo, StorageBackend::Memory, None)
    }

    pub fn postgres(pool: DbPool) -> Self {
        let repo = Arc::new(PgRepository::new(pool.clone()));
        Self::new(repo.clone(), repo, StorageBackend::Postgres, Some(pool))
    }
}

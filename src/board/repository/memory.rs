use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{CardRepository, Repository, RepositoryError, RepositoryResult};
use crate::board::types::{CanvasRecord, CardRecord, NewCanvas, NewCard};

#[derive(Debug, Default)]
struct Tables {
    canvases: BTreeMap<i32, CanvasRecord>,
    cards: BTreeMap<i32, CardRecord>,
    last_canvas_id: i32,
    last_card_id: i32,
}

/// Process-local storage for both tables.
///
/// Ids come from counters that only grow, so a deleted id is never handed out
/// again. Card inserts and canvas deletes enforce the same foreign key the
/// Postgres schema does.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<CanvasRecord> for MemoryRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<CanvasRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.canvases.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<CanvasRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.canvases.get(&id).cloned())
    }

    async fn insert(&self, draft: NewCanvas) -> RepositoryResult<CanvasRecord> {
        let mut tables = self.tables.write().await;
        tables.last_canvas_id += 1;
        let record = CanvasRecord {
            id: tables.last_canvas_id,
            name: draft.name,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        };
        tables.canvases.insert(record.id, record.clone());
        Ok(record)
    }

    async fn save(&self, entity: &CanvasRecord) -> RepositoryResult<Option<CanvasRecord>> {
        let mut tables = self.tables.write().await;
        match tables.canvases.get_mut(&entity.id) {
            Some(row) => {
                *row = entity.clone();
                Ok(Some(entity.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i32) -> RepositoryResult<usize> {
        let mut tables = self.tables.write().await;
        if tables.cards.values().any(|card| card.canvas_id == id) {
            return Err(RepositoryError::ForeignKeyViolation(format!(
                "canvas {id} is still referenced by cards"
            )));
        }
        Ok(usize::from(tables.canvases.remove(&id).is_some()))
    }
}

#[async_trait]
impl Repository<CardRecord> for MemoryRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<CardRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.cards.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<CardRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.cards.get(&id).cloned())
    }

    async fn insert(&self, draft: NewCard) -> RepositoryResult<CardRecord> {
        let mut tables = self.tables.write().await;
        if !tables.canvases.contains_key(&draft.canvas_id) {
            return Err(RepositoryError::ForeignKeyViolation(format!(
                "canvas {} does not exist",
                draft.canvas_id
            )));
        }
        tables.last_card_id += 1;
        let record = CardRecord {
            id: tables.last_card_id,
            title: draft.title,
            content: draft.content,
            created_at: draft.created_at,
            position_x: draft.position_x,
            position_y: draft.position_y,
            width: draft.width,
            height: draft.height,
            canvas_id: draft.canvas_id,
        };
        tables.cards.insert(record.id, record.clone());
        Ok(record)
    }

    async fn save(&self, entity: &CardRecord) -> RepositoryResult<Option<CardRecord>> {
        let mut tables = self.tables.write().await;
        if !tables.canvases.contains_key(&entity.canvas_id) {
            return Err(RepositoryError::ForeignKeyViolation(format!(
                "canvas {} does not exist",
                entity.canvas_id
            )));
        }
        match tables.cards.get_mut(&entity.id) {
            Some(row) => {
                *row = entity.clone();
                Ok(Some(entity.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i32) -> RepositoryResult<usize> {
        let mut tables = self.tables.write().await;
        Ok(usize::from(tables.cards.remove(&id).is_some()))
    }
}

#[async_trait]
impl CardRepository for MemoryRepository {
    async fn find_by_canvas(&self, canvas_id: i32) -> RepositoryResult<Vec<CardRecord>> {
        let tables = self.tables.read().await;
        Ok(tables
            .cards
            .values()
            .filter(|card| card.canvas_id == canvas_id)
            .cloned()
            .collect())
    }
}

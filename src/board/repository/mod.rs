//! Persistence interface for board entities.
//!
//! Stores only see these traits; the concrete backend (process memory or
//! PostgreSQL) is chosen at startup and injected.

mod memory;
mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

use async_trait::async_trait;

use crate::board::types::{CanvasRecord, CardRecord, NewCanvas, NewCard};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database connection failed: {0}")]
    Connection(String),
    #[error("Query error: {0}")]
    Query(String),
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),
    #[error("Storage task failed: {0}")]
    Task(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// A persisted row type with an integer surrogate key.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Column values for a row that has no id yet.
    type Draft: Send + 'static;

    fn id(&self) -> i32;
}

impl Entity for CanvasRecord {
    type Draft = NewCanvas;

    fn id(&self) -> i32 {
        self.id
    }
}

impl Entity for CardRecord {
    type Draft = NewCard;

    fn id(&self) -> i32 {
        self.id
    }
}

#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Every row, ordered by id.
    async fn find_all(&self) -> RepositoryResult<Vec<E>>;

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<E>>;

    /// Inserts a row and returns it with its assigned id.
    async fn insert(&self, draft: E::Draft) -> RepositoryResult<E>;

    /// Overwrites the row with `entity.id()`. Returns `None` when no such row exists.
    async fn save(&self, entity: &E) -> RepositoryResult<Option<E>>;

    /// Deletes by id and returns the number of rows removed.
    async fn delete(&self, id: i32) -> RepositoryResult<usize>;
}

#[async_trait]
pub trait CardRepository: Repository<CardRecord> {
    /// Cards referencing `canvas_id`, ordered by id.
    async fn find_by_canvas(&self, canvas_id: i32) -> RepositoryResult<Vec<CardRecord>>;
}

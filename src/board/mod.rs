//! Canvas and card boards: storage, invariants and HTTP routes.

pub mod canvas_store;
pub mod card_store;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod repository;
pub mod types;
pub mod validation;


pub use canvas_store::CanvasStore;
pub use card_store::CardStore;
pub use error::{BoardError, BoardResult};
pub use gate::WriteGate;
pub use handlers::{canvas_routes, card_routes};
pub use repository::{CardRepository, MemoryRepository, PgRepository, Repository};
pub use types::*;

use std::sync::Arc;

/// Builds both stores over the same repositories and write gate.
pub fn build_stores(
    canvases: Arc<dyn Repository<CanvasRecord>>,
    cards: Arc<dyn CardRepository>,
) -> (CanvasStore, CardStore) {
    let gate = WriteGate::new();
    let canvas_store = CanvasStore::new(Arc::clone(&canvases), Arc::clone(&cards), gate.clone());
    let card_store = CardStore::new(cards, canvases, gate);
    (canvas_store, card_store)
}

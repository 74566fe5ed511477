use chrono::Utc;
use log::{info, warn};
use std::collections::HashMap;
use std::sync::Arc;

use crate::board::error::{BoardError, BoardResult};
use crate::board::gate::WriteGate;
use crate::board::repository::{CardRepository, Repository, RepositoryError};
use crate::board::types::{
    Card, CardFilter, CardPatch, CanvasRecord, NewCard, NewCardInput,
};

/// CRUD over cards. Creating a card, or moving one to another canvas,
/// requires the target canvas to exist.
#[derive(Clone)]
pub struct CardStore {
    cards: Arc<dyn CardRepository>,
    canvases: Arc<dyn Repository<CanvasRecord>>,
    gate: WriteGate,
}

impl CardStore {
    pub fn new(
        cards: Arc<dyn CardRepository>,
        canvases: Arc<dyn Repository<CanvasRecord>>,
        gate: WriteGate,
    ) -> Self {
        Self {
            cards,
            canvases,
            gate,
        }
    }

    pub async fn list_all(&self, filter: CardFilter) -> BoardResult<Vec<Card>> {
        let records = match filter.canvas_id {
            Some(canvas_id) => self.cards.find_by_canvas(canvas_id).await?,
            None => self.cards.find_all().await?,
        };
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let canvases: HashMap<i32, CanvasRecord> = self
            .canvases
            .find_all()
            .await?
            .into_iter()
            .map(|canvas| (canvas.id, canvas))
            .collect();

        Ok(records
            .into_iter()
            .map(|record| {
                let canvas = canvases.get(&record.canvas_id).cloned();
                Card { record, canvas }
            })
            .collect())
    }

    pub async fn get_by_id(&self, id: i32) -> BoardResult<Card> {
        let record = self
            .cards
            .find_by_id(id)
            .await?
            .ok_or_else(|| BoardError::card_not_found(id))?;
        let canvas = self.canvases.find_by_id(record.canvas_id).await?;
        Ok(Card { record, canvas })
    }

    pub async fn create(&self, input: NewCardInput) -> BoardResult<Card> {
        let _guard = self.gate.enter().await;
        let canvas = self.existing_canvas(input.canvas_id).await?;

        let draft = NewCard {
            title: input.title,
            content: input.content,
            created_at: input.created_at.unwrap_or_else(Utc::now),
            position_x: input.position_x,
            position_y: input.position_y,
            width: input.width,
            height: input.height,
            canvas_id: input.canvas_id,
        };
        let record = match self.cards.insert(draft).await {
            Ok(record) => record,
            Err(RepositoryError::ForeignKeyViolation(_)) => {
                return Err(BoardError::InvalidReference(input.canvas_id))
            }
            Err(e) => return Err(e.into()),
        };

        info!("Created card {} on canvas {}", record.id, record.canvas_id);
        Ok(Card {
            record,
            canvas: Some(canvas),
        })
    }

    pub async fn update(&self, id: i32, patch: CardPatch) -> BoardResult<Card> {
        let _guard = self.gate.enter().await;
        let mut record = self
            .cards
            .find_by_id(id)
            .await?
            .ok_or_else(|| BoardError::card_not_found(id))?;

        if let Some(canvas_id) = patch.moved_canvas(&record) {
            self.existing_canvas(canvas_id).await?;
        }
        patch.apply_to(&mut record);

        let record = match self.cards.save(&record).await {
            Ok(Some(saved)) => saved,
            Ok(None) => return Err(BoardError::card_not_found(id)),
            Err(RepositoryError::ForeignKeyViolation(_)) => {
                return Err(BoardError::InvalidReference(record.canvas_id))
            }
            Err(e) => return Err(e.into()),
        };
        let canvas = self.canvases.find_by_id(record.canvas_id).await?;
        Ok(Card { record, canvas })
    }

    pub async fn remove(&self, id: i32) -> BoardResult<()> {
        if self.cards.delete(id).await? == 0 {
            return Err(BoardError::card_not_found(id));
        }
        info!("Deleted card {id}");
        Ok(())
    }

    async fn existing_canvas(&self, canvas_id: i32) -> BoardResult<CanvasRecord> {
        match self.canvases.find_by_id(canvas_id).await? {
            Some(canvas) => Ok(canvas),
            None => {
                warn!("Rejected card referencing missing canvas {canvas_id}");
                Err(BoardError::InvalidReference(canvas_id))
            }
        }
    }
}

use chrono::Utc;
use log::{info, warn};
use std::collections::HashMap;
use std::sync::Arc;

use crate::board::error::{BoardError, BoardResult};
use crate::board::gate::WriteGate;
use crate::board::repository::{CardRepository, Repository, RepositoryError};
use crate::board::types::{Canvas, CanvasPatch, CanvasRecord, CardRecord, NewCanvas, NewCanvasInput};

/// CRUD over canvases. A canvas that still has cards cannot be removed.
#[derive(Clone)]
pub struct CanvasStore {
    canvases: Arc<dyn Repository<CanvasRecord>>,
    cards: Arc<dyn CardRepository>,
    gate: WriteGate,
}

impl CanvasStore {
    pub fn new(
        canvases: Arc<dyn Repository<CanvasRecord>>,
        cards: Arc<dyn CardRepository>,
        gate: WriteGate,
    ) -> Self {
        Self {
            canvases,
            cards,
            gate,
        }
    }

    pub async fn list_all(&self) -> BoardResult<Vec<Canvas>> {
        let records = self.canvases.find_all().await?;
        let mut by_canvas: HashMap<i32, Vec<CardRecord>> = HashMap::new();
        for card in self.cards.find_all().await? {
            by_canvas.entry(card.canvas_id).or_default().push(card);
        }

        Ok(records
            .into_iter()
            .map(|record| {
                let cards = by_canvas.remove(&record.id).unwrap_or_default();
                Canvas { record, cards }
            })
            .collect())
    }

    pub async fn get_by_id(&self, id: i32) -> BoardResult<Canvas> {
        let record = self
            .canvases
            .find_by_id(id)
            .await?
            .ok_or_else(|| BoardError::canvas_not_found(id))?;
        let cards = self.cards.find_by_canvas(id).await?;
        Ok(Canvas { record, cards })
    }

    pub async fn create(&self, input: NewCanvasInput) -> BoardResult<Canvas> {
        let now = Utc::now();
        let record = self
            .canvases
            .insert(NewCanvas {
                name: input.name,
                created_at: input.created_at.unwrap_or(now),
                updated_at: now,
            })
            .await?;

        info!("Created canvas {} ({})", record.id, record.name);
        Ok(Canvas {
            record,
            cards: Vec::new(),
        })
    }

    pub async fn update(&self, id: i32, patch: CanvasPatch) -> BoardResult<Canvas> {
        let _guard = self.gate.enter().await;
        let mut record = self
            .canvases
            .find_by_id(id)
            .await?
            .ok_or_else(|| BoardError::canvas_not_found(id))?;

        patch.apply_to(&mut record);
        record.updated_at = Utc::now();

        // Answer from the saved row; no re-read after the write.
        let record = self
            .canvases
            .save(&record)
            .await?
            .ok_or_else(|| BoardError::canvas_not_found(id))?;
        let cards = self.cards.find_by_canvas(id).await?;
        Ok(Canvas { record, cards })
    }

    pub async fn remove(&self, id: i32) -> BoardResult<()> {
        let _guard = self.gate.enter().await;
        let canvas = self.get_by_id(id).await?;

        if !canvas.cards.is_empty() {
            warn!(
                "Refusing to delete canvas {id}: {} card(s) still reference it",
                canvas.cards.len()
            );
            return Err(BoardError::CannotDeleteWithDependents);
        }

        match self.canvases.delete(id).await {
            Ok(0) => Err(BoardError::canvas_not_found(id)),
            Ok(_) => {
                info!("Deleted canvas {id}");
                Ok(())
            }
            Err(RepositoryError::ForeignKeyViolation(detail)) => {
                warn!("Canvas {id} gained cards before delete: {detail}");
                Err(BoardError::CannotDeleteWithDependents)
            }
            Err(e) => Err(e.into()),
        }
    }
}

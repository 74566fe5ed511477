use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored canvas row, without the card back-reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasRecord {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stored card row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub position_x: f64,
    pub position_y: f64,
    pub width: f64,
    pub height: f64,
    pub canvas_id: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCanvas {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCard {
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub position_x: f64,
    pub position_y: f64,
    pub width: f64,
    pub height: f64,
    pub canvas_id: i32,
}

/// Canvas as returned to callers, with its cards populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    #[serde(flatten)]
    pub record: CanvasRecord,
    pub cards: Vec<CardRecord>,
}

/// Card as returned to callers, with its parent canvas populated when loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(flatten)]
    pub record: CardRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas: Option<CanvasRecord>,
}

// Validated store inputs. The HTTP layer builds these from the request DTOs below.

#[derive(Debug, Clone, PartialEq)]
pub struct NewCanvasInput {
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasPatch {
    pub name: Option<String>,
}

impl CanvasPatch {
    pub fn apply_to(&self, record: &mut CanvasRecord) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCardInput {
    pub title: String,
    pub content: String,
    pub position_x: f64,
    pub position_y: f64,
    pub width: f64,
    pub height: f64,
    pub canvas_id: i32,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub canvas_id: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
}

impl CardPatch {
    /// Copies every supplied field onto `record`, leaving the rest untouched.
    pub fn apply_to(&self, record: &mut CardRecord) {
        if let Some(title) = &self.title {
            record.title = title.clone();
        }
        if let Some(content) = &self.content {
            record.content = content.clone();
        }
        if let Some(x) = self.position_x {
            record.position_x = x;
        }
        if let Some(y) = self.position_y {
            record.position_y = y;
        }
        if let Some(width) = self.width {
            record.width = width;
        }
        if let Some(height) = self.height {
            record.height = height;
        }
        if let Some(canvas_id) = self.canvas_id {
            record.canvas_id = canvas_id;
        }
        if let Some(created_at) = self.created_at {
            record.created_at = created_at;
        }
    }

    /// The canvas this patch moves the card to, if it changes it.
    pub fn moved_canvas(&self, current: &CardRecord) -> Option<i32> {
        self.canvas_id.filter(|id| *id != current.canvas_id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardFilter {
    pub canvas_id: Option<i32>,
}

// Request bodies

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCanvasRequest {
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCanvasRequest {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardRequest {
    pub title: String,
    pub content: String,
    pub position_x: f64,
    pub position_y: f64,
    pub width: f64,
    pub height: f64,
    pub canvas_id: i32,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub canvas_id: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardListQuery {
    pub canvas_id: Option<i32>,
}

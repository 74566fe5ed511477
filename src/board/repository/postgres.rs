use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use log::error;

use super::{CardRepository, Repository, RepositoryError, RepositoryResult};
use crate::board::types::{CanvasRecord, CardRecord, NewCanvas, NewCard};
use crate::shared::schema::{canvases, cards};
use crate::shared::utils::DbPool;

#[derive(Debug, Clone, Queryable, Selectable, AsChangeset)]
#[diesel(table_name = canvases)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct DbCanvas {
    id: i32,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = canvases)]
struct NewDbCanvas {
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, AsChangeset)]
#[diesel(table_name = cards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct DbCard {
    id: i32,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    position_x: f64,
    position_y: f64,
    width: f64,
    height: f64,
    canvas_id: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = cards)]
struct NewDbCard {
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    position_x: f64,
    position_y: f64,
    width: f64,
    height: f64,
    canvas_id: i32,
}

fn db_to_canvas(db: DbCanvas) -> CanvasRecord {
    CanvasRecord {
        id: db.id,
        name: db.name,
        created_at: db.created_at,
        updated_at: db.updated_at,
    }
}

fn canvas_to_db(record: &CanvasRecord) -> DbCanvas {
    DbCanvas {
        id: record.id,
        name: record.name.clone(),
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

fn db_to_card(db: DbCard) -> CardRecord {
    CardRecord {
        id: db.id,
        title: db.title,
        content: db.content,
        created_at: db.created_at,
        position_x: db.position_x,
        position_y: db.position_y,
        width: db.width,
        height: db.height,
        canvas_id: db.canvas_id,
    }
}

fn card_to_db(record: &CardRecord) -> DbCard {
    DbCard {
        id: record.id,
        title: record.title.clone(),
        content: record.content.clone(),
        created_at: record.created_at,
        position_x: record.position_x,
        position_y: record.position_y,
        width: record.width,
        height: record.height,
        canvas_id: record.canvas_id,
    }
}

impl From<DieselError> for RepositoryError {
    fn from(e: DieselError) -> Self {
        match e {
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::ForeignKeyViolation(info.message().to_string())
            }
            other => Self::Query(other.to_string()),
        }
    }
}

/// PostgreSQL-backed repository over an r2d2 pool.
///
/// Diesel is synchronous, so every call checks a connection out and runs on the
/// blocking thread pool.
#[derive(Clone)]
pub struct PgRepository {
    pool: DbPool,
}

impl PgRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn run<T, F>(&self, op: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> Result<T, DieselError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                error!("Failed to get database connection: {e}");
                RepositoryError::Connection(e.to_string())
            })?;
            op(&mut *conn).map_err(RepositoryError::from)
        })
        .await
        .map_err(|e| RepositoryError::Task(e.to_string()))?
    }
}

#[async_trait]
impl Repository<CanvasRecord> for PgRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<CanvasRecord>> {
        let rows = self
            .run(|conn| {
                canvases::table
                    .select(DbCanvas::as_select())
                    .order(canvases::id.asc())
                    .load(conn)
            })
            .await?;
        Ok(rows.into_iter().map(db_to_canvas).collect())
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<CanvasRecord>> {
        let row = self
            .run(move |conn| {
                canvases::table
                    .find(id)
                    .select(DbCanvas::as_select())
                    .first(conn)
                    .optional()
            })
            .await?;
        Ok(row.map(db_to_canvas))
    }

    async fn insert(&self, draft: NewCanvas) -> RepositoryResult<CanvasRecord> {
        let row = NewDbCanvas {
            name: draft.name,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        };
        let inserted = self
            .run(move |conn| {
                diesel::insert_into(canvases::table)
                    .values(&row)
                    .returning(DbCanvas::as_returning())
                    .get_result(conn)
            })
            .await?;
        Ok(db_to_canvas(inserted))
    }

    async fn save(&self, entity: &CanvasRecord) -> RepositoryResult<Option<CanvasRecord>> {
        let row = canvas_to_db(entity);
        let saved = self
            .run(move |conn| {
                diesel::update(canvases::table.find(row.id))
                    .set(&row)
                    .returning(DbCanvas::as_returning())
                    .get_result(conn)
                    .optional()
            })
            .await?;
        Ok(saved.map(db_to_canvas))
    }

    async fn delete(&self, id: i32) -> RepositoryResult<usize> {
        self.run(move |conn| diesel::delete(canvases::table.find(id)).execute(conn))
            .await
    }
}

#[async_trait]
impl Repository<CardRecord> for PgRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<CardRecord>> {
        let rows = self
            .run(|conn| {
                cards::table
                    .select(DbCard::as_select())
                    .order(cards::id.asc())
                    .load(conn)
            })
            .await?;
        Ok(rows.into_iter().map(db_to_card).collect())
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<CardRecord>> {
        let row = self
            .run(move |conn| {
                cards::table
                    .find(id)
                    .select(DbCard::as_select())
                    .first(conn)
                    .optional()
            })
            .await?;
        Ok(row.map(db_to_card))
    }

    async fn insert(&self, draft: NewCard) -> RepositoryResult<CardRecord> {
        let row = NewDbCard {
            title: draft.title,
            content: draft.content,
            created_at: draft.created_at,
            position_x: draft.position_x,
            position_y: draft.position_y,
            width: draft.width,
            height: draft.height,
            canvas_id: draft.canvas_id,
        };
        let inserted = self
            .run(move |conn| {
                diesel::insert_into(cards::table)
                    .values(&row)
                    .returning(DbCard::as_returning())
                    .get_result(conn)
            })
            .await?;
        Ok(db_to_card(inserted))
    }

    async fn save(&self, entity: &CardRecord) -> RepositoryResult<Option<CardRecord>> {
        let row = card_to_db(entity);
        let saved = self
            .run(move |conn| {
                diesel::update(cards::table.find(row.id))
                    .set(&row)
                    .returning(DbCard::as_returning())
                    .get_result(conn)
                    .optional()
            })
            .await?;
        Ok(saved.map(db_to_card))
    }

    async fn delete(&self, id: i32) -> RepositoryResult<usize> {
        self.run(move |conn| diesel::delete(cards::table.find(id)).execute(conn))
            .await
    }
}

#[async_trait]
impl CardRepository for PgRepository {
    async fn find_by_canvas(&self, canvas_id: i32) -> RepositoryResult<Vec<CardRecord>> {
        let rows = self
            .run(move |conn| {
                cards::table
                    .filter(cards::canvas_id.eq(canvas_id))
                    .select(DbCard::as_select())
                    .order(cards::id.asc())
                    .load(conn)
            })
            .await?;
        Ok(rows.into_iter().map(db_to_card).collect())
    }
}

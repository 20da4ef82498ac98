use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::config;
use crate::models::{Comment, NewTicket, Ticket, TicketStatus, TicketUpdate};
use crate::policy::ListScope;

use super::{StoreError, TicketStore};

const TICKET_COLUMNS: &str =
    "id, title, description, status, created_by, assigned_to, comments, created_at, updated_at";

/// Postgres-backed ticket store. Comments live in a JSONB column on the
/// ticket row so append stays a single-statement read-modify-write.
pub struct PgTicketStore {
    pool: PgPool,
}

impl PgTicketStore {
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let db_config = &config::config().database;

        let pool = PgPoolOptions::new()
            .max_connections(db_config.max_connections)
            .acquire_timeout(std::time::Duration::from_secs(db_config.connection_timeout))
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self { pool })
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketStore for PgTicketStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ticket>, StoreError> {
        let sql = format!("SELECT {} FROM tickets WHERE id = $1", TICKET_COLUMNS);
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.map(|r| ticket_from_row(&r)).transpose()
    }

    async fn find(&self, scope: &ListScope) -> Result<Vec<Ticket>, StoreError> {
        let base = format!("SELECT {} FROM tickets", TICKET_COLUMNS);
        let rows = match scope {
            ListScope::All => {
                let sql = format!("{} ORDER BY created_at DESC", base);
                sqlx::query(&sql).fetch_all(&self.pool).await?
            }
            ListScope::AssignedOrOpen(id) => {
                let sql = format!(
                    "{} WHERE assigned_to = $1 OR status = 'open' ORDER BY created_at DESC",
                    base
                );
                sqlx::query(&sql).bind(id).fetch_all(&self.pool).await?
            }
            ListScope::CreatedBy(id) => {
                let sql = format!("{} WHERE created_by = $1 ORDER BY created_at DESC", base);
                sqlx::query(&sql).bind(id).fetch_all(&self.pool).await?
            }
        };

        rows.iter().map(ticket_from_row).collect()
    }

    async fn create(&self, created_by: Uuid, fields: NewTicket) -> Result<Ticket, StoreError> {
        let sql = format!(
            "INSERT INTO tickets (id, title, description, status, created_by, comments, created_at, updated_at) \
             VALUES ($1, $2, $3, 'open', $4, '[]'::jsonb, now(), now()) \
             RETURNING {}",
            TICKET_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(Uuid::new_v4())
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(created_by)
            .fetch_one(&self.pool)
            .await?;
        ticket_from_row(&row)
    }

    async fn update(&self, id: Uuid, fields: &TicketUpdate) -> Result<Ticket, StoreError> {
        let mut builder: sqlx::QueryBuilder<sqlx::Postgres> =
            sqlx::QueryBuilder::new("UPDATE tickets SET updated_at = now()");

        if let Some(title) = &fields.title {
            builder.push(", title = ").push_bind(title);
        }
        if let Some(description) = &fields.description {
            builder.push(", description = ").push_bind(description);
        }
        if let Some(status) = fields.status {
            builder.push(", status = ").push_bind(status.as_str());
        }
        if let Some(assigned_to) = fields.assigned_to {
            builder.push(", assigned_to = ").push_bind(assigned_to);
        }

        builder.push(" WHERE id = ").push_bind(id);
        builder.push(format!(" RETURNING {}", TICKET_COLUMNS));

        let row = builder.build().fetch_optional(&self.pool).await?;
        match row {
            Some(r) => ticket_from_row(&r),
            None => Err(StoreError::NotFound(format!("No ticket found with the id of {}", id))),
        }
    }

    async fn append_comment(&self, id: Uuid, comment: Comment) -> Result<Vec<Comment>, StoreError> {
        // Prepend: a one-element jsonb array concatenated ahead of the
        // existing sequence keeps newest-first ordering.
        let entry = serde_json::to_value(&comment)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let row = sqlx::query(
            "UPDATE tickets SET comments = $1::jsonb || comments, updated_at = now() \
             WHERE id = $2 RETURNING comments",
        )
        .bind(json!([entry]))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => comments_from_value(r.try_get("comments")?),
            None => Err(StoreError::NotFound(format!("No ticket found with the id of {}", id))),
        }
    }

    async fn health(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn ticket_from_row(row: &PgRow) -> Result<Ticket, StoreError> {
    let status_text: String = row.try_get("status")?;
    let status: TicketStatus = status_text.parse().map_err(StoreError::Serialization)?;

    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;

    Ok(Ticket {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        status,
        created_by: row.try_get("created_by")?,
        assigned_to: row.try_get("assigned_to")?,
        comments: comments_from_value(row.try_get("comments")?)?,
        created_at,
        updated_at,
    })
}

fn comments_from_value(value: serde_json::Value) -> Result<Vec<Comment>, StoreError> {
    serde_json::from_value(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

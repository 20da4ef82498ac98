pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Comment, NewTicket, Ticket, TicketUpdate};
use crate::policy::ListScope;

pub use memory::MemoryStore;
pub use postgres::PgTicketStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence collaborator for tickets.
///
/// The policy layer never talks to the store; handlers fetch a snapshot,
/// run the policy, then call back in. `update` is an atomic read-modify-write
/// with last-write-wins semantics between concurrent callers.
#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ticket>, StoreError>;

    /// Tickets matching `scope`, ordered descending by `created_at`.
    async fn find(&self, scope: &ListScope) -> Result<Vec<Ticket>, StoreError>;

    async fn create(&self, created_by: Uuid, fields: NewTicket) -> Result<Ticket, StoreError>;

    /// Applies the given field changes. Returns `NotFound` if the ticket no
    /// longer exists. `created_by`, `created_at` and `comments` are never
    /// touched by this operation.
    async fn update(&self, id: Uuid, fields: &TicketUpdate) -> Result<Ticket, StoreError>;

    /// Prepends `comment` and returns the full updated sequence, newest first.
    async fn append_comment(&self, id: Uuid, comment: Comment) -> Result<Vec<Comment>, StoreError>;

    async fn health(&self) -> Result<(), StoreError>;
}

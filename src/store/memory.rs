use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::{Comment, NewTicket, Ticket, TicketStatus, TicketUpdate};
use crate::policy::ListScope;

use super::{StoreError, TicketStore};

/// In-process ticket store backed by a `HashMap`. Used by the integration
/// tests and handy for local development without Postgres.
#[derive(Default)]
pub struct MemoryStore {
    tickets: RwLock<HashMap<Uuid, Ticket>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a ticket directly, bypassing the HTTP surface. Test helper.
    pub fn insert(&self, ticket: Ticket) {
        self.tickets
            .write()
            .expect("ticket map poisoned")
            .insert(ticket.id, ticket);
    }
}

#[async_trait]
impl TicketStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ticket>, StoreError> {
        let tickets = self.tickets.read().map_err(|_| poisoned())?;
        Ok(tickets.get(&id).cloned())
    }

    async fn find(&self, scope: &ListScope) -> Result<Vec<Ticket>, StoreError> {
        let tickets = self.tickets.read().map_err(|_| poisoned())?;
        let mut matched: Vec<Ticket> =
            tickets.values().filter(|t| scope.matches(t)).cloned().collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn create(&self, created_by: Uuid, fields: NewTicket) -> Result<Ticket, StoreError> {
        let now = Utc::now();
        let ticket = Ticket {
            id: Uuid::new_v4(),
            title: fields.title,
            description: fields.description,
            status: TicketStatus::Open,
            created_by,
            assigned_to: None,
            comments: vec![],
            created_at: now,
            updated_at: now,
        };
        let mut tickets = self.tickets.write().map_err(|_| poisoned())?;
        tickets.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    async fn update(&self, id: Uuid, fields: &TicketUpdate) -> Result<Ticket, StoreError> {
        let mut tickets = self.tickets.write().map_err(|_| poisoned())?;
        let ticket = tickets
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("No ticket found with the id of {}", id)))?;

        if let Some(title) = &fields.title {
            ticket.title = title.clone();
        }
        if let Some(description) = &fields.description {
            ticket.description = description.clone();
        }
        if let Some(status) = fields.status {
            ticket.status = status;
        }
        if let Some(assigned_to) = fields.assigned_to {
            ticket.assigned_to = assigned_to;
        }
        ticket.updated_at = Utc::now();

        Ok(ticket.clone())
    }

    async fn append_comment(&self, id: Uuid, comment: Comment) -> Result<Vec<Comment>, StoreError> {
        let mut tickets = self.tickets.write().map_err(|_| poisoned())?;
        let ticket = tickets
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("No ticket found with the id of {}", id)))?;

        // Newest first, prior entries untouched.
        ticket.comments.insert(0, comment);
        ticket.updated_at = Utc::now();

        Ok(ticket.comments.clone())
    }

    async fn health(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

fn poisoned() -> StoreError {
    StoreError::Query("ticket map poisoned".to_string())
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ticket lifecycle status. The policy layer only inspects `Open`; the other
/// values are opaque to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatus {
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "closed")]
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in-progress",
            TicketStatus::Closed => "closed",
        }
    }
}

impl std::str::FromStr for TicketStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "open" => Ok(TicketStatus::Open),
            "in-progress" => Ok(TicketStatus::InProgress),
            "closed" => Ok(TicketStatus::Closed),
            other => Err(format!("unknown ticket status: {}", other)),
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single ticket comment. Comments are append-only: once stored they are
/// never edited or removed, and new entries go to the front of the sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub author: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Ticket snapshot as held by the store and evaluated by the policy.
///
/// `id`, `created_by` and `created_at` are immutable after creation.
/// `assigned_to` and `status` are the privileged fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub created_by: Uuid,
    pub assigned_to: Option<Uuid>,
    /// Newest first.
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a ticket. `created_by` is never taken from
/// the request body; it comes from the authenticated principal.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
}

/// Partial update to a ticket. `status` and `assigned_to` are the privileged
/// fields; `assigned_to` uses a double Option so that an explicit `null`
/// (unassign) is distinguishable from the field being absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    #[serde(default, with = "double_option")]
    pub assigned_to: Option<Option<Uuid>>,
}

impl TicketUpdate {
    /// Whether this update touches `status` or `assigned_to`. When false, the
    /// privileged-field authorization check is skipped entirely.
    pub fn touches_privileged_fields(&self) -> bool {
        self.status.is_some() || self.assigned_to.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.assigned_to.is_none()
    }
}

/// Serde helper: absent field -> None, `null` -> Some(None), value -> Some(Some(v)).
mod double_option {
    use serde::{Deserialize, Deserializer};
    use uuid::Uuid;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<Uuid>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Uuid>::deserialize(deserializer).map(Some)
    }
}

/// Body of a comment-append request.
#[derive(Debug, Clone, Deserialize)]
pub struct NewComment {
    pub text: String,
}

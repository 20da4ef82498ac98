//! Ticket access-control policy.
//!
//! Pure predicates over a ticket snapshot and the acting principal. Nothing
//! here touches the store or any ambient state; handlers fetch the snapshot,
//! ask the policy, and act on the answer. The same predicate backs the
//! detail view, general-field updates and commenting so the four call sites
//! cannot drift apart.

use uuid::Uuid;

use crate::models::{Principal, Role, Ticket, TicketStatus};

/// Store-agnostic description of which tickets a principal may list.
///
/// Each store backend translates this into its own filter so the list view
/// agrees with [`can_view`] ticket by ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Admin: every ticket.
    All,
    /// Support: tickets assigned to this principal, or any open ticket.
    AssignedOrOpen(Uuid),
    /// Requester: tickets this principal created.
    CreatedBy(Uuid),
}

/// May `principal` read this ticket?
///
/// Admin always; support when assigned, when the ticket is open, or when
/// they authored it; requesters only for their own tickets.
pub fn can_view(ticket: &Ticket, principal: &Principal) -> bool {
    match principal.role {
        Role::Admin => true,
        Role::Support => {
            ticket.assigned_to == Some(principal.id)
                || ticket.status == TicketStatus::Open
                || ticket.created_by == principal.id
        }
        Role::Requester => ticket.created_by == principal.id,
    }
}

/// Filter describing the tickets visible to `principal` in a list query.
pub fn list_scope(principal: &Principal) -> ListScope {
    match principal.role {
        Role::Admin => ListScope::All,
        Role::Support => ListScope::AssignedOrOpen(principal.id),
        Role::Requester => ListScope::CreatedBy(principal.id),
    }
}

/// May `principal` edit general fields (title, description) or post
/// comments? Same predicate as [`can_view`].
pub fn can_modify_general_fields(ticket: &Ticket, principal: &Principal) -> bool {
    can_view(ticket, principal)
}

/// May `principal` change `status` or `assigned_to`?
///
/// Only admins and the currently assigned support principal. Evaluated in
/// addition to [`can_modify_general_fields`] when an update touches a
/// privileged field; skipped entirely otherwise.
pub fn can_modify_privileged_fields(ticket: &Ticket, principal: &Principal) -> bool {
    match principal.role {
        Role::Admin => true,
        Role::Support => ticket.assigned_to == Some(principal.id),
        Role::Requester => false,
    }
}

/// May `principal` append a comment? Same predicate as [`can_view`].
pub fn can_comment(ticket: &Ticket, principal: &Principal) -> bool {
    can_view(ticket, principal)
}

impl ListScope {
    /// Per-ticket evaluation of the scope, used by the in-memory store and
    /// by tests asserting list/detail agreement.
    pub fn matches(&self, ticket: &Ticket) -> bool {
        match self {
            ListScope::All => true,
            ListScope::AssignedOrOpen(id) => {
                ticket.assigned_to == Some(*id) || ticket.status == TicketStatus::Open
            }
            ListScope::CreatedBy(id) => ticket.created_by == *id,
        }
    }
}

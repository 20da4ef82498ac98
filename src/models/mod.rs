pub mod principal;
pub mod ticket;

pub use principal::{Principal, Role};
pub use ticket::{Comment, NewComment, NewTicket, Ticket, TicketStatus, TicketUpdate};

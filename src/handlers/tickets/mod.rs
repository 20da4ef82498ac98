mod comment_post;
mod ticket_get;
mod ticket_list;
mod ticket_post;
mod ticket_put;

pub use comment_post::comment_post;
pub use ticket_get::ticket_get;
pub use ticket_list::ticket_list;
pub use ticket_post::ticket_post;
pub use ticket_put::ticket_put;

pub mod ticket;

pub use ticket::{Priority, Ticket, TicketId, TicketStatus};

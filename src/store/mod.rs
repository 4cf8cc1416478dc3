pub mod locale;
pub mod tickets;

pub use locale::LocaleStore;
pub use tickets::{DetailFetchPolicy, TicketStore, TicketsState};

use crate::{
    domain::{Ticket, TicketId, TicketStatus},
    error::Result,
};
use async_trait::async_trait;

pub mod fixture;
pub mod mock;

/// Data-access contract for ticket operations.
///
/// Not-found is reported as `None`, never as an error; the error channel is
/// reserved for transport-level failures.
#[async_trait]
pub trait TicketApi: Send + Sync {
    /// Returns every ticket
    async fn list_tickets(&self) -> Result<Vec<Ticket>>;

    /// Returns the ticket with the given id, if any
    async fn fetch_ticket(&self, id: TicketId) -> Result<Option<Ticket>>;

    /// Replaces the status of the ticket with the given id and returns the
    /// updated record, or `None` if no ticket matches
    async fn update_ticket_status(
        &self,
        id: TicketId,
        status: TicketStatus,
    ) -> Result<Option<Ticket>>;
}

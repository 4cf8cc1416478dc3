use crate::{
    api::{fixture, TicketApi},
    domain::{Ticket, TicketId, TicketStatus},
    error::Result,
};
use async_trait::async_trait;
use std::{sync::Mutex, time::Duration};
use tokio::time::sleep;

/// In-memory stand-in for a real ticket backend.
///
/// Every call sleeps a fixed duration before resolving to mimic network
/// latency. The fixture is shared across calls, so a status update is visible
/// to subsequent lists and fetches, like a real backend.
pub struct MockTicketApi {
    tickets: Mutex<Vec<Ticket>>,
    list_delay: Duration,
    record_delay: Duration,
}

impl MockTicketApi {
    const LIST_DELAY: Duration = Duration::from_millis(2000);
    const RECORD_DELAY: Duration = Duration::from_millis(1000);

    /// Creates a mock API over the given tickets
    pub fn new(tickets: Vec<Ticket>) -> Self {
        Self {
            tickets: Mutex::new(tickets),
            list_delay: Self::LIST_DELAY,
            record_delay: Self::RECORD_DELAY,
        }
    }

    /// Creates a mock API seeded with the demo fixture
    pub fn with_fixture() -> Self {
        Self::new(fixture::demo_tickets())
    }

    /// Overrides both latencies; zero makes calls resolve immediately
    pub fn with_latency(mut self, list_delay: Duration, record_delay: Duration) -> Self {
        self.list_delay = list_delay;
        self.record_delay = record_delay;
        self
    }

    fn snapshot(&self) -> Vec<Ticket> {
        self.tickets.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl TicketApi for MockTicketApi {
    async fn list_tickets(&self) -> Result<Vec<Ticket>> {
        sleep(self.list_delay).await;
        Ok(self.snapshot())
    }

    async fn fetch_ticket(&self, id: TicketId) -> Result<Option<Ticket>> {
        sleep(self.record_delay).await;
        let tickets = self.tickets.lock().unwrap_or_else(|e| e.into_inner());
        Ok(tickets.iter().find(|t| t.id == id).cloned())
    }

    async fn update_ticket_status(
        &self,
        id: TicketId,
        status: TicketStatus,
    ) -> Result<Option<Ticket>> {
        sleep(self.record_delay).await;
        let mut tickets = self.tickets.lock().unwrap_or_else(|e| e.into_inner());
        match tickets.iter_mut().find(|t| t.id == id) {
            Some(ticket) => {
                ticket.set_status(status);
                Ok(Some(ticket.clone()))
            }
            None => Ok(None),
        }
    }
}

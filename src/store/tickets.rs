use crate::{
    api::TicketApi,
    domain::{Ticket, TicketId, TicketStatus},
};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Whether a detail load may reuse the record already held as current
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailFetchPolicy {
    /// Skip the API call when the requested id matches the held record.
    /// Cheaper, but can serve a stale record.
    CacheCurrent,
    /// Always go to the API
    #[default]
    AlwaysRefetch,
}

/// Snapshot of everything a view needs to render ticket state
#[derive(Debug, Clone, Default)]
pub struct TicketsState {
    /// All loaded tickets, in the order the backend returned them
    pub tickets: Vec<Ticket>,
    /// The record loaded for the detail view, if any
    pub current: Option<Ticket>,
    /// True strictly while an operation is in flight
    pub loading: bool,
    /// Message of the most recent failure, cleared when a new operation starts
    pub error: Option<String>,
}

/// Owns the canonical ticket collection and the detail record.
///
/// Single writer: all mutation goes through `&mut self` methods, so
/// interleaved async calls never observe a torn write. Every state change is
/// published on a watch channel; views render from the latest snapshot.
pub struct TicketStore {
    api: Arc<dyn TicketApi>,
    state: TicketsState,
    detail_policy: DetailFetchPolicy,
    changes: watch::Sender<TicketsState>,
}

impl TicketStore {
    pub fn new(api: Arc<dyn TicketApi>) -> Self {
        let state = TicketsState::default();
        let (changes, _) = watch::channel(state.clone());
        Self {
            api,
            state,
            detail_policy: DetailFetchPolicy::default(),
            changes,
        }
    }

    pub fn with_detail_policy(mut self, policy: DetailFetchPolicy) -> Self {
        self.detail_policy = policy;
        self
    }

    /// Returns a receiver that yields a fresh snapshot on every state change
    pub fn subscribe(&self) -> watch::Receiver<TicketsState> {
        self.changes.subscribe()
    }

    /// The current state snapshot
    pub fn state(&self) -> &TicketsState {
        &self.state
    }

    fn publish(&self) {
        self.changes.send_replace(self.state.clone());
    }

    fn begin(&mut self) {
        self.state.loading = true;
        self.state.error = None;
        self.publish();
    }

    fn finish(&mut self) {
        self.state.loading = false;
        self.publish();
    }

    fn fail(&mut self, err: impl ToString) {
        self.state.error = Some(err.to_string());
        self.state.loading = false;
        self.publish();
    }

    /// Loads every ticket, replacing the collection on success.
    ///
    /// On failure the previous collection is kept, `error` is set, and an
    /// empty list is returned; callers must check `error` to tell an empty
    /// backend from a failed load.
    pub async fn load_tickets(&mut self) -> Vec<Ticket> {
        self.begin();
        let result = self.api.list_tickets().await;
        match result {
            Ok(tickets) => {
                debug!(count = tickets.len(), "loaded tickets");
                self.state.tickets = tickets.clone();
                self.finish();
                tickets
            }
            Err(err) => {
                warn!(error = %err, "failed to load tickets");
                self.fail(err);
                Vec::new()
            }
        }
    }

    /// Loads one ticket into `current` and returns it.
    ///
    /// An unknown id resolves to `None` without setting `error`. Under
    /// `CacheCurrent`, a request for the id already held returns the held
    /// record without touching the API or the lifecycle flags.
    pub async fn load_ticket(&mut self, id: TicketId) -> Option<Ticket> {
        if self.detail_policy == DetailFetchPolicy::CacheCurrent {
            if let Some(current) = &self.state.current {
                if current.id == id {
                    debug!(%id, "serving current ticket from cache");
                    return Some(current.clone());
                }
            }
        }

        self.state.current = None;
        self.begin();
        let result = self.api.fetch_ticket(id).await;
        match result {
            Ok(ticket) => {
                debug!(%id, found = ticket.is_some(), "loaded ticket");
                self.state.current = ticket.clone();
                self.finish();
                ticket
            }
            Err(err) => {
                warn!(%id, error = %err, "failed to load ticket");
                self.fail(err);
                None
            }
        }
    }

    /// Updates a ticket's status and folds the result back into the
    /// collection.
    ///
    /// When the backend reports no such ticket (`None`), the collection and
    /// `current` are left untouched. `current` is replaced only when it held
    /// the updated id, so an update from the list view cannot clobber an
    /// unrelated detail record.
    pub async fn update_ticket_status(
        &mut self,
        id: TicketId,
        status: TicketStatus,
    ) -> Option<Ticket> {
        self.begin();
        let result = self.api.update_ticket_status(id, status).await;
        match result {
            Ok(Some(updated)) => {
                debug!(%id, status = %status, "updated ticket status");
                if let Some(entry) = self.state.tickets.iter_mut().find(|t| t.id == id) {
                    *entry = updated.clone();
                }
                if self.state.current.as_ref().is_some_and(|t| t.id == id) {
                    self.state.current = Some(updated.clone());
                }
                self.finish();
                Some(updated)
            }
            Ok(None) => {
                debug!(%id, "status update target not found");
                self.finish();
                None
            }
            Err(err) => {
                warn!(%id, error = %err, "failed to update ticket status");
                self.fail(err);
                None
            }
        }
    }

    /// Pure filter over the loaded collection, original order preserved
    pub fn tickets_by_status(&self, status: TicketStatus) -> Vec<Ticket> {
        self.state
            .tickets
            .iter()
            .filter(|t| t.status == status)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::fixture,
        error::{HelpdeskError, Result},
    };
    use async_trait::async_trait;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };
    use std::time::Duration;

    /// Test double with controllable results and a call counter
    struct TestApi {
        tickets: Mutex<Vec<Ticket>>,
        fail_with: Option<String>,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl TestApi {
        fn new(tickets: Vec<Ticket>) -> Self {
            Self {
                tickets: Mutex::new(tickets),
                fail_with: None,
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                ..Self::new(Vec::new())
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        async fn enter(&self) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            match &self.fail_with {
                Some(message) => Err(HelpdeskError::RequestFailed(message.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl TicketApi for TestApi {
        async fn list_tickets(&self) -> Result<Vec<Ticket>> {
            self.enter().await?;
            Ok(self.tickets.lock().unwrap().clone())
        }

        async fn fetch_ticket(&self, id: TicketId) -> Result<Option<Ticket>> {
            self.enter().await?;
            Ok(self.tickets.lock().unwrap().iter().find(|t| t.id == id).cloned())
        }

        async fn update_ticket_status(
            &self,
            id: TicketId,
            status: TicketStatus,
        ) -> Result<Option<Ticket>> {
            self.enter().await?;
            let mut tickets = self.tickets.lock().unwrap();
            match tickets.iter_mut().find(|t| t.id == id) {
                Some(ticket) => {
                    ticket.set_status(status);
                    Ok(Some(ticket.clone()))
                }
                None => Ok(None),
            }
        }
    }

    fn sample_tickets() -> Vec<Ticket> {
        fixture::demo_tickets()
    }

    fn store_over(api: TestApi) -> TicketStore {
        TicketStore::new(Arc::new(api))
    }

    #[tokio::test]
    async fn test_load_tickets_populates_collection() {
        let tickets = sample_tickets();
        let mut store = store_over(TestApi::new(tickets.clone()));

        let result = store.load_tickets().await;

        assert_eq!(result, tickets);
        assert_eq!(store.state().tickets, tickets);
        assert!(!store.state().loading);
        assert!(store.state().error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_is_true_strictly_while_pending() {
        let api = TestApi::new(sample_tickets()).with_delay(Duration::from_millis(100));
        let mut store = store_over(api);
        let mut rx = store.subscribe();

        assert!(!store.state().loading);

        let observer = async {
            rx.changed().await.unwrap();
            let mid_flight = rx.borrow_and_update().loading;
            assert!(mid_flight, "loading should be true while request pending");
        };
        let (_, result) = tokio::join!(observer, store.load_tickets());

        assert!(!result.is_empty());
        assert!(!store.state().loading);
    }

    #[tokio::test]
    async fn test_load_tickets_failure_keeps_prior_collection() {
        let tickets = sample_tickets();
        let mut store = store_over(TestApi::new(tickets.clone()));
        store.load_tickets().await;

        store.api = Arc::new(TestApi::failing("network unreachable"));
        let result = store.load_tickets().await;

        assert!(result.is_empty());
        assert_eq!(store.state().tickets, tickets);
        assert_eq!(store.state().error.as_deref(), Some("Request failed: network unreachable"));
        assert!(!store.state().loading);
    }

    #[tokio::test]
    async fn test_error_clears_on_next_operation() {
        let mut store = store_over(TestApi::failing("boom"));
        store.load_tickets().await;
        assert!(store.state().error.is_some());

        store.api = Arc::new(TestApi::new(sample_tickets()));
        store.load_tickets().await;
        assert!(store.state().error.is_none());
    }

    #[tokio::test]
    async fn test_load_ticket_sets_current() {
        let mut store = store_over(TestApi::new(sample_tickets()));

        let ticket = store.load_ticket(TicketId::new(2)).await;

        assert_eq!(ticket.as_ref().map(|t| t.id), Some(TicketId::new(2)));
        assert_eq!(store.state().current, ticket);
        assert!(store.state().error.is_none());
    }

    #[tokio::test]
    async fn test_load_unknown_ticket_is_absence_not_error() {
        let mut store = store_over(TestApi::new(sample_tickets()));

        let ticket = store.load_ticket(TicketId::new(999)).await;

        assert!(ticket.is_none());
        assert!(store.state().current.is_none());
        assert!(store.state().error.is_none());
    }

    #[tokio::test]
    async fn test_cache_current_policy_skips_refetch() {
        let api = Arc::new(TestApi::new(sample_tickets()));
        let mut store =
            TicketStore::new(api.clone()).with_detail_policy(DetailFetchPolicy::CacheCurrent);

        store.load_ticket(TicketId::new(1)).await;
        assert_eq!(api.call_count(), 1);

        let ticket = store.load_ticket(TicketId::new(1)).await;
        assert_eq!(api.call_count(), 1, "cached id must not hit the API");
        assert_eq!(ticket.map(|t| t.id), Some(TicketId::new(1)));

        // a different id still fetches
        store.load_ticket(TicketId::new(2)).await;
        assert_eq!(api.call_count(), 2);
    }

    #[tokio::test]
    async fn test_always_refetch_policy_hits_api_every_time() {
        let api = Arc::new(TestApi::new(sample_tickets()));
        let mut store =
            TicketStore::new(api.clone()).with_detail_policy(DetailFetchPolicy::AlwaysRefetch);

        store.load_ticket(TicketId::new(1)).await;
        store.load_ticket(TicketId::new(1)).await;

        assert_eq!(api.call_count(), 2);
    }

    #[tokio::test]
    async fn test_update_replaces_exactly_one_entry() {
        let tickets = sample_tickets();
        let mut store = store_over(TestApi::new(tickets.clone()));
        store.load_tickets().await;

        let updated = store
            .update_ticket_status(TicketId::new(1), TicketStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(updated.status, TicketStatus::InProgress);

        let state = store.state();
        assert_eq!(state.tickets.len(), tickets.len());
        for (before, after) in tickets.iter().zip(&state.tickets) {
            assert_eq!(after.id, before.id);
            if before.id == TicketId::new(1) {
                assert_eq!(after.status, TicketStatus::InProgress);
            } else {
                assert_eq!(after, before);
            }
        }
    }

    #[tokio::test]
    async fn test_update_unknown_id_leaves_collection_unchanged() {
        let tickets = sample_tickets();
        let mut store = store_over(TestApi::new(tickets.clone()));
        store.load_tickets().await;

        let result = store
            .update_ticket_status(TicketId::new(999), TicketStatus::Closed)
            .await;

        assert!(result.is_none());
        assert_eq!(store.state().tickets, tickets);
        assert!(store.state().error.is_none());
    }

    #[tokio::test]
    async fn test_update_refreshes_current_only_for_same_id() {
        let mut store = store_over(TestApi::new(sample_tickets()));
        store.load_tickets().await;
        store.load_ticket(TicketId::new(1)).await;

        // updating a different ticket leaves the detail record alone
        store
            .update_ticket_status(TicketId::new(2), TicketStatus::Closed)
            .await;
        assert_eq!(
            store.state().current.as_ref().map(|t| t.id),
            Some(TicketId::new(1))
        );

        // updating the held ticket refreshes it
        store
            .update_ticket_status(TicketId::new(1), TicketStatus::Closed)
            .await;
        let current = store.state().current.as_ref().unwrap();
        assert_eq!(current.id, TicketId::new(1));
        assert_eq!(current.status, TicketStatus::Closed);
    }

    #[tokio::test]
    async fn test_update_failure_leaves_everything_untouched() {
        let tickets = sample_tickets();
        let mut store = store_over(TestApi::new(tickets.clone()));
        store.load_tickets().await;

        store.api = Arc::new(TestApi::failing("timeout"));
        let result = store
            .update_ticket_status(TicketId::new(1), TicketStatus::Closed)
            .await;

        assert!(result.is_none());
        assert_eq!(store.state().tickets, tickets);
        assert_eq!(store.state().error.as_deref(), Some("Request failed: timeout"));
    }

    #[tokio::test]
    async fn test_filter_preserves_order_and_subsequence() {
        let mut store = store_over(TestApi::new(sample_tickets()));
        let all = store.load_tickets().await;

        for status in TicketStatus::ALL {
            let filtered = store.tickets_by_status(status);
            let expected: Vec<_> = all.iter().filter(|t| t.status == status).cloned().collect();
            assert_eq!(filtered, expected);
        }
    }

    #[tokio::test]
    async fn test_status_change_moves_ticket_between_filters() {
        // fixture ticket 1 starts as new
        let mut store = store_over(TestApi::new(sample_tickets()));
        store.load_tickets().await;
        assert!(store
            .tickets_by_status(TicketStatus::New)
            .iter()
            .any(|t| t.id == TicketId::new(1)));

        let updated = store
            .update_ticket_status(TicketId::new(1), TicketStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(updated.status, TicketStatus::InProgress);

        assert!(!store
            .tickets_by_status(TicketStatus::New)
            .iter()
            .any(|t| t.id == TicketId::new(1)));
        assert!(store
            .tickets_by_status(TicketStatus::InProgress)
            .iter()
            .any(|t| t.id == TicketId::new(1)));
    }

    #[tokio::test]
    async fn test_filter_on_empty_store() {
        let store = store_over(TestApi::new(Vec::new()));
        assert!(store.tickets_by_status(TicketStatus::New).is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_sees_final_snapshot() {
        let mut store = store_over(TestApi::new(sample_tickets()));
        let mut rx = store.subscribe();

        store.load_tickets().await;

        assert!(rx.has_changed().unwrap());
        let snapshot = rx.borrow_and_update();
        assert!(!snapshot.loading);
        assert_eq!(snapshot.tickets.len(), sample_tickets().len());
    }
}
